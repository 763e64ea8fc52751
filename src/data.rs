use crate::model::Record;
use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

const FALLBACK_DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d-%m-%Y",
];

/// Timestamp formats written by exports of datetime columns; the time is dropped.
const FALLBACK_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Revenue")]
    revenue: f64,
    #[serde(rename = "Cost")]
    cost: f64,
    #[serde(rename = "Marketing_Spend")]
    marketing_spend: f64,
    #[serde(rename = "Employee_Salary")]
    employee_salary: f64,
    #[serde(rename = "Operational_Expense")]
    operational_expense: f64,
    #[serde(rename = "Profit")]
    profit: f64,
}

/// Ordered, immutable sequence of records.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from records already in memory.
    ///
    /// # Errors
    /// Returns an error if `records` is empty.
    pub fn new(records: Vec<Record>) -> Result<Self> {
        if records.is_empty() {
            bail!("dataset contains no records");
        }
        Ok(Self { records })
    }

    /// Load a dataset from a CSV file with a header row.
    pub fn from_csv<P: AsRef<Path>>(file: P, date_format: &str) -> Result<Self> {
        let file = file.as_ref();
        let reader = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        Self::from_reader(reader, date_format).with_context(|| format!("failed to load {file:?}"))
    }

    pub fn from_reader<R: Read>(reader: R, date_format: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (i_row, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row_num = i_row + 1;
            let row = row.with_context(|| format!("failed to parse row {row_num}"))?;
            let date = parse_date(&row.date, date_format)
                .with_context(|| format!("failed to parse date in row {row_num}"))?;
            records.push(Record {
                date,
                revenue: row.revenue,
                cost: row.cost,
                marketing_spend: row.marketing_spend,
                employee_salary: row.employee_salary,
                operational_expense: row.operational_expense,
                profit: row.profit,
            });
        }

        Self::new(records)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

fn parse_date(s: &str, primary_format: &str) -> Result<NaiveDate> {
    std::iter::once(primary_format)
        .chain(FALLBACK_DATE_FORMATS)
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .or_else(|| {
            FALLBACK_DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
                .map(|datetime| datetime.date())
        })
        .with_context(|| format!("unrecognized date {s:?}"))
}
