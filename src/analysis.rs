use crate::data::Dataset;
use crate::model::{Category, Metric, PerCategory};
use crate::stats::{Summary, compute_mean};
use anyhow::{Result, bail};

/// Per-record expense shares, in percent of the record's total expense.
///
/// Derived from a [`Dataset`] without touching it; row `i` belongs to record `i`.
#[derive(Debug, Clone)]
pub struct RatioTable {
    rows: Vec<PerCategory>,
}

impl RatioTable {
    /// # Errors
    /// Fails on the first record whose total expense is zero.
    pub fn compute(dataset: &Dataset) -> Result<Self> {
        let mut rows = Vec::with_capacity(dataset.len());
        for (i_rec, rec) in dataset.records().iter().enumerate() {
            let total = rec.total_expense();
            if total == 0.0 {
                bail!("total expense is zero in row {} ({})", i_rec + 1, rec.date);
            }
            rows.push(PerCategory::from_fn(|cat| rec.expense(cat) / total * 100.0));
        }
        Ok(Self { rows })
    }

    pub fn column(&self, cat: Category) -> Vec<f64> {
        self.rows.iter().map(|row| row[cat]).collect()
    }

    /// Arithmetic mean of each ratio column.
    pub fn means(&self) -> PerCategory {
        PerCategory::from_fn(|cat| compute_mean(&self.column(cat)))
    }
}

pub fn metric_column(dataset: &Dataset, metric: Metric) -> Vec<f64> {
    dataset.records().iter().map(|rec| rec.metric(metric)).collect()
}

/// Arithmetic mean of each raw expense column.
pub fn mean_expenses(dataset: &Dataset) -> PerCategory {
    PerCategory::from_fn(|cat| compute_mean(&metric_column(dataset, Metric::Expense(cat))))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub name: &'static str,
    pub summary: Summary,
}

/// Descriptive statistics of every numeric column: the six monetary columns
/// followed by the four ratio columns.
pub fn describe(dataset: &Dataset, ratios: &RatioTable) -> Vec<ColumnStats> {
    let monetary = Metric::ALL.iter().map(|&metric| ColumnStats {
        name: metric.column(),
        summary: Summary::describe(&metric_column(dataset, metric)),
    });
    let ratio = Category::ALL.iter().map(|&cat| ColumnStats {
        name: cat.ratio_column(),
        summary: Summary::describe(&ratios.column(cat)),
    });
    monetary.chain(ratio).collect()
}
