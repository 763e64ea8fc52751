use crate::analysis::ColumnStats;
use crate::model::PerCategory;
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

const STAT_HEADERS: [&str; 5] = ["mean", "50%", "std", "min", "max"];
const STAT_WIDTH: usize = 18;

/// Everything reported in the results file.
pub struct Report<'a> {
    pub mean_ratios: &'a PerCategory,
    pub mean_expenses: &'a PerCategory,
    pub stats: &'a [ColumnStats],
}

impl Report<'_> {
    /// Write the fixed text layout to `out`.
    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (cat, ratio) in self.mean_ratios.iter() {
            writeln!(out, "{}: {ratio:.1}%", cat.ratio_label())?;
        }
        writeln!(out)?;

        let name_width = self
            .stats
            .iter()
            .map(|col| col.name.len())
            .max()
            .unwrap_or(0);
        writeln!(out, "Summary Statistics:")?;
        write!(out, "{:name_width$}", "")?;
        for header in STAT_HEADERS {
            write!(out, "{header:>STAT_WIDTH$}")?;
        }
        writeln!(out)?;
        for col in self.stats {
            let s = &col.summary;
            write!(out, "{:<name_width$}", col.name)?;
            for val in [s.mean, s.median, s.std_dev, s.min, s.max] {
                write!(out, "{val:>STAT_WIDTH$.6}")?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;

        writeln!(out, "Average Expenses:")?;
        let cat_width = self
            .mean_expenses
            .iter()
            .map(|(cat, _)| cat.column().len())
            .max()
            .unwrap_or(0);
        for (cat, mean) in self.mean_expenses.iter() {
            writeln!(out, "{:<cat_width$}{mean:>STAT_WIDTH$.6}", cat.column())?;
        }

        Ok(())
    }

    /// Write the report, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let handle = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(handle);

        self.write(&mut writer)
            .with_context(|| format!("failed to write {file:?}"))?;
        writer
            .flush()
            .with_context(|| format!("failed to flush {file:?}"))?;

        Ok(())
    }
}
