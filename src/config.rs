use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Report configuration.
///
/// Every field has a default, so an empty file (or no file at all) reproduces
/// the standard layout: `financial_data.csv` in, `bld/` out.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// CSV file with the financial records.
    pub csv_file: PathBuf,
    /// Date format tried before the common fallbacks.
    pub date_format: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            csv_file: PathBuf::from("financial_data.csv"),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving all artifacts (created if absent).
    pub dir: PathBuf,
    pub pie_chart: String,
    pub line_chart: String,
    pub bar_chart: String,
    pub results: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("bld"),
            pie_chart: "expense_share_pie_chart.svg".to_string(),
            line_chart: "financial_metrics_trend.svg".to_string(),
            bar_chart: "average_expenses_breakdown.svg".to_string(),
            results: "financial_analysis_results.txt".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn pie_chart_file(&self) -> PathBuf {
        self.dir.join(&self.pie_chart)
    }

    pub fn line_chart_file(&self) -> PathBuf {
        self.dir.join(&self.line_chart)
    }

    pub fn bar_chart_file(&self) -> PathBuf {
        self.dir.join(&self.bar_chart)
    }

    pub fn results_file(&self) -> PathBuf {
        self.dir.join(&self.results)
    }

    /// All artifact paths, in the order they are produced.
    pub fn artifact_files(&self) -> [PathBuf; 4] {
        [
            self.pie_chart_file(),
            self.line_chart_file(),
            self.bar_chart_file(),
            self.results_file(),
        ]
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Missing keys fall back to their defaults; unknown keys are rejected.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.csv_file.as_os_str().is_empty() {
            bail!("input csv file must not be empty");
        }
        if self.input.date_format.trim().is_empty() {
            bail!("date format must not be empty");
        }

        let out = &self.output;
        let names = [
            ("pie chart", &out.pie_chart),
            ("line chart", &out.line_chart),
            ("bar chart", &out.bar_chart),
            ("results", &out.results),
        ];
        for (kind, name) in names {
            check_file_name(name).with_context(|| format!("invalid {kind} file name"))?;
        }
        for (i_name, (kind_a, name_a)) in names.iter().enumerate() {
            for (kind_b, name_b) in &names[i_name + 1..] {
                if name_a == name_b {
                    bail!("{kind_a} and {kind_b} files must differ, but both are {name_a:?}");
                }
            }
        }

        Ok(())
    }
}

fn check_file_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("file name must not be empty");
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(std::path::Component::Normal(_)), None) => Ok(()),
        _ => bail!("file name must be a plain file name, but is {name:?}"),
    }
}
