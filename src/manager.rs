use crate::analysis::{self, RatioTable};
use crate::charts;
use crate::config::Config;
use crate::data::Dataset;
use crate::summary::Report;
use anyhow::{Context, Result};
use std::{fs, path::Path};

pub struct Manager {
    cfg: Config,
}

impl Manager {
    pub fn new(cfg: Config) -> Self {
        log::info!("{cfg:#?}");
        Self { cfg }
    }

    /// Load the dataset, render every chart and write the results file.
    pub fn generate_report(&self) -> Result<()> {
        let input = &self.cfg.input;
        let output = &self.cfg.output;

        let dataset = Dataset::from_csv(&input.csv_file, &input.date_format)
            .context("failed to load dataset")?;
        log::info!("loaded {} records from {:?}", dataset.len(), input.csv_file);

        fs::create_dir_all(&output.dir)
            .with_context(|| format!("failed to create {:?}", output.dir))?;

        let ratios = RatioTable::compute(&dataset).context("failed to compute expense ratios")?;
        let mean_ratios = ratios.means();
        let pie_chart_file = output.pie_chart_file();
        charts::render_pie_chart(&pie_chart_file, &mean_ratios)
            .context("failed to render pie chart")?;
        log::info!("wrote {pie_chart_file:?}");

        let line_chart_file = output.line_chart_file();
        charts::render_trend_chart(&line_chart_file, &dataset)
            .context("failed to render line chart")?;
        log::info!("wrote {line_chart_file:?}");

        let mean_expenses = analysis::mean_expenses(&dataset);
        let bar_chart_file = output.bar_chart_file();
        charts::render_bar_chart(&bar_chart_file, &mean_expenses)
            .context("failed to render bar chart")?;
        log::info!("wrote {bar_chart_file:?}");

        let stats = analysis::describe(&dataset, &ratios);

        let report = Report {
            mean_ratios: &mean_ratios,
            mean_expenses: &mean_expenses,
            stats: &stats,
        };
        let results_file = output.results_file();
        report
            .save(&results_file)
            .context("failed to save results")?;
        log::info!("wrote {results_file:?}");

        println!("Analysis complete. Results saved to files.");

        Ok(())
    }

    /// Remove the artifacts written by [`Manager::generate_report`].
    pub fn clean_outputs(&self) -> Result<()> {
        for file in self.cfg.output.artifact_files() {
            remove_file_if_exists(&file)?;
        }
        Ok(())
    }
}

fn remove_file_if_exists(file: &Path) -> Result<()> {
    if !file.exists() {
        return Ok(());
    }
    fs::remove_file(file).with_context(|| format!("failed to remove {file:?}"))?;
    log::info!("removed {file:?}");
    Ok(())
}
