use std::{env, fs, path::PathBuf, process::Command};

#[test]
fn basic_workflow() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("basic_workflow");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let csv_path = test_dir.join("financial_data.csv");
    let csv_contents = String::new()
        + "Date,Revenue,Cost,Marketing_Spend,Employee_Salary,Operational_Expense,Profit\n"
        + "2024-01-31,12000,4000,1000,3000,2000,2000\n"
        + "2024-02-29,13500,4200,1300,3000,2100,2900\n"
        + "2024-03-31,11800,3900,900,3100,1900,2000\n"
        + "2024-04-30,15000,4500,1500,3200,2300,3500\n";
    fs::write(&csv_path, csv_contents).expect("failed to write csv file");

    let out_dir = test_dir.join("bld");
    let config_path = test_dir.join("config.toml");
    let config_contents = format!(
        "[input]\ncsv_file = {:?}\n\n[output]\ndir = {:?}\n",
        csv_path.to_str().expect("failed to convert csv path to string"),
        out_dir.to_str().expect("failed to convert output dir to string"),
    );
    fs::write(&config_path, config_contents).expect("failed to write config file");

    fn run_bin(args: &[&str]) -> String {
        let bin = PathBuf::from(env!("CARGO_BIN_EXE_finreport"));

        let output = Command::new(bin)
            .args(args)
            .output()
            .expect("failed to execute command");

        let stdout_str =
            std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
        let stderr_str =
            std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");

        assert!(
            output.status.success(),
            "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
        );

        stdout_str.to_string()
    }

    let config_str = config_path
        .to_str()
        .expect("failed to convert config path to string");

    let artifacts = [
        "expense_share_pie_chart.svg",
        "financial_metrics_trend.svg",
        "average_expenses_breakdown.svg",
        "financial_analysis_results.txt",
    ]
    .map(|name| out_dir.join(name));

    let stdout = run_bin(&["--config", config_str, "generate"]);
    assert!(stdout.contains("Analysis complete. Results saved to files."));
    for file in &artifacts {
        assert!(file.is_file(), "missing {file:?}");
    }

    let results = fs::read_to_string(&artifacts[3]).expect("failed to read results");
    assert!(results.starts_with("Cost Expense Ratio: "));
    assert!(results.contains("Summary Statistics:"));
    assert!(results.contains("Operational_Expense_Ratio"));
    assert!(results.contains("Average Expenses:"));

    run_bin(&["--config", config_str, "generate"]);
    let rerun = fs::read_to_string(&artifacts[3]).expect("failed to read results");
    assert_eq!(results, rerun);

    run_bin(&["--config", config_str, "clean"]);
    for file in &artifacts {
        assert!(!file.exists(), "left {file:?}");
    }

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn missing_input_fails() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("missing_input_fails");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    let config_path = test_dir.join("config.toml");
    let config_contents = format!(
        "[input]\ncsv_file = {:?}\n\n[output]\ndir = {:?}\n",
        test_dir.join("absent.csv").to_str().expect("failed to convert path"),
        test_dir.join("bld").to_str().expect("failed to convert path"),
    );
    fs::write(&config_path, config_contents).expect("failed to write config file");

    let output = Command::new(env!("CARGO_BIN_EXE_finreport"))
        .args(["--config", config_path.to_str().expect("failed to convert path"), "generate"])
        .output()
        .expect("failed to execute command");

    assert!(!output.status.success());
    assert!(!test_dir.join("bld").join("financial_analysis_results.txt").exists());

    fs::remove_dir_all(&test_dir).ok();
}
