//! End-to-end runs with `true` standing in for the opener and `PowerLog`.

#![cfg(unix)]

use std::fs;
use std::time::Duration;

use powerbench_core::analysis::Report;
use powerbench_core::bench;
use powerbench_core::config::BenchConfig;
use powerbench_core::error::BenchError;
use powerbench_core::launcher::DemoFlag;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const LOG: &str = "System Time,RDTSC,Elapsed Time (sec), CPU Utilization(%),Processor Power_0(Watt),IA Power_0(Watt)
09:15:01:000,100,1.0, 5.0,9.50,7.25
09:15:02:000,200,2.0, 5.0,3.00,1.00
09:15:03:000,300,3.0, 5.0,2.50,0.75
09:15:04:000,400,4.0, 5.0,4.00,1.25
09:15:05:000,500,5.0, 5.0,0.00,0.00
09:15:06:000,600,6.0, 5.0,5.00,2.00
09:15:07:000,700,7.0, 5.0,3.50,1.00

Total Elapsed Time (sec) = 7.0
";

fn stand_in_config(dir: &TempDir) -> BenchConfig {
    BenchConfig {
        app_path: dir.path().join("IOSurface compositing.app"),
        opener: "true".to_string(),
        powerlog_path: "true".into(),
        csv_path: dir.path().join("powerlog.csv"),
        duration: Duration::from_secs(1),
        flags: vec![DemoFlag::UseIosurface],
    }
}

#[test]
fn test_run_reads_log_left_by_logger() {
    let dir = TempDir::new().unwrap();
    let config = stand_in_config(&dir);
    fs::write(&config.csv_path, LOG).unwrap();

    let report = bench::run(&config, &["--window-size".to_string(), "800".to_string()]).unwrap();

    // Samples past warm-up: 4.0, 3.25, 5.25, 7.0, 4.5 -> lowest one
    assert_eq!(
        report,
        Report::Baseline {
            watts: 3.25,
            samples_used: 1
        }
    );
    assert_eq!(report.to_string(), "Power: 3.25 W");
}

#[test]
fn test_logger_failure_status_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let mut config = stand_in_config(&dir);
    config.powerlog_path = "false".into();
    fs::write(&config.csv_path, LOG).unwrap();

    let report = bench::run(&config, &[]).unwrap();
    assert_eq!(report.watts(), Some(3.25));
}

#[test]
fn test_missing_log_aborts() {
    let dir = TempDir::new().unwrap();
    let config = stand_in_config(&dir);

    let err = bench::run(&config, &[]).unwrap_err();
    assert!(matches!(err, BenchError::Io { .. }));
}

#[test]
fn test_missing_logger_executable_aborts() {
    let dir = TempDir::new().unwrap();
    let mut config = stand_in_config(&dir);
    config.powerlog_path = dir.path().join("no-such-PowerLog");
    fs::write(&config.csv_path, LOG).unwrap();

    match bench::run(&config, &[]).unwrap_err() {
        BenchError::Spawn { program, .. } => assert!(program.ends_with("no-such-PowerLog")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_opener_aborts() {
    let dir = TempDir::new().unwrap();
    let mut config = stand_in_config(&dir);
    config.opener = dir.path().join("no-such-open").display().to_string();

    assert!(matches!(
        bench::run(&config, &[]).unwrap_err(),
        BenchError::Spawn { .. }
    ));
}

#[test]
fn test_launched_app_is_reaped() {
    let dir = TempDir::new().unwrap();
    let config = stand_in_config(&dir);

    let mut app = config.launcher().launch(&[]).unwrap();
    let mut finished = false;
    for _ in 0..100 {
        if app.reap() {
            finished = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    assert!(finished, "`true` should exit promptly");
}
