use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "crp-sim-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_compare(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_compare"))
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .expect("run compare")
}

fn json_report(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "compare failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be a JSON report")
}

#[test]
fn compare_emits_json_snapshot() {
    let output = run_compare(&["--json", "--trials", "200"]);
    let v = json_report(&output);

    let path = v["static_path"].as_array().expect("static path present");
    assert_eq!(path.first().and_then(|p| p.as_str()), Some("GATEWAY_WEST"));
    assert_eq!(path.last().and_then(|p| p.as_str()), Some("GATEWAY_EAST"));

    assert_eq!(v["baseline"]["packets"].as_u64(), Some(200));
    assert_eq!(v["baseline"]["success_rate"].as_f64(), Some(1.0));
    assert_eq!(v["adaptive"]["packets"].as_u64(), Some(200));
    let rate = v["adaptive"]["success_rate"].as_f64().expect("success rate");
    assert!((0.0..=1.0).contains(&rate), "rate {rate}");
}

#[test]
fn compare_is_reproducible_for_a_seed() {
    let args = ["--json", "--trials", "300", "--seed", "7"];
    let first = run_compare(&args);
    let second = run_compare(&args);
    assert_eq!(json_report(&first), json_report(&second));
}

#[test]
fn compare_reads_config_file_and_flags_override_it() {
    let dir = unique_temp_dir("compare-config");
    let cfg = dir.join("config.json");
    fs::write(&cfg, r#"{ "trials": 40, "congested_link": null, "seed": 5 }"#)
        .expect("write config");

    let output = run_compare(&["--json", "--config", cfg.to_str().unwrap(), "--trials", "25"]);
    let v = json_report(&output);
    assert_eq!(v["adaptive"]["packets"].as_u64(), Some(25));
    assert_eq!(v["baseline"]["congested_trips"].as_u64(), Some(0));
    assert_eq!(v["adaptive"]["congested_trips"].as_u64(), Some(0));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn compare_rejects_invalid_parameters() {
    let output = run_compare(&["--congestion-prob", "2.0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("congestion probability"), "stderr={stderr}");
}

#[test]
fn compare_prints_human_readable_report() {
    let output = run_compare(&["--trials", "100", "--show-topology"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("NETWORK TOPOLOGY VISUALIZATION"), "{stdout}");
    assert!(stdout.contains("COMPARATIVE ANALYSIS RESULTS"), "{stdout}");
    assert!(stdout.contains("--- STATIC ROUTER (BASELINE) ---"), "{stdout}");
    assert!(stdout.contains("--- ADAPTIVE ROUTER (UCB1) ---"), "{stdout}");
}

#[test]
fn baseline_prints_topology_and_static_route() {
    let output = Command::new(env!("CARGO_BIN_EXE_baseline"))
        .env("RUST_LOG", "warn")
        .output()
        .expect("run baseline");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-> Gateway(ID='GATEWAY_WEST'):"), "{stdout}");
    assert!(stdout.contains("-> Route: GATEWAY_WEST -> "), "{stdout}");
    assert!(stdout.contains("-> Total Latency: "), "{stdout}");
}
