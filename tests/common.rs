#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rta() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Temporary file path inside tempdir, removed if present
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a configuration file for one test and return its path.
/// An empty `yaml` leaves no file behind, so defaults apply.
pub fn test_config(name: &str, yaml: &str) -> String {
    let p = temp_out(&format!("{name}_config"), "conf");
    if !yaml.is_empty() {
        fs::write(&p, yaml).expect("write test config");
    }
    p
}

/// Run `init` in test mode against the given database and config.
pub fn init_sheet(db_path: &str, config: &str) {
    rta()
        .args(["--db", db_path, "--config", config, "--test", "init"])
        .assert()
        .success();
}

/// Write a reader script and return its path.
pub fn script(name: &str, content: &str) -> String {
    let p = temp_out(&format!("{name}_script"), "txt");
    fs::write(&p, content).expect("write reader script");
    p
}
