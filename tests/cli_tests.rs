use predicates::str::contains;
use std::fs;

mod common;
use common::{init_sheet, rta, script, setup_test_db, temp_out, test_config};

// ---------------------------
// init / scan / show
// ---------------------------

#[test]
fn test_init_seeds_sheet() {
    let db = setup_test_db("cli_init");
    let conf = test_config("cli_init", "");

    rta()
        .args(["--db", &db, "--config", &conf, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Sheet seeded with 5 students."))
        .stdout(contains("initialization completed"));

    rta()
        .args(["--db", &db, "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("Last Name"))
        .stdout(contains("Student"))
        .stdout(contains("5 students, 0 check-ins in total"));
}

#[test]
fn test_init_keeps_existing_attendance() {
    let db = setup_test_db("cli_init_keep");
    let conf = test_config("cli_init_keep", "");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "0"])
        .assert()
        .success();

    rta()
        .args(["--db", &db, "--config", &conf, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("attendance kept"));

    rta()
        .args(["--db", &db, "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("1 check-ins in total"));

    rta()
        .args(["--db", &db, "--config", &conf, "--test", "init", "--force"])
        .assert()
        .success()
        .stdout(contains("Sheet seeded with 5 students."));

    rta()
        .args(["--db", &db, "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("0 check-ins in total"));
}

#[test]
fn test_scan_increments_counter() {
    let db = setup_test_db("cli_scan");
    let conf = test_config("cli_scan", "");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "2"])
        .assert()
        .success()
        .stdout(contains("Attendance for student 2 (Student 003): 1"));

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "2"])
        .assert()
        .success()
        .stdout(contains("Attendance for student 2 (Student 003): 2"));

    rta()
        .args(["--db", &db, "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("5 students, 2 check-ins in total"));
}

#[test]
fn test_scan_rejects_out_of_range_student() {
    let db = setup_test_db("cli_scan_invalid");
    let conf = test_config("cli_scan_invalid", "");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "7"])
        .assert()
        .failure()
        .stderr(contains("Invalid student id 7"));

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "-1"])
        .assert()
        .failure()
        .stderr(contains("Invalid student id -1"));

    rta()
        .args(["--db", &db, "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("0 check-ins in total"));
}

#[test]
fn test_commands_require_initialized_database() {
    let db = setup_test_db("cli_no_init");
    let conf = test_config("cli_no_init", "");

    for args in [vec!["scan", "--student", "0"], vec!["show"], vec!["reset", "--force"]] {
        rta()
            .args(["--db", &db, "--config", &conf])
            .args(&args)
            .assert()
            .failure()
            .stderr(contains("Connectivity unavailable"));
    }

    assert!(!std::path::Path::new(&db).exists(), "database must not be created implicitly");
}

#[test]
fn test_max_students_from_config() {
    let db = setup_test_db("cli_max");
    let conf = test_config("cli_max", "max_students: 3\nsheet_name: Roll\n");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "2"])
        .assert()
        .success();

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "3"])
        .assert()
        .failure()
        .stderr(contains("expected a value in 0..3"));

    rta()
        .args(["--db", &db, "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("3 students, 1 check-ins in total"));
}

#[test]
fn test_roster_file_names_students() {
    let db = setup_test_db("cli_roster");
    let roster = temp_out("cli_roster_students", "csv");
    fs::write(&roster, "last_name,first_name\nRossi,Anna\nVerdi,Luca\n").expect("write roster");
    let conf = test_config("cli_roster", &format!("max_students: 2\nroster: {roster}\n"));
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "1"])
        .assert()
        .success()
        .stdout(contains("Attendance for student 1 (Luca Verdi): 1"));
}

#[test]
fn test_roster_size_mismatch_fails() {
    let db = setup_test_db("cli_roster_bad");
    let roster = temp_out("cli_roster_bad_students", "csv");
    fs::write(&roster, "last_name,first_name\nRossi,Anna\n").expect("write roster");
    let conf = test_config("cli_roster_bad", &format!("max_students: 3\nroster: {roster}\n"));

    rta()
        .args(["--db", &db, "--config", &conf, "--test", "init"])
        .assert()
        .failure()
        .stderr(contains("Roster error"));
}

#[test]
fn test_relative_db_resolves_inside_config_dir() {
    let home = std::env::temp_dir().join("cli_relative_db_home");
    fs::remove_dir_all(&home).ok();
    fs::create_dir_all(&home).expect("create home");
    let conf = test_config("cli_relative_db", "");

    rta()
        .env("HOME", &home)
        .args(["--db", "relative.sqlite", "--config", &conf, "--test", "init"])
        .assert()
        .success();

    assert!(home.join(".rattendance").join("relative.sqlite").is_file());

    rta()
        .env("HOME", &home)
        .args(["--db", "relative.sqlite", "--config", &conf, "scan", "--student", "1"])
        .assert()
        .success()
        .stdout(contains("Attendance for student 1 (Student 002): 1"));

    rta()
        .env("HOME", &home)
        .args(["--db", "relative.sqlite", "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("5 students, 1 check-ins in total"));
}

#[test]
fn test_oversized_class_is_rejected_at_load() {
    let db = setup_test_db("cli_max_limit");
    let conf = test_config("cli_max_limit", "max_students: 4294967295\n");

    rta()
        .args(["--db", &db, "--config", &conf, "--test", "init"])
        .assert()
        .failure()
        .stderr(contains("max_students is 4294967295"));
}

// ---------------------------
// run
// ---------------------------

#[test]
fn test_run_scripted_session() {
    let db = setup_test_db("cli_run");
    let conf = test_config("cli_run", "");
    init_sheet(&db, &conf);
    let reader = script("cli_run", "0 1 1 1 0 1 0\n");

    rta()
        .args([
            "--db", &db, "--config", &conf, "run", "--script", &reader, "--student", "1",
            "--no-wait",
        ])
        .assert()
        .success()
        .stdout(contains("Link up, waiting for cards"))
        .stdout(contains("Card detected → student 1 (Student 002)"))
        .stdout(contains("Card removed"))
        .stdout(contains("8 cycles, 2 arrivals (2 credited, 0 failed), 2 removals"));

    rta()
        .args(["--db", &db, "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("2 check-ins in total"));
}

#[test]
fn test_run_reads_script_from_stdin() {
    let db = setup_test_db("cli_run_stdin");
    let conf = test_config("cli_run_stdin", "");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "run", "--student", "4", "--no-wait"])
        .write_stdin("# one tap\n1*3 0\n")
        .assert()
        .success()
        .stdout(contains("Attendance for student 4 (Student 005): 1"))
        .stdout(contains("1 arrivals (1 credited, 0 failed), 1 removals"));
}

#[test]
fn test_run_invalid_student_does_not_stop_loop() {
    let db = setup_test_db("cli_run_invalid");
    let conf = test_config("cli_run_invalid", "");
    init_sheet(&db, &conf);
    let reader = script("cli_run_invalid", "1 0 1 0");

    rta()
        .args([
            "--db", &db, "--config", &conf, "run", "--script", &reader, "--student", "9",
            "--no-wait",
        ])
        .assert()
        .success()
        .stderr(contains("Invalid student id 9"))
        .stdout(contains("2 arrivals (0 credited, 2 failed), 2 removals"));
}

#[test]
fn test_run_seeded_random_student() {
    let db = setup_test_db("cli_run_seed");
    let conf = test_config("cli_run_seed", "seed: 11\n");
    init_sheet(&db, &conf);
    let reader = script("cli_run_seed", "1 0 1 0 1 0");

    rta()
        .args(["--db", &db, "--config", &conf, "run", "--script", &reader, "--no-wait"])
        .assert()
        .success()
        .stdout(contains("3 arrivals (3 credited, 0 failed)"));

    rta()
        .args(["--db", &db, "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("3 check-ins in total"));
}

#[test]
fn test_run_cycle_limit() {
    let db = setup_test_db("cli_run_cycles");
    let conf = test_config("cli_run_cycles", "");
    init_sheet(&db, &conf);
    let reader = script("cli_run_cycles", "0*50 1 0");

    rta()
        .args([
            "--db", &db, "--config", &conf, "run", "--script", &reader, "--cycles", "10",
            "--no-wait",
        ])
        .assert()
        .success()
        .stdout(contains("10 cycles, 0 arrivals"));
}

#[test]
fn test_run_dry_run_leaves_database_alone() {
    let db = setup_test_db("cli_run_dry");
    let conf = test_config("cli_run_dry", "");
    let reader = script("cli_run_dry", "1 0 1 0");

    rta()
        .args([
            "--db", &db, "--config", &conf, "run", "--script", &reader, "--student", "0",
            "--dry-run", "--no-wait",
        ])
        .assert()
        .success()
        .stdout(contains("Attendance for student 0 (Student 001): 2"))
        .stdout(contains("Dry run"))
        .stdout(contains("5 students, 2 check-ins in total"));

    assert!(!std::path::Path::new(&db).exists());
}

#[test]
fn test_run_rejects_bad_script() {
    let db = setup_test_db("cli_run_bad_script");
    let conf = test_config("cli_run_bad_script", "");
    init_sheet(&db, &conf);
    let reader = script("cli_run_bad_script", "0 1\n0 maybe\n");

    rta()
        .args(["--db", &db, "--config", &conf, "run", "--script", &reader, "--no-wait"])
        .assert()
        .failure()
        .stderr(contains("Invalid reader script token 'maybe' at line 2"));
}

// ---------------------------
// reset / log
// ---------------------------

#[test]
fn test_reset_zeroes_counters() {
    let db = setup_test_db("cli_reset");
    let conf = test_config("cli_reset", "");
    init_sheet(&db, &conf);

    for id in ["0", "0", "3"] {
        rta()
            .args(["--db", &db, "--config", &conf, "scan", "--student", id])
            .assert()
            .success();
    }

    rta()
        .args(["--db", &db, "--config", &conf, "reset", "--force"])
        .assert()
        .success()
        .stdout(contains("Attendance reset for 5 students."));

    rta()
        .args(["--db", &db, "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("0 check-ins in total"));
}

#[test]
fn test_reset_can_be_declined() {
    let db = setup_test_db("cli_reset_declined");
    let conf = test_config("cli_reset_declined", "");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "1"])
        .assert()
        .success();

    rta()
        .args(["--db", &db, "--config", &conf, "reset"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Reset cancelled."));

    rta()
        .args(["--db", &db, "--config", &conf, "show"])
        .assert()
        .success()
        .stdout(contains("1 check-ins in total"));
}

#[test]
fn test_log_journals_activity() {
    let db = setup_test_db("cli_log");
    let conf = test_config("cli_log", "");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "1"])
        .assert()
        .success();
    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "8"])
        .assert()
        .failure();

    rta()
        .args(["--db", &db, "--config", &conf, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("init"))
        .stdout(contains("credit"))
        .stdout(contains("invalid_student"));

    rta()
        .args(["--db", &db, "--config", &conf, "log"])
        .assert()
        .success()
        .stdout(contains("3 migrations"))
        .stdout(contains("Credits    : 1"))
        .stdout(contains("Rejected   : 1"));
}

// ---------------------------
// export / backup
// ---------------------------

#[test]
fn test_export_csv() {
    let db = setup_test_db("cli_export_csv");
    let conf = test_config("cli_export_csv", "");
    let out = temp_out("cli_export_csv", "csv");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "0"])
        .assert()
        .success();

    rta()
        .args(["--db", &db, "--config", &conf, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read csv");
    assert!(content.starts_with("id,last_name,first_name,attendance,exported_at"));
    assert!(content.contains("0,001,Student,1,"));
    assert_eq!(content.lines().count(), 6);
}

#[test]
fn test_export_json() {
    let db = setup_test_db("cli_export_json");
    let conf = test_config("cli_export_json", "");
    let out = temp_out("cli_export_json", "json");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "scan", "--student", "4"])
        .assert()
        .success();

    rta()
        .args(["--db", &db, "--config", &conf, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[4]["attendance"], 1);
    assert_eq!(rows[4]["last_name"], "005");
}

#[test]
fn test_export_xlsx() {
    let db = setup_test_db("cli_export_xlsx");
    let conf = test_config("cli_export_xlsx", "");
    let out = temp_out("cli_export_xlsx", "xlsx");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "export", "--format", "xlsx", "--file", &out])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    assert!(fs::metadata(&out).expect("xlsx written").len() > 0);
}

#[test]
fn test_export_requires_absolute_path() {
    let db = setup_test_db("cli_export_rel");
    let conf = test_config("cli_export_rel", "");
    init_sheet(&db, &conf);

    rta()
        .args(["--db", &db, "--config", &conf, "export", "--file", "relative.csv"])
        .assert()
        .failure();
}

#[test]
fn test_backup_copy_and_zip() {
    let db = setup_test_db("cli_backup");
    let conf = test_config("cli_backup", "");
    init_sheet(&db, &conf);

    let copy = temp_out("cli_backup_copy", "sqlite");
    rta()
        .args(["--db", &db, "--config", &conf, "backup", "--file", &copy])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(std::path::Path::new(&copy).exists());

    let raw = temp_out("cli_backup_zip", "sqlite");
    let zipped = temp_out("cli_backup_zip", "zip");
    rta()
        .args(["--db", &db, "--config", &conf, "backup", "--file", &raw, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(fs::metadata(&zipped).expect("zip written").len() > 0);
    assert!(!std::path::Path::new(&raw).exists(), "uncompressed copy is removed");
}

// ---------------------------
// config
// ---------------------------

#[test]
fn test_config_check_and_migrate() {
    let conf = test_config("cli_config", "max_students: 8\n");

    rta()
        .args(["--config", &conf, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Missing key: sheet_id"));

    rta()
        .args(["--config", &conf, "config", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Added to configuration"));

    rta()
        .args(["--config", &conf, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration file is complete."));

    let content = fs::read_to_string(&conf).expect("read config");
    assert!(content.contains("max_students: 8"));
    assert!(content.contains("poll_interval_ms: 100"));
}

#[test]
fn test_config_print_shows_effective_values() {
    let conf = test_config("cli_config_print", "sheet_name: Roll\n");

    rta()
        .args(["--config", &conf, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("sheet_name: Roll"))
        .stdout(contains("max_students: 5"));
}
