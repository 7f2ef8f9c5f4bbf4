use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_create_command() {
    let temp_dir = tempdir().unwrap();
    let migrations_dir = temp_dir.path().join("migrations");

    let bin_path = env!("CARGO_BIN_EXE_migrate");

    let output = Command::new(bin_path)
        .arg("create")
        .arg("add-users")
        .arg("--migrations-dir")
        .arg(&migrations_dir)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Migration created in"));

    // Exactly one new, empty file whose stamp round-trips through the
    // scanner's parser
    let entries: Vec<_> = fs::read_dir(&migrations_dir)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(entries.len(), 1);
    let filename = entries[0].file_name().to_string_lossy().into_owned();
    assert!(filename.ends_with("-add-users.sql"));
    sql_migrate::migrations::parse_timestamp(&filename).unwrap();
    assert_eq!(fs::read_to_string(entries[0].path()).unwrap(), "");

    // A second create in the same minute collides on the filename and
    // must refuse to clobber. If the clock rolled over to the next
    // minute between the two runs, it gets a fresh name instead.
    let output = Command::new(bin_path)
        .arg("create")
        .arg("add-users")
        .arg("--migrations-dir")
        .arg(&migrations_dir)
        .output()
        .expect("Failed to execute command");
    let entries = fs::read_dir(&migrations_dir).unwrap().count();
    if entries == 1 {
        assert!(!output.status.success());
    } else {
        assert!(output.status.success());
        assert_eq!(entries, 2);
    }
}

#[test]
fn test_create_command_without_name() {
    let temp_dir = tempdir().unwrap();
    let migrations_dir = temp_dir.path().join("migrations");

    let output = Command::new(env!("CARGO_BIN_EXE_migrate"))
        .arg("create")
        .arg("--migrations-dir")
        .arg(&migrations_dir)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let entries: Vec<_> = fs::read_dir(&migrations_dir)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(entries.len(), 1);
    let filename = entries[0].file_name().to_string_lossy().into_owned();
    // Bare stamp, no name part: `yymmdd-HHMM.sql`
    assert_eq!(filename.len(), 15);
    sql_migrate::migrations::parse_timestamp(&filename).unwrap();
}

#[test]
fn test_status_without_db_config_fails() {
    // Run from an empty directory so no .env is picked up; the missing
    // connection settings must produce a non-zero exit naming the
    // variable, before any connection attempt.
    let temp_dir = tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_migrate"))
        .current_dir(temp_dir.path())
        .env_clear()
        .arg("status")
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DB_USER"));
}

#[test]
fn test_unknown_command_exits_nonzero() {
    let output = Command::new(env!("CARGO_BIN_EXE_migrate"))
        .arg("frobnicate")
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
}
