use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FLIXBUS: &str = "\
FlixBus booking confirmation
Booking number: #3012345678
07/20/2026, 8:15 am
Berlin central bus station
07/20/2026, 12:40 pm
Hamburg ZOB
Line N1234  Seat 12A
Total 25.98 $
";

const PRICELINE: &str = "\
Your priceline itinerary
Confirmation Number: 88231904
Mid-size SUV or similar
Dec 30 - Jan 3 • Pick-up: 9:30 AM
Booked on Nov 2, 2026
Total cost: $ 412.87
";

const UNITED: &str = "\
United Airlines
Confirmation Number: K7XQ2M

Flight 1 of 1 UA924
Thu, Jun 25, 2026 Fri, Jun 26, 2026
5:40 PM 11:55 AM
San Francisco, CA, US (SFO) Zurich, CH (ZRH)

Total: 1,210.40 USD
";

fn itin() -> Command {
    Command::cargo_bin("itin").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_parse_flight_json() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "united.txt", UNITED);

    itin()
        .arg("parse")
        .arg(&input)
        .args(["--kind", "flight"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"flight_number\""))
        .stdout(predicate::str::contains("UA924"))
        .stdout(predicate::str::contains("K7XQ2M"));
}

#[test]
fn test_parse_transportation_csv() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "trip.txt", &format!("{}\n{}", FLIXBUS, PRICELINE));

    itin()
        .arg("parse")
        .arg(&input)
        .args(["--kind", "transportation", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bus,FlixBus"))
        .stdout(predicate::str::contains("car,Priceline,Priceline - Midsize"));
}

#[test]
fn test_parse_unknown_vendor_hints_manual_entry() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "note.txt", "Dinner reservation at 8pm, table for two.");

    itin()
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No bookings recognized"));
}

#[test]
fn test_parse_missing_file_fails() {
    itin()
        .args(["parse", "/nonexistent/confirmation.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_parse_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bus.txt", FLIXBUS);
    let output = dir.path().join("bus.json");

    itin()
        .arg("parse")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["record"]["kind"], "ground_transport");
}

#[test]
fn test_batch_writes_one_file_per_input() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bus.txt", FLIXBUS);
    write(&dir, "car.txt", PRICELINE);
    write(&dir, "ignored.csv", "a,b");
    let out_dir = dir.path().join("out");
    let pattern = dir.path().join("*").to_string_lossy().to_string();

    itin()
        .arg("batch")
        .arg(&pattern)
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 files"));

    assert!(out_dir.join("bus.json").exists());
    assert!(out_dir.join("car.json").exists());
    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,records"));
    assert_eq!(summary.lines().count(), 3);
}

#[test]
fn test_batch_no_matches_fails() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.pdf").to_string_lossy().to_string();

    itin()
        .arg("batch")
        .arg(&pattern)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn test_import_preview_does_not_write() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bus.txt", FLIXBUS);
    let store = dir.path().join("store.json");

    itin()
        .arg("import")
        .arg(&input)
        .args(["--kind", "transportation", "--trip", "trip-1", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview only"));

    assert!(!store.exists());
}

#[test]
fn test_import_commits_into_store() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "trip.txt", &format!("{}\n{}", FLIXBUS, PRICELINE));
    let store = dir.path().join("store.json");

    itin()
        .arg("import")
        .arg(&input)
        .args(["--kind", "transportation", "--trip", "trip-1", "--yes", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 2 record(s) into trip trip-1"));

    let data: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    let ground = data["collections"]["ground_transport"].as_array().unwrap();
    let cars = data["collections"]["car_rentals"].as_array().unwrap();
    assert_eq!(ground.len(), 1);
    assert_eq!(cars.len(), 1);
    assert_eq!(ground[0]["trip_id"], "trip-1");
    assert_eq!(cars[0]["pickup_location"], "");
}

#[test]
fn test_import_requires_trip() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "bus.txt", FLIXBUS);

    itin()
        .arg("import")
        .arg(&input)
        .args(["--kind", "transportation"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--trip"));
}

#[test]
fn test_config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    itin()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    itin()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "import.default_currency", "EUR"])
        .assert()
        .success();

    itin()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "import.default_currency"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"EUR\""));

    itin()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "import.nope"])
        .assert()
        .failure();
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();

    itin()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_set_rejects_bad_time() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    itin()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "import.check_in_time", "3pm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("import.check_in_time"));

    assert!(!config.exists());
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("missing.json");

    itin()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"check_in_time\": \"15:00\""))
        .stderr(predicate::str::contains("defaults"));

    assert!(!config.exists());
}
