//! Integration tests for the quote CLI
//!
//! Each test runs the binary in its own temp directory so the default
//! `plasma_units.json` never touches the working tree.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn quote_cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quote_cli").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_configs_lists_catalog() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp)
        .arg("configs")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 x 2 ft"))
        .stdout(predicate::str::contains("400 x 400 mm"))
        .stdout(predicate::str::contains("4 x 4 ft"));
}

#[test]
fn test_configs_json_has_ten_entries() {
    let tmp = TempDir::new().unwrap();
    let value = json_stdout(quote_cli(&tmp).args(["configs", "--json"]));
    assert_eq!(value.as_array().unwrap().len(), 10);
}

#[test]
fn test_quote_json_two_by_two() {
    let tmp = TempDir::new().unwrap();
    let value = json_stdout(quote_cli(&tmp).args(["quote", "2 x 2 ft", "--json"]));

    assert_eq!(value["sell_price"], 710.0);
    assert_eq!(value["total_cost"], 279.28125);
    assert_eq!(value["extrusion_parts"].as_array().unwrap().len(), 3);
    assert_eq!(value["steel_parts"].as_array().unwrap().len(), 2);
}

#[test]
fn test_quote_table_output() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp)
        .args(["quote", "2 x 2 ft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXTRUSION PARTS"))
        .stdout(predicate::str::contains("STEEL FRAME PARTS"))
        .stdout(predicate::str::contains("$710.00"));
}

#[test]
fn test_quote_unknown_config_fails() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp)
        .args(["quote", "9 x 9 ft"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Machine configuration not found"));
}

#[test]
fn test_quote_unknown_config_json_error() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp)
        .args(["quote", "9 x 9 ft", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_NOT_FOUND"));
}

#[test]
fn test_compare_json_sorted_with_summary() {
    let tmp = TempDir::new().unwrap();
    let value = json_stdout(quote_cli(&tmp).args(["compare", "--json"]));

    let results = value["results"].as_array().unwrap();
    assert_eq!(results.len(), 10);
    assert_eq!(results[0]["config_name"], "400 x 400 mm");
    assert!(value["summary"]["lowest_price"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_units_add_list_remove() {
    let tmp = TempDir::new().unwrap();

    quote_cli(&tmp)
        .args(["units", "add", "Cut50", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Cut50"));
    assert!(tmp.path().join("plasma_units.json").exists());

    quote_cli(&tmp)
        .args(["units", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cut50"))
        .stdout(predicate::str::contains("$500.00"));

    quote_cli(&tmp)
        .args(["units", "remove", "Cut50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Cut50"));

    quote_cli(&tmp)
        .args(["units", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plasma units saved."));
}

#[test]
fn test_units_file_flag() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp)
        .args(["units", "add", "Cut50", "500", "--units-file", "shop_units.json"])
        .assert()
        .success();

    let saved = fs::read_to_string(tmp.path().join("shop_units.json")).unwrap();
    assert!(saved.contains("Cut50"));
    assert!(!tmp.path().join("plasma_units.json").exists());
}

#[test]
fn test_units_remove_unknown_is_not_an_error() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp)
        .args(["units", "remove", "Nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plasma unit named"));
    assert!(!tmp.path().join("plasma_units.json").exists());
}

#[test]
fn test_quote_with_plasma_unit() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp).args(["units", "add", "Cut50", "500"]).assert().success();

    let value = json_stdout(quote_cli(&tmp).args(["quote", "2 x 2 ft", "--plasma-unit", "Cut50", "--json"]));
    assert_eq!(value["plasma_unit_cost"], 500.0);
    assert_eq!(value["sell_price"], 1210.0);
}

#[test]
fn test_quote_unknown_plasma_unit_fails() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp)
        .args(["quote", "2 x 2 ft", "--plasma-unit", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plasma unit not found: Ghost"));
}

#[test]
fn test_corrupt_units_file_warns_and_continues() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("plasma_units.json"), "not json").unwrap();

    quote_cli(&tmp)
        .args(["units", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"))
        .stdout(predicate::str::contains("No plasma units saved."));
}

#[test]
fn test_prices_init_then_quote_with_file() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp)
        .args(["prices", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prices.json"));
    assert!(tmp.path().join("prices.json").exists());

    quote_cli(&tmp).args(["prices", "init"]).assert().failure();
    quote_cli(&tmp).args(["prices", "init", "--force"]).assert().success();

    let value = json_stdout(quote_cli(&tmp).args(["quote", "2 x 2 ft", "--prices", "prices.json", "--json"]));
    assert_eq!(value["sell_price"], 710.0);
}

#[test]
fn test_missing_prices_file_fails() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp)
        .args(["compare", "--prices", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_quote_writes_pdf_into_directory() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp)
        .args(["quote", "2 x 2 ft", "--customer", "Acme Fab", "--pdf", "."])
        .assert()
        .success()
        .stderr(predicate::str::contains("Quote_Acme_Fab_"));

    let pdf = fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(Result::ok)
        .find(|e| e.file_name().to_string_lossy().ends_with(".pdf"))
        .unwrap();
    let bytes = fs::read(pdf.path()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_prices_show_includes_selected_plasma_unit() {
    let tmp = TempDir::new().unwrap();
    quote_cli(&tmp).args(["units", "add", "Cut50", "500"]).assert().success();

    quote_cli(&tmp)
        .args(["prices", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plasma unit:      $0.00"));

    quote_cli(&tmp)
        .args(["prices", "show", "--plasma-unit", "Cut50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plasma unit:      $500.00"));
}
