//! Integration tests for the alloyref CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd
//! against a database in a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get an alloyref command pointed at the temp database
fn alloyref(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("alloyref").unwrap();
    cmd.current_dir(tmp.path());
    cmd.env("ALLOYREF_DB", tmp.path().join("alloys.db"));
    cmd
}

/// Helper to create a database seeded with steel 20
fn setup_steel20() -> TempDir {
    let tmp = TempDir::new().unwrap();
    alloyref(&tmp).arg("init").assert().success();
    alloyref(&tmp)
        .args([
            "mat",
            "new",
            "20",
            "--class",
            "Сталь конструкционная",
            "--subclass",
            "углеродистая качественная",
            "--index",
            "2",
        ])
        .assert()
        .success();
    tmp
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    alloyref(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reference"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    alloyref(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("alloyref"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    alloyref(&tmp)
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_creates_database() {
    let tmp = TempDir::new().unwrap();

    alloyref(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created reference database"));

    assert!(tmp.path().join("alloys.db").exists());
}

#[test]
fn test_init_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    alloyref(&tmp).arg("init").assert().success();
    alloyref(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already present"));
}

// ============================================================================
// Material CRUD Tests
// ============================================================================

#[test]
fn test_mat_new_and_list() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["mat", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20"))
        .stdout(predicate::str::contains("1 material(s) found"));
}

#[test]
fn test_mat_new_duplicate_brand_fails() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["mat", "new", "20", "--class", "Сталь"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_mat_list_brand_format_for_piping() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["mat", "list", "--format", "brand"])
        .assert()
        .success()
        .stdout(predicate::eq("20\n"));
}

#[test]
fn test_mat_list_filters_by_class() {
    let tmp = setup_steel20();
    alloyref(&tmp)
        .args(["mat", "new", "110Г13Л", "--class", "Сталь для отливок"])
        .assert()
        .success();

    alloyref(&tmp)
        .args([
            "mat",
            "list",
            "--class",
            "Сталь для отливок",
            "--format",
            "brand",
        ])
        .assert()
        .success()
        .stdout(predicate::eq("110Г13Л\n"));

    alloyref(&tmp)
        .args(["mat", "list", "--index", "2", "--format", "brand"])
        .assert()
        .success()
        .stdout(predicate::eq("20\n"));
}

#[test]
fn test_mat_list_count() {
    let tmp = setup_steel20();
    alloyref(&tmp)
        .args(["mat", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::eq("1\n"));
}

#[test]
fn test_mat_update_and_delete() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["mat", "update", "20", "--class", "Сталь для отливок"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated material"));

    alloyref(&tmp)
        .args(["mat", "update", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));

    alloyref(&tmp)
        .args(["mat", "delete", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted material"));

    alloyref(&tmp)
        .args(["mat", "delete", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no material found"));
}

#[test]
fn test_mat_classes() {
    let tmp = setup_steel20();
    alloyref(&tmp)
        .args(["mat", "classes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Сталь конструкционная"))
        .stdout(predicate::str::contains("1"));
}

// ============================================================================
// Property Tests
// ============================================================================

#[test]
fn test_hardness_set_show_roundtrip() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args([
            "hardness",
            "set",
            "20",
            "Твердость 20 горячекатанного, /HB 10 -1 = 143 МПа; Твердость 20 ,/HB 10 -1 = 163 МПа;",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded hardness"));

    alloyref(&tmp)
        .args(["hardness", "show", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("горячекатанного"))
        .stdout(predicate::str::contains("143"))
        .stdout(predicate::str::contains("mean hardness"))
        .stdout(predicate::str::contains("153"));
}

#[test]
fn test_hardness_set_rejects_undecodable_text() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["hardness", "set", "20", "нет данных"])
        .assert()
        .failure();
}

#[test]
fn test_hardness_show_raw() {
    let tmp = setup_steel20();
    let text = "Твердость 20 ,/HB 10 -1 = 163 МПа;";

    alloyref(&tmp)
        .args(["hardness", "set", "20", text])
        .assert()
        .success();

    alloyref(&tmp)
        .args(["hardness", "show", "20", "--raw"])
        .assert()
        .success()
        .stdout(predicate::eq(format!("{}\n", text)));
}

#[test]
fn test_hardness_for_unknown_brand_fails() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["hardness", "show", "40Х"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("40Х"));
}

#[test]
fn test_chem_set_and_show() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args([
            "chem",
            "set",
            "20",
            "C=0.17 - 0.24",
            "Si=0.17 - 0.37",
            "--standard",
            "ГОСТ 1050 - 2013",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 element(s)"));

    alloyref(&tmp)
        .args(["chem", "show", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("C"))
        .stdout(predicate::str::contains("0.17 - 0.24"))
        .stdout(predicate::str::contains("ГОСТ 1050 - 2013"));
}

#[test]
fn test_chem_set_rejects_unknown_element() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["chem", "set", "20", "Xx=1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown element"));
}

#[test]
fn test_strength_via_mech_set() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args([
            "mech",
            "set",
            "20",
            "--tensile-strength",
            "Механические свойства стали 20 /Прокат ГОСТ 1050-88/410;",
            "--yield-strength",
            "245",
        ])
        .assert()
        .success();

    alloyref(&tmp)
        .args(["strength", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Прокат ГОСТ 1050-88"))
        .stdout(predicate::str::contains("410"))
        .stdout(predicate::str::contains("mean tensile strength"));

    alloyref(&tmp)
        .args(["mech", "show", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("245"));
}

#[test]
fn test_strength_missing_record_fails() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["strength", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no tensile strength"));
}

#[test]
fn test_tech_and_chars_roundtrip() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["tech", "set", "20", "--weldability", "без ограничений"])
        .assert()
        .success();

    alloyref(&tmp)
        .args(["tech", "show", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("без ограничений"));

    alloyref(&tmp)
        .args(["chars", "set", "20", "--application", "трубы, змеевики"])
        .assert()
        .success();

    alloyref(&tmp)
        .args(["chars", "show", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("трубы, змеевики"));

    alloyref(&tmp)
        .args(["chars", "clear", "20"])
        .assert()
        .success();

    alloyref(&tmp)
        .args(["chars", "show", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no characteristics"));
}

#[test]
fn test_standard_list_and_add() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["standard", "add", "20", "ГОСТ 1050 - 2013"])
        .assert()
        .success();

    alloyref(&tmp)
        .args(["standard", "list", "--material", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ГОСТ 1050 - 2013"));
}

// ============================================================================
// Profile Assembly Tests
// ============================================================================

#[test]
fn test_mat_show_assembles_profile_json() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["chem", "set", "20", "C=0.17 - 0.24"])
        .assert()
        .success();
    alloyref(&tmp)
        .args([
            "hardness",
            "set",
            "20",
            "Твердость 20 ,/HB 10 -1 = 163 МПа;",
        ])
        .assert()
        .success();

    let output = alloyref(&tmp)
        .args(["mat", "show", "20", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let profile: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profile["brand"], "20");
    assert_eq!(profile["class_index"], 2);
    assert_eq!(profile["chemical_composition"]["C"], "0.17 - 0.24");
    assert_eq!(profile["hardness_mpa"], 163.0);
}

#[test]
fn test_mat_show_pretty_sections() {
    let tmp = setup_steel20();
    alloyref(&tmp)
        .args([
            "hardness",
            "set",
            "20",
            "Твердость 20 ,/HB 10 -1 = 163 МПа;",
        ])
        .assert()
        .success();

    alloyref(&tmp)
        .args(["mat", "show", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brand"))
        .stdout(predicate::str::contains("Hardness"));
}

#[test]
fn test_mat_show_unknown_brand_fails() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["mat", "show", "АЛ2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no material found"));
}

#[test]
fn test_workpiece_accepts_legacy_indices() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args([
            "workpiece",
            "20",
            "--heat-treatment",
            "2",
            "--surface",
            "rolled",
            "--hrc",
            "50.5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("quench-and-temper"))
        .stdout(predicate::str::contains("rolled"))
        .stdout(predicate::str::contains("50.5"));
}

#[test]
fn test_workpiece_rejects_negative_hrc() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args(["workpiece", "20", "--hrc=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-negative"));
}

// ============================================================================
// Cascade / Referential Integrity Tests
// ============================================================================

#[test]
fn test_delete_material_cascades() {
    let tmp = setup_steel20();

    alloyref(&tmp)
        .args([
            "hardness",
            "set",
            "20",
            "Твердость 20 ,/HB 10 -1 = 163 МПа;",
        ])
        .assert()
        .success();

    alloyref(&tmp)
        .args(["mat", "delete", "20"])
        .assert()
        .success();

    // Property rows must be gone with the material
    alloyref(&tmp)
        .args(["hardness", "show", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no material found"));
}
