//! CLI integration tests for `cardgen classify`, `layout` and `render`.
//!
//! Writes small deck tables into a temp directory and checks text output,
//! JSON output and exit codes of the built binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const DECK_CSV: &str = "\
pokedex_number,pokedex_name,cost,attack,health,ability_name,ability,mode_1_name,mode_1_ability,mode_2_name,mode_2_ability,mode_3_ability
001,Bulbasaur,2,1,3,,Heal 1.,,,,,
025,Pikachu,3,3,2,Static,Choose one.,Jolt,Paralyse.,Charge,Draw a card.,
132,Ditto,1,1,1,,Choose one.,,Copy.,,,Mimic.
151,Mew,5,4,4,Transform,,,,,,
";

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cardgen"))
        .args(args)
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("cardgen-tests-no-config"))
        .output()
        .expect("Failed to execute cardgen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_deck(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("should write deck");
    path
}

fn deck(dir: &TempDir) -> String {
    write_deck(dir.path(), "cube.csv", DECK_CSV).display().to_string()
}

// ============================================================================
// classify
// ============================================================================

#[test]
fn test_classify_text_output() {
    let temp = TempDir::new().expect("should create temp dir");
    let output = run(&["classify", &deck(&temp)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().filter(|l| !l.starts_with('\t')).collect();
    assert_eq!(lines, vec!["0\t0\tBulbasaur", "1\t3\tPikachu", "2\t0\tDitto", "3\t10\tMew"]);
    assert!(out.contains("warning: mode 2 has no description"), "{out}");
}

#[test]
fn test_classify_json_output() {
    let temp = TempDir::new().expect("should create temp dir");
    let output = run(&["classify", &deck(&temp), "--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    let cards = json.as_array().expect("array of cards");
    assert_eq!(cards.len(), 4);
    assert_eq!(cards[1]["format"], 3);
    assert_eq!(cards[1]["name"], "Pikachu");
    assert!(cards[1].get("issues").is_none());
    assert_eq!(cards[2]["issues"][0]["kind"], "gap");
    assert_eq!(cards[2]["issues"][0]["missing"], 2);
}

#[test]
fn test_classify_strict_fails_on_gap() {
    let temp = TempDir::new().expect("should create temp dir");
    let output = run(&["classify", &deck(&temp), "--strict"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_classify_jsonl_deck() {
    let temp = TempDir::new().expect("should create temp dir");
    let table = write_deck(
        temp.path(),
        "cube.jsonl",
        "{\"pokedex_name\": \"Mew\", \"ability_name\": \"Transform\"}\n\n{\"pokedex_name\": \"Eevee\", \"ability\": \"Adapt.\"}\n",
    );
    let output = run(&["classify", table.to_str().expect("utf-8 path"), "--strict"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "0\t10\tMew\n1\t0\tEevee\n");
}

#[test]
fn test_classify_unsupported_table() {
    let temp = TempDir::new().expect("should create temp dir");
    let table = write_deck(temp.path(), "cube.xlsx", "");
    let output = run(&["classify", table.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unsupported deck format"));
}

#[test]
fn test_classify_missing_table() {
    let output = run(&["classify", "/nonexistent/cube.csv"]);
    assert_eq!(output.status.code(), Some(1));
}

// ============================================================================
// layout
// ============================================================================

#[test]
fn test_layout_json_for_one_card() {
    let temp = TempDir::new().expect("should create temp dir");
    let output = run(&["layout", &deck(&temp), "--card", "pikachu", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    let cards = json.as_array().expect("array of cards");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["index"], 1);
    assert_eq!(cards[0]["format"], 3);

    let fields: Vec<&str> = cards[0]["instructions"]
        .as_array()
        .expect("instructions")
        .iter()
        .map(|d| d["field"].as_str().expect("field name"))
        .collect();
    assert_eq!(
        fields,
        vec![
            "pokedex_name",
            "cost",
            "attack",
            "health",
            "pokedex_number",
            "ability_name",
            "ability",
            "mode_1_name",
            "mode_1_ability",
            "mode_2_name",
            "mode_2_ability",
        ]
    );
}

#[test]
fn test_layout_text_output() {
    let temp = TempDir::new().expect("should create temp dir");
    let output = run(&["layout", &deck(&temp), "--card", "Mew"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.starts_with("3 Mew (format 10)"), "{out}");
    assert!(out.contains("ability_name"));
    assert!(out.contains("\"Transform\""));
}

#[test]
fn test_layout_unknown_card() {
    let temp = TempDir::new().expect("should create temp dir");
    let output = run(&["layout", &deck(&temp), "--card", "Missingno"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no card named 'Missingno'"));
}

// ============================================================================
// render
// ============================================================================

#[test]
fn test_render_without_fonts_is_rejected() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = temp.path().join("cardgen.toml");
    std::fs::write(&config, "[layout]\nunit_px = 8\n").expect("should write config");

    let output = run(&["render", &deck(&temp), "--config", config.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("[fonts]"));
}

#[test]
fn test_render_with_missing_font_file_fails() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = temp.path().join("cardgen.toml");
    std::fs::write(&config, "[fonts]\ntitle = \"fonts/missing.ttf\"\nbody = \"fonts/missing.ttf\"\n")
        .expect("should write config");

    let output = run(&["render", &deck(&temp), "--config", config.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot read font"));
    assert!(!temp.path().join("output").exists(), "nothing rendered");
}

#[test]
fn test_render_invalid_config() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = temp.path().join("cardgen.toml");
    std::fs::write(&config, "[layout]\nmin_scale = 0\n").expect("should write config");

    let output = run(&["render", &deck(&temp), "--config", config.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("layout.min_scale"));
}

#[test]
fn test_render_rejects_oversized_unit_px_in_config() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = temp.path().join("cardgen.toml");
    std::fs::write(&config, "[layout]\nunit_px = 100000\n").expect("should write config");

    let output = run(&["render", &deck(&temp), "--config", config.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("layout.unit_px"));
}

#[test]
fn test_render_writes_one_png_per_card() {
    let temp = TempDir::new().expect("should create temp dir");
    let font = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf");
    let config = temp.path().join("cardgen.toml");
    std::fs::write(&config, format!("[fonts]\ntitle = {0:?}\nbody = {0:?}\n", font.display().to_string()))
        .expect("should write config");
    let out = temp.path().join("fronts");

    let output = run(&[
        "render",
        &deck(&temp),
        "--config",
        config.to_str().expect("utf-8 path"),
        "-o",
        out.to_str().expect("utf-8 path"),
        "--unit-px",
        "8",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("4 rendered, 0 skipped, 0 failed"), "{}", stdout(&output));

    for name in ["0_bulbasaur.png", "1_pikachu.png", "2_ditto.png", "3_mew.png"] {
        let image = image::open(out.join(name)).expect("card image written").to_rgba8();
        assert_eq!(image.dimensions(), (128, 184));
    }

    let config = config.to_str().expect("utf-8 path");
    let again = run(&["render", &deck(&temp), "--config", config, "-o", out.to_str().expect("utf-8 path")]);
    assert!(again.status.success());
    assert!(stdout(&again).contains("0 rendered, 4 skipped"), "{}", stdout(&again));
}
