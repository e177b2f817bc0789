use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn demo_reports_every_input() {
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("demo");

    let output_pred = predicate::str::contains("Input: 'b'\nrejected")
        .and(predicate::str::contains("Input: 'acb'\naccepted\n S\n/  \\\na  S"))
        .and(predicate::str::contains("Input: 'abc'\nrejected"))
        .and(predicate::str::contains("Input: ''\naccepted\nS\n|\nλ"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn check_with_treeviz_format() {
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("check").arg("ccb").arg("--format").arg("treeviz");

    cmd.assert().success().stdout(
        "Input: 'ccb'\naccepted\n◇ S\n├─ ◦ c\n└─ ◇ B\n  ├─ ◦ c\n  └─ ◇ B\n    └─ ◦ b\n",
    );
}

#[test]
fn rejection_is_not_a_failure() {
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("check").arg("abc");

    cmd.assert().success().stdout("Input: 'abc'\nrejected\n");
}

#[test]
fn check_with_grammar_file_and_start() {
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("check")
        .arg("bb")
        .arg("--grammar")
        .arg(fixture_path("classroom.yaml"))
        .arg("--start")
        .arg("A")
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Input: 'bb'\nrejected"));
}

#[test]
fn invalid_grammar_exits_with_error() {
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("check")
        .arg("a")
        .arg("--grammar")
        .arg(fixture_path("dangling.grammar"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Grammar error: Unknown nonterminal 'Q'"));
}

#[test]
fn unknown_format_exits_with_error() {
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("check").arg("a").arg("--format").arg("svg");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Format 'svg' not found"));
}

#[test]
fn grammar_from_temp_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".grammar")
        .tempfile()
        .expect("temp file");
    writeln!(file, "X → xX | y").expect("write grammar");

    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("check").arg("xxy").arg("--grammar").arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Input: 'xxy'\naccepted\n X\n/  \\\nx  X"));
}

#[test]
fn config_file_changes_format_and_epsilon_label() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(
        file,
        "[derivation]\nepsilon_label = \"eps\"\n\n[render]\nformat = \"treeviz\""
    )
    .expect("write config");

    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("check").arg("").arg("--config").arg(file.path());

    cmd.assert()
        .success()
        .stdout("Input: ''\naccepted\n◇ S\n└─ ∅ eps\n");
}

#[test]
fn max_depth_flag_limits_nesting() {
    let mut file = tempfile::Builder::new()
        .suffix(".grammar")
        .tempfile()
        .expect("temp file");
    writeln!(file, "S → aSb | c").expect("write grammar");

    let input = format!("{}c{}", "a".repeat(30), "b".repeat(30));
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("check")
        .arg(&input)
        .arg("--grammar")
        .arg(file.path())
        .arg("--max-depth")
        .arg("20");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("recursion limit of 20"));
}

#[test]
fn left_recursion_is_reported_as_a_cycle() {
    let mut file = tempfile::Builder::new()
        .suffix(".grammar")
        .tempfile()
        .expect("temp file");
    writeln!(file, "S → Sa | b").expect("write grammar");

    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("check").arg("ba").arg("--grammar").arg(file.path());

    cmd.assert().failure().stderr(predicate::str::contains(
        "Nonterminal 'S' expands to itself without consuming input",
    ));
}

#[test]
fn long_member_is_accepted() {
    let input = "a".repeat(1_500);
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("check").arg(&input).arg("--format").arg("treeviz");

    cmd.assert().success().stdout(
        predicate::str::starts_with(format!("Input: '{input}'\naccepted\n◇ S\n"))
            .and(predicate::str::ends_with("└─ ∅ λ\n")),
    );
}

#[test]
fn show_grammar_prints_notation() {
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("show-grammar");

    cmd.assert()
        .success()
        .stdout("S → aS | bA | cB | λ\nA → aA | b\nB → cB | b\n");
}

#[test]
fn show_grammar_as_json() {
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("show-grammar").arg("--as").arg("json");

    cmd.assert().success().stdout(
        predicate::str::contains("\"start\": \"S\"").and(predicate::str::contains("\"terminal\": \"a\"")),
    );
}

#[test]
fn list_formats_names_every_formatter() {
    let mut cmd = cargo_bin_cmd!("rlgrammar");
    cmd.arg("list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("diagonal")
            .and(predicate::str::contains("treeviz"))
            .and(predicate::str::contains("json")),
    );
}
