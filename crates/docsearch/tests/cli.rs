//! CLI integration tests for docsearch commands.
//!
//! These tests focus on exit codes and basic behavioral verification against the embedded
//! site corpus, not on exact output formatting.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to run `docsearch` with HOME isolated to the provided directory.
fn docsearch(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("docsearch").unwrap();
    cmd.env("HOME", home).current_dir(home);
    cmd
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// Runs a command and returns its stdout with styling removed.
fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    strip_ansi(&String::from_utf8(output.stdout).unwrap())
}

/// Runs `search --json` and parses the output.
fn search_json(home: &Path, query: &str) -> serde_json::Value {
    let out = stdout_of(docsearch(home).args(["search", "--json", query]));
    serde_json::from_str(&out).unwrap()
}

mod search {
    use super::*;

    #[test]
    fn finds_title_match_first() {
        let dir = temp_dir();
        let json = search_json(dir.path(), "license");
        assert_eq!(json["stage"]["name"], "exact");
        assert_eq!(json["results"][0]["href"], "./mplab_harmony_license.html");
        assert!(json["total_matches"].as_u64().unwrap() >= 1);
    }

    #[test]
    fn falls_back_to_wildcard() {
        let dir = temp_dir();
        let json = search_json(dir.path(), "hardw");
        assert_eq!(json["stage"]["name"], "wildcard");
        assert!(!json["results"].as_array().unwrap().is_empty());
    }

    #[test]
    fn falls_back_to_fuzzy() {
        let dir = temp_dir();
        let json = search_json(dir.path(), "hardwre");
        assert_eq!(json["stage"]["name"], "fuzzy");
        assert!(!json["results"].as_array().unwrap().is_empty());
    }

    #[test]
    fn terminal_output_shows_stage_and_titles() {
        let dir = temp_dir();
        let out = stdout_of(docsearch(dir.path()).args(["search", "license"]));
        assert!(out.contains("(exact match)"));
        assert!(out.contains("License"));
        assert!(out.contains("./mplab_harmony_license.html"));
    }

    #[test]
    fn reports_no_results() {
        let dir = temp_dir();
        docsearch(dir.path())
            .args(["search", "zzqqxxwwvv"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No results found"));
    }

    #[test]
    fn html_output_uses_site_markup() {
        let dir = temp_dir();
        docsearch(dir.path())
            .args(["search", "--html", "license"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<ul class=\"search-results-list\">"))
            .stdout(predicate::str::contains("<span class=\"search-result-highlight\">"));
    }

    #[test]
    fn html_output_for_no_results() {
        let dir = temp_dir();
        docsearch(dir.path())
            .args(["search", "--html", "zzqqxxwwvv"])
            .assert()
            .success()
            .stdout(predicate::str::contains("search-no-result"));
    }

    #[test]
    fn respects_limit() {
        let dir = temp_dir();
        let out = stdout_of(docsearch(dir.path()).args(["search", "--json", "-n", "1", "motor"]));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["results"].as_array().unwrap().len(), 1);
        assert!(json["total_matches"].as_u64().unwrap() > 1);
    }

    #[test]
    fn page_flag_rewrites_links() {
        let dir = temp_dir();
        let out = stdout_of(docsearch(dir.path()).args([
            "search",
            "--json",
            "--page",
            "/mc_apps_sam_rh71/docs/apps/docs/hardware_setup.html",
            "license",
        ]));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["results"][0]["href"], "../../mplab_harmony_license.html");
    }

    #[test]
    fn blank_query_fails() {
        let dir = temp_dir();
        docsearch(dir.path())
            .args(["search", "   "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("query is empty"));
    }

    #[test]
    fn searches_custom_corpus() {
        let dir = temp_dir();
        fs::write(
            dir.path().join("corpus.json"),
            r#"{"0": {"doc": "Wiring", "title": "Wiring", "content": "Connect the motor leads.", "url": "http://localhost:4000/mc_apps_sam_rh71/wiring.html", "relUrl": "/wiring.html"}}"#,
        )
        .unwrap();

        let out = stdout_of(docsearch(dir.path()).args([
            "search",
            "--json",
            "--corpus",
            "corpus.json",
            "leads",
        ]));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["results"][0]["href"], "./wiring.html");
    }

    #[test]
    fn missing_corpus_fails() {
        let dir = temp_dir();
        docsearch(dir.path())
            .args(["search", "--corpus", "missing.json", "motor"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load corpus"));
    }
}

mod session {
    use super::*;

    #[test]
    fn enter_follows_selected_result() {
        let dir = temp_dir();
        let out = stdout_of(
            docsearch(dir.path())
                .arg("session")
                .write_stdin("license\n<down>\n<enter>\n"),
        );
        assert!(out.contains("search: license"));
        assert!(out.contains("open: ./mplab_harmony_license.html"));
    }

    #[test]
    fn escape_hides_search() {
        let dir = temp_dir();
        let out = stdout_of(
            docsearch(dir.path())
                .arg("session")
                .write_stdin("license\n<esc>\n"),
        );
        let last_view = out.rsplit("search:").next().unwrap();
        assert!(last_view.contains("(search hidden)"));
    }

    #[test]
    fn html_mode_prints_container() {
        let dir = temp_dir();
        docsearch(dir.path())
            .args(["session", "--html"])
            .write_stdin("license\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("search-results-list-item"));
    }

    #[test]
    fn empty_input_succeeds() {
        let dir = temp_dir();
        docsearch(dir.path())
            .arg("session")
            .write_stdin("")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

mod docs {
    use super::*;

    #[test]
    fn lists_embedded_records() {
        let dir = temp_dir();
        let out = stdout_of(docsearch(dir.path()).arg("docs"));
        assert!(out.contains("Hardware Setup"));
        assert!(out.contains("16 records"));
    }

    #[test]
    fn json_lists_rewritten_urls() {
        let dir = temp_dir();
        let out = stdout_of(docsearch(dir.path()).args([
            "docs",
            "--json",
            "--page",
            "/mc_apps_sam_rh71/docs/apps/docs/x.html",
        ]));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["url"], "../../apps/docs/hardware_setup.html");
        assert_eq!(json[0]["relUrl"], "/apps/docs/hardware_setup.html");
    }
}

mod theme {
    use super::*;

    #[test]
    fn reads_theme_from_href() {
        let dir = temp_dir();
        docsearch(dir.path())
            .args(["theme", "/assets/css/just-the-docs-dark.css"])
            .assert()
            .success()
            .stdout("dark\n");
    }

    #[test]
    fn builds_href_for_new_theme() {
        let dir = temp_dir();
        docsearch(dir.path())
            .args(["theme", "/assets/css/just-the-docs-dark.css", "--set", "light"])
            .assert()
            .success()
            .stdout(
                "http://localhost:4000/mc_apps_sam_rh71/assets/css/just-the-docs-light.css\n",
            );
    }

    #[test]
    fn unknown_theme_fails() {
        let dir = temp_dir();
        docsearch(dir.path())
            .args(["theme", "/assets/css/just-the-docs-sepia.css"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown theme 'sepia'"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();

        docsearch(dir.path()).arg("init").assert().success();

        let contents = fs::read_to_string(dir.path().join(".docsearch.toml")).unwrap();
        assert!(contents.contains("# [site]"));
        assert!(contents.contains("# batch_size = 10"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".docsearch.toml"), "existing").unwrap();

        docsearch(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites_existing() {
        let dir = temp_dir();
        fs::write(dir.path().join(".docsearch.toml"), "existing").unwrap();

        docsearch(dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(dir.path().join(".docsearch.toml")).unwrap();
        assert!(contents.contains("# [render]"));
    }

    #[test]
    fn written_template_loads() {
        let dir = temp_dir();
        docsearch(dir.path()).arg("init").assert().success();
        docsearch(dir.path()).arg("check").assert().success();
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_effective_settings() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".docsearch.toml"),
            "[render]\nbatch_size = 4\n",
        )
        .unwrap();

        let out = stdout_of(docsearch(dir.path()).arg("config"));
        assert!(out.contains("batch_size = 4"));
        assert!(out.contains("stemmer = \"english\""));
    }

    #[test]
    fn fails_on_invalid_toml() {
        let dir = temp_dir();
        fs::write(dir.path().join(".docsearch.toml"), "[render\nbatch_size =").unwrap();

        docsearch(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod check {
    use super::*;

    #[test]
    fn succeeds_without_config() {
        let dir = temp_dir();
        let out = stdout_of(docsearch(dir.path()).arg("check"));
        assert!(out.contains("(none, using defaults)"));
        assert!(out.contains("16 records, 16 indexed"));
        assert!(out.contains("No issues found."));
    }

    #[test]
    fn warns_on_missing_corpus() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".docsearch.toml"),
            "[site]\ncorpus = \"missing.json\"\n",
        )
        .unwrap();

        docsearch(dir.path())
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("corpus file does not exist"));
    }

    #[test]
    fn warns_on_zero_batch_size() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".docsearch.toml"),
            "[render]\nbatch_size = 0\n",
        )
        .unwrap();

        docsearch(dir.path())
            .arg("check")
            .assert()
            .failure()
            .stdout(predicate::str::contains("batch_size is 0"));
    }

    #[test]
    fn rejects_unknown_stemmer() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".docsearch.toml"),
            "[search]\nstemmer = \"klingon\"\n",
        )
        .unwrap();

        docsearch(dir.path())
            .arg("check")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to build index"));
    }
}
