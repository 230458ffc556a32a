//! Integration tests for honesty-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use honesty_core::ReleaseRecord;
use honesty_core::test_utils::ReleaseFixture;
use predicates::prelude::*;
use std::fmt::Write;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn honesty_cmd() -> Command {
    cargo_bin_cmd!("honesty")
}

/// Writes a simple HTML index listing every file of the release.
fn write_html_index(dir: &Path, release: &ReleaseRecord) -> PathBuf {
    let mut html = String::from("<html><body>\n");
    for file in &release.files {
        writeln!(
            html,
            r#"<a href="{}#{}">{}</a><br/>"#,
            file.url, file.checksum, file.basename
        )
        .unwrap();
    }
    html.push_str("</body></html>\n");

    let path = dir.join("pkgA.html");
    std::fs::write(&path, html).expect("failed to write index");
    path
}

/// Sets up a cache and index for `pkgA` 1.0 and returns the index path.
fn setup(temp: &TempDir, build: impl FnOnce(ReleaseFixture) -> ReleaseFixture) -> PathBuf {
    let release = build(ReleaseFixture::new(temp.path(), "pkgA", "1.0")).build();
    write_html_index(temp.path(), &release)
}

fn check_cmd(temp: &TempDir, index: &Path) -> Command {
    let mut cmd = honesty_cmd();
    cmd.arg("check")
        .arg("pkgA")
        .arg("1.0")
        .arg("--index")
        .arg(index)
        .arg("--cache")
        .arg(temp.path());
    cmd
}

#[test]
fn test_version_flag() {
    honesty_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("honesty"));
}

#[test]
fn test_help_lists_subcommands() {
    honesty_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("backend"))
        .stdout(predicate::str::contains("classify"));
}

#[test]
fn test_check_consistent_release() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| {
        f.sdist(&[("pkgA/__init__.py", b"x=1\n")])
            .wheel(&[("pkgA/__init__.py", b"x=1\r\n")])
    });

    check_cmd(&temp, &index)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("pkgA 1.0 OK"))
        .stdout(predicate::str::contains("different hashes").not());
}

#[test]
fn test_check_verbose_lists_consistent_paths() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| {
        f.sdist(&[("pkgA/__init__.py", b"x=1\n")])
            .wheel(&[("pkgA/__init__.py", b"x=1\n")])
    });

    check_cmd(&temp, &index)
        .arg("--verbose")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("pkgA/__init__.py: OK"));
}

#[test]
fn test_check_divergent_content_exits_8() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| {
        f.sdist(&[("pkgA/__init__.py", b"x=1\n")])
            .wheel(&[("pkgA/__init__.py", b"x=2\n")])
    });

    check_cmd(&temp, &index)
        .arg("-v")
        .assert()
        .code(8)
        .stdout(predicate::str::contains("pkgA/__init__.py different hashes"))
        .stdout(predicate::str::contains("pkgA-1.0-py3-none-any.whl"))
        .stdout(predicate::str::contains("pkgA 1.0 problems"));
}

#[test]
fn test_check_missing_from_source_exits_4() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| {
        f.sdist(&[("pkgA/__init__.py", b"x=1\n")]).wheel(&[
            ("pkgA/__init__.py", b"x=1\n"),
            ("pkgA/_extra.py", b"y=1\n"),
        ])
    });

    check_cmd(&temp, &index)
        .assert()
        .code(4)
        .stdout(predicate::str::contains("pkgA/_extra.py not in sdist"));
}

#[test]
fn test_check_without_sdist_exits_1() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| f.wheel(&[("pkgA/__init__.py", b"x=1\n")]));

    check_cmd(&temp, &index)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("pkgA 1.0 no sdist"));
}

#[test]
fn test_check_source_only_release() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| f.listed("pkgA-1.0.tar.gz"));

    check_cmd(&temp, &index)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("pkgA 1.0 only sdist"));
}

#[test]
fn test_check_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| {
        f.sdist(&[("pkgA/__init__.py", b"x=1\n")])
            .wheel(&[("pkgA/__init__.py", b"x=2\n")])
    });

    let output = check_cmd(&temp, &index)
        .arg("--json")
        .assert()
        .code(8)
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["operation"], "check");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["exit_code"], 8);
    assert_eq!(json["data"]["verdict"], "divergent_content");
    assert_eq!(json["data"]["paths"][0]["path"], "pkgA/__init__.py");
    assert_eq!(json["data"]["artifacts_indexed"], 2);
}

#[test]
fn test_check_quiet_prints_nothing() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| {
        f.sdist(&[("pkgA/__init__.py", b"x=1\n")])
            .wheel(&[("pkgA/__init__.py", b"x=2\n")])
    });

    check_cmd(&temp, &index)
        .arg("--quiet")
        .assert()
        .code(8)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_check_unknown_version() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| f.sdist(&[("pkgA/__init__.py", b"x=1\n")]));

    honesty_cmd()
        .arg("check")
        .arg("pkgA")
        .arg("2.0")
        .arg("--index")
        .arg(&index)
        .arg("--cache")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("version=2.0 not available for pkgA"));
}

#[test]
fn test_check_missing_index_file() {
    let temp = TempDir::new().expect("failed to create temp dir");

    check_cmd(&temp, &temp.path().join("absent.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read index"));
}

#[test]
fn test_check_corrupt_artifact_fails_closed() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| {
        f.sdist(&[("pkgA/__init__.py", b"x=1\n")])
            .artifact("pkgA-1.0-py3-none-any.whl", b"not a zip")
    });

    check_cmd(&temp, &index)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--partial"));
}

#[test]
fn test_check_partial_records_failures() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| {
        f.sdist(&[("pkgA/__init__.py", b"x=1\n")])
            .wheel(&[("pkgA/__init__.py", b"x=1\n")])
            .listed("pkgA-1.0-py3.8.egg")
    });

    check_cmd(&temp, &index)
        .arg("--partial")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("pkgA 1.0 OK"))
        .stderr(predicate::str::contains("pkgA-1.0-py3.8.egg"));
}

#[test]
fn test_check_with_json_index() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let release = ReleaseFixture::new(temp.path(), "pkgA", "1.0")
        .sdist(&[("pkgA/__init__.py", b"x=1\n")])
        .wheel(&[("pkgA/__init__.py", b"x=1\n")])
        .build();

    let files: Vec<serde_json::Value> = release
        .files
        .iter()
        .map(|f| {
            serde_json::json!({
                "url": f.url,
                "filename": f.basename,
                "digests": {"sha256": "00"},
                "requires_python": null,
                "python_version": "py3",
                "upload_time_iso_8601": "2020-01-01T00:00:00.000000Z",
            })
        })
        .collect();
    let index = temp.path().join("pkgA.json");
    std::fs::write(
        &index,
        serde_json::json!({"releases": {"1.0": files}}).to_string(),
    )
    .unwrap();

    check_cmd(&temp, &index)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("pkgA 1.0 OK"));
}

#[test]
fn test_backend_pep517() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| {
        f.sdist(&[
            ("pyproject.toml", b"[build-system]\nrequires = []\n"),
            ("pkgA/__init__.py", b""),
        ])
    });

    honesty_cmd()
        .arg("backend")
        .arg("pkgA")
        .arg("1.0")
        .arg("--index")
        .arg(&index)
        .arg("--cache")
        .arg(temp.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("pkgA build-system pkgA-1.0/pyproject.toml"));
}

#[test]
fn test_backend_config_without_build_system() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| {
        f.sdist(&[("pyproject.toml", b"[tool.black]\n")])
    });

    honesty_cmd()
        .arg("backend")
        .arg("pkgA")
        .arg("1.0")
        .arg("--index")
        .arg(&index)
        .arg("--cache")
        .arg(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("pkgA has-toml"));
}

#[test]
fn test_backend_without_sdist() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let index = setup(&temp, |f| f.wheel(&[("pkgA/__init__.py", b"")]));

    honesty_cmd()
        .arg("backend")
        .arg("pkgA")
        .arg("1.0")
        .arg("--index")
        .arg(&index)
        .arg("--cache")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no source distribution"));
}

#[test]
fn test_classify_filenames() {
    honesty_cmd()
        .arg("classify")
        .arg("foo-1.0.tar.gz")
        .arg("foo-1.0-py3-none-any.whl")
        .assert()
        .success()
        .stdout(predicate::str::contains("foo-1.0.tar.gz  sdist  1.0"))
        .stdout(predicate::str::contains("bdist_wheel  1.0"));
}

#[test]
fn test_classify_unrecognized_exits_1() {
    honesty_cmd()
        .arg("classify")
        .arg("foo-1.0.tar.gz")
        .arg("foo.tar.gz")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("sdist"))
        .stderr(predicate::str::contains("foo.tar.gz: unrecognized"));
}

#[test]
fn test_classify_json() {
    let output = honesty_cmd()
        .arg("--json")
        .arg("classify")
        .arg("foo-1.0-py2.7.egg")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["operation"], "classify");
    assert_eq!(json["data"][0]["kind"], "bdist_egg");
    assert_eq!(json["data"][0]["version"], "1.0");
}

#[test]
fn test_completion_bash() {
    honesty_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("honesty"));
}
