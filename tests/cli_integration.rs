use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const CONFIG: &str = r#"
[gallery]
precedence = ["b", "a"]

[[collections]]
name = "A"
path = "a"
thumbnail = "a/thumbnail.png"

[[collections]]
name = "B"
path = "b"
thumbnail = "b/thumbnail.gif"
"#;

const LISTING: &str = r#"{
    "version": "1.0",
    "lastUpdated": "2025-01-01",
    "files": {
        "/a/1.png": {"metadata": {"title": "First"}},
        "/b/1.png": {},
        "/a/2.png": {}
    }
}"#;

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), CONFIG).unwrap();
        std::fs::write(dir.path().join("artwork_metadata.json"), LISTING).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn glowgallery(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_glowgallery"));
        cmd.env("GLOWGALLERY_CONFIG", self.path("config.toml"))
            .env("RUST_LOG", "off")
            .env_remove("OPENAI_API_KEY");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        let listing = self.path("artwork_metadata.json");
        self.run_with_source(&listing, args)
    }

    fn run_with_source(&self, source: &Path, args: &[&str]) -> Output {
        self.glowgallery()
            .args(args)
            .arg("--source")
            .arg(source)
            .output()
            .expect("failed to run")
    }
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn assert_no_panic(output: &Output) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "should not panic: {}", stderr);
}

#[test]
fn test_help_exits_zero() {
    let fixture = Fixture::new();
    let output = fixture.glowgallery().arg("--help").output().expect("failed to run");
    assert!(output.status.success(), "glowgallery --help should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Art gallery catalog"),
        "help should contain description"
    );
}

#[test]
fn test_version_exits_zero() {
    let fixture = Fixture::new();
    let output = fixture
        .glowgallery()
        .arg("--version")
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("glowgallery"),
        "version output should contain crate name"
    );
}

#[test]
fn test_list_follows_collection_precedence() {
    let fixture = Fixture::new();
    let output = fixture.run(&["list"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["/b/1.png", "/a/1.png", "/a/2.png"]);
}

#[test]
fn test_list_with_tab_keeps_listing_order() {
    let fixture = Fixture::new();
    let output = fixture.run(&["list", "--tab", "a"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["/a/1.png", "/a/2.png"]);
}

#[test]
fn test_list_long_shows_title() {
    let fixture = Fixture::new();
    let output = fixture.run(&["list", "--tab", "a", "--long"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"First\""), "got {:?}", lines);
    assert!(lines[0].contains("[image]"), "got {:?}", lines);
}

#[test]
fn test_nav_wraps_within_tab() {
    let fixture = Fixture::new();

    let output = fixture.run(&["nav", "--tab", "a", "--from", "/a/2.png"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["/a/1.png"]);

    let output = fixture.run(&["nav", "--tab", "a", "--from", "/a/1.png", "-d", "prev"]);
    assert_eq!(stdout_lines(&output), vec!["/a/2.png"]);
}

#[test]
fn test_nav_from_outside_tab_starts_at_an_edge() {
    let fixture = Fixture::new();

    let output = fixture.run(&["nav", "--tab", "a", "--from", "/b/1.png"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["/a/1.png"]);

    let output = fixture.run(&["nav", "--tab", "a", "--from", "/b/1.png", "-d", "prev"]);
    assert_eq!(stdout_lines(&output), vec!["/a/2.png"]);
}

#[test]
fn test_nav_multiple_steps_in_all_tab() {
    let fixture = Fixture::new();
    let output = fixture.run(&["nav", "--from", "/b/1.png", "-n", "2"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["/a/2.png"]);
}

#[test]
fn test_nav_rejects_unknown_direction() {
    let fixture = Fixture::new();
    let output = fixture.run(&["nav", "-d", "sideways"]);
    assert!(!output.status.success());
    assert_no_panic(&output);
}

#[test]
fn test_collections_counts_items() {
    let fixture = Fixture::new();
    let output = fixture.run(&["collections"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("A (a): 2 items"), "got {}", stdout);
    assert!(stdout.contains("B (b): 1 items"), "got {}", stdout);
    assert!(stdout.contains("b > a"), "got {}", stdout);
}

#[test]
fn test_directory_source() {
    let fixture = Fixture::new();
    let media = fixture.path("media");
    std::fs::create_dir_all(media.join("a")).unwrap();
    std::fs::create_dir_all(media.join("b")).unwrap();
    std::fs::write(media.join("a/2.gif"), b"gif").unwrap();
    std::fs::write(media.join("a/1.png"), b"png").unwrap();
    std::fs::write(media.join("b/1.mp4"), b"mp4").unwrap();
    std::fs::write(media.join("b/readme.txt"), b"skip").unwrap();

    let output = fixture.run_with_source(&media, &["list"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["/b/1.mp4", "/a/1.png", "/a/2.gif"]);
}

#[test]
fn test_missing_source_is_not_fatal() {
    let fixture = Fixture::new();
    let missing = fixture.path("does_not_exist.json");

    let output = fixture.run_with_source(&missing, &["list"]);
    assert!(output.status.success());
    assert_no_panic(&output);
    assert!(stdout_lines(&output).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Warning"), "got {}", stderr);
}

#[test]
fn test_empty_listing() {
    let fixture = Fixture::new();
    let empty = fixture.path("empty.json");
    std::fs::write(&empty, r#"{"files": {}}"#).unwrap();

    let output = fixture.run_with_source(&empty, &["nav"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["(nothing selected)"]);
}

#[test]
fn test_config_creates_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/config.toml");

    let output = Command::new(env!("CARGO_BIN_EXE_glowgallery"))
        .env("GLOWGALLERY_CONFIG", &path)
        .env("RUST_LOG", "off")
        .arg("config")
        .output()
        .expect("failed to run");

    assert!(output.status.success());
    assert!(path.exists(), "config should be written on first run");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[gallery]"));
    assert!(stdout.contains("machine garden"));
}
