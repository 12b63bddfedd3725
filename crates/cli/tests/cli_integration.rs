//! Runs the CLI in-process against temporary directories.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const POINT: &str = r#"{
    "declarations": [{
        "id": "Point",
        "id_location": "L(src/geo.rs:1 #B0-B5)",
        "container_kind": {"Struct": {"fields": [
            {"id": "x", "id_location": "x", "format": "F64"},
            {"id": "y", "id_location": "y", "format": "F64"}
        ]}}
    }]
}"#;

const TAGGED: &str = r#"{
    "declarations": [{
        "id": "Event",
        "id_location": "e",
        "container_kind": {"Enum": {
            "repr": {"Tagged": {"tag": "type", "tag_location": "t"}},
            "variants": []
        }}
    }]
}"#;

struct Project {
    dir: TempDir,
}

impl Project {
    fn new(schema: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join("schema.json"), schema).unwrap();
        Self { dir }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn out_dir(&self) -> PathBuf {
        self.path("out")
    }

    fn run(&self, command: &str, extra: &[&str]) -> i32 {
        let mut args: Vec<String> = vec![
            "shapegen".to_string(),
            command.to_string(),
            "--input".to_string(),
            arg(&self.path("schema.json")),
            "--out-dir".to_string(),
            arg(&self.out_dir()),
        ];
        args.extend(extra.iter().map(|s| (*s).to_string()));
        shapegen_cli::run(args)
    }
}

fn arg(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

#[test]
fn test_generate_writes_typescript() {
    let project = Project::new(POINT);
    assert_eq!(project.run("generate", &[]), 0);

    let source = fs::read_to_string(project.out_dir().join("types.ts")).unwrap();
    assert!(source.starts_with("export type Point = {\n"));
}

#[test]
fn test_generate_go_creates_package_directory() {
    let project = Project::new(POINT);
    assert_eq!(project.run("generate", &["--target", "go"]), 0);

    let source =
        fs::read_to_string(project.out_dir().join("generated").join("point_gen.go")).unwrap();
    assert!(source.contains("package generated\n"));
    assert!(source.contains("type Point struct {"));
}

#[test]
fn test_check_detects_drift() {
    let project = Project::new(POINT);
    assert_eq!(project.run("check", &[]), 1, "missing file is stale");

    assert_eq!(project.run("generate", &["--file-name", "geo.ts"]), 0);
    assert_eq!(project.run("check", &["--file-name", "geo.ts"]), 0);

    let path = project.out_dir().join("geo.ts");
    let edited = fs::read_to_string(&path).unwrap().replace("y: number", "y: string");
    fs::write(&path, edited).unwrap();
    assert_eq!(project.run("check", &["--file-name", "geo.ts"]), 1);
}

#[test]
fn test_unsupported_representation_writes_nothing() {
    let project = Project::new(TAGGED);
    assert_eq!(project.run("generate", &[]), 1);
    assert!(!project.out_dir().exists());
}

#[test]
fn test_json_mode_writes_nothing() {
    let project = Project::new(POINT);
    assert_eq!(project.run("generate", &["--json"]), 0);
    assert!(!project.out_dir().exists());
}

#[test]
fn test_config_file_selects_target() {
    let project = Project::new(POINT);
    let config = project.path("custom.toml");
    fs::write(&config, "target = \"go\"\nparallel = false\n").unwrap();

    assert_eq!(project.run("generate", &["--config", &arg(&config)]), 0);
    assert!(project.out_dir().join("generated/point_gen.go").exists());
}

#[test]
fn test_bad_config_fails() {
    let project = Project::new(POINT);
    let config = project.path("custom.toml");
    fs::write(&config, "colour = \"blue\"\n").unwrap();
    assert_eq!(project.run("generate", &["--config", &arg(&config)]), 1);
}

#[test]
fn test_unknown_target_fails() {
    let project = Project::new(POINT);
    assert_eq!(project.run("generate", &["--target", "cobol"]), 1);
}

#[test]
fn test_malformed_schema_fails() {
    let project = Project::new(r#"{"declarations": [{"id": 1}]}"#);
    assert_eq!(project.run("generate", &[]), 1);
    assert!(!project.out_dir().exists());
}

#[test]
fn test_missing_input_fails() {
    let project = Project::new(POINT);
    fs::remove_file(project.path("schema.json")).unwrap();
    assert_eq!(project.run("generate", &[]), 1);
}

#[test]
fn test_targets_and_usage_errors() {
    let args = |list: &[&str]| list.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
    assert_eq!(shapegen_cli::run(args(&["shapegen", "targets"])), 0);
    assert_eq!(shapegen_cli::run(args(&["shapegen"])), 0);
    assert_eq!(shapegen_cli::run(args(&["shapegen", "generate"])), 2);
}
