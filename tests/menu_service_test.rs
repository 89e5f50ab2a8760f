//! Tests for MenuService

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tempfile::TempDir;

use menutree::application::services::{MenuService, RenderOptions};
use menutree::application::{ApplicationError, InputFormat};
use menutree::config::Settings;
use menutree::infrastructure::di::ServiceContainer;
use menutree::infrastructure::traits::{FileSystem, RealFileSystem};

const K12_JSON: &str = "tests/resources/grids/k12.json";
const K12_RANGE_JSON: &str = "tests/resources/grids/k12_range.json";
const K12_CSV: &str = "tests/resources/grids/k12.csv";

/// In-memory filesystem for service tests.
#[derive(Default)]
struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    fn with_file(path: &str, content: &str) -> Self {
        let fs = Self::default();
        fs.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        fs
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn ensure_parent(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

fn real_service() -> MenuService {
    ServiceContainer::new(Settings::default()).menu_service()
}

fn memory_service(fs: MemoryFileSystem, settings: Settings) -> MenuService {
    ServiceContainer::with_deps(settings, Arc::new(fs)).menu_service()
}

fn k12_document(service: &MenuService, path: &str) -> Value {
    let grid = service.load_grid(Path::new(path), None).unwrap();
    service
        .build_document(&grid, path, &RenderOptions::default())
        .unwrap()
}

// ============================================================
// Document building
// ============================================================

#[test]
fn given_k12_grid_when_building_document_then_wraps_menu_in_data() {
    let service = real_service();

    let document = k12_document(&service, K12_JSON);

    let data = &document["data"];
    assert_eq!(
        data["content"],
        "Welcome to K12 Center, what would you like to know about"
    );
    let top: Vec<&String> = data["choices"].as_object().unwrap().keys().collect();
    assert_eq!(top, vec!["programs", "cost", "cost_1"]);
    assert_eq!(data["choices"]["programs"], json!({ "content": "Programs at K12..." }));

    let sponsorships: Vec<&String> = data["choices"]["cost"]["choices"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(sponsorships, vec!["sponserships", "sponserships_1", "sponserships_2"]);

    let deepest = &data["choices"]["cost"]["choices"]["sponserships_2"]["choices"]["testing"]
        ["choices"]["testing"]["choices"];
    assert_eq!(
        deepest.as_object().unwrap().keys().collect::<Vec<_>>(),
        vec!["testing", "testing_1", "testing_2"]
    );

    assert_eq!(
        data["choices"]["cost_1"],
        json!({
            "content": "A lot....",
            "choices": {
                "": { "content": "Whatever" },
                "_1": { "content": "Whatever" }
            }
        })
    );
}

#[test]
fn given_same_grid_in_json_range_and_csv_when_building_then_identical_documents() {
    let service = real_service();

    let from_json = k12_document(&service, K12_JSON);
    let from_range = k12_document(&service, K12_RANGE_JSON);
    let from_csv = k12_document(&service, K12_CSV);

    assert_eq!(from_json, from_range);
    assert_eq!(from_json, from_csv);
}

#[test]
fn given_blank_first_row_in_json_and_csv_when_building_then_identical_documents() {
    let fs = MemoryFileSystem::with_file("blank.csv", "\nRoot\n,\"A\na\"\n");
    fs.files
        .lock()
        .unwrap()
        .insert(PathBuf::from("blank.json"), r#"[[], ["Root"], ["", "A\na"]]"#.to_string());
    let service = memory_service(fs, Settings::default());

    let from_csv = k12_document(&service, "blank.csv");
    let from_json = k12_document(&service, "blank.json");

    assert_eq!(from_csv, from_json);
    assert_eq!(
        from_csv,
        json!({
            "data": {
                "content": "",
                "choices": { "": { "content": "Root", "choices": { "a": { "content": "a" } } } }
            }
        })
    );
}

#[test]
fn given_k12_grid_when_building_outline_then_counts_nodes() {
    let service = real_service();
    let grid = service.load_grid(Path::new(K12_JSON), None).unwrap();

    let outline = service.build_outline(&grid, K12_JSON).unwrap();

    assert_eq!(outline.node_count(), 19);
    assert_eq!(outline.height(), 6);
}

#[test]
fn given_empty_grid_when_building_then_empty_grid_error() {
    let service = memory_service(MemoryFileSystem::with_file("empty.json", "[[]]"), Settings::default());
    let grid = service.load_grid(Path::new("empty.json"), None).unwrap();

    let result = service.build_document(&grid, "empty.json", &RenderOptions::default());

    match result {
        Err(ApplicationError::EmptyGrid { source_name }) => assert_eq!(source_name, "empty.json"),
        other => panic!("expected EmptyGrid, got {:?}", other),
    }
}

#[test]
fn given_missing_file_when_loading_then_reports_missing_input() {
    let service = memory_service(MemoryFileSystem::default(), Settings::default());

    let err = service.load_grid(Path::new("nope.json"), None).unwrap_err();

    assert!(err.is_missing_input());
    assert!(err.to_string().contains("nope.json"));
}

// ============================================================
// Rendering options
// ============================================================

#[test]
fn given_custom_envelope_when_rendering_then_uses_key() {
    let fs = MemoryFileSystem::with_file("grid.json", r#"[["Root"], ["", "A\na"]]"#);
    let service = memory_service(fs, Settings::default());
    let grid = service.load_grid(Path::new("grid.json"), None).unwrap();
    let options = RenderOptions {
        envelope_key: Some("menu".into()),
        ..Default::default()
    };

    let text = service.render_document(&grid, "grid.json", &options).unwrap();

    assert_eq!(
        text,
        r#"{"menu":{"content":"Root","choices":{"a":{"content":"a"}}}}"#
    );
}

#[test]
fn given_raw_option_when_rendering_then_no_envelope() {
    let fs = MemoryFileSystem::with_file("grid.json", r#"[["Root"]]"#);
    let service = memory_service(fs, Settings::default());
    let grid = service.load_grid(Path::new("grid.json"), None).unwrap();
    let options = RenderOptions {
        raw: true,
        ..Default::default()
    };

    let text = service.render_document(&grid, "grid.json", &options).unwrap();

    assert_eq!(text, r#"{"content":"Root"}"#);
}

#[test]
fn given_pretty_setting_when_rendering_then_indented() {
    let fs = MemoryFileSystem::with_file("grid.json", r#"[["Root"]]"#);
    let settings = Settings {
        pretty: true,
        ..Settings::default()
    };
    let service = memory_service(fs, settings);
    let grid = service.load_grid(Path::new("grid.json"), None).unwrap();

    let pretty = service
        .render_document(&grid, "grid.json", &RenderOptions::default())
        .unwrap();
    let compact = service
        .render_document(
            &grid,
            "grid.json",
            &RenderOptions {
                pretty: Some(false),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(pretty, "{\n  \"data\": {\n    \"content\": \"Root\"\n  }\n}");
    assert_eq!(compact, r#"{"data":{"content":"Root"}}"#);
}

// ============================================================
// Input formats
// ============================================================

#[test]
fn given_configured_delimiter_when_loading_csv_then_splits_on_it() {
    let fs = MemoryFileSystem::with_file("grid.csv", "Root\n;A\n;;B\n");
    let settings = Settings {
        csv_delimiter: ';',
        ..Settings::default()
    };
    let service = memory_service(fs, settings);

    let grid = service.load_grid(Path::new("grid.csv"), None).unwrap();
    let outline = service.build_outline(&grid, "grid.csv").unwrap();

    assert_eq!(outline.children[0].content, "A");
    assert_eq!(outline.children[0].children[0].content, "B");
}

#[test]
fn given_explicit_format_when_loading_then_overrides_extension() {
    let fs = MemoryFileSystem::with_file("grid.txt", "Root\tx\n\tA\n");
    let service = memory_service(fs, Settings::default());

    let grid = service
        .load_grid(Path::new("grid.txt"), Some(InputFormat::Tsv))
        .unwrap();

    assert_eq!(grid[1], vec!["".to_string(), "A".to_string()]);
}

#[test]
fn given_stdin_text_when_parsing_auto_then_json() {
    let service = memory_service(MemoryFileSystem::default(), Settings::default());

    let grid = service
        .parse_grid(r#"{"values": [["Root"]]}"#, InputFormat::Auto, "<stdin>")
        .unwrap();

    assert_eq!(grid, vec![vec!["Root".to_string()]]);
}

#[test]
fn given_output_file_when_writing_with_real_fs_then_readable() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested").join("menu.json");
    let fs = RealFileSystem;

    fs.ensure_parent(&target).unwrap();
    fs.write(&target, "{}").unwrap();

    assert!(fs.exists(&target));
    assert_eq!(fs.read_to_string(&target).unwrap(), "{}");
}
