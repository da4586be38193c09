use crate::execute::{CreateRequest, execute_all};
use crate::filesystem::LINE_ENDING;
use crate::filesystem::memory::MemoryFS;
use crate::filesystem::physical::PhysicalFS;
use crate::filesystem::recording::{Event, RecordingFS};
use crate::writer::{FileWriter, FileWriterError};

/// Full-stack test against the real filesystem in a temporary directory
#[test]
fn test_physical_writer_creates_directory_and_file() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().join("reports/daily");
    let dir = dir.to_str().unwrap();

    let mut writer = FileWriter::new(PhysicalFS::new(), PhysicalFS::new());
    writer
        .set_directory(dir)
        .unwrap()
        .create_file("a.txt", &["x", "y"])
        .unwrap();

    let written = std::fs::read_to_string(format!("{dir}/a.txt")).unwrap();
    assert_eq!(written, format!("x{LINE_ENDING}y{LINE_ENDING}"));
}

#[test]
fn test_physical_writer_empty_lines_produce_empty_file() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().to_str().unwrap();

    let mut writer = FileWriter::physical();
    writer.set_directory(dir).unwrap();
    writer.create_file("empty.txt", &[] as &[&str]).unwrap();

    let written = std::fs::read_to_string(temp.path().join("empty.txt")).unwrap();
    assert!(written.is_empty());
}

#[test]
fn test_physical_writer_existing_directory_is_not_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().to_str().unwrap();

    let mut writer = FileWriter::physical();
    writer.set_directory(dir).unwrap();
    writer.set_directory(dir).unwrap();

    assert_eq!(writer.directory(), Some(dir));
}

#[test]
fn test_physical_writer_overwrites_file() {
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path().to_str().unwrap();

    let mut writer = FileWriter::physical();
    writer.set_directory(dir).unwrap();
    writer.create_file("a.txt", &["one", "two", "three"]).unwrap();
    writer.create_file("a.txt", &["four"]).unwrap();

    let written = std::fs::read_to_string(temp.path().join("a.txt")).unwrap();
    assert_eq!(written, format!("four{LINE_ENDING}"));
}

#[test]
fn test_physical_writer_trailing_separator_is_kept_literally() {
    let temp = tempfile::tempdir().unwrap();
    let dir = format!("{}/", temp.path().to_str().unwrap());

    let mut writer = FileWriter::physical();
    writer.set_directory(dir.as_str()).unwrap();

    let path = writer.file_path("a.txt");
    assert!(path.ends_with("//a.txt"), "got: {path}");

    // The OS collapses the doubled separator, so the file still lands in the directory
    writer.create_file("a.txt", &["x"]).unwrap();
    assert!(temp.path().join("a.txt").is_file());
}

/// Scenario: `SetDirectory("out")` then `CreateFile("a.txt", ["x", "y"])`
#[test]
fn test_scenario_configured_directory() {
    let fs = RecordingFS::new();
    let mut writer = FileWriter::new(fs.clone(), fs.clone());

    writer
        .set_directory("out")
        .unwrap()
        .create_file("a.txt", &["x", "y"])
        .unwrap();

    assert_eq!(
        fs.events(),
        vec![
            Event::CreateDirectory("out".to_string()),
            Event::Open("out/a.txt".to_string()),
            Event::WriteLine("x".to_string()),
            Event::WriteLine("y".to_string()),
            Event::Release,
        ]
    );
}

/// Scenario: no directory, `CreateFile("a.txt", [])`
#[test]
fn test_scenario_unconfigured_empty_file() {
    let fs = RecordingFS::new();
    let writer = FileWriter::new(fs.clone(), fs.clone());

    writer.create_file("a.txt", &[] as &[String]).unwrap();

    assert_eq!(
        fs.events(),
        vec![Event::Open("a.txt".to_string()), Event::Release]
    );
}

/// Scenarios: `SetDirectory(null)` and `SetDirectory("   ")`
#[test]
fn test_scenario_rejected_paths() {
    let fs = RecordingFS::new();
    let mut writer = FileWriter::new(fs.clone(), fs.clone());

    assert!(matches!(
        writer.set_directory(None),
        Err(FileWriterError::NullPath)
    ));
    assert!(matches!(
        writer.set_directory("   "),
        Err(FileWriterError::BlankPath)
    ));
    assert!(fs.events().is_empty());
}

#[test]
fn test_batch_requests_with_memory_fs() {
    let fs = MemoryFS::new();
    let mut writer = FileWriter::new(fs.clone(), fs.clone());
    let requests: Vec<CreateRequest> = serde_json::from_str(
        r#"[
            {"directory": "/site", "name": "index.txt", "lines": ["home"]},
            {"name": "about.txt", "lines": ["about", "us"]},
            {"directory": "/site/blog", "name": "post.txt"}
        ]"#,
    )
    .unwrap();

    let paths = execute_all(&mut writer, &requests).unwrap();

    assert_eq!(
        paths,
        vec!["/site/index.txt", "/site/about.txt", "/site/blog/post.txt"]
    );
    assert_eq!(fs.file_count(), 3);
    assert_eq!(
        fs.read_to_string("/site/about.txt").unwrap(),
        format!("about{LINE_ENDING}us{LINE_ENDING}")
    );
    assert_eq!(fs.read_to_string("/site/blog/post.txt").unwrap(), "");
}
