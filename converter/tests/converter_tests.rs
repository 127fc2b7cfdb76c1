use converter::{ConverterError, ConverterJson, ConverterPaths};
use engine::{InvertedIndex, SearchServer};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

fn write_config(dir: &Path, files: &[&str], max_responses: i64) {
    let files: Vec<String> = files.iter().map(|f| dir.join(f).to_string_lossy().into_owned()).collect();
    let config = serde_json::json!({
        "config": {"name": "SearchEngine", "version": "0.1", "max_responses": max_responses},
        "files": files,
    });
    fs::write(dir.join("config.json"), config.to_string()).unwrap();
}

fn converter(dir: &Path) -> ConverterJson {
    ConverterJson::new(ConverterPaths {
        config: dir.join("config.json"),
        requests: dir.join("requests.json"),
        answers: dir.join("answers.json"),
    })
}

fn drinks_fixture() -> TempDir {
    let dir = tempdir().unwrap();
    let docs = [
        "milk milk milk milk water water water",
        "milk water water",
        "milk milk milk milk milk water water water water water",
        "americano cappuccino",
    ];
    for (i, text) in docs.iter().enumerate() {
        fs::write(dir.path().join(format!("file{:03}.txt", i + 1)), text).unwrap();
    }
    write_config(dir.path(), &["file001.txt", "file002.txt", "file003.txt", "file004.txt"], 2);
    fs::write(dir.path().join("requests.json"), r#"{"requests": ["milk water", "sugar", "cappuccino"]}"#).unwrap();
    dir
}

#[test]
fn missing_files_are_named_errors() {
    let dir = tempdir().unwrap();
    let conv = converter(dir.path());
    assert!(matches!(conv.config_info(), Err(ConverterError::MissingConfig(_))));
    assert!(matches!(conv.requests(), Err(ConverterError::MissingRequests(_))));
}

#[test]
fn loads_documents_in_config_order() {
    let dir = drinks_fixture();
    let conv = converter(dir.path());
    assert_eq!(conv.config_info().unwrap().version, "0.1");
    assert_eq!(conv.responses_limit().unwrap(), 2);
    let docs = conv.text_documents().unwrap();
    assert_eq!(docs.len(), 4);
    assert_eq!(docs[1], "milk water water");
}

#[test]
fn skips_missing_and_invalid_documents() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("good.txt"), "good words").unwrap();
    fs::write(dir.path().join("bad.txt"), "x".repeat(101)).unwrap();
    write_config(dir.path(), &["missing.txt", "bad.txt", "good.txt"], 5);
    let docs = converter(dir.path()).text_documents().unwrap();
    assert_eq!(docs, vec!["good words"]);
}

#[test]
fn expands_directories_sorted() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("docs");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("b.txt"), "second").unwrap();
    fs::write(sub.join("a.txt"), "first").unwrap();
    write_config(dir.path(), &["docs"], 5);
    let docs = converter(dir.path()).text_documents().unwrap();
    assert_eq!(docs, vec!["first", "second"]);
}

#[test]
fn end_to_end_answers() {
    let dir = drinks_fixture();
    let conv = converter(dir.path());
    let docs = conv.text_documents().unwrap();
    let requests = conv.requests().unwrap();

    let server = SearchServer::new(Arc::new(InvertedIndex::build(&docs)));
    let results = server.search(&requests);
    conv.put_answers(&results).unwrap();

    let text = fs::read_to_string(dir.path().join("answers.json")).unwrap();
    let answers: Value = serde_json::from_str(&text).unwrap();
    let first = &answers["answers"]["request001"];
    assert_eq!(first["result"], "true");
    let relevance = first["relevance"].as_array().unwrap();
    assert_eq!(relevance.len(), 2);
    assert_eq!(relevance[0]["docid"], 2);
    assert_eq!(relevance[1]["docid"], 0);
    assert!((relevance[1]["rank"].as_f64().unwrap() - 0.7).abs() < 1e-4);

    assert_eq!(answers["answers"]["request002"]["result"], "false");
    assert_eq!(answers["answers"]["request003"]["docid"], 3);
}
