use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

pub const MAX_DOCUMENT_CHARS: usize = 100_000;
pub const MAX_DOCUMENT_WORDS: usize = 1000;
pub const MAX_WORD_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooLong,
    TooManyWords,
    WordTooLong,
}

/// Check a document against the loader's size limits.
pub fn validate_document(content: &str) -> Result<(), Rejection> {
    if content.chars().count() > MAX_DOCUMENT_CHARS {
        return Err(Rejection::TooLong);
    }
    let mut words = 0usize;
    for word in content.split_whitespace() {
        if word.chars().count() > MAX_WORD_CHARS {
            return Err(Rejection::WordTooLong);
        }
        words += 1;
        if words > MAX_DOCUMENT_WORDS {
            return Err(Rejection::TooManyWords);
        }
    }
    Ok(())
}

/// Expand directories into their files, sorted by path; plain entries pass through.
pub fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            out.extend(
                WalkDir::new(path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.into_path()),
            );
        } else {
            out.push(path.clone());
        }
    }
    out
}

/// Read every listed document in order, skipping unreadable or invalid ones.
pub fn load_documents(paths: &[PathBuf]) -> Vec<String> {
    let mut documents = Vec::new();
    for path in expand_paths(paths) {
        if let Some(content) = read_document(&path) {
            documents.push(content);
        }
    }
    documents
}

fn read_document(path: &Path) -> Option<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "document not readable, skipping");
            return None;
        }
    };
    let content = String::from_utf8_lossy(&bytes).into_owned();
    if let Err(reason) = validate_document(&content) {
        warn!(path = %path.display(), ?reason, "document rejected");
        return None;
    }
    Some(content)
}
