use crate::error::{ConverterError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Requests longer than this many characters are cut.
pub const MAX_REQUEST_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
struct RawRequestsFile {
    requests: Option<Value>,
}

pub fn load_requests(path: &Path) -> Result<Vec<String>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConverterError::MissingRequests(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    parse_requests(path, &text)
}

pub fn parse_requests(path: &Path, text: &str) -> Result<Vec<String>> {
    let raw: RawRequestsFile = serde_json::from_str(text)
        .map_err(|source| ConverterError::Json { path: path.to_path_buf(), source })?;
    let items = match raw.requests {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ConverterError::MalformedRequests),
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(request) => Ok(truncate_chars(request, MAX_REQUEST_CHARS)),
            _ => Err(ConverterError::MalformedRequests),
        })
        .collect()
}

fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((byte_idx, _)) = s.char_indices().nth(max) {
        s.truncate(byte_idx);
    }
    s
}
