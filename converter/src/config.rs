use crate::error::{ConverterError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SUPPORTED_VERSION: &str = "0.1";
pub const DEFAULT_MAX_RESPONSES: usize = 5;

#[derive(Debug, Deserialize)]
struct RawConfigFile {
    config: Option<RawConfigSection>,
    files: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawConfigSection {
    name: Option<String>,
    version: Option<String>,
    max_responses: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigInfo {
    pub name: String,
    pub version: String,
}

/// A validated `config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    pub info: ConfigInfo,
    pub max_responses: usize,
    pub files: Vec<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConverterError::MissingConfig(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let raw: RawConfigFile = serde_json::from_str(text)
            .map_err(|source| ConverterError::Json { path: path.to_path_buf(), source })?;

        let section = raw.config.ok_or(ConverterError::EmptyConfig)?;
        let name = section.name.filter(|n| !n.is_empty()).ok_or(ConverterError::EmptyConfig)?;
        let version = section.version.filter(|v| !v.is_empty()).ok_or(ConverterError::EmptyConfig)?;
        if version != SUPPORTED_VERSION {
            return Err(ConverterError::InvalidVersion { found: version, expected: SUPPORTED_VERSION });
        }

        let max_responses = match section.max_responses {
            Some(n) if n <= 0 => return Err(ConverterError::InvalidMaxResponses(n)),
            Some(n) => usize::try_from(n).map_err(|_| ConverterError::InvalidMaxResponses(n))?,
            None => DEFAULT_MAX_RESPONSES,
        };

        let files = match raw.files {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(p) => Ok(PathBuf::from(p)),
                    _ => Err(ConverterError::MalformedFiles),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(ConverterError::MalformedFiles),
        };

        Ok(Self { info: ConfigInfo { name, version }, max_responses, files })
    }
}
