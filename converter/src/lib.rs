//! Loading of configuration, documents and requests, and writing of answers,
//! for the search engine binary.

use engine::RelativeIndex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub mod answers;
pub mod config;
pub mod documents;
pub mod error;
pub mod requests;

pub use answers::{Answer, AnswersFile};
pub use config::{Config, ConfigInfo};
pub use error::{ConverterError, Result};

/// Locations of the files the converter reads and writes.
#[derive(Debug, Clone)]
pub struct ConverterPaths {
    pub config: PathBuf,
    pub requests: PathBuf,
    pub answers: PathBuf,
}

impl Default for ConverterPaths {
    fn default() -> Self {
        Self {
            config: PathBuf::from("config.json"),
            requests: PathBuf::from("requests.json"),
            answers: PathBuf::from("answers.json"),
        }
    }
}

pub struct ConverterJson {
    paths: ConverterPaths,
}

impl ConverterJson {
    pub fn new(paths: ConverterPaths) -> Self {
        Self { paths }
    }

    pub fn config(&self) -> Result<Config> {
        Config::load(&self.paths.config)
    }

    pub fn config_info(&self) -> Result<ConfigInfo> {
        Ok(self.config()?.info)
    }

    pub fn responses_limit(&self) -> Result<usize> {
        Ok(self.config()?.max_responses)
    }

    /// Document texts in config order; position in the result is the doc id.
    pub fn text_documents(&self) -> Result<Vec<String>> {
        let config = self.config()?;
        let docs = documents::load_documents(&config.files);
        tracing::info!(listed = config.files.len(), loaded = docs.len(), "documents loaded");
        Ok(docs)
    }

    pub fn requests(&self) -> Result<Vec<String>> {
        requests::load_requests(&self.paths.requests)
    }

    /// Write `answers.json`, capping each answer at the configured limit.
    pub fn put_answers(&self, results: &[Vec<RelativeIndex>]) -> Result<()> {
        let limit = self.responses_limit()?;
        let file = AnswersFile::new(results, limit);
        let mut out = BufWriter::new(File::create(&self.paths.answers)?);
        file.write_to(&mut out)
            .map_err(|source| ConverterError::Json { path: self.paths.answers.clone(), source })?;
        out.flush()?;
        tracing::info!(path = %self.paths.answers.display(), answers = results.len(), "answers written");
        Ok(())
    }
}
