use engine::{DocId, RelativeIndex};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct Relevance {
    pub docid: DocId,
    pub rank: f32,
}

/// One request's entry in `answers.json`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Answer {
    NotFound { result: &'static str },
    Single { result: &'static str, docid: DocId, rank: f32 },
    Ranked { result: &'static str, relevance: Vec<Relevance> },
}

impl Answer {
    pub fn from_results(results: &[RelativeIndex], max_responses: usize) -> Self {
        let limited = &results[..results.len().min(max_responses)];
        match limited {
            [] => Answer::NotFound { result: "false" },
            [only] => Answer::Single { result: "true", docid: only.doc_id, rank: only.rank },
            many => Answer::Ranked {
                result: "true",
                relevance: many.iter().map(|r| Relevance { docid: r.doc_id, rank: r.rank }).collect(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswersFile {
    pub answers: BTreeMap<String, Answer>,
}

impl AnswersFile {
    pub fn new(results: &[Vec<RelativeIndex>], max_responses: usize) -> Self {
        let answers = results
            .iter()
            .enumerate()
            .map(|(i, r)| (request_id(i), Answer::from_results(r, max_responses)))
            .collect();
        Self { answers }
    }

    /// Pretty-print with a four-space indent followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> serde_json::Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut ser)?;
        writer.write_all(b"\n").map_err(serde_json::Error::io)
    }
}

/// `request001`, `request002`, ... for zero-based position `i`.
pub fn request_id(i: usize) -> String {
    format!("request{:03}", i + 1)
}
