use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use converter::{ConverterJson, ConverterPaths};
use engine::{truncate_results, EngineConfig, InvertedIndex, RelativeIndex, SearchServer};
use serde::Serialize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Parser)]
#[command(name = "searcher")]
#[command(about = "Answer search requests over a set of text documents", long_about = None)]
struct Cli {
    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every request in the requests file and write the answers file
    Run {
        #[arg(long, default_value = "config.json")]
        config: PathBuf,
        #[arg(long, default_value = "requests.json")]
        requests: PathBuf,
        #[arg(long, default_value = "answers.json")]
        answers: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Resolve queries given on the command line and print one JSON line per query
    Query {
        #[arg(long, default_value = "config.json")]
        config: PathBuf,
        /// Results per query; defaults to max_responses from the config
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        engine: EngineArgs,
        #[arg(required = true)]
        queries: Vec<String>,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// Maximum number of index build workers
    #[arg(long)]
    threads: Option<usize>,
    /// Cached query results; 0 disables the cache
    #[arg(long, default_value_t = 1000)]
    cache_capacity: usize,
}

impl EngineArgs {
    fn to_config(&self) -> EngineConfig {
        EngineConfig { cache_capacity: self.cache_capacity, build_threads: self.threads }
    }
}

#[derive(Serialize)]
struct QueryLine<'a> {
    query: &'a str,
    results: &'a [RelativeIndex],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Commands::Run { config, requests, answers, engine } => {
            run(ConverterPaths { config, requests, answers }, &engine.to_config())
        }
        Commands::Query { config, limit, engine, queries } => {
            let paths = ConverterPaths { config, ..ConverterPaths::default() };
            query(paths, limit, &engine.to_config(), &queries)
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}

fn build_server(documents: &[String], config: &EngineConfig) -> SearchServer {
    let index = InvertedIndex::new();
    index.update_document_base_with(documents, config.build_threads);
    SearchServer::with_config(Arc::new(index), config)
}

fn run(paths: ConverterPaths, engine_config: &EngineConfig) -> Result<()> {
    let converter = ConverterJson::new(paths);
    let info = converter.config_info().context("loading config")?;
    tracing::info!(name = %info.name, version = %info.version, "starting");

    let documents = converter.text_documents().context("loading documents")?;
    let requests = converter.requests().context("loading requests")?;
    tracing::info!(documents = documents.len(), requests = requests.len(), "inputs loaded");

    let server = build_server(&documents, engine_config);
    let results = server.search(&requests);
    for (request, result) in requests.iter().zip(&results) {
        tracing::info!(request = %request, hits = result.len(), "request resolved");
    }

    converter.put_answers(&results).context("writing answers")?;
    tracing::info!(cached = server.cached_queries(), "done");
    Ok(())
}

fn query(paths: ConverterPaths, limit: Option<usize>, engine_config: &EngineConfig, queries: &[String]) -> Result<()> {
    let converter = ConverterJson::new(paths);
    let limit = match limit {
        Some(n) => n,
        None => converter.responses_limit().context("loading config")?,
    };
    let documents = converter.text_documents().context("loading documents")?;

    let server = build_server(&documents, engine_config);
    let results = truncate_results(server.search(queries), limit);
    for (query, hits) in queries.iter().zip(&results) {
        let line = QueryLine { query, results: hits };
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}
