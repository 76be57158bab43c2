//! `lexgenie`: command-line client for the case and document services.

mod http;
mod render;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use docket::error::PipelineError;
use docket::{AddCaseError, ApiError, Case, CaseApi, CaseField, CaseStore, DocumentPipeline, Endpoints, workflow};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::http::{DocumentUpload, HttpApi};

const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5001";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", .0.user_message())]
    AddCase(#[from] AddCaseError),
    #[error("{}", pipeline_message(.0))]
    Pipeline(#[from] PipelineError),
    #[error("request failed: {0}")]
    Api(#[from] ApiError),
    #[error("no case #{index}; {count} case(s) on file")]
    NoSuchCase { index: usize, count: usize },
    #[error("cannot read {}: {source}", path.display())]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

fn pipeline_message(err: &PipelineError) -> String {
    match err.user_message() {
        Some(message) => format!("{message} ({err})"),
        None => err.to_string(),
    }
}

#[derive(Parser, Debug)]
#[command(name = "lexgenie", about = "LexGenie case manager and document assistant")]
struct Cli {
    #[arg(long, env = "LEXGENIE_CASES_URL", default_value = DEFAULT_SERVICE_URL)]
    cases_url: String,

    #[arg(long, env = "LEXGENIE_RAG_URL", default_value = DEFAULT_SERVICE_URL)]
    rag_url: String,

    /// Per-request timeout; document calls wait on the language model.
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Cases(CasesCommand),
    Rag(RagCommand),
}

#[derive(Args, Debug)]
struct CasesCommand {
    #[command(subcommand)]
    command: CasesSubcommand,
}

#[derive(Subcommand, Debug)]
enum CasesSubcommand {
    /// Fetch every case, optionally filtered locally.
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Server-side search.
    Search { query: String },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image_url: String,
    },
    /// Show the N-th case (1-based) of `cases list`.
    Show { index: usize },
}

#[derive(Args, Debug)]
struct RagCommand {
    #[command(subcommand)]
    command: RagSubcommand,
}

#[derive(Subcommand, Debug)]
enum RagSubcommand {
    /// Upload a document and print its summary.
    Summarize { file: PathBuf },
    /// Summarize a document, then ask a legal question against it.
    Ask {
        file: PathBuf,
        #[arg(long)]
        query: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let endpoints = Endpoints::new(cli.cases_url, cli.rag_url);
    let api = HttpApi::new(endpoints, Duration::from_secs(cli.timeout_secs))?;
    let output = match cli.command {
        Command::Cases(cmd) => run_cases(&api, cmd.command, cli.json).await?,
        Command::Rag(cmd) => run_rag(&api, cmd.command, cli.json).await?,
    };
    println!("{output}");
    Ok(())
}

// =============================================================================
// CASES
// =============================================================================

async fn run_cases(api: &HttpApi, command: CasesSubcommand, json: bool) -> Result<String, CliError> {
    match command {
        CasesSubcommand::List { search } => {
            let mut store = load_store(api).await?;
            if let Some(query) = search {
                store.search(query);
            }
            cases_output(store.filtered(), json)
        }
        CasesSubcommand::Search { query } => {
            let hits = api.search_cases(&query).await?;
            cases_output(&hits, json)
        }
        CasesSubcommand::Add { title, description, image_url } => {
            let mut store = CaseStore::new();
            store.edit(CaseField::Title, title);
            store.edit(CaseField::Description, description);
            store.edit(CaseField::ImageUrl, image_url);
            let refreshed = workflow::submit_case(api, &mut store).await?;
            let count = refreshed.then(|| store.cases().len());
            if json {
                return Ok(serde_json::to_string_pretty(&render::added_json(count))?);
            }
            Ok(render::added(count))
        }
        CasesSubcommand::Show { index } => {
            let store = load_store(api).await?;
            let case = pick_case(store.cases(), index)?;
            if json {
                return Ok(serde_json::to_string_pretty(case)?);
            }
            Ok(render::case_detail(case))
        }
    }
}

/// Fetch into a fresh store, surfacing the failure the store would only log.
async fn load_store(api: &HttpApi) -> Result<CaseStore, CliError> {
    let mut store = CaseStore::new();
    let ticket = store.begin_fetch();
    let cases = api.list_cases().await?;
    store.finish_fetch(ticket, Ok(cases));
    Ok(store)
}

fn pick_case(cases: &[Case], index: usize) -> Result<&Case, CliError> {
    index
        .checked_sub(1)
        .and_then(|i| cases.get(i))
        .ok_or(CliError::NoSuchCase { index, count: cases.len() })
}

fn cases_output(cases: &[Case], json: bool) -> Result<String, CliError> {
    if json {
        return Ok(serde_json::to_string_pretty(cases)?);
    }
    Ok(render::case_list(cases))
}

// =============================================================================
// DOCUMENTS
// =============================================================================

async fn run_rag(api: &HttpApi, command: RagSubcommand, json: bool) -> Result<String, CliError> {
    let (file, query) = match command {
        RagSubcommand::Summarize { file } => (file, None),
        RagSubcommand::Ask { file, query } => (file, Some(query)),
    };

    let upload = read_upload(&file).await?;
    let mut pipeline = DocumentPipeline::new();
    let name = upload.file_name.clone();
    pipeline.select_file(upload, name);
    workflow::process_document(api, &mut pipeline).await?;

    if let Some(query) = query {
        pipeline.set_query(query);
        workflow::generate_response(api, &mut pipeline).await?;
    }

    let summary = pipeline.summary().unwrap_or_default();
    let answer = pipeline.answer();
    if json {
        let value: Value = render::rag_json(summary, answer);
        return Ok(serde_json::to_string_pretty(&value)?);
    }
    Ok(match answer {
        Some(answer) => format!("{summary}\n\n{answer}"),
        None => summary.to_owned(),
    })
}

async fn read_upload(path: &Path) -> Result<DocumentUpload, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::ReadFile { path: path.to_owned(), source })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(DocumentUpload { file_name, bytes })
}
