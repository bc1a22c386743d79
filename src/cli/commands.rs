use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::client::ApiClient;
use crate::config::Settings;
use crate::models::RawTranscript;
use crate::output::write_transcripts;
use crate::parsers::normalize_transcript;
use crate::pipeline::{PipelineReport, RunStatus, run_pipeline};

#[derive(Parser)]
#[command(name = "transcript-exporter")]
#[command(version)]
#[command(about = "Export simplified conversation transcripts from a remote session API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch sessions and their transcripts, then write the simplified result
    Export(ExportArgs),
    /// Print the simplified lines of a raw transcript JSON file
    Normalize {
        /// File containing the transcript as a JSON array of turns
        path: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Config file (defaults to the platform config dir when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Session list endpoint; transcripts are fetched from <BASE_URL>/<transcriptID>
    #[arg(long, env = "TRANSCRIPT_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Value of the authorization header
    #[arg(long, env = "TRANSCRIPT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Maximum number of sessions to process
    #[arg(long, value_name = "N")]
    pub max_sessions: Option<NonZeroUsize>,

    /// Consecutive transcript failures before the run stops
    #[arg(long, value_name = "N")]
    pub max_failures: Option<NonZeroUsize>,

    /// Where to write the simplified transcripts
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ExportArgs {
    /// Layer command-line values over file/default settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(api_key) = &self.api_key {
            settings.api_key = api_key.clone();
        }
        if let Some(max_sessions) = self.max_sessions {
            settings.max_sessions = max_sessions.get();
        }
        if let Some(max_failures) = self.max_failures {
            settings.max_failures = max_failures.get();
        }
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout_secs = timeout;
        }
    }

    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        self.apply(&mut settings);
        settings.validate()?;
        Ok(settings)
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Export(args)) => {
            export(args).await?;
        }
        Some(Commands::Normalize { path }) => {
            normalize(path)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

async fn export(args: &ExportArgs) -> Result<()> {
    let settings = args.resolve()?;
    let client = ApiClient::from_settings(&settings)?;

    let report = run_pipeline(&client, &client, settings.limits()?).await;

    if report.status == RunStatus::NoSessions {
        println!("No sessions found or error occurred.");
        return Ok(());
    }

    write_transcripts(&settings.output, &report.output)?;
    print_summary(&report, &settings.output);

    Ok(())
}

fn print_summary(report: &PipelineReport, output: &Path) {
    println!("Transcript Export Summary");
    println!("=========================");
    println!("Sessions found: {}", report.total_sessions);
    println!("Sessions attempted: {}", report.attempted);
    println!("Transcripts exported: {}", report.output.len());
    println!("Failed fetches: {}", report.failed);
    if report.skipped > 0 {
        println!("Records without a transcript id: {}", report.skipped);
    }
    if let RunStatus::StoppedByFailure { consecutive_failures } = report.status {
        println!("Stopped early after {} consecutive failures", consecutive_failures);
    }
    println!();
    println!("Saved to: {}", output.display());
}

fn normalize(path: &Path) -> Result<()> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to open transcript file: {}", path.display()))?;
    let transcript: RawTranscript = serde_json::from_str(&json)
        .with_context(|| format!("Transcript file is not a JSON array: {}", path.display()))?;

    for line in normalize_transcript(&transcript) {
        println!("{}", line);
    }

    Ok(())
}
