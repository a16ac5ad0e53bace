use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vaultsmith_config::AppConfig;
use vaultsmith_llm::{ChatClient, extract_structure, prompt, simplify};
use vaultsmith_spec::load_spec;
use vaultsmith_vault::{TracingReporter, VaultSummary, VaultWriter, render_tree};

#[derive(Debug, Parser)]
#[command(
    name = "vaultsmith",
    version,
    about = "Generate an Obsidian-style markdown vault from a JSON spec"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config/default.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a vault from a vault-spec JSON file.
    Generate {
        /// Path to the vault spec JSON.
        spec: PathBuf,
        /// Directory to create the vault under (overrides config).
        #[arg(long)]
        base_path: Option<String>,
        /// Worker-pool width for file writes (overrides config).
        #[arg(long)]
        workers: Option<usize>,
        /// Also write a README.md index into every folder.
        #[arg(long)]
        indexes: bool,
    },
    /// Derive a vault structure from a raw chat export via the
    /// text-generation API, then generate it.
    Analyze {
        /// Path to the chat export JSON.
        export: PathBuf,
        /// Vault name to generate into (overrides the derived name).
        #[arg(long)]
        out: Option<String>,
        /// Prompt template path (overrides config).
        #[arg(long)]
        prompt: Option<PathBuf>,
        /// Vault language (overrides config and VAULT_LANG).
        #[arg(long)]
        lang: Option<String>,
    },
    /// Print the directory tree of an existing vault.
    Tree {
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match AppConfig::load_from(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load config {}: {err:#}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.telemetry.log_level)),
        )
        .init();

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: AppConfig) -> Result<()> {
    match command {
        Commands::Generate {
            spec,
            base_path,
            workers,
            indexes,
        } => {
            let parsed = load_spec(&spec)?;
            let writer = VaultWriter::new(
                base_path.unwrap_or_else(|| config.generator.base_path.clone()),
            )
            .workers(workers.unwrap_or_else(|| config.worker_count()))
            .write_indexes(indexes || config.generator.write_folder_indexes);

            let summary = writer.generate(&parsed, &TracingReporter).await?;
            print_summary(&summary);
            print_tree(&summary)?;
            Ok(())
        }
        Commands::Analyze {
            export,
            out,
            prompt: prompt_path,
            lang,
        } => {
            let raw = fs::read_to_string(&export)
                .with_context(|| format!("failed to read chat export {}", export.display()))?;
            let simplified = simplify::simplify_export(&raw)?;
            info!(simplified_bytes = simplified.len(), "simplified chat export");

            let template_path = prompt_path
                .unwrap_or_else(|| PathBuf::from(&config.llm.prompt_path));
            let template = prompt::load_prompt(&template_path)?;
            let language = lang.as_deref().unwrap_or(&config.llm.vault_lang);
            let filled = prompt::fill_prompt(&template, language, &simplified);

            let client = ChatClient::new(
                &config.llm.api_base,
                &config.llm.model,
                &config.llm.api_key,
            );
            let response = client.chat(&filled).await?;

            let Some(mut derived) = extract_structure(&response) else {
                bail!("generation response did not contain a parsable vault structure");
            };
            if derived.folders.is_empty() {
                bail!("derived vault structure has no folders; nothing to generate");
            }
            if let Some(name) = out {
                derived.obsidian_config.vault_name = name;
            }

            let writer = VaultWriter::new(config.generator.base_path.clone())
                .workers(config.worker_count())
                .write_indexes(config.generator.write_folder_indexes);
            let summary = writer.generate(&derived, &TracingReporter).await?;
            print_summary(&summary);
            print_tree(&summary)?;
            Ok(())
        }
        Commands::Tree { path } => {
            print!("{}", render_tree(&path)?);
            Ok(())
        }
    }
}

fn print_summary(summary: &VaultSummary) {
    println!("── vault generated ──────────────────────────────────");
    println!("  path    : {}", summary.vault_path.display());
    println!("  created : {}", summary.created);
    println!("  skipped : {}", summary.skipped);
    println!("  failed  : {}", summary.failed);
}

fn print_tree(summary: &VaultSummary) -> Result<()> {
    println!("{}", summary.vault_path.display());
    print!("{}", render_tree(&summary.vault_path)?);
    Ok(())
}
