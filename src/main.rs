mod adapters;
mod application;
mod cli;
mod config;
mod dep_graph;
mod ports;
mod shared;

use adapters::outbound::checksums::{CachingChecksumRepository, LocalRepositoryChecksums};
use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::StdinReader;
use application::dto::{GraphRequest, InputKind, OutputFormat, DEFAULT_CHECKSUM_CONCURRENCY};
use application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use application::use_cases::BuildDepGraphUseCase;
use cli::Args;
use config::ConfigFile;
use owo_colors::OwoColorize;
use shared::error::ExitCode;
use shared::Result;
use std::env;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MVN_DEP_GRAPH_LOG")
        .unwrap_or_else(|_| EnvFilter::new("mvn_dep_graph=warn"));

    let format = env::var("MVN_DEP_GRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let format = resolve_format(&args, &config)?;
    let request = build_request(&args, &config);

    // Create adapters (Dependency Injection)
    let output_reader = StdinReader::new();
    let checksum_repository = request
        .checksums
        .then(|| resolve_repository(&args, &config))
        .flatten()
        .map(|root| CachingChecksumRepository::new(LocalRepositoryChecksums::new(root)));
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let use_case = BuildDepGraphUseCase::new(output_reader, checksum_repository, progress_reporter);
    let response = use_case.execute(request).await?;

    if !args.quiet {
        eprintln!("{}", FormatterFactory::progress_message(format));
    }
    let formatter = FormatterFactory::create(format);
    let formatted_output = formatter.format(&response.modules)?;

    let presenter_type = match &args.output {
        Some(path) => PresenterType::File(path.clone()),
        None => PresenterType::Stdout,
    };
    PresenterFactory::create(presenter_type).present(&formatted_output)?;

    Ok(())
}

/// Explicit `--config` must exist; otherwise the working directory is searched
fn load_config(args: &Args) -> Result<ConfigFile> {
    if let Some(path) = &args.config {
        let config = config::load_config_from_path(path)?;
        eprintln!("📋 Loaded config from: {}", path.display());
        return Ok(config);
    }

    let cwd = env::current_dir()?;
    match config::discover_config(&cwd)? {
        Some(config) => {
            eprintln!(
                "📋 Auto-discovered config file: {}",
                cwd.join(config::CONFIG_FILENAME).display()
            );
            Ok(config)
        }
        None => Ok(ConfigFile::default()),
    }
}

/// CLI format wins over the config file
fn resolve_format(args: &Args, config: &ConfigFile) -> Result<OutputFormat> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    match &config.format {
        Some(format) => format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!(e)),
        None => Ok(OutputFormat::default()),
    }
}

/// Flags set on the command line switch a feature on; config values apply otherwise
fn build_request(args: &Args, config: &ConfigFile) -> GraphRequest {
    let enabled = |flag: bool, configured: Option<bool>| flag || configured.unwrap_or(false);

    GraphRequest {
        input_path: args.input.clone(),
        resolve_report_path: args.resolve_report.clone(),
        input_kind: if args.tree {
            InputKind::Tree
        } else {
            InputKind::Digraph
        },
        include_test_scope: enabled(args.include_test_scope, config.include_test_scope),
        verbose: enabled(args.verbose, config.verbose),
        aggregate: enabled(args.aggregate, config.aggregate),
        label_scopes: enabled(args.label_scopes, config.label_scopes),
        checksums: enabled(args.checksums, config.checksums),
        checksum_concurrency: config
            .checksum_concurrency
            .unwrap_or(DEFAULT_CHECKSUM_CONCURRENCY),
    }
}

fn resolve_repository(args: &Args, config: &ConfigFile) -> Option<PathBuf> {
    args.repository
        .clone()
        .or_else(|| config.repository.clone())
        .or_else(LocalRepositoryChecksums::default_location)
}
