use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use visage_assets::app::App;
use visage_assets::config::ConfigLoader;
use visage_assets::domain::UcscCatalog;
use visage_assets::error::AssetError;
use visage_assets::output::{HumanOutput, JsonOutput, OutputMode};
use visage_assets::ucsc::{UcscClient, UcscHttpClient};
use visage_assets::wikipathways::{PathwayClient, WikiPathwaysHttpClient};

#[derive(Parser)]
#[command(name = "visage-assets")]
#[command(about = "Generate the static genome and pathway data modules for Visage")]
#[command(version, author)]
struct Cli {
    /// Print the run summary as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Config file (defaults to ./visage-assets.json when present)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Merge UCSC, browser and species metadata into genomes.ts")]
    Genomes(GenomeArgs),
    #[command(about = "Fetch the WikiPathways catalog into pathways.ts")]
    Pathways(PathwayArgs),
}

#[derive(Args)]
struct GenomeArgs {
    /// Browser genome listing (JSON array)
    #[arg(long)]
    browser_genomes: Option<Utf8PathBuf>,

    /// Species metadata (JSON object keyed by genome id)
    #[arg(long)]
    species_metadata: Option<Utf8PathBuf>,

    #[arg(long)]
    output: Option<Utf8PathBuf>,
}

#[derive(Args)]
struct PathwayArgs {
    #[arg(long)]
    output: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<AssetError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &AssetError) -> u8 {
    match error {
        AssetError::ConfigRead(_)
        | AssetError::ConfigParse(_)
        | AssetError::UnsupportedSchema(_)
        | AssetError::InvalidConstantName(_)
        | AssetError::InputRead(_)
        | AssetError::InputParse { .. } => 2,
        error if error.is_network() => 3,
        AssetError::CatalogShape { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("visage_assets=info".parse::<Directive>().into_diagnostic()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let config = ConfigLoader::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Genomes(args) => {
            let mut job = config.genomes;
            if let Some(path) = args.browser_genomes {
                job.browser_genomes = path;
            }
            if let Some(path) = args.species_metadata {
                job.species_metadata = path;
            }
            if let Some(path) = args.output {
                job.output = path;
            }
            let app = App::new(UcscHttpClient::with_url(&job.ucsc_url)?, NopPathways);
            let result = app.run_genomes(&job)?;
            match output_mode {
                OutputMode::Json => JsonOutput::print_genomes(&result).into_diagnostic()?,
                OutputMode::Human => HumanOutput::print_genomes(&result),
            }
        }
        Commands::Pathways(args) => {
            let mut job = config.pathways;
            if let Some(path) = args.output {
                job.output = path;
            }
            let app = App::new(NopUcsc, WikiPathwaysHttpClient::with_url(&job.url)?);
            let result = app.run_pathways(&job)?;
            match output_mode {
                OutputMode::Json => JsonOutput::print_pathways(&result).into_diagnostic()?,
                OutputMode::Human => HumanOutput::print_pathways(&result),
            }
        }
    }
    Ok(())
}

struct NopUcsc;
struct NopPathways;

impl UcscClient for NopUcsc {
    fn list_genomes(&self) -> Result<UcscCatalog, AssetError> {
        Err(AssetError::CatalogHttp {
            catalog: "UCSC",
            message: "not configured".to_string(),
        })
    }
}

impl PathwayClient for NopPathways {
    fn pathway_info(&self) -> Result<serde_json::Value, AssetError> {
        Err(AssetError::CatalogHttp {
            catalog: "WikiPathways",
            message: "not configured".to_string(),
        })
    }
}
