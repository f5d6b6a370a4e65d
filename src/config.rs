use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::AssetError;
use crate::output::validate_constant_name;
use crate::ucsc::UCSC_GENOMES_URL;
use crate::wikipathways::PATHWAY_INFO_URL;

pub const DEFAULT_CONFIG_FILE: &str = "visage-assets.json";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub genomes: GenomeSection,
    #[serde(default)]
    pub pathways: PathwaySection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GenomeSection {
    #[serde(default)]
    pub ucsc_url: Option<String>,
    #[serde(default)]
    pub browser_genomes: Option<Utf8PathBuf>,
    #[serde(default)]
    pub species_metadata: Option<Utf8PathBuf>,
    #[serde(default)]
    pub output: Option<Utf8PathBuf>,
    #[serde(default)]
    pub constant: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PathwaySection {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub output: Option<Utf8PathBuf>,
    #[serde(default)]
    pub constant: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomeJob {
    pub ucsc_url: String,
    pub browser_genomes: Utf8PathBuf,
    pub species_metadata: Utf8PathBuf,
    pub output: Utf8PathBuf,
    pub constant: String,
}

impl Default for GenomeJob {
    fn default() -> Self {
        Self {
            ucsc_url: UCSC_GENOMES_URL.to_string(),
            browser_genomes: Utf8PathBuf::from("igv.json"),
            species_metadata: Utf8PathBuf::from("eva.json"),
            output: Utf8PathBuf::from("genomes.ts"),
            constant: "genomes".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayJob {
    pub url: String,
    pub output: Utf8PathBuf,
    pub constant: String,
}

impl Default for PathwayJob {
    fn default() -> Self {
        Self {
            url: PATHWAY_INFO_URL.to_string(),
            output: Utf8PathBuf::from("pathways.ts"),
            constant: "pathways".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub genomes: GenomeJob,
    pub pathways: PathwayJob,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `path`, or `visage-assets.json` from the current directory when
    /// present. With neither, the built-in defaults apply.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, AssetError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            tracing::debug!("no config file, using defaults");
            return Self::resolve_config(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| AssetError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| AssetError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, AssetError> {
        let schema_version = config.schema_version.unwrap_or(SCHEMA_VERSION);
        if schema_version != SCHEMA_VERSION {
            return Err(AssetError::UnsupportedSchema(schema_version));
        }
        let genome_defaults = GenomeJob::default();
        let pathway_defaults = PathwayJob::default();

        let genomes = GenomeJob {
            ucsc_url: config.genomes.ucsc_url.unwrap_or(genome_defaults.ucsc_url),
            browser_genomes: config
                .genomes
                .browser_genomes
                .unwrap_or(genome_defaults.browser_genomes),
            species_metadata: config
                .genomes
                .species_metadata
                .unwrap_or(genome_defaults.species_metadata),
            output: config.genomes.output.unwrap_or(genome_defaults.output),
            constant: config.genomes.constant.unwrap_or(genome_defaults.constant),
        };
        let pathways = PathwayJob {
            url: config.pathways.url.unwrap_or(pathway_defaults.url),
            output: config.pathways.output.unwrap_or(pathway_defaults.output),
            constant: config.pathways.constant.unwrap_or(pathway_defaults.constant),
        };

        validate_constant_name(&genomes.constant)?;
        validate_constant_name(&pathways.constant)?;

        Ok(ResolvedConfig {
            schema_version,
            genomes,
            pathways,
        })
    }
}
