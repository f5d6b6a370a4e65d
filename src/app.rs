use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::config::{GenomeJob, PathwayJob};
use crate::error::AssetError;
use crate::genomes::{GenomeSources, QualificationReport};
use crate::listing::{load_browser_genomes, load_species_metadata};
use crate::output::write_constant;
use crate::ucsc::UcscClient;
use crate::wikipathways::PathwayClient;

#[derive(Debug, Clone, Serialize)]
pub struct GenomeRunResult {
    pub output: String,
    pub constant: String,
    pub bytes_written: usize,
    pub report: QualificationReport,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathwayRunResult {
    pub output: String,
    pub constant: String,
    pub bytes_written: usize,
    pub entries: usize,
    pub generated_at: String,
}

/// Drives the two generation pipelines. Each run reads its inputs once,
/// computes the output in memory and writes it once; any error aborts the run
/// before the output file is touched.
#[derive(Clone)]
pub struct App<U: UcscClient, P: PathwayClient> {
    ucsc: U,
    pathways: P,
}

impl<U: UcscClient, P: PathwayClient> App<U, P> {
    pub fn new(ucsc: U, pathways: P) -> Self {
        Self { ucsc, pathways }
    }

    pub fn run_genomes(&self, job: &GenomeJob) -> Result<GenomeRunResult, AssetError> {
        let ucsc = self.ucsc.list_genomes()?;
        let browser = load_browser_genomes(&job.browser_genomes)?;
        let species = load_species_metadata(&job.species_metadata)?;

        let selection = GenomeSources::new(ucsc, species).select(&browser)?;
        let report = selection.report.clone();
        tracing::info!(
            considered = report.considered,
            qualified = report.qualified,
            "genome selection complete"
        );

        let bytes_written = write_constant(&job.output, &job.constant, &selection.into_value())?;
        Ok(GenomeRunResult {
            output: job.output.to_string(),
            constant: job.constant.clone(),
            bytes_written,
            report,
            generated_at: Utc::now().to_rfc3339(),
        })
    }

    pub fn run_pathways(&self, job: &PathwayJob) -> Result<PathwayRunResult, AssetError> {
        let catalog = self.pathways.pathway_info()?;
        let entries = entry_count(&catalog);
        tracing::info!(entries, "fetched pathway catalog");

        let bytes_written = write_constant(&job.output, &job.constant, &catalog)?;
        Ok(PathwayRunResult {
            output: job.output.to_string(),
            constant: job.constant.clone(),
            bytes_written,
            entries,
            generated_at: Utc::now().to_rfc3339(),
        })
    }
}

fn entry_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        Value::Object(fields) => fields.len(),
        Value::Null => 0,
        _ => 1,
    }
}
