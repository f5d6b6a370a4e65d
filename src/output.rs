use std::fs;
use std::io::{self, Write};
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::app::{GenomeRunResult, PathwayRunResult};
use crate::error::AssetError;

const INDENT: &[u8] = b"    ";

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Human,
    Json,
}

pub fn validate_constant_name(name: &str) -> Result<(), AssetError> {
    if !IDENTIFIER.is_match(name) {
        return Err(AssetError::InvalidConstantName(name.to_string()));
    }
    Ok(())
}

/// Renders `export const <name> = <json>` with a four-space indent. Object
/// keys are emitted in their stored order.
pub fn render_constant(name: &str, value: &Value) -> Result<String, AssetError> {
    validate_constant_name(name)?;
    let mut buffer = format!("export const {name} = ").into_bytes();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut serializer)
        .map_err(|err| AssetError::Serialize(err.to_string()))?;
    String::from_utf8(buffer).map_err(|err| AssetError::Serialize(err.to_string()))
}

/// Replaces the file at `path` with the rendered constant. The content goes to
/// a sibling temp file first, so a failed run leaves any previous file intact.
pub fn write_constant(path: &Utf8Path, name: &str, value: &Value) -> Result<usize, AssetError> {
    let content = render_constant(name, value)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(parent.as_std_path())
        .map_err(|err| AssetError::Filesystem(err.to_string()))?;
    let mut temp = tempfile::Builder::new()
        .prefix("visage-assets")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| AssetError::Filesystem(err.to_string()))?;
    temp.write_all(content.as_bytes())
        .map_err(|err| AssetError::Filesystem(err.to_string()))?;
    temp.persist(path.as_std_path())
        .map_err(|err| AssetError::Filesystem(err.to_string()))?;
    tracing::info!(%path, bytes = content.len(), "wrote {name}");
    Ok(content.len())
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_genomes(result: &GenomeRunResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_pathways(result: &PathwayRunResult) -> io::Result<()> {
        Self::print_json(result)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

pub struct HumanOutput;

impl HumanOutput {
    pub fn print_genomes(result: &GenomeRunResult) {
        let report = &result.report;
        println!(
            "genomes: wrote {} of {} records to {}",
            report.qualified, report.considered, result.output
        );
        println!(
            "  excluded: {} not in UCSC, {} without refgene track, {} with multiple refgene tracks, {} without species metadata",
            report.missing_from_ucsc,
            report.no_reference_track,
            report.multiple_reference_tracks.len(),
            report.missing_species_metadata
        );
    }

    pub fn print_pathways(result: &PathwayRunResult) {
        println!(
            "pathways: wrote {} entries to {}",
            result.entries, result.output
        );
    }
}
