use serde::Serialize;
use serde_json::Value;

use crate::domain::{BrowserGenome, Record, SpeciesIndex, UcscCatalog};
use crate::error::AssetError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualification {
    Qualified,
    MissingFromUcsc,
    NoReferenceTrack,
    MultipleReferenceTracks(usize),
    MissingSpeciesMetadata,
}

impl Qualification {
    pub fn is_qualified(&self) -> bool {
        matches!(self, Qualification::Qualified)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualificationReport {
    pub considered: usize,
    pub qualified: usize,
    pub missing_from_ucsc: usize,
    pub no_reference_track: usize,
    pub missing_species_metadata: usize,
    pub multiple_reference_tracks: Vec<String>,
}

impl QualificationReport {
    fn record(&mut self, genome: &BrowserGenome, outcome: &Qualification) {
        self.considered += 1;
        match outcome {
            Qualification::Qualified => self.qualified += 1,
            Qualification::MissingFromUcsc => self.missing_from_ucsc += 1,
            Qualification::NoReferenceTrack => self.no_reference_track += 1,
            Qualification::MultipleReferenceTracks(_) => self
                .multiple_reference_tracks
                .push(genome.display_id().to_string()),
            Qualification::MissingSpeciesMetadata => self.missing_species_metadata += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenomeSelection {
    pub genomes: Vec<Record>,
    pub report: QualificationReport,
}

impl GenomeSelection {
    pub fn into_value(self) -> Value {
        Value::Array(self.genomes.into_iter().map(Value::Object).collect())
    }
}

/// Read-only snapshot of the UCSC catalog and species metadata that browser
/// genomes are joined against.
#[derive(Debug, Clone)]
pub struct GenomeSources {
    ucsc: UcscCatalog,
    species: SpeciesIndex,
}

impl GenomeSources {
    pub fn new(ucsc: UcscCatalog, species: SpeciesIndex) -> Self {
        Self { ucsc, species }
    }

    /// Checks UCSC membership first; the entry's `tracks` are only read for
    /// genomes UCSC knows, and a malformed track list there is fatal.
    pub fn qualification(&self, genome: &BrowserGenome) -> Result<Qualification, AssetError> {
        let Some(id) = genome.id().filter(|id| self.ucsc.contains(id)) else {
            return Ok(Qualification::MissingFromUcsc);
        };
        match genome.reference_track_count()? {
            0 => return Ok(Qualification::NoReferenceTrack),
            1 => {}
            count => {
                tracing::warn!(genome = id, count, "multiple refgene tracks found for {id}");
                return Ok(Qualification::MultipleReferenceTracks(count));
            }
        }
        if !self.species.contains(id) {
            return Ok(Qualification::MissingSpeciesMetadata);
        }
        Ok(Qualification::Qualified)
    }

    pub fn qualify(&self, genome: &BrowserGenome) -> Result<bool, AssetError> {
        Ok(self.assess(genome)?.is_qualified())
    }

    fn assess(&self, genome: &BrowserGenome) -> Result<Qualification, AssetError> {
        let outcome = self.qualification(genome)?;
        if !outcome.is_qualified() {
            tracing::debug!(genome = genome.display_id(), ?outcome, "genome excluded");
        }
        Ok(outcome)
    }

    /// Overlays browser fields, then UCSC fields, then `evaSpecies` and
    /// `trackHubId`. Later layers win on key collision; a key keeps the
    /// position of its first appearance.
    pub fn enrich(&self, genome: &BrowserGenome) -> Result<Record, AssetError> {
        let id = genome
            .id()
            .ok_or_else(|| AssetError::UnknownGenome(genome.display_id().to_string()))?;
        let ucsc = self.ucsc.record(id)?;
        let species = self.species.info(id)?;

        let mut enriched = genome.fields.clone();
        overlay(&mut enriched, ucsc);
        overlay(&mut enriched, &species.to_record());
        Ok(enriched)
    }

    pub fn select(&self, genomes: &[BrowserGenome]) -> Result<GenomeSelection, AssetError> {
        let mut report = QualificationReport::default();
        let mut selected = Vec::new();
        for genome in genomes {
            let outcome = self.assess(genome)?;
            report.record(genome, &outcome);
            if outcome.is_qualified() {
                selected.push(self.enrich(genome)?);
            }
        }
        Ok(GenomeSelection {
            genomes: selected,
            report,
        })
    }
}

pub fn overlay(target: &mut Record, layer: &Record) {
    for (key, value) in layer {
        target.insert(key.clone(), value.clone());
    }
}
