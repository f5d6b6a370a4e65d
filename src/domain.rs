use serde_json::{Map, Value};

use crate::error::AssetError;

/// Track format tag of the reference gene annotation layer.
pub const REFGENE_FORMAT: &str = "refgene";

/// Loosely-typed JSON object. Keys keep their insertion order.
pub type Record = Map<String, Value>;

/// One entry of the browser genome listing, kept as the original object.
/// Nothing beyond "is an object" is checked until qualification asks for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserGenome {
    pub fields: Record,
}

impl BrowserGenome {
    pub fn from_value(value: Value) -> Result<Self, AssetError> {
        let Value::Object(fields) = value else {
            return Err(malformed_browser("genome entry is not an object".to_string()));
        };
        Ok(Self { fields })
    }

    /// The `id` field, when it is a string. Any other shape can never match a
    /// catalog key.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(|value| value.as_str())
    }

    pub fn display_id(&self) -> &str {
        self.id().unwrap_or("<no id>")
    }

    pub fn tracks(&self) -> Result<Vec<TrackDescriptor>, AssetError> {
        self.fields
            .get("tracks")
            .and_then(|value| value.as_array())
            .ok_or_else(|| {
                malformed_browser(format!("genome {} has no `tracks` array", self.display_id()))
            })?
            .iter()
            .map(|track| TrackDescriptor::from_value(self.display_id(), track))
            .collect()
    }

    pub fn reference_track_count(&self) -> Result<usize, AssetError> {
        Ok(self
            .tracks()?
            .iter()
            .filter(|track| track.is_reference_annotation())
            .count())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub format: String,
}

impl TrackDescriptor {
    /// Every track of a genome under consideration must carry a string
    /// `format`.
    pub fn from_value(genome: &str, value: &Value) -> Result<Self, AssetError> {
        let format = value
            .get("format")
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                malformed_browser(format!("genome {genome} has a track without a `format`"))
            })?;
        Ok(Self {
            format: format.to_string(),
        })
    }

    pub fn is_reference_annotation(&self) -> bool {
        self.format == REFGENE_FORMAT
    }
}

/// The two species-metadata fields carried into enriched records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesInfo {
    pub eva_species: Option<Value>,
    pub track_hub_id: Option<Value>,
}

impl SpeciesInfo {
    pub fn from_value(genome: &str, value: &Value) -> Result<Self, AssetError> {
        let fields = value.as_object().ok_or_else(|| AssetError::MalformedRecord {
            source_name: "species metadata",
            message: format!("entry {genome} is not an object"),
        })?;
        Ok(Self {
            eva_species: present(fields.get("evaSpecies")),
            track_hub_id: present(fields.get("trackHubId")),
        })
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(
            "evaSpecies".to_string(),
            self.eva_species.clone().unwrap_or(Value::Null),
        );
        record.insert(
            "trackHubId".to_string(),
            self.track_hub_id.clone().unwrap_or(Value::Null),
        );
        record
    }
}

fn present(value: Option<&Value>) -> Option<Value> {
    value.filter(|value| !value.is_null()).cloned()
}

fn malformed_browser(message: String) -> AssetError {
    AssetError::MalformedRecord {
        source_name: "browser genome listing",
        message,
    }
}

/// Genomes officially recognized by the UCSC catalog, keyed verbatim by id.
/// Entry shapes are checked only when a genome is enriched.
#[derive(Debug, Clone, Default)]
pub struct UcscCatalog {
    genomes: Record,
}

impl UcscCatalog {
    pub fn from_value(value: Value) -> Result<Self, AssetError> {
        let Value::Object(genomes) = value else {
            return Err(AssetError::MalformedRecord {
                source_name: "UCSC catalog",
                message: "`ucscGenomes` is not an object".to_string(),
            });
        };
        Ok(Self { genomes })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.genomes.contains_key(id)
    }

    pub fn record(&self, id: &str) -> Result<&Record, AssetError> {
        self.genomes
            .get(id)
            .ok_or_else(|| AssetError::UnknownGenome(id.to_string()))?
            .as_object()
            .ok_or_else(|| AssetError::MalformedRecord {
                source_name: "UCSC catalog",
                message: format!("entry {id} is not an object"),
            })
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }
}

/// Species metadata keyed verbatim by genome id.
#[derive(Debug, Clone, Default)]
pub struct SpeciesIndex {
    entries: Record,
}

impl SpeciesIndex {
    pub fn from_value(value: Value) -> Result<Self, AssetError> {
        let Value::Object(entries) = value else {
            return Err(AssetError::MalformedRecord {
                source_name: "species metadata",
                message: "document is not an object".to_string(),
            });
        };
        Ok(Self { entries })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn info(&self, id: &str) -> Result<SpeciesInfo, AssetError> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| AssetError::UnknownGenome(id.to_string()))?;
        SpeciesInfo::from_value(id, entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
