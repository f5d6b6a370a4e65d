use std::fs;

use camino::Utf8Path;
use serde_json::Value;

use crate::domain::{BrowserGenome, SpeciesIndex};
use crate::error::AssetError;

pub fn read_json(path: &Utf8Path) -> Result<Value, AssetError> {
    let content = fs::read_to_string(path.as_std_path())
        .map_err(|_| AssetError::InputRead(path.as_std_path().to_path_buf()))?;
    serde_json::from_str(&content).map_err(|err| AssetError::InputParse {
        path: path.as_std_path().to_path_buf(),
        message: err.to_string(),
    })
}

/// Loads the browser genome listing, a JSON array of genome entries.
pub fn load_browser_genomes(path: &Utf8Path) -> Result<Vec<BrowserGenome>, AssetError> {
    let Value::Array(entries) = read_json(path)? else {
        return Err(AssetError::InputParse {
            path: path.as_std_path().to_path_buf(),
            message: "expected a JSON array of genomes".to_string(),
        });
    };
    let genomes = entries
        .into_iter()
        .map(BrowserGenome::from_value)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(genomes = genomes.len(), %path, "loaded browser genome listing");
    Ok(genomes)
}

/// Loads species metadata, a JSON object keyed by genome id.
pub fn load_species_metadata(path: &Utf8Path) -> Result<SpeciesIndex, AssetError> {
    let index = SpeciesIndex::from_value(read_json(path)?)?;
    tracing::info!(entries = index.len(), %path, "loaded species metadata");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use camino::Utf8PathBuf;

    use super::*;

    #[test]
    fn load_browser_genomes_rejects_object() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("igv.json")).unwrap();
        fs::write(path.as_std_path(), br#"{"hg38": {}}"#).unwrap();
        let err = load_browser_genomes(&path).unwrap_err();
        assert_matches!(err, AssetError::InputParse { .. });
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_species_metadata(Utf8Path::new("/nonexistent/eva.json")).unwrap_err();
        assert_matches!(err, AssetError::InputRead(_));
    }
}
