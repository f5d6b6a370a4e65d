use crate::domain::UcscCatalog;
use crate::error::AssetError;
use crate::http::{JsonFetcher, take_field};

pub const UCSC_GENOMES_URL: &str = "https://api.genome.ucsc.edu/list/ucscGenomes";

const CATALOG: &str = "UCSC";

pub trait UcscClient {
    fn list_genomes(&self) -> Result<UcscCatalog, AssetError>;
}

#[derive(Clone)]
pub struct UcscHttpClient {
    fetcher: JsonFetcher,
    url: String,
}

impl UcscHttpClient {
    pub fn new() -> Result<Self, AssetError> {
        Self::with_url(UCSC_GENOMES_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self, AssetError> {
        Ok(Self {
            fetcher: JsonFetcher::new(CATALOG)?,
            url: url.into(),
        })
    }
}

impl UcscClient for UcscHttpClient {
    fn list_genomes(&self) -> Result<UcscCatalog, AssetError> {
        let document = self.fetcher.get(&self.url)?;
        let catalog = UcscCatalog::from_value(take_field(document, CATALOG, "ucscGenomes")?)?;
        tracing::info!(genomes = catalog.len(), "loaded UCSC catalog");
        Ok(catalog)
    }
}
