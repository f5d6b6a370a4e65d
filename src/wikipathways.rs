use serde_json::Value;

use crate::error::AssetError;
use crate::http::{JsonFetcher, take_field};

pub const PATHWAY_INFO_URL: &str = "https://www.wikipathways.org/json/getPathwayInfo.json";

const CATALOG: &str = "WikiPathways";

pub trait PathwayClient {
    /// Returns the `pathwayInfo` payload exactly as served.
    fn pathway_info(&self) -> Result<Value, AssetError>;
}

#[derive(Clone)]
pub struct WikiPathwaysHttpClient {
    fetcher: JsonFetcher,
    url: String,
}

impl WikiPathwaysHttpClient {
    pub fn new() -> Result<Self, AssetError> {
        Self::with_url(PATHWAY_INFO_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self, AssetError> {
        Ok(Self {
            fetcher: JsonFetcher::new(CATALOG)?,
            url: url.into(),
        })
    }
}

impl PathwayClient for WikiPathwaysHttpClient {
    fn pathway_info(&self) -> Result<Value, AssetError> {
        let document = self.fetcher.get(&self.url)?;
        take_field(document, CATALOG, "pathwayInfo")
    }
}
