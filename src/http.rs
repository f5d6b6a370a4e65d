use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::error::AssetError;

/// Blocking JSON fetcher shared by the remote catalog clients. A request is
/// made once; failures surface immediately.
#[derive(Clone)]
pub struct JsonFetcher {
    client: Client,
    catalog: &'static str,
}

impl JsonFetcher {
    pub fn new(catalog: &'static str) -> Result<Self, AssetError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("visage-assets/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| AssetError::CatalogHttp {
                    catalog,
                    message: err.to_string(),
                })?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| AssetError::CatalogHttp {
                catalog,
                message: err.to_string(),
            })?;
        Ok(Self { client, catalog })
    }

    pub fn get(&self, url: &str) -> Result<Value, AssetError> {
        tracing::info!(catalog = self.catalog, url, "fetching catalog");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| self.http_error(err))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| format!("{} request failed", self.catalog));
            return Err(AssetError::CatalogStatus {
                catalog: self.catalog,
                status,
                message,
            });
        }
        response.json().map_err(|err| self.http_error(err))
    }

    fn http_error(&self, err: reqwest::Error) -> AssetError {
        AssetError::CatalogHttp {
            catalog: self.catalog,
            message: err.to_string(),
        }
    }
}

/// Moves `field` out of a catalog response envelope.
pub fn take_field(
    mut document: Value,
    catalog: &'static str,
    field: &'static str,
) -> Result<Value, AssetError> {
    document
        .get_mut(field)
        .map(Value::take)
        .ok_or(AssetError::CatalogShape { catalog, field })
}
