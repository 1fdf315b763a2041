use std::io::BufReader;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::definition::{CatalogIndex, DefinitionTable};
use crate::error::{Error, Result};
use crate::network::CatalogGateway;

pub const DEFAULT_BASE_URL: &str = "https://www.bungie.net";

const INDEX_ENDPOINT: &str = "Platform/Destiny2/Manifest/";
const REQUEST_TIMEOUT_SECS: u64 = 120;
/// Upper bound for a single table download (the item table alone is well over 100 MB)
const MAX_TABLE_BYTES: u64 = 1024 * 1024 * 1024;
const SUCCESS_CODE: i64 = 1;

/// Response envelope wrapped around every platform endpoint
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiEnvelope<T> {
    response: Option<T>,
    error_code: i64,
    #[serde(default)]
    error_status: String,
    #[serde(default)]
    message: String,
}

/// Blocking HTTP gateway for the remote catalog
#[derive(Clone)]
pub struct HttpGateway {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
    user_agent: String,
}

impl HttpGateway {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), api_key)
    }

    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let user_agent = format!(
            "armory/{} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS
        );
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .build();

        Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            user_agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl CatalogGateway for HttpGateway {
    fn fetch_index(&self) -> Result<CatalogIndex> {
        let url = self.url(INDEX_ENDPOINT);
        debug!("Fetching catalog index from {}", url);

        let mut response = self
            .agent
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .header("User-Agent", &self.user_agent)
            .call()?;
        let envelope: ApiEnvelope<CatalogIndex> = response.body_mut().read_json()?;

        if envelope.error_code != SUCCESS_CODE {
            return Err(Error::NetworkError(format!(
                "Catalog index request failed: {} ({}): {}",
                envelope.error_status, envelope.error_code, envelope.message
            )));
        }

        let index = envelope.response.ok_or_else(|| {
            Error::NetworkError("Catalog index response carried no payload".to_string())
        })?;
        info!("Catalog index version {}", index.version);
        Ok(index)
    }

    fn fetch_table(&self, path: &str) -> Result<DefinitionTable> {
        let url = self.url(path);
        debug!("Downloading definition table from {}", url);

        let mut response = self
            .agent
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .call()?;
        let reader = response
            .body_mut()
            .with_config()
            .limit(MAX_TABLE_BYTES)
            .reader();
        let table: DefinitionTable = serde_json::from_reader(BufReader::new(reader))?;

        debug!("Downloaded {} records from {}", table.len(), path);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let gateway =
            HttpGateway::with_base_url("https://example.test/".to_string(), "key".to_string());
        assert_eq!(gateway.base_url(), "https://example.test");
        assert_eq!(
            gateway.url("/common/destiny2_content/json/en/stats.json"),
            "https://example.test/common/destiny2_content/json/en/stats.json"
        );
        assert_eq!(
            gateway.url(INDEX_ENDPOINT),
            "https://example.test/Platform/Destiny2/Manifest/"
        );
    }

    #[test]
    fn test_envelope_decoding() {
        let raw = r#"{
            "Response": { "version": "v1", "jsonWorldComponentContentPaths": {} },
            "ErrorCode": 1,
            "ThrottleSeconds": 0,
            "ErrorStatus": "Success",
            "Message": "Ok"
        }"#;
        let envelope: ApiEnvelope<CatalogIndex> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.error_code, SUCCESS_CODE);
        assert_eq!(envelope.response.unwrap().version, "v1");
    }

    #[test]
    fn test_envelope_failure_without_payload() {
        let raw = r#"{ "ErrorCode": 2101, "ErrorStatus": "ApiInvalidOrExpiredKey", "Message": "Invalid key" }"#;
        let envelope: ApiEnvelope<CatalogIndex> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.error_code, 2101);
        assert!(envelope.response.is_none());
        assert_eq!(envelope.error_status, "ApiInvalidOrExpiredKey");
    }
}
