use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::model::{self, Country, RawCountry};

pub const DEFAULT_ENDPOINT: &str =
    "https://restcountries.com/v3.1/all?fields=name,flags,capital,population,region,area";

pub const DEFAULT_TIMEOUT_SECONDS: usize = 10;

const USER_AGENT: &str = concat!("countrydex/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint { url: String },

    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to decode country list: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("fetch task ended without a result")]
    Abandoned,
}

pub type FetchResult = Result<Vec<Country>, FetchError>;

#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub endpoint: String,
    pub timeout_seconds: usize,
    pub proxy: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            proxy: None,
        }
    }
}

pub fn build_client(options: &FetchOptions) -> Result<reqwest::Client, FetchError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(USER_AGENT),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let timeout = Duration::from_secs(options.timeout_seconds.try_into().unwrap_or(10));
    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(timeout);

    if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| FetchError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| FetchError::ClientBuild { source: e })
}

/// Decodes a country list and applies the fixed exclusion rule.
pub fn decode_countries(body: &[u8]) -> FetchResult {
    let raw: Vec<RawCountry> =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode { source: e })?;
    Ok(model::from_raw(raw))
}

pub async fn fetch_countries(options: &FetchOptions) -> FetchResult {
    if reqwest::Url::parse(&options.endpoint).is_err() {
        return Err(FetchError::InvalidEndpoint {
            url: options.endpoint.clone(),
        });
    }
    let client = build_client(options)?;
    let url = options.endpoint.as_str();

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Request {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|e| FetchError::Request {
        url: url.to_string(),
        source: e,
    })?;
    decode_countries(&body)
}

/// Spawns the one-shot download; the result arrives on the returned receiver.
///
/// A send failure means the receiving side was torn down, in which case the
/// result is dropped.
pub fn spawn_fetch(options: FetchOptions) -> (oneshot::Receiver<FetchResult>, JoinHandle<()>) {
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let result = fetch_countries(&options).await;
        let _ = tx.send(result);
    });
    (rx, handle)
}
