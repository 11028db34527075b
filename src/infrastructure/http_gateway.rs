//! HTTP product gateway backed by reqwest.
//!
//! A thin JSON client over the products API with retry and exponential
//! backoff on transient failures. All failures are mapped to [`ApiError`]
//! so the facade can normalize them into catalog error state.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::gateway::{FetchParams, ProductGateway};
use crate::domain::product::{Product, ProductsResponse};
use crate::infrastructure::api_error::ApiError;
use crate::infrastructure::config::ApiConfig;

/// Error body shape returned by the products API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Single-product envelope returned by the by-id endpoint.
#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: Product,
}

/// Product gateway speaking JSON over HTTP.
#[derive(Clone)]
pub struct HttpProductGateway {
    client: Client,
    base_url: Url,
    max_retries: u32,
}

impl HttpProductGateway {
    /// Build a gateway from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        // A trailing slash keeps Url::join from eating the last path segment.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).context("invalid API base URL")?;

        info!(base_url = %base_url, "HTTP product gateway ready");
        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries.max(1),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Request(format!("invalid endpoint {path}: {e}")))
    }

    /// GET `url` and decode the JSON body, retrying transient failures with
    /// exponential backoff.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        for attempt in 1..=self.max_retries {
            debug!(%url, attempt, "HTTP GET");
            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .json::<T>()
                            .await
                            .map_err(|e| ApiError::Request(e.to_string()));
                    }

                    let retryable = matches!(
                        status,
                        StatusCode::REQUEST_TIMEOUT
                            | StatusCode::TOO_MANY_REQUESTS
                            | StatusCode::INTERNAL_SERVER_ERROR
                            | StatusCode::BAD_GATEWAY
                            | StatusCode::SERVICE_UNAVAILABLE
                            | StatusCode::GATEWAY_TIMEOUT
                    );
                    if retryable && attempt < self.max_retries {
                        let delay = Duration::from_secs(2_u64.pow(attempt - 1));
                        warn!(status = %status, attempt, ?delay, "retryable HTTP error, backing off");
                        sleep(delay).await;
                        continue;
                    }

                    let body_message = response
                        .json::<ErrorBody>()
                        .await
                        .ok()
                        .and_then(|body| body.message);
                    return Err(ApiError::from_status(status, body_message));
                }
                Err(err) if attempt < self.max_retries && (err.is_connect() || err.is_timeout()) => {
                    let delay = Duration::from_secs(2_u64.pow(attempt - 1));
                    warn!(error = %err, attempt, ?delay, "network error, backing off");
                    sleep(delay).await;
                }
                Err(err) => {
                    warn!(error = %err, "request failed");
                    return Err(if err.is_builder() {
                        ApiError::Request(err.to_string())
                    } else {
                        ApiError::Network
                    });
                }
            }
        }

        Err(ApiError::Network)
    }

    async fn get_products(&self, path: &str, pairs: Vec<(String, String)>) -> Result<ProductsResponse, ApiError> {
        let mut url = self.endpoint(path)?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }
        self.get_json(url).await
    }
}

#[async_trait]
impl ProductGateway for HttpProductGateway {
    async fn fetch_all(&self, params: FetchParams) -> Result<ProductsResponse, ApiError> {
        self.get_products("products", params.query_pairs()).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Product, ApiError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        match self.get_json::<ProductEnvelope>(url).await {
            Ok(envelope) => Ok(envelope.product),
            Err(ApiError::Server { status: 404, .. }) => Err(ApiError::NotFound {
                id: id.to_string(),
            }),
            Err(err) => Err(err),
        }
    }

    async fn search(
        &self,
        query: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ProductsResponse, ApiError> {
        let mut pairs = vec![(String::from("query"), query.to_string())];
        if let Some(page) = page {
            pairs.push((String::from("page"), page.to_string()));
        }
        if let Some(limit) = limit {
            pairs.push((String::from("limit"), limit.to_string()));
        }
        self.get_products("products/search", pairs).await
    }

    async fn fetch_featured(&self, limit: Option<u32>) -> Result<ProductsResponse, ApiError> {
        let pairs = limit
            .map(|l| vec![(String::from("limit"), l.to_string())])
            .unwrap_or_default();
        self.get_products("products/featured", pairs).await
    }

    async fn fetch_on_sale(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<ProductsResponse, ApiError> {
        let mut pairs = Vec::new();
        if let Some(page) = page {
            pairs.push((String::from("page"), page.to_string()));
        }
        if let Some(limit) = limit {
            pairs.push((String::from("limit"), limit.to_string()));
        }
        self.get_products("products/sale", pairs).await
    }
}
