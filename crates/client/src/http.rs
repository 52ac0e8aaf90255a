//! `reqwest`-backed [`Dispatcher`].

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use avatax_core::{ErrorResult, QueryOptions};

use crate::config::{ClientConfig, Credentials};
use crate::dispatcher::Dispatcher;
use crate::error::{ApiError, ApiResult, ConfigError};

pub const CLIENT_HEADER: &str = "x-avalara-client";

/// Sends requests to the configured environment over a pooled `reqwest::Client`.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpDispatcher {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client_header = HeaderValue::from_str(&config.client_header())
            .map_err(|e| ConfigError::invalid(format!("client header: {e}")))?;
        headers.insert(CLIENT_HEADER, client_header);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::invalid(format!("http client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            credentials: config.credentials.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::UsernamePassword { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            Credentials::AccountLicense {
                account_id,
                license_key,
            } => builder.basic_auth(account_id, Some(license_key)),
            Credentials::BearerToken(token) => builder.bearer_auth(token),
            Credentials::None => builder,
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        options: Option<&QueryOptions>,
    ) -> ApiResult<Value> {
        let request_id = Uuid::now_v7();
        let span = tracing::info_span!("avatax_request", %request_id, %method, path);

        async move {
            let mut req = self.http.request(method, self.url(path));
            if let Some(options) = options.filter(|o| !o.is_empty()) {
                req = req.query(&options.to_query_pairs());
            }
            if let Some(body) = body {
                req = req.json(body);
            }
            let req = self.authed(req);

            tracing::debug!("sending request");
            let started = Instant::now();
            let resp = req.send().await.inspect_err(|e| {
                tracing::warn!(error = %e, "request failed before a response arrived");
            })?;

            let status = resp.status();
            let elapsed_ms = started.elapsed().as_millis() as u64;
            if status.is_success() {
                tracing::info!(status = status.as_u16(), elapsed_ms, "request completed");
            } else {
                tracing::warn!(status = status.as_u16(), elapsed_ms, "request rejected");
            }

            parse(resp).await
        }
        .instrument(span)
        .await
    }
}

/// Map a response to JSON or an [`ApiError`].
async fn parse(resp: reqwest::Response) -> ApiResult<Value> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let error = ErrorResult::parse(&body).map(|fault| fault.error);
        return Err(ApiError::Server {
            status: status.as_u16(),
            error,
            body,
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("response body: {e}")))
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn get(&self, path: &str, options: Option<&QueryOptions>) -> ApiResult<Value> {
        self.execute(Method::GET, path, None, options).await
    }

    async fn post(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&QueryOptions>,
    ) -> ApiResult<Value> {
        self.execute(Method::POST, path, body, options).await
    }
}
