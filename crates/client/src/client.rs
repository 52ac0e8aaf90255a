use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use avatax_core::QueryOptions;

use crate::config::ClientConfig;
use crate::dispatcher::Dispatcher;
use crate::error::{ApiError, ApiResult, ConfigError};
use crate::http::HttpDispatcher;

/// Entry point for calling the service.
///
/// Endpoint methods live in per-resource modules (see
/// [`transactions`](crate::transactions)) as inherent methods on this type.
#[derive(Debug, Clone)]
pub struct AvaTaxClient<D = HttpDispatcher> {
    dispatcher: D,
}

impl AvaTaxClient<HttpDispatcher> {
    /// Build a client that talks HTTP using `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            dispatcher: HttpDispatcher::new(&config)?,
        })
    }

    /// Shorthand for `AvaTaxClient::new(ClientConfig::from_env()?)`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<D: Dispatcher> AvaTaxClient<D> {
    /// Use a custom transport (a proxy layer, a recording stub, ...).
    pub fn with_dispatcher(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub(crate) async fn get_json<R>(&self, path: &str, options: Option<&QueryOptions>) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let value = self.dispatcher.get(path, options).await?;
        decode(value)
    }

    pub(crate) async fn post_json<B, R>(
        &self,
        path: &str,
        body: &B,
        options: Option<&QueryOptions>,
    ) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;
        let value = self.dispatcher.post(path, Some(&body), options).await?;
        decode(value)
    }
}

fn decode<R: DeserializeOwned>(value: Value) -> ApiResult<R> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(format!("response body: {e}")))
}
