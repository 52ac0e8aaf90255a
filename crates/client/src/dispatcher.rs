//! The transport seam every endpoint binding calls through.

use async_trait::async_trait;
use serde_json::Value;

use avatax_core::QueryOptions;

use crate::error::ApiResult;

/// Issues one request against the service and returns the parsed JSON body.
///
/// `path` is relative to the service base URL (e.g. `/api/v2/transactions/1`)
/// and is used as given. Implementations own authentication, query rendering,
/// and mapping of failures to [`ApiError`](crate::ApiError).
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn get(&self, path: &str, options: Option<&QueryOptions>) -> ApiResult<Value>;

    async fn post(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&QueryOptions>,
    ) -> ApiResult<Value>;
}

#[async_trait]
impl<D: Dispatcher + ?Sized> Dispatcher for std::sync::Arc<D> {
    async fn get(&self, path: &str, options: Option<&QueryOptions>) -> ApiResult<Value> {
        (**self).get(path, options).await
    }

    async fn post(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&QueryOptions>,
    ) -> ApiResult<Value> {
        (**self).post(path, body, options).await
    }
}
