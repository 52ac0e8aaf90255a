use std::sync::{Arc, Mutex};

use avatax_client::{ApiError, AvaTaxClient, ClientConfig, Credentials, Environment};
use avatax_core::QueryOptions;
use avatax_transactions::{
    CreateTransactionModel, DocumentType, LineItemModel, TransactionStatus, VoidReasonCode,
    VoidTransactionModel,
};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde_json::{Value, json};

/// What the fake service saw.
#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    authorization: Option<String>,
    client_header: Option<String>,
    body: Option<Value>,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

struct TestServer {
    base_url: String,
    log: Log,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        avatax_observability::init();

        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let app = axum::Router::new()
            .fallback(fake_service)
            .with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, log, handle }
    }

    fn config(&self, credentials: Credentials) -> ClientConfig {
        ClientConfig::new(Environment::Custom(self.base_url.clone()), credentials)
            .with_app("black-box", "9.9")
            .with_machine_name("test-host")
    }

    fn last(&self) -> Recorded {
        self.log.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Routes on the last path segment so every endpoint gets a plausible reply.
async fn fake_service(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body_json = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query,
        authorization: header("authorization"),
        client_header: header("x-avalara-client"),
        body: body_json.clone(),
    });

    let path = uri.path();
    if path.contains("/MISSING") {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": {
                    "code": "EntityNotFoundError",
                    "message": "Document with code 'MISSING' not found.",
                    "target": "HttpRequest",
                    "details": [{ "code": "EntityNotFoundError", "number": 4, "severity": "Error" }]
                }
            })),
        )
            .into_response();
    }
    if path.contains("/BROKEN") {
        return (StatusCode::BAD_GATEWAY, "upstream unavailable").into_response();
    }
    if path.ends_with("/EMPTY") {
        return StatusCode::OK.into_response();
    }
    if path.ends_with("/transactions") && method == Method::GET {
        return axum::Json(json!({
            "@recordsetCount": 2,
            "value": [{ "id": 1, "code": "A" }, { "id": 2, "code": "B" }],
            "@nextLink": "/api/v2/companies/DEFAULT/transactions?$skip=2"
        }))
        .into_response();
    }
    if path.ends_with("/void") {
        return axum::Json(json!({ "id": 7, "code": "INV-001", "status": "Cancelled" })).into_response();
    }

    // Echo create-style bodies back as a stored transaction.
    let code = body_json
        .as_ref()
        .and_then(|b| b.get("code"))
        .cloned()
        .unwrap_or(Value::Null);
    axum::Json(json!({ "id": 12345, "code": code, "status": "Committed", "totalTax": 7.75 }))
        .into_response()
}

#[tokio::test]
async fn get_by_code_sends_path_query_and_identification() {
    let srv = TestServer::spawn().await;
    let client = AvaTaxClient::new(srv.config(Credentials::BearerToken("tok-123".into()))).unwrap();

    let tx = client
        .get_transaction_by_code("DEFAULT", "INV-001", Some(&QueryOptions::new().include("Lines")))
        .await
        .unwrap();

    let seen = srv.last();
    assert_eq!(seen.method, Method::GET);
    assert_eq!(seen.path, "/api/v2/companies/DEFAULT/transactions/INV-001");
    assert_eq!(seen.query, vec![("$include".to_string(), "Lines".to_string())]);
    assert_eq!(seen.authorization.as_deref(), Some("Bearer tok-123"));
    assert_eq!(
        seen.client_header.as_deref(),
        Some(format!("black-box; 9.9; RustSdk; {}; test-host", avatax_client::SDK_VERSION).as_str())
    );
    assert!(seen.body.is_none());
    assert_eq!(tx.status, Some(TransactionStatus::Committed));
}

#[tokio::test]
async fn create_transaction_posts_json_body_with_basic_auth() {
    let srv = TestServer::spawn().await;
    let client = AvaTaxClient::new(srv.config(Credentials::AccountLicense {
        account_id: "1100012345".into(),
        license_key: "license".into(),
    }))
    .unwrap();

    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let model = CreateTransactionModel::new(DocumentType::SalesInvoice, "ABC", date)
        .with_code("INV-900")
        .with_line(LineItemModel::new(100.0).with_tax_code("P0000000"));

    let tx = client.create_transaction(&model, None).await.unwrap();

    let seen = srv.last();
    assert_eq!(seen.method, Method::POST);
    assert_eq!(seen.path, "/api/v2/transactions/create");
    assert!(seen.query.is_empty());
    // base64("1100012345:license")
    assert_eq!(seen.authorization.as_deref(), Some("Basic MTEwMDAxMjM0NTpsaWNlbnNl"));
    assert_eq!(seen.body, Some(serde_json::to_value(&model).unwrap()));
    assert_eq!(tx.code.as_deref(), Some("INV-900"));
    assert_eq!(tx.total_tax, Some(7.75));
}

#[tokio::test]
async fn void_transaction_round_trip() {
    let srv = TestServer::spawn().await;
    let client = AvaTaxClient::new(srv.config(Credentials::None)).unwrap();

    let tx = client
        .void_transaction("DEFAULT", "INV-001", &VoidTransactionModel::new(VoidReasonCode::DocVoided))
        .await
        .unwrap();

    let seen = srv.last();
    assert_eq!(seen.path, "/api/v2/companies/DEFAULT/transactions/INV-001/void");
    assert_eq!(seen.body, Some(json!({ "code": "DocVoided" })));
    assert!(seen.authorization.is_none());
    assert_eq!(tx.status, Some(TransactionStatus::Cancelled));
}

#[tokio::test]
async fn list_renders_recognized_options_in_order() {
    let srv = TestServer::spawn().await;
    let client = AvaTaxClient::new(srv.config(Credentials::None)).unwrap();

    let opts = QueryOptions::new()
        .order_by("id DESC")
        .filter("date between '2024-01-01' and '2024-01-31'")
        .top(2)
        .include("Summary");
    let page = client
        .list_transactions_by_company("DEFAULT", Some(&opts))
        .await
        .unwrap();

    let seen = srv.last();
    assert_eq!(seen.path, "/api/v2/companies/DEFAULT/transactions");
    assert_eq!(seen.query, opts.to_query_pairs());
    assert_eq!(page.count, 2);
    assert_eq!(page.value.len(), 2);
    assert!(page.has_more());
}

#[tokio::test]
async fn service_fault_maps_to_server_error() {
    let srv = TestServer::spawn().await;
    let client = AvaTaxClient::new(srv.config(Credentials::None)).unwrap();

    let err = client
        .get_transaction_by_code("DEFAULT", "MISSING", None)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.error_code(), Some("EntityNotFoundError"));
    match err {
        ApiError::Server { error: Some(info), .. } => {
            assert_eq!(info.target.as_deref(), Some("HttpRequest"));
            assert_eq!(info.details[0].number, Some(4));
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_failure_keeps_raw_body() {
    let srv = TestServer::spawn().await;
    let client = AvaTaxClient::new(srv.config(Credentials::None)).unwrap();

    let err = client.audit_transaction("DEFAULT", "BROKEN").await.unwrap_err();

    match err {
        ApiError::Server { status, error, body } => {
            assert_eq!(status, 502);
            assert!(error.is_none());
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let srv = TestServer::spawn().await;
    let client = AvaTaxClient::new(srv.config(Credentials::None)).unwrap();

    let value = avatax_client::Dispatcher::get(client.dispatcher(), "/api/v2/transactions/EMPTY", None)
        .await
        .unwrap();
    assert_eq!(value, Value::Null);

    // A typed call cannot make a transaction out of nothing.
    let err = client
        .get_transaction_by_code("DEFAULT", "EMPTY", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn spaces_in_codes_are_percent_encoded_by_the_transport() {
    let srv = TestServer::spawn().await;
    let client = AvaTaxClient::new(srv.config(Credentials::None)).unwrap();

    client
        .get_transaction_by_code("DEFAULT", "INV 001", None)
        .await
        .unwrap();

    assert_eq!(srv.last().path, "/api/v2/companies/DEFAULT/transactions/INV%20001");
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() -> anyhow::Result<()> {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let config = ClientConfig::new(Environment::Custom(format!("http://{addr}")), Credentials::None);
    let client = AvaTaxClient::new(config)?;

    let err = client
        .get_transaction_by_id(1_i64, None)
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), None);
    assert!(!err.is_not_found());
    Ok(())
}
