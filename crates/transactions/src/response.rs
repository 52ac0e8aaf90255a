//! Response shapes returned by the transaction endpoints.
//!
//! Fields are lenient (`Option` / defaulted) because the service omits
//! nested data unless it was requested via `$include`. Fields this crate has
//! no name for are kept in `extra` and serialized back unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use avatax_core::TransactionId;

use crate::document::{AdjustmentReason, DocumentType, TransactionStatus};
use crate::wire_time::{de_date, de_timestamp};

/// A transaction as stored by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionModel {
    pub id: Option<TransactionId>,
    pub code: Option<String>,
    pub company_id: Option<i64>,
    #[serde(deserialize_with = "de_date")]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "de_date")]
    pub tax_date: Option<NaiveDate>,
    pub status: Option<TransactionStatus>,
    #[serde(rename = "type")]
    pub document_type: Option<DocumentType>,
    pub batch_code: Option<String>,
    pub currency_code: Option<String>,
    pub customer_code: Option<String>,
    pub entity_use_code: Option<String>,
    pub description: Option<String>,
    pub reference_code: Option<String>,
    pub purchase_order_no: Option<String>,
    pub total_amount: Option<f64>,
    pub total_exempt: Option<f64>,
    pub total_discount: Option<f64>,
    pub total_tax: Option<f64>,
    pub total_taxable: Option<f64>,
    pub total_tax_calculated: Option<f64>,
    pub adjustment_reason: Option<AdjustmentReason>,
    pub adjustment_description: Option<String>,
    pub locked: Option<bool>,
    pub version: Option<i32>,
    #[serde(deserialize_with = "de_timestamp")]
    pub modified_date: Option<DateTime<Utc>>,
    pub modified_user_id: Option<i64>,
    pub lines: Vec<TransactionLineModel>,
    pub addresses: Vec<TransactionAddressModel>,
    pub summary: Vec<TransactionSummary>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionModel {
    pub fn is_committed(&self) -> bool {
        self.status == Some(TransactionStatus::Committed)
    }

    pub fn is_locked(&self) -> bool {
        self.locked.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionLineModel {
    pub id: Option<i64>,
    pub transaction_id: Option<TransactionId>,
    pub line_number: Option<String>,
    pub description: Option<String>,
    pub item_code: Option<String>,
    pub tax_code: Option<String>,
    pub quantity: Option<f64>,
    pub line_amount: Option<f64>,
    pub tax: Option<f64>,
    pub taxable_amount: Option<f64>,
    pub exempt_amount: Option<f64>,
    pub discount_amount: Option<f64>,
    pub tax_calculated: Option<f64>,
    pub details: Vec<TransactionLineDetailModel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-jurisdiction tax breakdown of a line (requires `$include=Details`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionLineDetailModel {
    pub id: Option<i64>,
    pub transaction_line_id: Option<i64>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub jurisdiction_name: Option<String>,
    pub jurisdiction_type: Option<String>,
    pub tax_name: Option<String>,
    pub rate: Option<f64>,
    pub tax: Option<f64>,
    pub taxable_amount: Option<f64>,
    pub exempt_amount: Option<f64>,
    pub non_taxable_amount: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Tax totals rolled up per jurisdiction (requires `$include=Summary`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionSummary {
    pub country: Option<String>,
    pub region: Option<String>,
    pub jurisdiction_type: Option<String>,
    pub jur_code: Option<String>,
    pub jur_name: Option<String>,
    pub tax_authority_type: Option<i32>,
    pub tax_name: Option<String>,
    pub rate: Option<f64>,
    pub tax: Option<f64>,
    pub taxable: Option<f64>,
    pub exemption: Option<f64>,
    pub non_taxable: Option<f64>,
    pub tax_calculated: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionAddressModel {
    pub id: Option<i64>,
    pub transaction_id: Option<TransactionId>,
    pub boundary_level: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Audit record for a stored transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditTransactionModel {
    pub company_id: Option<i64>,
    #[serde(deserialize_with = "de_timestamp")]
    pub server_timestamp: Option<DateTime<Utc>>,
    /// Processing time as reported by the service, e.g. `00:00:00.0312500`.
    pub server_duration: Option<String>,
    pub api_call_service_name: Option<String>,
    /// Exact call as logged, when logging was enabled for it.
    pub original: Option<ApiCallInfo>,
    /// Call reconstructed from the stored transaction.
    pub reconstructed: Option<ApiCallInfo>,
}

/// A logged or reconstructed API call. Bodies stay raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCallInfo {
    pub request_url: Option<String>,
    pub request: Option<serde_json::Value>,
    pub response: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkLockTransactionResult {
    pub number_of_records: i32,
}

/// Paged list envelope.
///
/// `next_link` is set when more records are available past this page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult<T> {
    #[serde(rename = "@recordsetCount", default)]
    pub count: i64,
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

impl<T> FetchResult<T> {
    pub fn has_more(&self) -> bool {
        self.next_link.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_committed_transaction_with_lines() {
        let body = serde_json::json!({
            "id": 123456789,
            "code": "INV-001",
            "companyId": 12345,
            "date": "2024-03-15",
            "status": "Committed",
            "type": "SalesInvoice",
            "totalAmount": 100.0,
            "totalTax": 7.75,
            "locked": false,
            "version": 1,
            "modifiedDate": "2024-03-15T18:30:00Z",
            "lines": [{
                "id": 1,
                "transactionId": 123456789,
                "lineNumber": "1",
                "lineAmount": 100.0,
                "tax": 7.75,
                "details": [{ "jurisdictionName": "CALIFORNIA", "rate": 0.0725, "tax": 7.25 }]
            }],
            "someFutureField": { "ignored": true }
        });

        let tx: TransactionModel = serde_json::from_value(body).unwrap();
        assert_eq!(tx.id, Some(TransactionId::new(123456789)));
        assert_eq!(tx.document_type, Some(DocumentType::SalesInvoice));
        assert!(tx.is_committed());
        assert!(!tx.is_locked());
        assert_eq!(tx.lines.len(), 1);
        assert_eq!(tx.lines[0].details[0].jurisdiction_name.as_deref(), Some("CALIFORNIA"));
        assert!(tx.addresses.is_empty());
        assert_eq!(tx.extra["someFutureField"], serde_json::json!({ "ignored": true }));
    }

    #[test]
    fn decodes_service_date_formats() {
        let body = serde_json::json!({
            "id": 1,
            "date": "2024-03-15T00:00:00",
            "taxDate": "2024-03-15T00:00:00",
            "modifiedDate": "2019-02-20T22:04:01.087"
        });

        let tx: TransactionModel = serde_json::from_value(body).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(tx.date, Some(day));
        assert_eq!(tx.tax_date, Some(day));
        let modified = tx.modified_date.unwrap();
        assert_eq!(modified.to_rfc3339(), "2019-02-20T22:04:01.087+00:00");
    }

    #[test]
    fn null_dates_decode_as_absent() {
        let body = serde_json::json!({ "id": 1, "taxDate": null, "modifiedDate": null });

        let tx: TransactionModel = serde_json::from_value(body).unwrap();
        assert_eq!(tx.tax_date, None);
        assert_eq!(tx.modified_date, None);
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let body = serde_json::json!({
            "id": 7,
            "code": "INV-007",
            "deliveryTerms": "FOB",
            "parameters": [{ "name": "Transport", "value": "Seller" }],
            "lines": [{
                "lineNumber": "1",
                "hsCode": "0101.21",
                "details": [{ "rate": 0.06, "rateSourceId": 3 }]
            }],
            "summary": [{ "jurisCode": "CA", "stateAssignedNo": "" }]
        });

        let tx: TransactionModel = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(tx.extra["deliveryTerms"], "FOB");
        assert_eq!(tx.lines[0].extra["hsCode"], "0101.21");
        assert_eq!(tx.lines[0].details[0].extra["rateSourceId"], 3);

        let back = serde_json::to_value(&tx).unwrap();
        assert_eq!(back["parameters"], body["parameters"]);
        assert_eq!(back["lines"][0]["hsCode"], "0101.21");
        assert_eq!(back["lines"][0]["details"][0]["rateSourceId"], 3);
        assert_eq!(back["summary"][0]["jurisCode"], "CA");
    }

    #[test]
    fn decodes_fetch_result_envelope() {
        let body = serde_json::json!({
            "@recordsetCount": 2,
            "value": [{ "code": "A" }, { "code": "B" }],
            "@nextLink": "/api/v2/companies/DEFAULT/transactions?$skip=2"
        });

        let page: FetchResult<TransactionModel> = serde_json::from_value(body).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.value[1].code.as_deref(), Some("B"));
        assert!(page.has_more());
    }

    #[test]
    fn decodes_audit_record() {
        let body = serde_json::json!({
            "companyId": 12345,
            "serverTimestamp": "2024-03-15T18:30:00.1234567",
            "serverDuration": "00:00:00.0312500",
            "apiCallServiceName": "CreateTransaction",
            "reconstructed": { "request": { "code": "INV-001" } }
        });

        let audit: AuditTransactionModel = serde_json::from_value(body).unwrap();
        assert_eq!(audit.api_call_service_name.as_deref(), Some("CreateTransaction"));
        assert!(audit.original.is_none());
        assert_eq!(
            audit.server_timestamp.map(|t| t.date_naive()),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        let request = audit.reconstructed.and_then(|r| r.request).unwrap();
        assert_eq!(request["code"], "INV-001");
    }
}
