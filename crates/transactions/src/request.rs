//! Request bodies for the mutating transaction endpoints.
//!
//! All models serialize to camelCase JSON and omit unset optional fields, so
//! the service applies its own defaults. The transaction and line models also
//! carry an `extra` map for service fields without a dedicated member; its
//! entries are written into the body as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::{AdjustmentReason, DocumentType, RefundType, TaxOverrideType, VoidReasonCode};

/// A single address, or a reference to a pre-registered location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressLocationInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Two-character ISO 3166 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Origin/destination addresses for a transaction or a line.
///
/// Use `single_location` when origin and destination are the same place
/// (e.g. a retail point of sale).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressesModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_location: Option<AddressLocationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_from: Option<AddressLocationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_to: Option<AddressLocationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_of_order_origin: Option<AddressLocationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_of_order_acceptance: Option<AddressLocationInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxOverrideModel {
    #[serde(rename = "type")]
    pub override_type: TaxOverrideType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_date: Option<NaiveDate>,
    pub reason: String,
}

/// One line of a transaction being created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemModel {
    /// Line number; the service generates one when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Total amount for the line (quantity times unit price, less discounts).
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<AddressesModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_use_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exemption_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_included: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_identification_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_override: Option<TaxOverrideModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItemModel {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_tax_code(mut self, tax_code: impl Into<String>) -> Self {
        self.tax_code = Some(tax_code.into());
        self
    }

    pub fn with_item_code(mut self, item_code: impl Into<String>) -> Self {
        self.item_code = Some(item_code.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// A new transaction to calculate and (for invoice types) record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionModel {
    /// Transaction code; the service generates a GUID when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub lines: Vec<LineItemModel>,
    /// Defaults to `SalesOrder` on the service side, which is never recorded.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_code: Option<String>,
    pub date: NaiveDate,
    pub customer_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salesperson_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_use_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_order_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exemption_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<AddressesModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporting_location_code: Option<String>,
    /// Commit immediately after creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_override: Option<TaxOverrideModel>,
    /// Three-character ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate_effective_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_lane_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_identification_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_seller_importer_of_record: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_supplier_name: Option<String>,
    /// e.g. `parameters`, `userDefinedFields`, `deliveryTerms`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateTransactionModel {
    pub fn new(document_type: DocumentType, customer_code: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            code: None,
            lines: Vec::new(),
            document_type: Some(document_type),
            company_code: None,
            date,
            customer_code: customer_code.into(),
            salesperson_code: None,
            entity_use_code: None,
            discount: None,
            purchase_order_no: None,
            exemption_no: None,
            addresses: None,
            reference_code: None,
            reporting_location_code: None,
            commit: None,
            batch_code: None,
            tax_override: None,
            currency_code: None,
            exchange_rate: None,
            exchange_rate_effective_date: None,
            pos_lane_code: None,
            business_identification_no: None,
            is_seller_importer_of_record: None,
            description: None,
            email: None,
            customer_supplier_name: None,
            extra: Map::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_company_code(mut self, company_code: impl Into<String>) -> Self {
        self.company_code = Some(company_code.into());
        self
    }

    pub fn with_addresses(mut self, addresses: AddressesModel) -> Self {
        self.addresses = Some(addresses);
        self
    }

    pub fn with_line(mut self, line: LineItemModel) -> Self {
        self.lines.push(line);
        self
    }

    pub fn with_commit(mut self, commit: bool) -> Self {
        self.commit = Some(commit);
        self
    }

    /// Set a body field that has no dedicated member, by its wire name.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// Creates the transaction, or adjusts it if one with the same code exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrAdjustTransactionModel {
    pub create_transaction_model: CreateTransactionModel,
}

/// Replaces a committed transaction with a new revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustTransactionModel {
    pub adjustment_reason: AdjustmentReason,
    /// Required when `adjustment_reason` is `Other`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_description: Option<String>,
    pub new_transaction: CreateTransactionModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTransactionCodeModel {
    pub new_code: String,
}

impl ChangeTransactionCodeModel {
    pub fn new(new_code: impl Into<String>) -> Self {
        Self {
            new_code: new_code.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitTransactionModel {
    pub commit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockTransactionModel {
    pub is_locked: bool,
}

/// Locks (or unlocks) several documents at once, by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkLockTransactionModel {
    pub document_ids: Vec<i64>,
    pub is_locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundTransactionModel {
    /// Code for the refund transaction; generated when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_transaction_code: Option<String>,
    pub refund_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_type: Option<RefundType>,
    /// Only used with `RefundType::Percentage`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_percentage: Option<f64>,
    /// Line numbers to refund, for `RefundType::Partial`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_lines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_code: Option<String>,
}

/// Values the stored transaction is expected to match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTransactionModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_transaction_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_total_tax: Option<f64>,
}

/// Verify, change code and commit in a single call. Any subset may be given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettleTransactionModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<VerifyTransactionModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_code: Option<ChangeTransactionCodeModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitTransactionModel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidTransactionModel {
    pub code: VoidReasonCode,
}

impl VoidTransactionModel {
    pub fn new(code: VoidReasonCode) -> Self {
        Self { code }
    }
}

/// Appends lines to an existing unlocked transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTransactionLineModel {
    pub company_code: String,
    pub transaction_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    pub lines: Vec<LineItemModel>,
    /// Renumber every line `1`, `2`, `3`, ... after the change.
    #[serde(default)]
    pub renumber: bool,
}

/// Removes lines, by line number, from an existing unlocked transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTransactionLineModel {
    pub company_code: String,
    pub transaction_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    pub lines: Vec<String>,
    #[serde(default)]
    pub renumber: bool,
}
