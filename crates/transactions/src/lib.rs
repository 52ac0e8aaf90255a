//! Transactions resource models.
//!
//! Request and response shapes for the `/api/v2/.../transactions` endpoints,
//! expressed as plain serde structs (no IO, no HTTP). Lifecycle rules such as
//! "committed transactions can only be adjusted" are enforced by the service,
//! not here.

pub mod document;
pub mod request;
pub mod response;
mod wire_time;

pub use document::{
    AdjustmentReason, DocumentType, RefundType, TaxOverrideType, TransactionStatus, VoidReasonCode,
};
pub use request::{
    AddTransactionLineModel, AddressLocationInfo, AddressesModel, AdjustTransactionModel,
    BulkLockTransactionModel, ChangeTransactionCodeModel, CommitTransactionModel,
    CreateOrAdjustTransactionModel, CreateTransactionModel, LineItemModel, LockTransactionModel,
    RefundTransactionModel, RemoveTransactionLineModel, SettleTransactionModel, TaxOverrideModel,
    VerifyTransactionModel, VoidTransactionModel,
};
pub use response::{
    ApiCallInfo, AuditTransactionModel, BulkLockTransactionResult, FetchResult,
    TransactionAddressModel, TransactionLineDetailModel, TransactionLineModel, TransactionModel,
    TransactionSummary,
};
