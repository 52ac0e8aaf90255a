//! Transactions endpoints (`/api/v2/.../transactions`).
//!
//! One method per endpoint. Path parameters are substituted verbatim; escaping,
//! if any, is up to the dispatcher. Status rules (what can be adjusted, voided,
//! locked) are enforced by the service and surface as [`ApiError::Server`].
//!
//! [`ApiError::Server`]: crate::ApiError::Server

use avatax_core::{QueryOptions, TransactionId};
use avatax_transactions::{
    AddTransactionLineModel, AdjustTransactionModel, AuditTransactionModel,
    BulkLockTransactionModel, BulkLockTransactionResult, ChangeTransactionCodeModel,
    CommitTransactionModel, CreateOrAdjustTransactionModel, CreateTransactionModel, DocumentType,
    FetchResult, LockTransactionModel, RefundTransactionModel, RemoveTransactionLineModel,
    SettleTransactionModel, TransactionModel, VerifyTransactionModel, VoidTransactionModel,
};

use crate::client::AvaTaxClient;
use crate::dispatcher::Dispatcher;
use crate::error::ApiResult;

/// Path templates.
pub(crate) mod paths {
    use avatax_core::TransactionId;
    use avatax_transactions::DocumentType;

    pub const ADD_LINES: &str = "/api/v2/companies/transactions/lines/add";
    pub const DELETE_LINES: &str = "/api/v2/companies/transactions/lines/delete";
    pub const BULK_LOCK: &str = "/api/v2/transactions/lock";
    pub const CREATE: &str = "/api/v2/transactions/create";
    pub const CREATE_OR_ADJUST: &str = "/api/v2/transactions/createoradjust";

    pub fn company_transactions(company_code: &str) -> String {
        format!("/api/v2/companies/{company_code}/transactions")
    }

    pub fn transaction(company_code: &str, transaction_code: &str) -> String {
        format!("/api/v2/companies/{company_code}/transactions/{transaction_code}")
    }

    pub fn transaction_with_type(
        company_code: &str,
        transaction_code: &str,
        document_type: DocumentType,
    ) -> String {
        format!("{}/types/{document_type}", transaction(company_code, transaction_code))
    }

    /// `.../transactions/{code}/{action}`, e.g. `commit`, `void`.
    pub fn transaction_action(company_code: &str, transaction_code: &str, action: &str) -> String {
        format!("{}/{action}", transaction(company_code, transaction_code))
    }

    pub fn by_id(id: TransactionId) -> String {
        format!("/api/v2/transactions/{id}")
    }
}

impl<D: Dispatcher> AvaTaxClient<D> {
    /// Add lines to an existing unlocked transaction.
    ///
    /// Lines without a number get a generated one; set `renumber` on the model
    /// to have every line renumbered `1`, `2`, `3`, ... afterwards. `$include`
    /// defaults to `Summary,Addresses` on the service side.
    pub async fn add_lines(
        &self,
        model: &AddTransactionLineModel,
        options: Option<&QueryOptions>,
    ) -> ApiResult<TransactionModel> {
        self.post_json(paths::ADD_LINES, model, options).await
    }

    /// Replace a transaction with a new revision.
    ///
    /// The previous revision is kept with status `Adjusted`. Transactions
    /// already reported to a tax authority are locked and cannot be adjusted.
    pub async fn adjust_transaction(
        &self,
        company_code: &str,
        transaction_code: &str,
        model: &AdjustTransactionModel,
    ) -> ApiResult<TransactionModel> {
        let path = paths::transaction_action(company_code, transaction_code, "adjust");
        self.post_json(&path, model, None).await
    }

    /// Audit information for a transaction: who created it, when, how long it
    /// took, and a reconstruction of the original create call.
    pub async fn audit_transaction(
        &self,
        company_code: &str,
        transaction_code: &str,
    ) -> ApiResult<AuditTransactionModel> {
        let path = paths::transaction_action(company_code, transaction_code, "audit");
        self.get_json(&path, None).await
    }

    /// Same as [`audit_transaction`](Self::audit_transaction), for a specific document type.
    pub async fn audit_transaction_with_type(
        &self,
        company_code: &str,
        transaction_code: &str,
        document_type: DocumentType,
    ) -> ApiResult<AuditTransactionModel> {
        let path = format!(
            "{}/audit",
            paths::transaction_with_type(company_code, transaction_code, document_type)
        );
        self.get_json(&path, None).await
    }

    /// Lock (or unlock) several documents by id. Locked documents can't be voided.
    pub async fn bulk_lock_transaction(
        &self,
        model: &BulkLockTransactionModel,
    ) -> ApiResult<BulkLockTransactionResult> {
        self.post_json(paths::BULK_LOCK, model, None).await
    }

    /// Rename a transaction. Only valid while it is `Saved` or `Posted`.
    pub async fn change_transaction_code(
        &self,
        company_code: &str,
        transaction_code: &str,
        model: &ChangeTransactionCodeModel,
    ) -> ApiResult<TransactionModel> {
        let path = paths::transaction_action(company_code, transaction_code, "changecode");
        self.post_json(&path, model, None).await
    }

    /// Mark a transaction `Committed`, making it available for reporting.
    pub async fn commit_transaction(
        &self,
        company_code: &str,
        transaction_code: &str,
        model: &CommitTransactionModel,
    ) -> ApiResult<TransactionModel> {
        let path = paths::transaction_action(company_code, transaction_code, "commit");
        self.post_json(&path, model, None).await
    }

    /// Create a transaction, or adjust the existing one with the same code.
    pub async fn create_or_adjust_transaction(
        &self,
        model: &CreateOrAdjustTransactionModel,
        options: Option<&QueryOptions>,
    ) -> ApiResult<TransactionModel> {
        self.post_json(paths::CREATE_OR_ADJUST, model, options).await
    }

    /// Calculate tax for a new transaction and, for invoice document types,
    /// record it.
    ///
    /// Without a `type` the service produces an unrecorded `SalesOrder`
    /// estimate. Creating a transaction whose code matches a committed one is
    /// rejected by the service.
    pub async fn create_transaction(
        &self,
        model: &CreateTransactionModel,
        options: Option<&QueryOptions>,
    ) -> ApiResult<TransactionModel> {
        self.post_json(paths::CREATE, model, options).await
    }

    /// Remove lines from an existing unlocked transaction.
    pub async fn delete_lines(
        &self,
        model: &RemoveTransactionLineModel,
        options: Option<&QueryOptions>,
    ) -> ApiResult<TransactionModel> {
        self.post_json(paths::DELETE_LINES, model, options).await
    }

    /// Fetch the current `SalesInvoice` with this code.
    ///
    /// If the transaction was adjusted, this returns the latest revision. Use
    /// [`get_transaction_by_code_and_type`](Self::get_transaction_by_code_and_type)
    /// for other document types.
    pub async fn get_transaction_by_code(
        &self,
        company_code: &str,
        transaction_code: &str,
        options: Option<&QueryOptions>,
    ) -> ApiResult<TransactionModel> {
        let path = paths::transaction(company_code, transaction_code);
        self.get_json(&path, options).await
    }

    pub async fn get_transaction_by_code_and_type(
        &self,
        company_code: &str,
        transaction_code: &str,
        document_type: DocumentType,
        options: Option<&QueryOptions>,
    ) -> ApiResult<TransactionModel> {
        let path = paths::transaction_with_type(company_code, transaction_code, document_type);
        self.get_json(&path, options).await
    }

    /// Fetch the exact revision with this id, even if it was later adjusted.
    pub async fn get_transaction_by_id(
        &self,
        id: impl Into<TransactionId>,
        options: Option<&QueryOptions>,
    ) -> ApiResult<TransactionModel> {
        let path = paths::by_id(id.into());
        self.get_json(&path, options).await
    }

    /// List a company's transactions.
    ///
    /// The service returns at most 1,000 records per page and requires a
    /// `date` range in `$filter` (otherwise only the last 30 days are
    /// searched). Page with `$top` / `$skip`.
    pub async fn list_transactions_by_company(
        &self,
        company_code: &str,
        options: Option<&QueryOptions>,
    ) -> ApiResult<FetchResult<TransactionModel>> {
        let path = paths::company_transactions(company_code);
        self.get_json(&path, options).await
    }

    /// Lock a single transaction so it can't be voided or adjusted.
    pub async fn lock_transaction(
        &self,
        company_code: &str,
        transaction_code: &str,
        model: &LockTransactionModel,
    ) -> ApiResult<TransactionModel> {
        let path = paths::transaction_action(company_code, transaction_code, "lock");
        self.post_json(&path, model, None).await
    }

    /// Create a `ReturnInvoice` refunding all or part of an earlier sale.
    pub async fn refund_transaction(
        &self,
        company_code: &str,
        transaction_code: &str,
        model: &RefundTransactionModel,
        options: Option<&QueryOptions>,
    ) -> ApiResult<TransactionModel> {
        let path = paths::transaction_action(company_code, transaction_code, "refund");
        self.post_json(&path, model, options).await
    }

    /// Verify, change code, and commit in one call.
    pub async fn settle_transaction(
        &self,
        company_code: &str,
        transaction_code: &str,
        model: &SettleTransactionModel,
    ) -> ApiResult<TransactionModel> {
        let path = paths::transaction_action(company_code, transaction_code, "settle");
        self.post_json(&path, model, None).await
    }

    /// Check the stored transaction against expected date and totals.
    ///
    /// A mismatch comes back as a service error naming the field.
    pub async fn verify_transaction(
        &self,
        company_code: &str,
        transaction_code: &str,
        model: &VerifyTransactionModel,
    ) -> ApiResult<TransactionModel> {
        let path = paths::transaction_action(company_code, transaction_code, "verify");
        self.post_json(&path, model, None).await
    }

    /// Void the current transaction with this code.
    pub async fn void_transaction(
        &self,
        company_code: &str,
        transaction_code: &str,
        model: &VoidTransactionModel,
    ) -> ApiResult<TransactionModel> {
        let path = paths::transaction_action(company_code, transaction_code, "void");
        self.post_json(&path, model, None).await
    }
}
