//! Wire enums for the Transactions resource.
//!
//! Every enum serializes as its PascalCase variant name, which is also the
//! form used when a value is substituted into a URL path.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use avatax_core::CoreError;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| CoreError::unknown_variant($kind, s))
            }
        }
    };
}

wire_enum! {
    /// Kind of document a transaction represents.
    ///
    /// `*Order` types are estimates and are never recorded; `*Invoice` types are
    /// stored and can later be committed and reported.
    DocumentType, "document type" {
        SalesOrder,
        SalesInvoice,
        PurchaseOrder,
        PurchaseInvoice,
        ReturnOrder,
        ReturnInvoice,
        InventoryTransferOrder,
        InventoryTransferInvoice,
        ReverseChargeOrder,
        ReverseChargeInvoice,
        CustomsInvoice,
        CustomsOrder,
        /// Only valid as a filter when fetching.
        Any,
    }
}

wire_enum! {
    /// Server-side lifecycle status of a transaction.
    TransactionStatus, "transaction status" {
        Temporary,
        Saved,
        Posted,
        Committed,
        Cancelled,
        Adjusted,
        Queued,
        PendingApproval,
        Any,
    }
}

wire_enum! {
    /// Reason given when voiding a transaction.
    VoidReasonCode, "void reason code" {
        Unspecified,
        PostFailed,
        DocDeleted,
        DocVoided,
        AdjustmentCancelled,
    }
}

wire_enum! {
    /// Reason recorded when adjusting a committed transaction.
    AdjustmentReason, "adjustment reason" {
        NotAdjusted,
        SourcingIssue,
        ReconciledWithGeneralLedger,
        ExemptCertApplied,
        PriceAdjusted,
        ProductReturned,
        ProductExchanged,
        BadDebt,
        Other,
        Offline,
    }
}

wire_enum! {
    RefundType, "refund type" {
        Full,
        Partial,
        TaxOnly,
        Percentage,
    }
}

wire_enum! {
    TaxOverrideType, "tax override type" {
        None,
        TaxAmount,
        Exemption,
        TaxDate,
        AccruedTaxAmount,
        DeriveTaxable,
    }
}
