//! Query-string options accepted by list and fetch endpoints.
//!
//! The service recognizes a small set of OData-style keys (`$include`,
//! `$filter`, `$top`, `$skip`, `$orderBy`) plus `documentType`. Anything else
//! goes through [`QueryOptions::extra`] untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Query options passed verbatim to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Nested data to include, comma separated (`Lines`, `Details`, `Summary`,
    /// `Addresses`, `SummaryOnly`, `LinesOnly`).
    #[serde(rename = "$include", skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,

    /// Filter statement, e.g. `date between '2024-01-01' and '2024-01-31'`.
    #[serde(rename = "$filter", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(rename = "$top", skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,

    #[serde(rename = "$skip", skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,

    /// Sort statements in the form `(fieldname) [ASC|DESC]`.
    #[serde(rename = "$orderBy", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    #[serde(rename = "documentType", skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    /// Keys the client has no dedicated field for.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Accepts anything displayable so callers can pass a typed document type.
    pub fn document_type(mut self, document_type: impl core::fmt::Display) -> Self {
        self.document_type = Some(document_type.to_string());
        self
    }

    /// Set any query parameter by its wire name.
    ///
    /// Recognized keys land in their dedicated field, so `param("$top", "5")`
    /// is the same as `top(5)` and the key is rendered once. A `$top` or
    /// `$skip` that is not a `u32` is kept as raw text in [`extra`](Self::extra)
    /// and replaces any typed value.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "$include" => self.include = Some(value),
            "$filter" => self.filter = Some(value),
            "$orderBy" => self.order_by = Some(value),
            "documentType" => self.document_type = Some(value),
            "$top" | "$skip" => {
                let slot = if key == "$top" { &mut self.top } else { &mut self.skip };
                match value.parse::<u32>() {
                    Ok(n) => {
                        *slot = Some(n);
                        self.extra.remove(&key);
                    }
                    Err(_) => {
                        *slot = None;
                        self.extra.insert(key, value);
                    }
                }
            }
            _ => {
                self.extra.insert(key, value);
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_none()
            && self.filter.is_none()
            && self.top.is_none()
            && self.skip.is_none()
            && self.order_by.is_none()
            && self.document_type.is_none()
            && self.extra.is_empty()
    }

    /// Render as `(key, value)` pairs.
    ///
    /// Recognized keys come first in a fixed order, then extra keys sorted by
    /// name. An extra key that duplicates a set recognized field is dropped,
    /// so each key appears at most once. Values are not escaped here; that is
    /// the transport's job.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value));
            }
        };

        push("$include", self.include.clone());
        push("$filter", self.filter.clone());
        push("$top", self.top.map(|v| v.to_string()));
        push("$skip", self.skip.map(|v| v.to_string()));
        push("$orderBy", self.order_by.clone());
        push("documentType", self.document_type.clone());

        let extras: Vec<(String, String)> = self
            .extra
            .iter()
            .filter(|(k, _)| !pairs.iter().any(|(set, _)| set == *k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.extend(extras);
        pairs
    }
}
