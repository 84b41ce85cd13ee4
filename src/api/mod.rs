//! JSON API payloads.
//!
//! Request and response bodies of the DigiCert Services API v2 endpoints used by this crate.

use std::fmt;

use serde::{Deserialize, Serialize};

mod order;
mod revocation;

pub use self::{
    order::{
        CertificateRef, Order, OrderCertificate, OrderCreated, OrderRequest, Organization,
        SubmitOrder,
    },
    revocation::{Requester, RevokeCertificate, Revocation},
};

/// Body of every non-2xx response.
///
/// # Example JSON
///
/// ```json
/// {
///   "errors": [
///     { "code": "invalid_csr", "message": "bad CSR" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorList {
    pub errors: Vec<ApiError>,
}

/// A single machine-readable code with its human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}
