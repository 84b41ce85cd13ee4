use serde::{Deserialize, Serialize};

/// Payload of `POST /order/certificate/{product_id}`.
///
/// # Example JSON
///
/// ```json
/// {
///   "certificate": {
///     "common_name": "example.com",
///     "csr": "-----BEGIN CERTIFICATE REQUEST-----\n...",
///     "signature_hash": "sha256"
///   },
///   "organization": { "id": 12345 },
///   "validity_years": 1
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOrder {
    pub certificate: OrderCertificate,
    pub organization: Organization,
    pub validity_years: u32,

    /// Overrides the validity period, formatted as `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_expiration_date: Option<String>,
}

impl SubmitOrder {
    pub fn new(certificate: OrderCertificate, organization_id: i64, validity_years: u32) -> Self {
        Self {
            certificate,
            organization: Organization {
                id: organization_id,
            },
            validity_years,
            custom_expiration_date: None,
        }
    }

    /// Sets an explicit expiration date instead of relying on `validity_years` alone.
    pub fn with_custom_expiration(mut self, date: time::Date) -> Self {
        self.custom_expiration_date = Some(format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        ));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCertificate {
    pub common_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,

    /// PEM-encoded certificate signing request.
    pub csr: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organization_units: Vec<String>,

    /// One of `sha256`, `sha384` or `sha512`.
    pub signature_hash: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
}

/// Response of a successful order submission.
//
// {
//   "id": 999,
//   "requests": [
//     { "id": 1, "status": "submitted" }
//   ]
// }
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub id: i64,

    #[serde(default)]
    pub requests: Vec<OrderRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub id: i64,
    pub status: String,
}

/// Response of `GET /order/certificate/{order_id}`.
//
// {
//   "id": 999,
//   "certificate": { "id": 42 },
//   "status": "issued"
// }
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateRef>,

    pub status: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRef {
    pub id: i64,
}
