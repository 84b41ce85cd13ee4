use serde::{Deserialize, Serialize};

/// Payload of `PUT /certificate/{certificate_id}/revoke`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeCertificate {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
}

impl RevokeCertificate {
    pub fn new(comments: impl Into<String>) -> Self {
        Self {
            comments: comments.into(),
        }
    }
}

/// Revocation record returned by the API.
///
/// Only `id` and `status` are guaranteed; the remaining fields default to empty values.
//
// {
//   "id": 42,
//   "date": "2026-10-19T10:04:11+00:00",
//   "type": "revoke",
//   "status": "pending",
//   "requester": {
//     "id": 7,
//     "first_name": "Jane",
//     "last_name": "Doe",
//     "email": "jane@example.com"
//   }
// }
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Revocation {
    pub id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub _type: String,
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comments: String,
    pub requester: Requester,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requester {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
