use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    api::ErrorList,
    error::{Error, Result},
};

/// Header carrying the API key on every request.
pub(crate) const DEVKEY_HEADER: &str = "x-dc-devkey";

pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Methods whose JSON body is announced with a content type.
pub(crate) fn req_carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT
}

/// Turns responses with status >= 300 into [`Error::Remote`], or [`Error::Protocol`] when the
/// body is not the structured error list.
pub(crate) fn req_handle_error(url: &str, status: StatusCode, body: &[u8]) -> Result<()> {
    // ok responses pass through
    if status.as_u16() < 300 {
        return Ok(());
    }

    match serde_json::from_slice::<ErrorList>(body) {
        Ok(list) => Err(Error::Remote {
            url: url.to_owned(),
            status,
            errors: list.errors,
        }),

        Err(source) => Err(Error::Protocol {
            url: url.to_owned(),
            status,
            body: String::from_utf8_lossy(body).into_owned(),
            source,
        }),
    }
}

pub(crate) fn req_read_json<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| {
        log::debug!("Unable to decode response from {url}: {source}");

        Error::Decoding {
            url: url.to_owned(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, OrderCreated};

    const URL: &str = "https://www.digicert.com/services/v2/order/certificate/ssl_basic";

    #[test]
    fn success_statuses_pass_through() {
        for status in [200, 201, 204, 299] {
            let status = StatusCode::from_u16(status).unwrap();
            req_handle_error(URL, status, b"not even json").unwrap();
        }
    }

    #[test]
    fn structured_error_body_is_remote() {
        let body = br#"{"errors":[{"code":"invalid_csr","message":"bad CSR"}]}"#;

        for status in [300, 400, 422, 500] {
            let status = StatusCode::from_u16(status).unwrap();
            let err = req_handle_error(URL, status, body).unwrap_err();

            match err {
                Error::Remote {
                    status: got,
                    errors,
                    ..
                } => {
                    assert_eq!(got, status);
                    assert_eq!(errors, [ApiError::new("invalid_csr", "bad CSR")]);
                }
                err => panic!("expected remote error, got {err:?}"),
            }
        }
    }

    #[test]
    fn unstructured_error_body_is_protocol() {
        for body in [
            &b"<html>bad gateway</html>"[..],
            &b""[..],
            &br#"{"detail":"x"}"#[..],
        ] {
            let err = req_handle_error(URL, StatusCode::BAD_GATEWAY, body).unwrap_err();
            assert!(matches!(err, Error::Protocol { .. }), "{err:?}");
        }
    }

    #[test]
    fn read_json_classifies_mismatch_as_decoding() {
        let created = req_read_json::<OrderCreated>(URL, br#"{"id":999,"requests":[]}"#).unwrap();
        assert_eq!(created.id, 999);

        let err = req_read_json::<OrderCreated>(URL, br#"{"unexpected":true}"#).unwrap_err();
        assert!(matches!(err, Error::Decoding { .. }));
    }

    #[test]
    fn only_post_and_put_carry_bodies() {
        assert!(req_carries_body(&Method::POST));
        assert!(req_carries_body(&Method::PUT));
        assert!(!req_carries_body(&Method::GET));
        assert!(!req_carries_body(&Method::DELETE));
    }
}
