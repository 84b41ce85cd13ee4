//! Certificate order life cycle.
//!
//! 1. Generate a key and CSR with [`generate_csr_and_key`].
//! 2. [`Client::submit_order`] with a [`SubmitOrder`] carrying the CSR.
//! 3. Poll [`Client::view_order`] (or [`Client::wait_for_issuance`]) until the order is issued.
//! 4. [`Client::download_certificate`] using the issued certificate ID.
//!
//! [`generate_csr_and_key`]: crate::generate_csr_and_key
//! [`Client::download_certificate`]: crate::Client::download_certificate

use std::{fmt, time::Duration};

use reqwest::Method;

use crate::{
    api::{self, OrderCertificate, SubmitOrder},
    csr::GeneratedCsr,
    error::Result,
    Client,
};

/// Order status reported once the certificate has been issued.
const STATUS_ISSUED: &str = "issued";

/// Current state of a certificate order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    /// ID of the issued certificate, once the API has assigned one.
    pub certificate_id: Option<String>,

    /// Order status as reported by the API, e.g. `pending` or `issued`.
    pub status: String,
}

impl OrderView {
    fn from_api(order: api::Order) -> Self {
        Self {
            certificate_id: order.certificate.map(|cert| cert.id.to_string()),
            status: order.status,
        }
    }

    /// Returns true if the certificate is issued and can be downloaded.
    pub fn is_issued(&self) -> bool {
        self.status == STATUS_ISSUED
    }
}

impl OrderCertificate {
    /// Certificate section of an order for a generated CSR.
    ///
    /// The common name and organizational units are taken from the CSR subject, the signature
    /// hash from its signature algorithm.
    pub fn from_csr(csr: &GeneratedCsr) -> Self {
        let request = csr.request();
        let subject = request.subject();

        Self {
            common_name: subject.common_name,
            emails: Vec::new(),
            csr: csr.csr_pem().to_owned(),
            organization_units: subject.organizational_unit,
            signature_hash: request.signature_hash().to_owned(),
        }
    }
}

impl Client {
    /// Submits a certificate order for the product `product_id`, e.g. `ssl_basic`.
    pub async fn submit_order(
        &self,
        product_id: &str,
        order: &SubmitOrder,
    ) -> Result<api::OrderCreated> {
        let path = format!("/order/certificate/{product_id}");
        let created = self
            .call::<_, api::OrderCreated>(Method::POST, &path, Some(order))
            .await?;

        log::debug!("Submitted order {}", created.id);

        Ok(created)
    }

    /// Fetches the issued certificate ID and status of an order.
    pub async fn view_order(&self, order_id: impl fmt::Display) -> Result<OrderView> {
        let path = format!("/order/certificate/{order_id}");
        let order = self.call::<(), api::Order>(Method::GET, &path, None).await?;

        Ok(OrderView::from_api(order))
    }

    /// Polls the order until it is issued, at most `attempts` times with `delay` between polls.
    ///
    /// Returns the last observed state, which may not be issued. Errors are not retried.
    pub async fn wait_for_issuance(
        &self,
        order_id: impl fmt::Display,
        attempts: usize,
        delay: Duration,
    ) -> Result<OrderView> {
        let order_id = order_id.to_string();
        let mut attempt = 1;

        loop {
            let view = self.view_order(&order_id).await?;

            if view.is_issued() || attempt >= attempts {
                return Ok(view);
            }

            log::debug!(
                "Order {order_id} is {}, polling again in {delay:?}",
                view.status
            );

            attempt += 1;
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        csr::{generate_csr_and_key, Subject},
        test::{with_mock_server, TOKEN},
        Error, ServiceUrl,
    };

    fn client(server: &crate::test::TestServer) -> Client {
        Client::builder(TOKEN)
            .service_url(ServiceUrl::Other(&server.base_url))
            .build()
            .unwrap()
    }

    fn order_for(csr: &GeneratedCsr) -> SubmitOrder {
        SubmitOrder::new(OrderCertificate::from_csr(csr), 12345, 1)
    }

    #[tokio::test]
    async fn test_submit_order() {
        let server = with_mock_server();
        let client = client(&server);

        let subject = Subject {
            organizational_unit: vec!["Products".to_owned()],
            ..Subject::new("cn.testing.com")
        };
        let csr = generate_csr_and_key(&subject, &["testing.com"]).unwrap();

        let order = order_for(&csr);
        assert_eq!(order.certificate.common_name, "cn.testing.com");
        assert_eq!(order.certificate.organization_units, ["Products"]);
        assert_eq!(order.certificate.signature_hash, "sha256");
        assert_eq!(order.organization.id, 12345);
        assert_eq!(order.validity_years, 1);

        let created = client.submit_order("ssl_basic", &order).await.unwrap();
        assert_eq!(created.id, 999);
        assert_eq!(created.requests.len(), 1);
        assert_eq!(created.requests[0].status, "submitted");
    }

    #[tokio::test]
    async fn test_submit_rejected_order() {
        let server = with_mock_server();
        let client = client(&server);

        let order = SubmitOrder::new(
            OrderCertificate {
                common_name: "cn.testing.com".to_owned(),
                csr: "not a csr".to_owned(),
                signature_hash: "sha256".to_owned(),
                ..Default::default()
            },
            12345,
            1,
        );

        let err = client.submit_order("rejected", &order).await.unwrap_err();

        match &err {
            Error::Remote { status, errors, .. } => {
                assert_eq!(status.as_u16(), 422);
                assert_eq!(errors[0].code, "invalid_csr");
                assert_eq!(errors[0].message, "bad CSR");
            }
            err => panic!("expected remote error, got {err:?}"),
        }
    }

    #[tokio::test]
    async fn test_view_order() {
        let server = with_mock_server();
        let client = client(&server);

        let view = client.view_order(999).await.unwrap();
        assert_eq!(view.certificate_id.as_deref(), Some("42"));
        assert_eq!(view.status, "issued");
        assert!(view.is_issued());
    }

    #[tokio::test]
    async fn test_view_unknown_order() {
        let server = with_mock_server();
        let client = client(&server);

        let err = client.view_order("123").await.unwrap_err();
        assert_eq!(err.remote_errors().unwrap()[0].code, "not_found");
    }

    #[tokio::test]
    async fn test_wait_for_issuance() {
        let server = with_mock_server();
        let client = client(&server);

        let view = client
            .wait_for_issuance(999, 10, Duration::from_millis(1))
            .await
            .unwrap();
        assert!(view.is_issued());

        let view = client
            .wait_for_issuance(998, 3, Duration::from_millis(1))
            .await
            .unwrap();
        assert!(!view.is_issued());
        assert_eq!(view.status, "pending");
        assert_eq!(view.certificate_id, None);
    }
}
