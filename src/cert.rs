use bytes::Bytes;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Method,
};

use crate::{
    api::{RevokeCertificate, Revocation},
    error::Result,
    Client,
};

impl Client {
    /// Downloads an issued certificate in the product's default format.
    ///
    /// The body is returned as is; for most products it is a ZIP archive of the certificate and
    /// its chain.
    pub async fn download_certificate(&self, certificate_id: &str) -> Result<Bytes> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

        let path = format!("/certificate/{certificate_id}/download/format/default");
        self.raw_call(Method::GET, &path, headers).await
    }

    /// Requests revocation of a certificate.
    ///
    /// An empty `comments` string is left out of the request.
    pub async fn revoke_certificate(
        &self,
        certificate_id: &str,
        comments: &str,
    ) -> Result<Revocation> {
        let path = format!("/certificate/{certificate_id}/revoke");
        let revocation = self
            .call(Method::PUT, &path, Some(&RevokeCertificate::new(comments)))
            .await?;

        log::debug!("Requested revocation of certificate {certificate_id}");

        Ok(revocation)
    }
}
