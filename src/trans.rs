use std::sync::Arc;

use rustls::{
    crypto::{ring, CryptoProvider},
    CipherSuite,
};

use crate::error::{Error, Result};

/// TLS 1.2 cipher suites offered to the server.
///
/// TLS 1.3 suites are always offered.
const TLS12_CIPHER_SUITES: &[CipherSuite] = &[
    CipherSuite::TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256,
    CipherSuite::TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
];

fn crypto_provider() -> CryptoProvider {
    let mut provider = ring::default_provider();

    provider.cipher_suites.retain(|suite| {
        suite.tls13().is_some() || TLS12_CIPHER_SUITES.contains(&suite.suite())
    });

    provider
}

/// Client TLS configuration: TLS 1.2 minimum, restricted suites, webpki roots.
///
/// Server certificates are always verified.
pub(crate) fn tls_config() -> Result<rustls::ClientConfig> {
    let mut roots = rustls::RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let mut config = rustls::ClientConfig::builder_with_provider(Arc::new(crypto_provider()))
        .with_protocol_versions(&[&rustls::version::TLS13, &rustls::version::TLS12])
        .map_err(|err| Error::Configuration {
            context: "TLS protocol versions",
            source: err.into(),
        })?
        .with_root_certificates(roots)
        .with_no_client_auth();

    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(config)
}

/// Builds the HTTP transport shared by every call of a client.
///
/// Proxies are picked up from the environment, connections are kept alive and responses may be
/// gzip-compressed.
pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .use_preconfigured_tls(tls_config()?)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .gzip(true)
        .build()
        .map_err(|err| Error::Configuration {
            context: "HTTP transport",
            source: err.into(),
        })
}
