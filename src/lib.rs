//! Client for the [DigiCert Services API](https://dev.digicert.com/en/certcentral-apis/services-api.html)
//! (v2) and a generator for the RSA keys and certificate signing requests (CSRs) the API orders
//! certificates for.
//!
//! # Usage
//!
//! A [`Client`] is created from an API token (the "devkey") and sends it on every request. Typed
//! endpoints cover the certificate life cycle:
//!
//! - [`Client::submit_order`] orders a certificate for a CSR;
//! - [`Client::view_order`] and [`Client::wait_for_issuance`] follow the order until issuance;
//! - [`Client::download_certificate`] fetches the issued certificate bundle;
//! - [`Client::revoke_certificate`] requests revocation.
//!
//! Any other endpoint can be reached with [`Client::call`] (JSON in, JSON out) or
//! [`Client::raw_call`] (raw response bytes).
//!
//! Keys and CSRs are produced by [`generate_csr_and_key`], which creates a 2048-bit RSA key and a
//! SHA-256 signed PKCS#10 request for a [`Subject`] and a list of host names or IP addresses.
//!
//! ## Examples
//!
//! A complete order, download and revoke flow is provided in the source repository as
//! `demos/order-lifecycle.rs`.
//!
//! # Debugging
//!
//! With [`ClientBuilder::debug`] enabled, every request and response is passed to the client's
//! [`Tracer`]. The default [`LogTracer`] writes them through the `log` facade under the
//! `digicert::trace` target. The API token is never included.
//!
//! # Transport Security
//!
//! Connections only negotiate TLS 1.2 or 1.3, with TLS 1.2 restricted to ECDHE AES-128-GCM cipher
//! suites. Server certificates are always verified against the Mozilla root store.

#![deny(rust_2018_idioms, nonstandard_style, future_incompatible)]

mod cert;
mod client;
mod csr;
mod error;
mod req;
mod trace;
mod trans;

pub mod api;
pub mod order;


pub use crate::{
    client::{Client, ClientBuilder, ServiceUrl},
    csr::{generate_csr_and_key, CertificateRequest, GeneratedCsr, Subject},
    error::{Error, Result},
    order::OrderView,
    trace::{LogTracer, NoopTracer, Tracer},
};
