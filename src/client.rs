use std::{fmt, sync::Arc};

use bytes::Bytes;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE},
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::{Error, Result},
    req::{req_carries_body, req_handle_error, req_read_json, APPLICATION_JSON, DEVKEY_HEADER},
    trace::{LogTracer, RequestDump, ResponseDump, Tracer},
    trans::http_client,
};

const DIGICERT_URL: &str = "https://www.digicert.com/services/v2";

/// Enumeration of known DigiCert Services API endpoints.
#[derive(Debug, Clone)]
pub enum ServiceUrl<'a> {
    /// The production DigiCert Services API v2.
    DigiCert,

    /// Provide an arbitrary base URL, e.g. a mock or a regional endpoint.
    Other(&'a str),
}

impl<'a> ServiceUrl<'a> {
    fn to_url(&self) -> &str {
        match self {
            ServiceUrl::DigiCert => DIGICERT_URL,
            ServiceUrl::Other(url) => url,
        }
    }

    fn to_base_url(&self) -> String {
        self.to_url().trim_end_matches('/').to_owned()
    }
}

/// Authenticated client of the DigiCert Services API.
///
/// Every request carries the API key in the `X-DC-DEVKEY` header. A client is immutable once
/// built; the `with_*` methods return reconfigured copies sharing the same connection pool.
///
/// # Debug tracing
///
/// With debug enabled, each exchange is dumped (headers and body of both request and response)
/// to the client's [`Tracer`]. The API key is never written to a trace.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    devkey: HeaderValue,
    base_url: String,
    debug: bool,
    tracer: Arc<dyn Tracer>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Client`].
pub struct ClientBuilder {
    token: String,
    base_url: String,
    debug: bool,
    tracer: Arc<dyn Tracer>,
}

impl ClientBuilder {
    /// Sets the base URL all request paths are appended to.
    pub fn service_url(mut self, url: ServiceUrl<'_>) -> Self {
        self.base_url = url.to_base_url();
        self
    }

    /// Enables or disables request/response tracing.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sends traces to `tracer` instead of the `log` facade. Enables debug tracing.
    pub fn tracer(mut self, tracer: impl Tracer + 'static) -> Self {
        self.tracer = Arc::new(tracer);
        self.debug = true;
        self
    }

    /// Builds the client and its TLS transport. No network activity happens here.
    pub fn build(self) -> Result<Client> {
        let mut devkey = HeaderValue::from_str(&self.token).map_err(|err| Error::Configuration {
            context: "API key is not a valid header value",
            source: err.into(),
        })?;
        devkey.set_sensitive(true);

        Ok(Client {
            http: http_client()?,
            devkey,
            base_url: self.base_url,
            debug: self.debug,
            tracer: self.tracer,
        })
    }
}

impl Client {
    /// Client for the production API with debug tracing off.
    pub fn new(token: impl Into<String>) -> Result<Client> {
        Client::builder(token).build()
    }

    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            token: token.into(),
            base_url: ServiceUrl::DigiCert.to_base_url(),
            debug: false,
            tracer: Arc::new(LogTracer),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Returns a copy of this client targeting another base URL.
    pub fn with_base_url(&self, url: ServiceUrl<'_>) -> Client {
        Client {
            base_url: url.to_base_url(),
            ..self.clone()
        }
    }

    /// Returns a copy of this client with tracing switched on or off.
    pub fn with_debug(&self, debug: bool) -> Client {
        Client {
            debug,
            ..self.clone()
        }
    }

    /// Returns a copy of this client tracing to `tracer`, with tracing switched on.
    pub fn with_tracer(&self, tracer: impl Tracer + 'static) -> Client {
        Client {
            debug: true,
            tracer: Arc::new(tracer),
            ..self.clone()
        }
    }

    /// Calls an API endpoint with an optional JSON `payload` and decodes the JSON response.
    ///
    /// `path` is appended to the base URL. `Content-Type: application/json` is only sent for
    /// POST and PUT requests that have a payload.
    ///
    /// # Errors
    ///
    /// - [`Error::Encoding`] if the payload fails to serialize.
    /// - [`Error::Transport`] if the exchange fails.
    /// - [`Error::Remote`] or [`Error::Protocol`] on responses with status >= 300.
    /// - [`Error::Decoding`] if a successful response doesn't match `T`.
    pub async fn call<B, T>(&self, method: Method, path: &str, payload: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = payload
            .map(|payload| serde_json::to_vec(payload))
            .transpose()
            .map_err(|err| Error::encoding("request payload", err))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

        if body.is_some() && req_carries_body(&method) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        }

        let url = self.url_for(path);
        let res_body = self.execute(method, &url, headers, body).await?;

        req_read_json(&url, &res_body).map_err(|err| {
            if self.debug {
                self.tracer
                    .trace(format_args!("api: {url} unable to decode response: {err}"));
            }
            err
        })
    }

    /// Calls an API endpoint without a payload and returns the raw response body.
    ///
    /// Only `headers` and the API key are sent. Error responses are classified as in
    /// [`call`](Self::call).
    pub async fn raw_call(&self, method: Method, path: &str, headers: HeaderMap) -> Result<Bytes> {
        let url = self.url_for(path);
        self.execute(method, &url, headers, None).await
    }

    fn url_for(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        mut headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes> {
        // set last so caller headers can't replace the key
        headers.insert(HeaderName::from_static(DEVKEY_HEADER), self.devkey.clone());

        let mut req = self.http.request(method, url).headers(headers);

        if let Some(body) = body {
            req = req.body(body);
        }

        let req = req.build().map_err(|err| Error::transport(url, err))?;

        log::debug!("Call endpoint: {} {url}", req.method());

        if self.debug {
            self.tracer
                .trace(format_args!("api: {url} request: {}", RequestDump(&req)));
        }

        let res = self
            .http
            .execute(req)
            .await
            .map_err(|err| Error::transport(url, err))?;

        let status = res.status();
        let res_headers = res.headers().clone();
        let res_body = res.bytes().await.map_err(|err| Error::transport(url, err))?;

        log::trace!("Response from {url}: {status}, {} bytes", res_body.len());

        if self.debug {
            let dump = ResponseDump {
                status,
                headers: &res_headers,
                body: &res_body,
            };

            self.tracer.trace(format_args!(
                "api: {url} response: {dump} status: {}",
                status.as_u16()
            ));
        }

        req_handle_error(url, status, &res_body)?;

        Ok(res_body)
    }
}
