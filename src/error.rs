use reqwest::StatusCode;

use crate::api::ApiError;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by the client and the CSR generator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client could not be constructed.
    #[error("invalid client configuration: {context}")]
    Configuration {
        context: &'static str,
        #[source]
        source: BoxError,
    },

    /// Local serialization of a payload or PEM document failed.
    #[error("failed to encode {what}")]
    Encoding {
        what: &'static str,
        #[source]
        source: BoxError,
    },

    /// Connection, DNS, timeout or body read failure.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response whose body is not the structured error list.
    #[error("unparseable error body from {url} (status {status}): {body:?}")]
    Protocol {
        url: String,
        status: StatusCode,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed error response from the API.
    #[error("request to {url} failed with status {status}: {}", DisplayErrors(.errors))]
    Remote {
        url: String,
        status: StatusCode,
        errors: Vec<ApiError>,
    },

    /// Successful response whose body does not match the expected shape.
    #[error("failed to decode response from {url}")]
    Decoding {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to generate private key")]
    KeyGeneration(#[source] rsa::Error),

    #[error("failed to create certificate request")]
    RequestCreation(#[source] BoxError),

    #[error("failed to parse certificate request")]
    RequestParse(#[source] der::Error),
}

impl Error {
    /// HTTP status of a failed exchange, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Protocol { status, .. } | Error::Remote { status, .. } => Some(*status),
            Error::Transport { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The `(code, message)` list of a [`Error::Remote`].
    pub fn remote_errors(&self) -> Option<&[ApiError]> {
        match self {
            Error::Remote { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub(crate) fn encoding(what: &'static str, source: impl Into<BoxError>) -> Self {
        Error::Encoding {
            what,
            source: source.into(),
        }
    }

    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Error::Transport {
            url: url.to_owned(),
            source,
        }
    }
}

struct DisplayErrors<'a>(&'a [ApiError]);

impl std::fmt::Display for DisplayErrors<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("no error details");
        }

        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }

        Ok(())
    }
}
