//! Debug tracing of request/response exchanges.

use std::fmt;

use reqwest::{header::HeaderMap, StatusCode};

/// Sink for debug traces of full request and response dumps.
///
/// Any `Fn(fmt::Arguments<'_>) + Send + Sync` closure is a tracer.
pub trait Tracer: Send + Sync {
    fn trace(&self, args: fmt::Arguments<'_>);
}

impl<F> Tracer for F
where
    F: Fn(fmt::Arguments<'_>) + Send + Sync,
{
    fn trace(&self, args: fmt::Arguments<'_>) {
        self(args)
    }
}

/// Forwards traces to the `log` facade at debug level.
///
/// Default tracer of a [`Client`](crate::Client).
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace(&self, args: fmt::Arguments<'_>) {
        log::debug!(target: "digicert::trace", "{args}");
    }
}

/// Discards all traces.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn trace(&self, _args: fmt::Arguments<'_>) {}
}

/// Request line, headers and body of an outgoing request.
///
/// Headers the HTTP client adds while sending (`user-agent`, `accept-encoding`, `host` and the
/// like) are not part of the dump.
pub(crate) struct RequestDump<'a>(pub &'a reqwest::Request);

impl fmt::Display for RequestDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let req = self.0;

        writeln!(f, "{} {} {:?}", req.method(), req.url(), req.version())?;
        write_headers(f, req.headers())?;

        if let Some(body) = req.body().and_then(|body| body.as_bytes()) {
            writeln!(f)?;
            write_body(f, body)?;
        }

        Ok(())
    }
}

pub(crate) struct ResponseDump<'a> {
    pub status: StatusCode,
    pub headers: &'a HeaderMap,
    pub body: &'a [u8],
}

impl fmt::Display for ResponseDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status)?;
        write_headers(f, self.headers)?;
        writeln!(f)?;
        write_body(f, self.body)
    }
}

fn write_headers(f: &mut fmt::Formatter<'_>, headers: &HeaderMap) -> fmt::Result {
    for (name, value) in headers {
        if value.is_sensitive() {
            writeln!(f, "{name}: <redacted>")?;
        } else {
            writeln!(f, "{name}: {}", String::from_utf8_lossy(value.as_bytes()))?;
        }
    }

    Ok(())
}

fn write_body(f: &mut fmt::Formatter<'_>, body: &[u8]) -> fmt::Result {
    match std::str::from_utf8(body) {
        Ok(text) => f.write_str(text),
        Err(_) => write!(f, "<{} bytes of binary data>", body.len()),
    }
}
