//! HTTP execution and result delivery
//!
//! One compile request is one POST/response cycle: [`CompilerClient::execute`]
//! submits the form-encoded descriptor and parses the JSON response, and
//! [`CompilerClient::dispatch`] routes the compiled code to a [`Sink`].
//! Requests are single-attempt; there is no retry, no client-side timeout,
//! and no cancellation once issued. Timeout policy belongs to the caller or
//! the transport layer.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::Client as ReqwestClient;
use url::Url;

use crate::error::{Error, Result};
use crate::request::CompileRequest;
use crate::response::{report_output_info, CompileResponse};

/// Hostname of the public Closure Compiler service
pub const DEFAULT_BASE_URL: &str = "https://closure-compiler.appspot.com";

/// Path of the compile operation on the service
pub const DEFAULT_PATH: &str = "/compile";

/// Location of a compile service instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub path: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            path: DEFAULT_PATH.to_string(),
        }
    }
}

impl Endpoint {
    /// Create an endpoint for a non-default service instance
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
        }
    }

    /// Resolve the endpoint into a request URL
    pub fn url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url).map_err(|source| Error::InvalidEndpoint {
            message: format!("invalid base URL: {}", self.base_url),
            source,
        })?;
        base.join(&self.path).map_err(|source| Error::InvalidEndpoint {
            message: format!("failed to join path: {}", self.path),
            source,
        })
    }
}

/// Destination for a delivered compile result, supplied at the terminal call
pub enum Sink {
    /// Invoke with the compiled code
    Callback(Box<dyn FnOnce(String) + Send>),
    /// Invoke with the full parsed response
    RawCallback(Box<dyn FnOnce(CompileResponse) + Send>),
    /// Write header plus compiled code to this path, overwriting it
    File(PathBuf),
    /// Emit the compiled code on the log channel
    Log,
}

impl Sink {
    /// Deliver the compiled code to a callback
    pub fn callback(callback: impl FnOnce(String) + Send + 'static) -> Self {
        Sink::Callback(Box::new(callback))
    }

    /// Deliver the full parsed response to a callback
    pub fn raw_callback(callback: impl FnOnce(CompileResponse) + Send + 'static) -> Self {
        Sink::RawCallback(Box::new(callback))
    }

    /// Persist the result to a file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Sink::File(path.into())
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Callback(_) => f.write_str("Sink::Callback"),
            Sink::RawCallback(_) => f.write_str("Sink::RawCallback"),
            Sink::File(path) => f.debug_tuple("Sink::File").field(path).finish(),
            Sink::Log => f.write_str("Sink::Log"),
        }
    }
}

/// Client for the compile service
pub struct CompilerClient {
    http: ReqwestClient,
}

impl CompilerClient {
    /// Create a client with default transport settings
    pub fn new() -> Result<Self> {
        let http = ReqwestClient::builder()
            .build()
            .map_err(|source| Error::Transport {
                message: "failed to construct HTTP client".to_string(),
                source,
            })?;
        Ok(Self { http })
    }

    /// Create a client over an existing reqwest client, for callers that
    /// manage transport settings themselves
    pub fn with_http(http: ReqwestClient) -> Self {
        Self { http }
    }

    /// Submit the request and return the parsed response. Warnings, errors,
    /// and statistics carried by the response are logged here.
    pub async fn execute(&self, request: &CompileRequest) -> Result<CompileResponse> {
        let url = request.endpoint().url()?;
        tracing::debug!(%url, "submitting compile request");

        let response = self
            .http
            .post(url)
            .form(request.form_pairs())
            .send()
            .await
            .map_err(|source| Error::Transport {
                message: format!("request to {} failed", request.endpoint().base_url),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Service {
                status: status.as_u16(),
                headers,
                body,
            });
        }

        let body = response.text().await.map_err(|source| Error::Transport {
            message: "failed to read response body".to_string(),
            source,
        })?;
        let parsed: CompileResponse =
            serde_json::from_str(&body).map_err(|source| Error::Protocol {
                message: format!("response body is not valid JSON: {source}"),
                source,
            })?;

        report_output_info(&parsed);
        Ok(parsed)
    }

    /// Execute the request and deliver the result to `sink`. Exactly one
    /// delivery happens on success; on error nothing is delivered and the
    /// error is both logged and returned.
    pub async fn dispatch(&self, request: CompileRequest, sink: Sink) -> Result<()> {
        let response = match self.execute(&request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("compile request failed: {err}");
                return Err(err);
            }
        };

        if !response.has_output() {
            tracing::error!("no compiled code to output");
            return Err(Error::NoOutput);
        }
        let code = response.compiled_code.clone().unwrap_or_default();

        match sink {
            Sink::Callback(callback) => callback(code),
            Sink::RawCallback(callback) => callback(response),
            Sink::File(path) => write_output_file(&path, request.header(), &code).await?,
            Sink::Log => tracing::info!("compiled code:\n{code}"),
        }
        Ok(())
    }
}

/// Write header plus compiled code to `path`, reporting the resolved
/// absolute path on success
async fn write_output_file(path: &Path, header: Option<&str>, code: &str) -> Result<()> {
    let mut output = String::with_capacity(code.len() + header.map_or(0, str::len));
    if let Some(header) = header {
        output.push_str(header);
    }
    output.push_str(code);

    tokio::fs::write(path, &output)
        .await
        .map_err(|source| Error::Io {
            message: format!("failed to write {}", path.display()),
            source,
        })?;

    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    tracing::info!("compiled code saved to {}", resolved.display());
    Ok(())
}
