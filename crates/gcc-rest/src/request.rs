//! Request accumulation and the immutable request descriptor
//!
//! [`CompileRequestBuilder`] is the chainable front of the client: it
//! accumulates source text and compiler options across a chain of owned-self
//! calls, then a terminal operation turns it into one outbound request.
//! The builder is consumed by its terminal call, so one builder maps to at
//! most one in-flight request; build a fresh one per compilation.
//!
//! [`CompileRequest`] is the immutable descriptor produced by [`build`]: the
//! ordered form pairs plus the endpoint and the optional file-output header.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::client::{CompilerClient, Endpoint, Sink};
use crate::error::{Error, Result};
use crate::options::{warn_unknown_param, OptionValue, OUTPUT_FORMAT};
use crate::response::CompileResponse;

/// Form parameter carrying the accumulated source text
const SOURCE_PARAM: &str = "js_code";

/// Chainable builder for a single compile request
#[derive(Debug, Clone)]
pub struct CompileRequestBuilder {
    source: String,
    options: BTreeMap<String, OptionValue>,
    header: Option<String>,
    endpoint: Endpoint,
}

impl Default for CompileRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompileRequestBuilder {
    /// Create a builder with the service defaults: empty source, compiled
    /// code requested in the output, the public compiler endpoint.
    pub fn new() -> Self {
        let mut options = BTreeMap::new();
        options.insert(
            "output_info".to_string(),
            OptionValue::Many(vec!["compiled_code".to_string()]),
        );
        Self {
            source: String::new(),
            options,
            header: None,
            endpoint: Endpoint::default(),
        }
    }

    /// Set a compiler option. Unknown option names are accepted with a
    /// warning; the last write for a key wins.
    pub fn option(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        let name = name.into();
        match name.as_str() {
            // The response handling depends on JSON; the format is not
            // negotiable per request.
            "output_format" => {
                tracing::warn!("output_format is fixed to json and cannot be overridden");
            }
            // The source buffer and the js_code parameter are the same slot,
            // so setting it directly overwrites anything accumulated so far.
            SOURCE_PARAM => match value.into() {
                OptionValue::One(code) => self.source = code,
                OptionValue::Many(parts) => self.source = parts.concat(),
            },
            _ => {
                warn_unknown_param(&name);
                self.options.insert(name, value.into());
            }
        }
        self
    }

    /// Set multiple compiler options; equivalent to calling [`option`] for
    /// each entry.
    ///
    /// [`option`]: Self::option
    pub fn options<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OptionValue>,
    {
        for (name, value) in entries {
            self = self.option(name, value);
        }
        self
    }

    /// Set a literal header prefixed to file output. The compiler never sees
    /// it and callback delivery ignores it.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Append a piece of source text
    pub fn add_code(mut self, code: impl AsRef<str>) -> Self {
        self.source.push_str(code.as_ref());
        self
    }

    /// Read a file and append its contents to the source buffer. Fails
    /// immediately if the file cannot be read.
    pub fn add_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            message: format!("failed to read {}", path.display()),
            source,
        })?;
        Ok(self.add_code(contents))
    }

    /// Append multiple files in the order given
    pub fn add_files<I, P>(mut self, paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self = self.add_file(path)?;
        }
        Ok(self)
    }

    /// Substitute the first match of `pattern` across the accumulated source
    pub fn replace(mut self, pattern: &Regex, replacement: &str) -> Self {
        self.source = pattern.replace(&self.source, replacement).into_owned();
        self
    }

    /// Substitute every match of `pattern` across the accumulated source
    pub fn replace_all(mut self, pattern: &Regex, replacement: &str) -> Self {
        self.source = pattern.replace_all(&self.source, replacement).into_owned();
        self
    }

    /// Point the request at a non-default compiler service instance
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// The source text accumulated so far
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Look up a previously set option
    pub fn get_option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Freeze the accumulated state into an immutable request descriptor
    pub fn build(self) -> CompileRequest {
        let mut pairs = Vec::new();
        for (name, value) in &self.options {
            value.push_pairs(name, &mut pairs);
        }
        pairs.push((SOURCE_PARAM.to_string(), self.source));
        pairs.push(("output_format".to_string(), OUTPUT_FORMAT.to_string()));
        CompileRequest {
            pairs,
            header: self.header,
            endpoint: self.endpoint,
        }
    }

    /// Compile and pass the compiled code to `callback`
    pub async fn compile<F>(self, callback: F) -> Result<()>
    where
        F: FnOnce(String) + Send + 'static,
    {
        self.dispatch(Sink::callback(callback)).await
    }

    /// Compile and pass the full parsed response to `callback`
    pub async fn compile_raw<F>(self, callback: F) -> Result<()>
    where
        F: FnOnce(CompileResponse) + Send + 'static,
    {
        self.dispatch(Sink::raw_callback(callback)).await
    }

    /// Compile and write header plus compiled code to `path`, overwriting it
    pub async fn write_output(self, path: impl Into<PathBuf>) -> Result<()> {
        self.dispatch(Sink::file(path)).await
    }

    /// Compile and emit the compiled code on the log channel
    pub async fn compile_to_log(self) -> Result<()> {
        self.dispatch(Sink::Log).await
    }

    async fn dispatch(self, sink: Sink) -> Result<()> {
        CompilerClient::new()?.dispatch(self.build(), sink).await
    }
}

/// Immutable descriptor of one outbound compile request
#[derive(Debug, Clone)]
pub struct CompileRequest {
    pairs: Vec<(String, String)>,
    header: Option<String>,
    endpoint: Endpoint,
}

impl CompileRequest {
    /// The ordered form pairs submitted as the request body
    pub fn form_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// The URL-form-encoded request body
    pub fn encoded_body(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.pairs {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }

    /// The file-output header, if one was set
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// The service endpoint this request targets
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}
