//! gcc-rest - fluent client for the Google Closure Compiler REST API
//!
//! This crate accumulates JavaScript source and compiler options through a
//! chainable builder, submits them as a single form-encoded POST to the
//! compile service, and routes the compiled output to a caller-supplied
//! destination.
//!
//! # Main Components
//!
//! - **Request Building**: [`CompileRequestBuilder`] with chainable mutators
//!   and the immutable [`CompileRequest`] descriptor it produces
//! - **Execution**: [`CompilerClient`] - one POST/response cycle per request,
//!   single-attempt, no retry
//! - **Delivery**: [`Sink`] destinations - callback, raw-response callback,
//!   file (with optional header prefix), or log channel
//! - **Error Handling**: typed taxonomy in [`Error`] using `thiserror`
//!
//! # Example
//!
//! ```no_run
//! use gcc_rest::CompileRequestBuilder;
//!
//! # async fn example() -> gcc_rest::Result<()> {
//! CompileRequestBuilder::new()
//!     .option("compilation_level", "ADVANCED_OPTIMIZATIONS")
//!     .options([("warning_level", "VERBOSE"), ("language", "ECMASCRIPT5")])
//!     .add_file("src/app.js")?
//!     .add_code("console.log('appended');")
//!     .compile(|code| println!("{code}"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! A builder is consumed by its terminal call: construct one instance per
//! compile request and never share one across overlapping requests.

pub mod client;
pub mod error;
pub mod options;
pub mod request;
pub mod response;

// Re-export main types for convenience
pub use client::{CompilerClient, Endpoint, Sink, DEFAULT_BASE_URL, DEFAULT_PATH};
pub use error::{Error, Result};
pub use options::{OptionValue, OUTPUT_FORMAT, SUPPORTED_PARAMS};
pub use request::{CompileRequest, CompileRequestBuilder};
pub use response::{CompileMessage, CompileResponse, Statistics};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
