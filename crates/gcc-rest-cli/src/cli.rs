//! Command-line argument definitions for gccr

use std::path::PathBuf;

use clap::Parser;

/// Compile JavaScript through the Google Closure Compiler REST API
#[derive(Parser, Debug)]
#[command(name = "gccr", version, about)]
pub struct Cli {
    /// JavaScript source files, concatenated in the order given
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Write compiled output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Literal text prepended to the output file; never sent to the compiler
    #[arg(long, value_name = "TEXT")]
    pub header: Option<String>,

    /// Optimization level (WHITESPACE_ONLY, SIMPLE_OPTIMIZATIONS,
    /// ADVANCED_OPTIMIZATIONS)
    #[arg(long, value_name = "LEVEL", default_value = "SIMPLE_OPTIMIZATIONS")]
    pub compilation_level: String,

    /// Warning verbosity (QUIET, DEFAULT, VERBOSE)
    #[arg(long, value_name = "LEVEL")]
    pub warning_level: Option<String>,

    /// Input language (e.g. ECMASCRIPT5, ECMASCRIPT5_STRICT)
    #[arg(long, value_name = "SPEC")]
    pub language: Option<String>,

    /// Output formatting (pretty_print, print_input_delimiter)
    #[arg(long, value_name = "FORMAT")]
    pub formatting: Option<String>,

    /// URL of an externs file to include
    #[arg(long, value_name = "URL")]
    pub externs_url: Option<String>,

    /// Make the output human readable for debugging
    #[arg(long)]
    pub debug: bool,

    /// Resolve goog.require() against the Closure Library
    #[arg(long)]
    pub use_closure_library: bool,

    /// Base URL of the compile service, for self-hosted instances
    #[arg(long, value_name = "URL")]
    pub service_url: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
