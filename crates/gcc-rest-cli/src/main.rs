//! gccr - compile JavaScript files through the Closure Compiler REST API
//!
//! Concatenates the given source files, submits one compile request, and
//! prints the compiled output to stdout or writes it to a file. Diagnostics
//! go to stderr so compiled output stays pipeable.

mod cli;

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use gcc_rest::{CompileRequestBuilder, CompilerClient, Endpoint, Sink, DEFAULT_PATH};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        tracing::error!("{err:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut builder =
        CompileRequestBuilder::new().option("compilation_level", cli.compilation_level.as_str());

    if let Some(level) = &cli.warning_level {
        builder = builder.option("warning_level", level.as_str());
    }
    if let Some(language) = &cli.language {
        builder = builder.option("language", language.as_str());
    }
    if let Some(formatting) = &cli.formatting {
        builder = builder.option("formatting", formatting.as_str());
    }
    if let Some(url) = &cli.externs_url {
        builder = builder.option("externs_url", url.as_str());
    }
    if cli.debug {
        builder = builder.option("debug", true);
    }
    if cli.use_closure_library {
        builder = builder.option("use_closure_library", true);
    }
    if let Some(url) = &cli.service_url {
        builder = builder.endpoint(Endpoint::new(url.as_str(), DEFAULT_PATH));
    }
    if let Some(header) = &cli.header {
        builder = builder.header(header.as_str());
    }

    builder = builder
        .add_files(&cli.files)
        .context("failed to read input files")?;

    let client = CompilerClient::new()?;
    let request = builder.build();
    let sink = match &cli.output {
        Some(path) => Sink::file(path),
        None => Sink::callback(|code| println!("{code}")),
    };
    client
        .dispatch(request, sink)
        .await
        .context("compilation failed")?;
    Ok(())
}

/// Route diagnostics to stderr, honoring RUST_LOG over the -v flags
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["gccr", "app.js", "util.js", "-o", "app.min.js", "-vv"]);
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.output.as_deref().unwrap().to_str(), Some("app.min.js"));
        assert_eq!(cli.compilation_level, "SIMPLE_OPTIMIZATIONS");
        assert_eq!(cli.verbose, 2);

        let cli = Cli::parse_from([
            "gccr",
            "app.js",
            "--compilation-level",
            "ADVANCED_OPTIMIZATIONS",
            "--debug",
        ]);
        assert_eq!(cli.compilation_level, "ADVANCED_OPTIMIZATIONS");
        assert!(cli.debug);
    }
}
