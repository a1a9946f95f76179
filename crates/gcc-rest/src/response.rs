//! Response model for the compile service's JSON output
//!
//! The service reports compiled code alongside optional warning, error, and
//! size-statistics sections. Warnings and errors are informational: their
//! presence does not prevent delivering compiled code.

use serde::{Deserialize, Serialize};

/// Parsed compile service response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompileResponse {
    /// The transformed source text, absent when compilation produced nothing
    pub compiled_code: Option<String>,
    /// Compiler warnings, present when requested via `output_info`
    pub warnings: Option<Vec<CompileMessage>>,
    /// Compiler errors, present when requested via `output_info`
    pub errors: Option<Vec<CompileMessage>>,
    /// Size statistics, present when requested via `output_info`
    pub statistics: Option<Statistics>,
}

impl CompileResponse {
    /// Whether the response carries non-empty compiled code. The service
    /// reports an empty `compiledCode` for output-less input; that counts as
    /// no output.
    pub fn has_output(&self) -> bool {
        self.compiled_code.as_deref().is_some_and(|code| !code.is_empty())
    }
}

/// One warning or error entry from the compiler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileMessage {
    /// Message text; the service names this field `warning` or `error`
    /// depending on the section it appears in
    #[serde(alias = "warning", alias = "error")]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub file: Option<String>,
    pub lineno: Option<i64>,
    pub charno: Option<i64>,
    /// The offending source line, when the service includes it
    pub line: Option<String>,
}

/// Input/output size statistics reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub original_size: u64,
    pub compressed_size: u64,
    pub compressed_gzip_size: u64,
}

impl Statistics {
    /// Percentage size reduction: `100 * (1 - compressed/original)`
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        100.0 * (1.0 - self.compressed_size as f64 / self.original_size as f64)
    }

    /// Byte count as KB, rounded to two decimals
    pub fn kb(bytes: u64) -> f64 {
        (bytes as f64 / 10.24).round() / 100.0
    }
}

/// Log the informational sections of a response: warnings at warn level,
/// errors at error level, statistics at info level.
pub fn report_output_info(response: &CompileResponse) {
    for warning in response.warnings.iter().flatten() {
        tracing::warn!(
            file = warning.file.as_deref(),
            lineno = warning.lineno,
            "{}",
            warning.text
        );
    }

    for error in response.errors.iter().flatten() {
        tracing::error!(
            file = error.file.as_deref(),
            lineno = error.lineno,
            "{}",
            error.text
        );
    }

    if let Some(stats) = &response.statistics {
        tracing::info!("      Original {} KB", Statistics::kb(stats.original_size));
        tracing::info!("    Compressed {} KB", Statistics::kb(stats.compressed_size));
        tracing::info!("     + GZipped {} KB", Statistics::kb(stats.compressed_gzip_size));
        tracing::info!("       Reduced {:.1}%", stats.reduction_percent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "compiledCode": "var a=1;",
            "warnings": [
                {"type": "JSC_UNSAFE", "warning": "dangerous use of this", "lineno": 3, "charno": 10, "file": "Input_0"}
            ],
            "errors": [
                {"type": "JSC_PARSE_ERROR", "error": "parse error", "lineno": 7, "charno": 0}
            ],
            "statistics": {"originalSize": 1000, "compressedSize": 250, "compressedGzipSize": 120}
        }"#;
        let response: CompileResponse = serde_json::from_str(body).unwrap();
        assert!(response.has_output());
        assert_eq!(response.warnings.as_ref().unwrap()[0].text, "dangerous use of this");
        assert_eq!(response.errors.as_ref().unwrap()[0].text, "parse error");
        assert_eq!(response.statistics.unwrap().original_size, 1000);
    }

    #[test]
    fn test_missing_and_empty_code_count_as_no_output() {
        let missing: CompileResponse = serde_json::from_str("{}").unwrap();
        assert!(!missing.has_output());

        let empty: CompileResponse = serde_json::from_str(r#"{"compiledCode": ""}"#).unwrap();
        assert!(!empty.has_output());
    }

    #[test]
    fn test_reduction_percent() {
        let stats = Statistics {
            original_size: 1000,
            compressed_size: 250,
            compressed_gzip_size: 120,
        };
        assert!((stats.reduction_percent() - 75.0).abs() < f64::EPSILON);

        let empty = Statistics {
            original_size: 0,
            compressed_size: 0,
            compressed_gzip_size: 0,
        };
        assert_eq!(empty.reduction_percent(), 0.0);
    }

    #[test]
    fn test_kb_rounding() {
        assert_eq!(Statistics::kb(100_000), 97.66);
        assert_eq!(Statistics::kb(1024), 1.0);
        assert_eq!(Statistics::kb(0), 0.0);
    }
}
