//! Diagnostic message configuration.

/// Help reference appended to tool-integration messages.
pub const DEFAULT_HELP_URL: &str = "https://github.com/strata-lang/strata";

/// Stand-in text for the end-of-file token in plain messages.
pub const DEFAULT_EOF_MARKER: &str = "<<EOF>>";

/// Configuration for a [`DiagnosticFormatter`](crate::DiagnosticFormatter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticConfig {
    pub help_url: String,
    pub eof_marker: String,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            help_url: DEFAULT_HELP_URL.to_string(),
            eof_marker: DEFAULT_EOF_MARKER.to_string(),
        }
    }
}

impl DiagnosticConfig {
    /// Create config from environment variables.
    ///
    /// `STRATA_HELP_URL` overrides the help reference.
    pub fn from_env() -> Self {
        let help_url =
            std::env::var("STRATA_HELP_URL").unwrap_or_else(|_| DEFAULT_HELP_URL.to_string());

        Self {
            help_url,
            ..Self::default()
        }
    }

    pub fn with_help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = url.into();
        self
    }

    pub fn with_eof_marker(mut self, marker: impl Into<String>) -> Self {
        self.eof_marker = marker.into();
        self
    }
}
