//! DSG-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, DirsigError>;

/// Top-level error type for dirsig.
#[derive(Debug, Error)]
pub enum DirsigError {
    #[error("[DSG-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[DSG-1002] missing configuration file: {}", path.display())]
    MissingConfig { path: PathBuf },

    #[error("[DSG-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[DSG-2001] not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("[DSG-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[DSG-3001] IO failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[DSG-3002] async read setup failure: {details}")]
    RingSetup { details: String },

    #[error("[DSG-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl DirsigError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "DSG-1001",
            Self::MissingConfig { .. } => "DSG-1002",
            Self::ConfigParse { .. } => "DSG-1003",
            Self::NotADirectory { .. } => "DSG-2001",
            Self::Serialization { .. } => "DSG-2101",
            Self::Io { .. } => "DSG-3001",
            Self::RingSetup { .. } => "DSG-3002",
            Self::Runtime { .. } => "DSG-3900",
        }
    }

    /// Whether a single run can continue past this failure.
    ///
    /// Recoverable failures are reported per-path and skipped; the fingerprint
    /// is still produced for the subset of the tree that was readable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::RingSetup { .. })
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for DirsigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for DirsigError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_errors() -> Vec<DirsigError> {
        vec![
            DirsigError::InvalidConfig {
                details: String::new(),
            },
            DirsigError::MissingConfig {
                path: PathBuf::new(),
            },
            DirsigError::ConfigParse {
                context: "",
                details: String::new(),
            },
            DirsigError::NotADirectory {
                path: PathBuf::new(),
            },
            DirsigError::Serialization {
                context: "",
                details: String::new(),
            },
            DirsigError::Io {
                path: PathBuf::new(),
                source: std::io::Error::other("test"),
            },
            DirsigError::RingSetup {
                details: String::new(),
            },
            DirsigError::Runtime {
                details: String::new(),
            },
        ]
    }

    #[test]
    fn error_codes_are_unique() {
        let errors = sample_errors();
        let codes: Vec<&str> = errors.iter().map(DirsigError::code).collect();
        let unique: std::collections::HashSet<&&str> = codes.iter().collect();
        assert_eq!(
            codes.len(),
            unique.len(),
            "error codes must be unique: {codes:?}"
        );
    }

    #[test]
    fn error_codes_have_dsg_prefix() {
        for err in &sample_errors() {
            assert!(
                err.code().starts_with("DSG-"),
                "code {} must start with DSG-",
                err.code()
            );
        }
    }

    #[test]
    fn error_display_includes_code() {
        let err = DirsigError::InvalidConfig {
            details: "bad value".to_string(),
        };
        let msg = err.to_string();
        assert!(
            msg.contains("DSG-1001"),
            "display should contain error code: {msg}"
        );
        assert!(
            msg.contains("bad value"),
            "display should contain details: {msg}"
        );
    }

    #[test]
    fn recoverable_errors_are_correct() {
        assert!(
            DirsigError::Io {
                path: PathBuf::new(),
                source: std::io::Error::other("test"),
            }
            .is_recoverable()
        );
        assert!(
            DirsigError::RingSetup {
                details: String::new()
            }
            .is_recoverable()
        );

        assert!(
            !DirsigError::InvalidConfig {
                details: String::new()
            }
            .is_recoverable()
        );
        assert!(
            !DirsigError::NotADirectory {
                path: PathBuf::new()
            }
            .is_recoverable()
        );
    }

    #[test]
    fn io_convenience_constructor() {
        let err = DirsigError::io(
            "/tmp/test.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.code(), "DSG-3001");
        assert!(err.to_string().contains("/tmp/test.txt"));
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: DirsigError = json_err.into();
        assert_eq!(err.code(), "DSG-2101");
    }

    #[test]
    fn from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= invalid").unwrap_err();
        let err: DirsigError = toml_err.into();
        assert_eq!(err.code(), "DSG-1003");
    }
}
