//! Error types shared by every cukedoc crate.
//!
//! [`CukedocError`] is the one error a run can end with; [`RenderError`]
//! narrows template failures down to logic versus I/O. Each variant maps to a
//! stable [`ErrorCode`] that the binary uses as its exit status.
//!
//! ```
//! use cukedoc_error::{CukedocError, ErrorCode};
//!
//! let err = CukedocError::PagesFailed { count: 3 };
//! assert_eq!(err.error_code(), ErrorCode::Render);
//! assert_eq!(err.exit_code(), 5);
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for cukedoc operations.
///
/// Errors that abort a whole run surface as one of these variants. Errors that
/// are local to one input file or one output page are logged by the caller and
/// the batch continues; they still use this type so they can be collected.
#[derive(Error, Debug)]
pub enum CukedocError {
    // === Filesystem Errors ===
    /// An output or attachment directory could not be created.
    #[error("Path '{}' could not be created.", path.display())]
    PathCreation { path: PathBuf },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Input Errors ===
    /// One input document is not valid report JSON.
    #[error("could not parse JSON in file '{}': {detail}", path.display())]
    InputParse { path: PathBuf, detail: String },

    // === Rendering Errors ===
    /// A page could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// One or more pages or attachments failed to render or write.
    #[error("{count} output file(s) could not be generated")]
    PagesFailed { count: usize },

    // === Configuration Errors ===
    /// A configuration value is present but unusable.
    #[error("invalid value '{value}' for '{key}': {reason}")]
    InvalidConfig {
        key: String,
        value: String,
        reason: String,
    },

    // === Internal Errors ===
    /// Internal logic error (should never happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure raised by the template service.
///
/// The two variants are diagnosed differently: a template logic error points at
/// the template or its model, an I/O error points at the environment.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The template itself failed while expanding its model.
    #[error("template '{template}' failed: {detail}")]
    Template { template: String, detail: String },

    /// Low-level I/O failed while the template was being expanded.
    #[error("I/O error while rendering template '{template}': {source}")]
    Io {
        template: String,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Create a template logic error.
    pub fn template(template: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Template {
            template: template.into(),
            detail: detail.into(),
        }
    }

    /// Create an I/O error raised during expansion.
    pub fn io(template: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            template: template.into(),
            source,
        }
    }

    /// Name of the template that failed.
    pub fn template_name(&self) -> &str {
        match self {
            Self::Template { template, .. } | Self::Io { template, .. } => template,
        }
    }

    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Coarse error classes, used for process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// Generic error.
    Error = 1,
    /// Internal logic error.
    Internal = 2,
    /// Filesystem or I/O failure.
    IoErr = 3,
    /// Input could not be parsed.
    Parse = 4,
    /// Rendering failed.
    Render = 5,
    /// Configuration was rejected.
    Config = 6,
}

impl CukedocError {
    /// Map this error to its coarse class.
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::PathCreation { .. } | Self::Io(_) => ErrorCode::IoErr,
            Self::InputParse { .. } => ErrorCode::Parse,
            Self::Render(_) | Self::PagesFailed { .. } => ErrorCode::Render,
            Self::InvalidConfig { .. } => ErrorCode::Config,
            Self::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Whether the batch can continue after this error.
    ///
    /// Parse failures are local to one input file and render failures are
    /// local to one page; everything else aborts the run.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InputParse { .. } | Self::Render(_))
    }

    /// Human-friendly suggestion for fixing this error.
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::PathCreation { .. } => {
                Some("Check that the destination directory is writable and not a file")
            }
            Self::InputParse { .. } => {
                Some("Make sure the file is a Cucumber JSON report (a JSON array of features)")
            }
            Self::InvalidConfig { .. } => Some("Fix the configuration value and run again"),
            Self::PagesFailed { .. } => Some("See the warnings above for the individual files"),
            _ => None,
        }
    }

    /// Get the process exit code for this error (for CLI use).
    pub const fn exit_code(&self) -> i32 {
        self.error_code() as i32
    }

    /// Create a path creation error.
    pub fn path_creation(path: impl Into<PathBuf>) -> Self {
        Self::PathCreation { path: path.into() }
    }

    /// Create an input parse error.
    pub fn input_parse(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::InputParse {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create a configuration error.
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using `CukedocError`.
pub type Result<T> = std::result::Result<T, CukedocError>;
