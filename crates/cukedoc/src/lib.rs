//! Turn Cucumber JSON results into a static HTML report.
//!
//! ```no_run
//! use cukedoc::{ReportConfig, ReportGenerator};
//!
//! let config = ReportConfig::new("target/cucumber-json", "target/cucumber-report");
//! let summary = ReportGenerator::new(config).generate()?;
//! println!("report written to {}", summary.report_path.display());
//! # Ok::<(), cukedoc::CukedocError>(())
//! ```

pub mod config;
pub mod generator;
pub mod logging;
pub mod properties;

pub use config::{CustomParameter, ReportConfig, StatusColors};
pub use cukedoc_error::{CukedocError, Result};
pub use generator::{GenerationSummary, ReportGenerator, discover_json_files};
pub use logging::LogLevel;
