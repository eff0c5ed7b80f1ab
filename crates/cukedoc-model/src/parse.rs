//! Structural deserialization of Cucumber JSON documents.
//!
//! Parsing only builds plain records. Nothing here assigns indices, merges
//! backgrounds or touches attachments; that is [`crate::enrich`]'s job.

use serde::de::{self, Deserializer, Visitor};
use tracing::debug;

use crate::model::Report;

/// Parse one document: a JSON array of feature reports.
///
/// A blank document is an empty run, not an error.
pub fn parse_reports(json: &str) -> Result<Vec<Report>, serde_json::Error> {
    if json.trim().is_empty() {
        debug!("empty report document");
        return Ok(Vec::new());
    }
    let reports: Vec<Report> = serde_json::from_str(json)?;
    debug!(reports = reports.len(), "parsed report document");
    Ok(reports)
}

/// Accepts a duration as an unsigned integer or a float (some runners emit
/// fractional nanoseconds). Negative, non-finite and null values become 0.
pub(crate) fn duration_nanos<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct DurationVisitor;

    impl<'a> Visitor<'a> for DurationVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a duration in nanoseconds")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
            Ok(u64::try_from(value).unwrap_or(0))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u64, E> {
            if value.is_finite() && value > 0.0 {
                Ok(value.round() as u64)
            } else {
                Ok(0)
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<u64, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<u64, E> {
            Ok(0)
        }

        fn visit_some<D2: Deserializer<'a>>(self, deserializer: D2) -> Result<u64, D2::Error> {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(DurationVisitor)
}
