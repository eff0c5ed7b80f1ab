//! Custom parameters: inline pairs from the configuration plus an optional
//! properties file.

use std::fs;
use std::path::Path;

use cukedoc_error::{CukedocError, Result};
use tracing::debug;

use crate::config::CustomParameter;

/// Parse `key=value` / `key: value` lines.
///
/// Blank lines and lines starting with `#` or `!` are ignored. A line without
/// a separator is a key with an empty value.
pub fn parse_properties(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .map(|line| match line.find(['=', ':']) {
            Some(pos) => (
                line[..pos].trim().to_owned(),
                line[pos + 1..].trim().to_owned(),
            ),
            None => (line.to_owned(), String::new()),
        })
        .collect()
}

/// Read and parse a properties file.
pub fn load_properties(path: &Path) -> Result<Vec<(String, String)>> {
    let text = fs::read_to_string(path).map_err(|err| {
        CukedocError::invalid_config(
            "custom_parameters_file",
            path.display().to_string(),
            err.to_string(),
        )
    })?;
    let pairs = parse_properties(&text);
    debug!(path = %path.display(), entries = pairs.len(), "custom parameters file read");
    Ok(pairs)
}

/// Pairs as shown on the start page.
///
/// Inline parameters come first, then the file's, each list in its own
/// order. A repeated key replaces the earlier value in place. Underscores in
/// keys are shown as spaces and pairs with an empty key or value are dropped.
pub fn display_parameters(
    inline: &[CustomParameter],
    from_file: &[(String, String)],
) -> Vec<(String, String)> {
    let mut shown: Vec<(String, String)> = Vec::new();
    let all = inline
        .iter()
        .map(|param| (param.key.as_str(), param.value.as_str()))
        .chain(from_file.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    for (key, value) in all {
        let key = key.trim().replace('_', " ");
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        match shown.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => value.clone_into(&mut slot.1),
            None => shown.push((key, value.to_owned())),
        }
    }
    shown
}
