//! Small text helpers shared by the page collections and the HTML templates.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

/// Longest step slug, before any collision suffix.
pub const MAX_SLUG_LEN: usize = 100;

/// Render a nanosecond duration as `Xm YYs ZZZms`.
pub fn format_duration(nanos: u64) -> String {
    let millis = nanos / 1_000_000;
    let minutes = millis / 60_000;
    let seconds = (millis / 1_000) % 60;
    let rest = millis % 1_000;
    format!("{minutes}m {seconds:02}s {rest:03}ms")
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a relative output path for an `href`. A literal `%` in a file
/// name must reach the browser as `%25`.
pub fn href_escape(path: &str) -> String {
    html_escape(&path.replace('%', "%25"))
}

/// Make JSON safe to inline inside a `<script>` element.
pub fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// File-name-safe form of a normalized step text.
///
/// ASCII alphanumerics are kept, everything else becomes `_`, and the result
/// is cut at [`MAX_SLUG_LEN`] characters. Distinct step texts can map to the
/// same slug; see [`unique_slugs`].
pub fn step_slug(text: &str) -> String {
    let mut slug: String = text
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .take(MAX_SLUG_LEN)
        .collect();
    if slug.is_empty() {
        slug.push('_');
    }
    slug
}

/// Assign every step text a slug that no other text in the set shares.
///
/// Texts are visited in sorted order; the first text to claim a slug keeps it
/// and later ones get `_2`, `_3`, ... appended.
pub fn unique_slugs<'a>(texts: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, String> {
    let mut sorted: Vec<&str> = texts.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut taken = BTreeSet::new();
    let mut assigned = BTreeMap::new();
    for text in sorted {
        let base = step_slug(text);
        let mut candidate = base.clone();
        let mut suffix = 2_usize;
        while taken.contains(&candidate) {
            candidate.clear();
            let _ = write!(candidate, "{base}_{suffix}");
            suffix += 1;
        }
        taken.insert(candidate.clone());
        assigned.insert(text.to_owned(), candidate);
    }
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_escapes_percent() {
        assert_eq!(
            href_escape("pages/tag-scenarios/tag_a%20b.html"),
            "pages/tag-scenarios/tag_a%2520b.html"
        );
        assert_eq!(href_escape("x&y.html"), "x&amp;y.html");
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(0), "0m 00s 000ms");
        assert_eq!(format_duration(1_500_000_000), "0m 01s 500ms");
        assert_eq!(format_duration(125_042_000_000), "2m 05s 042ms");
        assert_eq!(format_duration(999_999), "0m 00s 000ms");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn script_json_cannot_close_the_tag() {
        assert_eq!(script_safe_json(r#"{"a":"</script>"}"#), r#"{"a":"<\/script>"}"#);
    }

    #[test]
    fn slug_replaces_and_truncates() {
        assert_eq!(step_slug("I have {} cukes"), "I_have____cukes");
        assert_eq!(step_slug(""), "_");
        assert_eq!(step_slug(&"x".repeat(250)).len(), MAX_SLUG_LEN);
    }

    #[test]
    fn colliding_slugs_get_suffixes() {
        let slugs = unique_slugs(["a b", "a-b", "a_b", "c"]);
        assert_eq!(slugs["a b"], "a_b");
        assert_eq!(slugs["a-b"], "a_b_2");
        assert_eq!(slugs["a_b"], "a_b_3");
        assert_eq!(slugs["c"], "c");
    }

    #[test]
    fn suffix_does_not_steal_an_existing_slug() {
        let slugs = unique_slugs(["a b", "a-b", "a_b_2"]);
        let mut values: Vec<&String> = slugs.values().collect();
        values.sort();
        values.dedup();
        assert_eq!(values.len(), 3);
    }
}
