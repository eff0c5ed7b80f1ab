//! Built-in stylesheet, written to `css/cukedoc.css`.

use crate::chart::StatusPalette;

const LAYOUT: &str = "\
body { margin: 0; font-family: -apple-system, \"Segoe UI\", Roboto, Helvetica, Arial, sans-serif; color: #222; }
main { padding: 1rem 2rem; }
.navbar { display: flex; gap: 1.25rem; align-items: baseline; padding: 0.75rem 2rem; background: #2b2b2b; }
.navbar a { color: #ddd; text-decoration: none; }
.navbar a:hover { color: #fff; }
.navbar .brand { color: #fff; font-weight: bold; margin-right: 1rem; }
h1 { font-size: 1.5rem; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { padding: 0.3rem 0.6rem; border-bottom: 1px solid #e4e4e4; text-align: left; vertical-align: top; }
td.num { text-align: right; }
.chart { position: relative; height: 280px; max-width: 900px; }
.counts { display: flex; gap: 1rem; list-style: none; padding: 0; }
.summary, .empty, .location { color: #666; }
.location { font-size: 0.8rem; }
.keyword { font-weight: bold; }
.tag { margin-right: 0.4rem; }
pre { white-space: pre-wrap; margin: 0.3rem 0; }
pre.error { padding: 0.5rem; background: #fbeae8; }
pre.output { padding: 0.5rem; background: #f4f4f4; }
details { margin: 0.3rem 0; }
details img { max-width: 640px; }
";

/// Layout rules plus the status colors of `palette`.
pub fn stylesheet(palette: &StatusPalette) -> String {
    let mut css = String::from(LAYOUT);
    for (status, color) in [
        ("passed", &palette.passed),
        ("failed", &palette.failed),
        ("skipped", &palette.skipped),
    ] {
        css.push_str(&format!(
            ".status-{status} {{ color: {color}; font-weight: bold; }}\n"
        ));
    }
    css
}
