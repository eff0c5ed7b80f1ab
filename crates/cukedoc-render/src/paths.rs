//! Output layout, relative to the destination directory.
//!
//! Every function here is a pure function of collection identity, so two
//! visitors can never pick the same path for different pages.

pub const INDEX: &str = "index.html";
pub const SCENARIO_SEQUENCE: &str = "pages/scenario-sequence.html";
pub const FEATURE_SUMMARY: &str = "pages/feature-summary.html";
pub const TAG_SUMMARY: &str = "pages/tag-summary.html";
pub const STEP_SUMMARY: &str = "pages/step-summary.html";
pub const STYLESHEET: &str = "css/cukedoc.css";
pub const CUSTOM_STYLESHEET: &str = "css/custom.css";

pub fn scenario_detail(scenario_index: usize) -> String {
    format!("pages/scenario-detail-{scenario_index}.html")
}

pub fn tag_scenarios(slug: &str) -> String {
    format!("pages/tag-scenarios/tag_{slug}.html")
}

pub fn step_scenarios(slug: &str) -> String {
    format!("pages/step-scenarios/step_{slug}.html")
}

pub fn feature_scenarios(feature_index: usize) -> String {
    format!("pages/feature-scenarios/feature_{feature_index}.html")
}

pub fn attachment(filename: &str) -> String {
    format!("{}/{filename}", cukedoc_model::ATTACHMENT_DIRECTORY)
}

/// Prefix that leads from the page at `path` back to the report root.
pub fn root_prefix(path: &str) -> String {
    "../".repeat(path.matches('/').count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_paths() {
        assert_eq!(scenario_detail(7), "pages/scenario-detail-7.html");
        assert_eq!(tag_scenarios("myTag"), "pages/tag-scenarios/tag_myTag.html");
        assert_eq!(step_scenarios("a_b"), "pages/step-scenarios/step_a_b.html");
        assert_eq!(feature_scenarios(0), "pages/feature-scenarios/feature_0.html");
        assert_eq!(attachment("attachment001.png"), "attachments/attachment001.png");
    }

    #[test]
    fn root_prefix_depth() {
        assert_eq!(root_prefix(INDEX), "");
        assert_eq!(root_prefix(TAG_SUMMARY), "../");
        assert_eq!(root_prefix(&tag_scenarios("x")), "../../");
    }
}
