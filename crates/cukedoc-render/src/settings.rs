use crate::chart::StatusPalette;

/// Values every page template needs besides its own page collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub page_title: String,
    pub palette: StatusPalette,
    pub expand_before_after_hooks: bool,
    pub expand_step_hooks: bool,
    pub expand_doc_strings: bool,
    pub expand_attachments: bool,
    pub fail_scenarios_on_pending_or_undefined_steps: bool,
    /// Key/value pairs shown on the start page, in display order.
    pub custom_parameters: Vec<(String, String)>,
    /// Link `css/custom.css` after the built-in stylesheet.
    pub custom_css: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            page_title: "Cucumber Report".to_owned(),
            palette: StatusPalette::default(),
            expand_before_after_hooks: false,
            expand_step_hooks: false,
            expand_doc_strings: false,
            expand_attachments: true,
            fail_scenarios_on_pending_or_undefined_steps: false,
            custom_parameters: Vec::new(),
            custom_css: false,
        }
    }
}
