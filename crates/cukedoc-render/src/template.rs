//! The template service seen by the visitors: render template `T` against
//! model `M` and get a string back, or a [`RenderError`].

use std::fmt;

use cukedoc_error::RenderError;

use crate::chart::Chart;
use crate::collections::{
    AllFeaturesPageCollection, AllStepsPageCollection, AllTagsPageCollection,
    ScenarioDetailsPageCollection, ScenarioListing,
};
use crate::settings::RenderSettings;

pub use crate::html::HtmlTemplates;

/// Template identifiers, one per page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageTemplate {
    ScenarioSummary,
    ScenarioSequence,
    ScenarioDetail,
    FeatureSummary,
    TagSummary,
    StepSummary,
}

impl PageTemplate {
    pub const fn id(self) -> &'static str {
        match self {
            Self::ScenarioSummary => "scenario-summary",
            Self::ScenarioSequence => "scenario-sequence",
            Self::ScenarioDetail => "scenario-detail",
            Self::FeatureSummary => "feature-summary",
            Self::TagSummary => "tag-summary",
            Self::StepSummary => "step-summary",
        }
    }
}

impl fmt::Display for PageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The page collection a template expands.
#[derive(Debug, Clone, Copy)]
pub enum PageContent<'a> {
    Scenarios(&'a ScenarioListing<'a>),
    ScenarioDetail(&'a ScenarioDetailsPageCollection<'a>),
    Features(&'a AllFeaturesPageCollection),
    Tags(&'a AllTagsPageCollection),
    Steps(&'a AllStepsPageCollection),
}

impl PageContent<'_> {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scenarios(_) => "scenario listing",
            Self::ScenarioDetail(_) => "scenario detail",
            Self::Features(_) => "feature summary",
            Self::Tags(_) => "tag summary",
            Self::Steps(_) => "step summary",
        }
    }
}

/// Everything one page render needs.
#[derive(Debug, Clone)]
pub struct PageModel<'a> {
    pub settings: &'a RenderSettings,
    /// Prefix leading from this page back to the report root, e.g. `../`.
    pub root: String,
    /// Heading shown above the page content.
    pub heading: String,
    pub chart: Option<Chart>,
    pub content: PageContent<'a>,
}

/// Renders page models to text.
///
/// Implementations must be shareable across threads; visitors may render
/// pages of different families at the same time.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: PageTemplate, model: &PageModel<'_>) -> Result<String, RenderError>;
}
