//! Page rendering for an indexed run.
//!
//! ```text
//! IndexedRun --> AllScenariosPageCollection --+--> ScenarioVisitor --+
//!                                             +--> FeatureVisitor  --+--> TemplateEngine --> PageWriter
//!                                             +--> TagVisitor      --+
//!                                             +--> StepVisitor     --+
//! ```
//!
//! Page collections are read-only projections of the run. Visitors turn them
//! into pages through a [`TemplateEngine`]; [`HtmlTemplates`] is the built-in
//! one. The [`PageWriter`] records per-page failures instead of aborting.

pub mod assets;
pub mod chart;
pub mod collections;
pub mod format;
mod html;
pub mod paths;
pub mod settings;
pub mod template;
pub mod visitor;
pub mod writer;

pub use chart::{Chart, StatusCounts, StatusPalette};
pub use collections::{
    AllFeaturesPageCollection, AllScenariosPageCollection, AllStepsPageCollection,
    AllTagsPageCollection, FeatureSummary, ScenarioDetailsPageCollection, ScenarioFilter,
    ScenarioListing, ScenarioRow, StepSummary, TagSummary,
};
pub use settings::RenderSettings;
pub use template::{HtmlTemplates, PageContent, PageModel, PageTemplate, TemplateEngine};
pub use visitor::{
    Dispatch, FeatureVisitor, PageVisitor, RenderContext, ScenarioVisitor, StepVisitor,
    TagVisitor, default_visitors, dispatch,
};
pub use writer::{PageFailure, PageWriter, WriteReport};
