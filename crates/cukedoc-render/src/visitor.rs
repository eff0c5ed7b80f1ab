//! Visitors: one per page family.
//!
//! Every visitor receives the same [`AllScenariosPageCollection`], derives
//! the collections it needs, renders through the [`TemplateEngine`] and hands
//! each page to the [`PageWriter`]. Visitors only read the run and write
//! disjoint paths, so they can run in any order or side by side.

use std::thread;

use tracing::{debug, info_span};

use crate::chart::Chart;
use crate::collections::{
    AllFeaturesPageCollection, AllScenariosPageCollection, AllStepsPageCollection,
    AllTagsPageCollection, ScenarioDetailsPageCollection, ScenarioFilter,
};
use crate::paths;
use crate::settings::RenderSettings;
use crate::template::{PageContent, PageModel, PageTemplate, TemplateEngine};
use crate::writer::PageWriter;

/// Shared services for one rendering batch.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub engine: &'a dyn TemplateEngine,
    pub settings: &'a RenderSettings,
    pub writer: &'a PageWriter,
}

impl RenderContext<'_> {
    /// Render one page and write it to `path`.
    fn page(
        &self,
        path: &str,
        template: PageTemplate,
        heading: String,
        chart: Option<Chart>,
        content: PageContent<'_>,
    ) {
        let model = PageModel {
            settings: self.settings,
            root: paths::root_prefix(path),
            heading,
            chart,
            content,
        };
        self.writer.publish(path, || self.engine.render(template, &model));
    }
}

/// Renders one family of pages.
pub trait PageVisitor: Send + Sync {
    fn name(&self) -> &'static str;

    fn visit(&self, scenarios: &AllScenariosPageCollection<'_>, ctx: &RenderContext<'_>);
}

/// Start page, scenario sequence and one detail page per scenario.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioVisitor;

impl PageVisitor for ScenarioVisitor {
    fn name(&self) -> &'static str {
        "scenarios"
    }

    fn visit(&self, scenarios: &AllScenariosPageCollection<'_>, ctx: &RenderContext<'_>) {
        let palette = &ctx.settings.palette;

        let listing = scenarios.listing();
        ctx.page(
            paths::INDEX,
            PageTemplate::ScenarioSummary,
            "All Scenarios".to_owned(),
            Some(Chart::status_doughnut(listing.counts(), palette)),
            PageContent::Scenarios(&listing),
        );

        let sequence = scenarios.sequence();
        ctx.page(
            paths::SCENARIO_SEQUENCE,
            PageTemplate::ScenarioSequence,
            "Scenario Sequence".to_owned(),
            None,
            PageContent::Scenarios(&sequence),
        );

        for detail in ScenarioDetailsPageCollection::all(scenarios) {
            let element = detail.element();
            let keyword = match element.keyword.trim() {
                "" => "Scenario",
                keyword => keyword,
            };
            ctx.page(
                &paths::scenario_detail(element.scenario_index),
                PageTemplate::ScenarioDetail,
                format!("{keyword}: {}", element.name),
                Some(Chart::status_doughnut(detail.step_counts(), palette)),
                PageContent::ScenarioDetail(&detail),
            );
        }
    }
}

/// Feature summary and one scenario listing per feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureVisitor;

impl PageVisitor for FeatureVisitor {
    fn name(&self) -> &'static str {
        "features"
    }

    fn visit(&self, scenarios: &AllScenariosPageCollection<'_>, ctx: &RenderContext<'_>) {
        let palette = &ctx.settings.palette;
        let features = AllFeaturesPageCollection::new(scenarios);
        let chart = Chart::stacked_bars(
            features
                .features()
                .iter()
                .map(|feature| (feature.name.as_str(), &feature.counts)),
            palette,
            "Features",
            "Scenarios",
        );
        ctx.page(
            paths::FEATURE_SUMMARY,
            PageTemplate::FeatureSummary,
            "All Features".to_owned(),
            Some(chart),
            PageContent::Features(&features),
        );

        for feature in features.features() {
            let listing = scenarios.filtered(ScenarioFilter::Feature(feature.index));
            ctx.page(
                &paths::feature_scenarios(feature.index),
                PageTemplate::ScenarioSummary,
                format!("Feature: {}", feature.name),
                Some(Chart::status_doughnut(listing.counts(), palette)),
                PageContent::Scenarios(&listing),
            );
        }
    }
}

/// Tag summary and one scenario listing per tag slug.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagVisitor;

impl PageVisitor for TagVisitor {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn visit(&self, scenarios: &AllScenariosPageCollection<'_>, ctx: &RenderContext<'_>) {
        let palette = &ctx.settings.palette;
        let tags = AllTagsPageCollection::new(scenarios);
        let chart = Chart::stacked_bars(
            tags.tags()
                .iter()
                .map(|tag| (tag.tag.name.as_str(), &tag.counts)),
            palette,
            "Tags",
            "Scenarios",
        );
        ctx.page(
            paths::TAG_SUMMARY,
            PageTemplate::TagSummary,
            "All Tags".to_owned(),
            Some(chart),
            PageContent::Tags(&tags),
        );

        for tag in tags.tags() {
            let listing = scenarios.filtered(ScenarioFilter::Tag(tag.tag.clone()));
            ctx.page(
                &paths::tag_scenarios(&tag.slug),
                PageTemplate::ScenarioSummary,
                format!("Tag: {}", tag.tag.name),
                Some(Chart::status_doughnut(listing.counts(), palette)),
                PageContent::Scenarios(&listing),
            );
        }
    }
}

/// Step summary and one scenario listing per distinct step text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepVisitor;

impl PageVisitor for StepVisitor {
    fn name(&self) -> &'static str {
        "steps"
    }

    fn visit(&self, scenarios: &AllScenariosPageCollection<'_>, ctx: &RenderContext<'_>) {
        let palette = &ctx.settings.palette;
        let steps = AllStepsPageCollection::new(scenarios);
        let chart = Chart::stacked_bars(
            steps
                .steps()
                .iter()
                .map(|step| (step.text.as_str(), &step.counts)),
            palette,
            "Steps",
            "Usages",
        );
        ctx.page(
            paths::STEP_SUMMARY,
            PageTemplate::StepSummary,
            "All Steps".to_owned(),
            Some(chart),
            PageContent::Steps(&steps),
        );

        for step in steps.steps() {
            let listing = scenarios.filtered(ScenarioFilter::Step(step.text.clone()));
            ctx.page(
                &paths::step_scenarios(&step.slug),
                PageTemplate::ScenarioSummary,
                format!("Step: {}", step.text),
                Some(Chart::status_doughnut(listing.counts(), palette)),
                PageContent::Scenarios(&listing),
            );
        }
    }
}

/// The visitors that together produce the full report.
pub fn default_visitors() -> Vec<Box<dyn PageVisitor>> {
    vec![
        Box::new(ScenarioVisitor),
        Box::new(FeatureVisitor),
        Box::new(TagVisitor),
        Box::new(StepVisitor),
    ]
}

/// How [`dispatch`] runs the visitors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dispatch {
    /// One after the other on the calling thread.
    Sequential,
    /// One scoped thread per visitor.
    #[default]
    Parallel,
}

/// Run every visitor once over the same scenarios.
pub fn dispatch(
    visitors: &[Box<dyn PageVisitor>],
    scenarios: &AllScenariosPageCollection<'_>,
    ctx: &RenderContext<'_>,
    mode: Dispatch,
) {
    let run_one = |visitor: &dyn PageVisitor| {
        let _span = info_span!("visitor", name = visitor.name()).entered();
        visitor.visit(scenarios, ctx);
        debug!(visitor = visitor.name(), "visitor finished");
    };
    match mode {
        Dispatch::Sequential => {
            for visitor in visitors {
                run_one(visitor.as_ref());
            }
        }
        Dispatch::Parallel => thread::scope(|scope| {
            for visitor in visitors {
                scope.spawn(|| run_one(visitor.as_ref()));
            }
        }),
    }
}
