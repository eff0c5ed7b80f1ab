//! Page collections: read-only projections of an [`IndexedRun`], one per page
//! family.
//!
//! Every collection is built in its constructor and never mutates the run.
//! Scenario statuses honor the fail-on-pending toggle carried by
//! [`AllScenariosPageCollection`]; every derived collection is built from it.

use std::collections::{BTreeMap, BTreeSet};

use cukedoc_model::{Element, IndexedRun, Report, Status, Tag};

use crate::chart::StatusCounts;
use crate::format::unique_slugs;

// ── Scenario listings ───────────────────────────────────────────────────

/// Which scenarios a listing shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioFilter {
    All,
    /// Scenarios carrying a tag with the same slug.
    Tag(Tag),
    /// Scenarios with at least one step of this normalized text.
    Step(String),
    /// Scenarios of one feature, by feature index.
    Feature(usize),
}

impl ScenarioFilter {
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => {
                let slug = tag.url_friendly_name();
                element.tags.iter().any(|t| t.url_friendly_name() == slug)
            }
            Self::Step(text) => element.has_step(text),
            Self::Feature(index) => element.feature_index == *index,
        }
    }
}

/// One scenario with its computed status and duration.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioRow<'a> {
    pub element: &'a Element,
    pub status: Status,
    pub duration: u64,
}

/// The shared collection every visitor starts from: the full run plus the
/// per-scenario status under the configured rule.
#[derive(Debug, Clone)]
pub struct AllScenariosPageCollection<'a> {
    run: &'a IndexedRun,
    fail_pending_or_undefined: bool,
    rows: Vec<ScenarioRow<'a>>,
}

impl<'a> AllScenariosPageCollection<'a> {
    pub fn new(run: &'a IndexedRun, fail_pending_or_undefined: bool) -> Self {
        let rows = run
            .reports()
            .iter()
            .flat_map(|report| report.scenarios())
            .map(|element| ScenarioRow {
                element,
                status: element.status(fail_pending_or_undefined),
                duration: element.total_duration(),
            })
            .collect();
        Self {
            run,
            fail_pending_or_undefined,
            rows,
        }
    }

    pub fn run(&self) -> &'a IndexedRun {
        self.run
    }

    pub fn reports(&self) -> &'a [Report] {
        self.run.reports()
    }

    pub const fn fail_pending_or_undefined(&self) -> bool {
        self.fail_pending_or_undefined
    }

    /// Every scenario in index order.
    pub fn rows(&self) -> &[ScenarioRow<'a>] {
        &self.rows
    }

    pub fn listing(&self) -> ScenarioListing<'a> {
        self.filtered(ScenarioFilter::All)
    }

    pub fn filtered(&self, filter: ScenarioFilter) -> ScenarioListing<'a> {
        let rows = self
            .rows
            .iter()
            .filter(|row| filter.matches(row.element))
            .copied()
            .collect();
        ScenarioListing::new(filter, rows)
    }

    /// All scenarios in execution order: by start timestamp where the runner
    /// recorded one, then by scenario index.
    pub fn sequence(&self) -> ScenarioListing<'a> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            let key = |row: &ScenarioRow<'_>| {
                (
                    row.element.start_timestamp.is_none(),
                    row.element.start_timestamp.clone(),
                    row.element.scenario_index,
                )
            };
            key(a).cmp(&key(b))
        });
        ScenarioListing::new(ScenarioFilter::All, rows)
    }
}

/// A filtered, ordered set of scenarios with their aggregate numbers.
#[derive(Debug, Clone)]
pub struct ScenarioListing<'a> {
    filter: ScenarioFilter,
    rows: Vec<ScenarioRow<'a>>,
    counts: StatusCounts,
    total_duration: u64,
}

impl<'a> ScenarioListing<'a> {
    fn new(filter: ScenarioFilter, rows: Vec<ScenarioRow<'a>>) -> Self {
        let counts = StatusCounts::from_statuses(rows.iter().map(|row| row.status));
        let total_duration = rows
            .iter()
            .fold(0_u64, |total, row| total.saturating_add(row.duration));
        Self {
            filter,
            rows,
            counts,
            total_duration,
        }
    }

    pub fn filter(&self) -> &ScenarioFilter {
        &self.filter
    }

    pub fn rows(&self) -> &[ScenarioRow<'a>] {
        &self.rows
    }

    pub fn counts(&self) -> &StatusCounts {
        &self.counts
    }

    pub const fn total_duration(&self) -> u64 {
        self.total_duration
    }

    pub fn status(&self) -> Status {
        self.counts.rollup()
    }

    pub fn feature_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.element.feature_index)
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Features ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSummary {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub uri: String,
    /// Scenario statuses.
    pub counts: StatusCounts,
    pub total_duration: u64,
}

impl FeatureSummary {
    pub fn status(&self) -> Status {
        self.counts.rollup()
    }

    pub fn scenario_count(&self) -> usize {
        self.counts.total()
    }
}

/// One row per distinct feature, ordered by feature index.
///
/// Reports sharing a feature name share an index and land in the same row.
#[derive(Debug, Clone, Default)]
pub struct AllFeaturesPageCollection {
    features: Vec<FeatureSummary>,
    counts: StatusCounts,
}

impl AllFeaturesPageCollection {
    pub fn new(scenarios: &AllScenariosPageCollection<'_>) -> Self {
        let mut by_index: BTreeMap<usize, FeatureSummary> = BTreeMap::new();
        for report in scenarios.reports() {
            by_index
                .entry(report.feature_index)
                .or_insert_with(|| FeatureSummary {
                    index: report.feature_index,
                    name: report.name.clone(),
                    description: report.description.clone(),
                    uri: report.uri.clone(),
                    counts: StatusCounts::default(),
                    total_duration: 0,
                });
        }
        let mut counts = StatusCounts::default();
        for row in scenarios.rows() {
            counts.add(row.status);
            if let Some(feature) = by_index.get_mut(&row.element.feature_index) {
                feature.counts.add(row.status);
                feature.total_duration = feature.total_duration.saturating_add(row.duration);
            }
        }
        Self {
            features: by_index.into_values().collect(),
            counts,
        }
    }

    pub fn features(&self) -> &[FeatureSummary] {
        &self.features
    }

    /// Scenario statuses over every feature.
    pub fn counts(&self) -> &StatusCounts {
        &self.counts
    }

    /// Feature statuses, one per row.
    pub fn feature_counts(&self) -> StatusCounts {
        StatusCounts::from_statuses(self.features.iter().map(FeatureSummary::status))
    }
}

// ── Tags ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSummary {
    /// First tag seen with this slug.
    pub tag: Tag,
    pub slug: String,
    /// Statuses of the scenarios carrying the tag.
    pub counts: StatusCounts,
    pub total_duration: u64,
}

impl TagSummary {
    pub fn status(&self) -> Status {
        self.counts.rollup()
    }

    pub fn scenario_count(&self) -> usize {
        self.counts.total()
    }
}

/// One row per distinct tag slug, ordered by slug.
#[derive(Debug, Clone, Default)]
pub struct AllTagsPageCollection {
    tags: Vec<TagSummary>,
}

impl AllTagsPageCollection {
    pub fn new(scenarios: &AllScenariosPageCollection<'_>) -> Self {
        let mut by_slug: BTreeMap<String, TagSummary> = BTreeMap::new();
        for row in scenarios.rows() {
            let mut seen = BTreeSet::new();
            for tag in &row.element.tags {
                let slug = tag.url_friendly_name();
                if !seen.insert(slug.clone()) {
                    continue;
                }
                let summary = by_slug.entry(slug.clone()).or_insert_with(|| TagSummary {
                    tag: tag.clone(),
                    slug,
                    counts: StatusCounts::default(),
                    total_duration: 0,
                });
                summary.counts.add(row.status);
                summary.total_duration = summary.total_duration.saturating_add(row.duration);
            }
        }
        Self {
            tags: by_slug.into_values().collect(),
        }
    }

    pub fn tags(&self) -> &[TagSummary] {
        &self.tags
    }

    pub fn tag_counts(&self) -> StatusCounts {
        StatusCounts::from_statuses(self.tags.iter().map(TagSummary::status))
    }
}

// ── Steps ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSummary {
    /// Normalized step text, arguments replaced by `{}`.
    pub text: String,
    /// Unique within the run.
    pub slug: String,
    /// Glue location of the first occurrence.
    pub location: Option<String>,
    pub occurrences: usize,
    /// Basic statuses of the individual step results.
    pub counts: StatusCounts,
    pub min_duration: u64,
    pub max_duration: u64,
    pub total_duration: u64,
    /// Distinct scenarios using the step.
    pub scenario_count: usize,
}

impl StepSummary {
    pub fn status(&self) -> Status {
        self.counts.rollup()
    }

    pub fn average_duration(&self) -> u64 {
        match self.occurrences {
            0 => 0,
            n => self.total_duration / n as u64,
        }
    }
}

/// One row per distinct normalized step text, ordered by text.
#[derive(Debug, Clone, Default)]
pub struct AllStepsPageCollection {
    steps: Vec<StepSummary>,
}

impl AllStepsPageCollection {
    pub fn new(scenarios: &AllScenariosPageCollection<'_>) -> Self {
        let fail_pending = scenarios.fail_pending_or_undefined();
        let mut by_text: BTreeMap<String, StepSummary> = BTreeMap::new();
        let mut scenarios_by_text: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
        for row in scenarios.rows() {
            for step in &row.element.steps {
                let text = step.normalized_name();
                let duration = step.result.duration;
                let summary = by_text.entry(text.clone()).or_insert_with(|| StepSummary {
                    text: text.clone(),
                    slug: String::new(),
                    location: step.location().map(str::to_owned),
                    occurrences: 0,
                    counts: StatusCounts::default(),
                    min_duration: duration,
                    max_duration: duration,
                    total_duration: 0,
                    scenario_count: 0,
                });
                summary.occurrences += 1;
                summary.counts.add(step.result.status.basic(fail_pending));
                summary.min_duration = summary.min_duration.min(duration);
                summary.max_duration = summary.max_duration.max(duration);
                summary.total_duration = summary.total_duration.saturating_add(duration);
                scenarios_by_text
                    .entry(text)
                    .or_default()
                    .insert(row.element.scenario_index);
            }
        }

        let slugs = unique_slugs(by_text.keys().map(String::as_str));
        let steps = by_text
            .into_values()
            .map(|mut summary| {
                if let Some(slug) = slugs.get(&summary.text) {
                    summary.slug.clone_from(slug);
                }
                if let Some(users) = scenarios_by_text.get(&summary.text) {
                    summary.scenario_count = users.len();
                }
                summary
            })
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[StepSummary] {
        &self.steps
    }

    pub fn step_counts(&self) -> StatusCounts {
        StatusCounts::from_statuses(self.steps.iter().map(StepSummary::status))
    }

    /// Slug of a normalized step text, if the run contains it.
    pub fn slug_of(&self, text: &str) -> Option<&str> {
        self.steps
            .binary_search_by(|summary| summary.text.as_str().cmp(text))
            .ok()
            .map(|pos| self.steps[pos].slug.as_str())
    }
}

// ── Scenario details ────────────────────────────────────────────────────

/// One scenario plus the numbers its detail page shows.
#[derive(Debug, Clone)]
pub struct ScenarioDetailsPageCollection<'a> {
    element: &'a Element,
    status: Status,
    duration: u64,
    /// Exact step statuses.
    step_counts: StatusCounts,
}

impl<'a> ScenarioDetailsPageCollection<'a> {
    pub fn new(row: &ScenarioRow<'a>) -> Self {
        Self {
            element: row.element,
            status: row.status,
            duration: row.duration,
            step_counts: StatusCounts::from_statuses(
                row.element.steps.iter().map(|step| step.result.status),
            ),
        }
    }

    /// One collection per scenario, in index order.
    pub fn all(scenarios: &AllScenariosPageCollection<'a>) -> Vec<Self> {
        scenarios.rows().iter().map(Self::new).collect()
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    pub const fn duration(&self) -> u64 {
        self.duration
    }

    pub fn step_counts(&self) -> &StatusCounts {
        &self.step_counts
    }
}
