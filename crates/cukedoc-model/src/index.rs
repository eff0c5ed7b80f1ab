//! Scenario indexing and the run builder that guarantees it happens exactly
//! once, after every report has been enriched.

use tracing::info;

use crate::attachment::AttachmentSink;
use crate::enrich::{AttachmentFailure, EnrichmentState, enrich_report};
use crate::model::Report;

/// Assign every non-background element a scenario index, starting at 0, in
/// report order and then element order. Returns the number of scenarios.
///
/// Must run after backgrounds have been merged away, and exactly once per
/// run. [`RunBuilder::finish`] is the only caller in the pipeline.
pub fn assign_scenario_indices(reports: &mut [Report]) -> usize {
    let mut next = 0_usize;
    for report in reports.iter_mut() {
        for element in report.elements.iter_mut().filter(|e| e.is_scenario()) {
            element.scenario_index = next;
            next += 1;
        }
    }
    next
}

/// Collects the reports of one run.
///
/// Each added report is enriched immediately; [`RunBuilder::finish`] indexes
/// the scenarios and freezes the model.
pub struct RunBuilder<S: AttachmentSink> {
    state: EnrichmentState,
    sink: S,
    reports: Vec<Report>,
}

impl<S: AttachmentSink> RunBuilder<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: EnrichmentState::new(),
            sink,
            reports: Vec::new(),
        }
    }

    /// Enrich and append the reports parsed from one input document.
    pub fn add_reports(&mut self, reports: Vec<Report>) {
        for report in reports {
            let report = enrich_report(report, &mut self.state, &mut self.sink);
            self.reports.push(report);
        }
    }

    pub fn report_count(&self) -> usize {
        self.reports.len()
    }

    pub fn finish(self) -> (IndexedRun, S) {
        let Self {
            state,
            sink,
            mut reports,
        } = self;
        let scenario_count = assign_scenario_indices(&mut reports);
        info!(
            reports = reports.len(),
            features = state.features.len(),
            scenarios = scenario_count,
            attachments = state.attachments.issued(),
            "scenario indexing complete"
        );
        let run = IndexedRun {
            reports,
            scenario_count,
            feature_count: state.features.len(),
            attachment_count: state.attachments.issued() as usize,
            attachment_failures: state.attachment_failures,
        };
        (run, sink)
    }
}

/// The frozen, fully indexed model of one run. Read-only from here on.
#[derive(Debug, Clone, Default)]
pub struct IndexedRun {
    reports: Vec<Report>,
    scenario_count: usize,
    feature_count: usize,
    attachment_count: usize,
    attachment_failures: Vec<AttachmentFailure>,
}

impl IndexedRun {
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn scenario_count(&self) -> usize {
        self.scenario_count
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn attachment_count(&self) -> usize {
        self.attachment_count
    }

    pub fn attachment_failures(&self) -> &[AttachmentFailure] {
        &self.attachment_failures
    }
}
