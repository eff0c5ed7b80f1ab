//! Enrichment pass over freshly parsed reports.
//!
//! Counters that must be shared across the whole run (feature registry,
//! attachment sequence) live in [`EnrichmentState`], which the caller creates
//! once per run and threads through every call.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::attachment::{AttachmentSequence, AttachmentSink, decode_payload};
use crate::model::{Element, Embedding, Report, Tag};

/// Feature names in first-seen order. The position of a name is its
/// feature index.
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FeatureRegistry {
    /// Index of `name`, registering it if this is the first occurrence.
    pub fn index_of(&mut self, name: &str) -> usize {
        if let Some(&index) = self.positions.get(name) {
            return index;
        }
        let index = self.names.len();
        self.names.push(name.to_owned());
        self.positions.insert(name.to_owned(), index);
        index
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// An attachment that could not be handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentFailure {
    pub filename: String,
    pub detail: String,
}

/// Mutable state for one run.
#[derive(Debug, Default)]
pub struct EnrichmentState {
    pub features: FeatureRegistry,
    pub attachments: AttachmentSequence,
    pub attachment_failures: Vec<AttachmentFailure>,
}

impl EnrichmentState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Element-level pass: backgrounds get scenario index 0, and every embedding
/// (element hooks, step hooks, steps) is written to the sink and replaced by
/// its generated file name.
///
/// Embeddings are visited in execution order: element `before` hooks, then
/// per step its `before` hooks, its own embeddings and its `after` hooks,
/// then element `after` hooks.
pub fn enrich_element(
    element: &mut Element,
    state: &mut EnrichmentState,
    sink: &mut dyn AttachmentSink,
) {
    if element.is_background() {
        element.scenario_index = 0;
    }

    for hook in &mut element.before {
        externalize_all(&mut hook.embeddings, state, sink);
    }
    for step in &mut element.steps {
        for hook in &mut step.before {
            externalize_all(&mut hook.embeddings, state, sink);
        }
        externalize_all(&mut step.embeddings, state, sink);
        for hook in &mut step.after {
            externalize_all(&mut hook.embeddings, state, sink);
        }
    }
    for hook in &mut element.after {
        externalize_all(&mut hook.embeddings, state, sink);
    }
}

/// Report-level pass. Runs the element pass on every element, then assigns
/// the feature index, copies feature metadata and tags onto the elements and
/// folds backgrounds into the scenarios that follow them.
pub fn enrich_report(
    mut report: Report,
    state: &mut EnrichmentState,
    sink: &mut dyn AttachmentSink,
) -> Report {
    for element in &mut report.elements {
        enrich_element(element, state, sink);
    }

    report.feature_index = state.features.index_of(&report.name);
    add_feature_information(&mut report);
    merge_background_steps(&mut report);

    debug!(
        feature = %report.name,
        feature_index = report.feature_index,
        elements = report.elements.len(),
        "report enriched"
    );
    report
}

/// Copy feature name/index onto every element and merge feature tags.
///
/// Merged order: the element's own tags first, then feature tags; duplicates
/// by name collapse to their first occurrence.
pub fn add_feature_information(report: &mut Report) {
    for element in &mut report.elements {
        element.feature_name.clone_from(&report.name);
        element.feature_index = report.feature_index;
        if !report.tags.is_empty() {
            element.tags = merge_tags(&element.tags, &report.tags);
        }
    }
}

/// Prepend each background's steps to every later sibling and drop the
/// background elements. A later background replaces an earlier one.
pub fn merge_background_steps(report: &mut Report) {
    let elements = std::mem::take(&mut report.elements);
    let mut merged = Vec::with_capacity(elements.len());
    let mut background: Option<Element> = None;

    for mut element in elements {
        if element.is_background() {
            background = Some(element);
            continue;
        }
        if let Some(background) = &background {
            let mut steps = background.steps.clone();
            steps.append(&mut element.steps);
            element.steps = steps;
        }
        merged.push(element);
    }
    report.elements = merged;
}

fn merge_tags(element_tags: &[Tag], feature_tags: &[Tag]) -> Vec<Tag> {
    let mut merged: Vec<Tag> = Vec::with_capacity(element_tags.len() + feature_tags.len());
    for tag in element_tags.iter().chain(feature_tags) {
        if !merged.contains(tag) {
            merged.push(tag.clone());
        }
    }
    merged
}

fn externalize_all(
    embeddings: &mut [Embedding],
    state: &mut EnrichmentState,
    sink: &mut dyn AttachmentSink,
) {
    for embedding in embeddings {
        externalize(embedding, state, sink);
    }
}

fn externalize(
    embedding: &mut Embedding,
    state: &mut EnrichmentState,
    sink: &mut dyn AttachmentSink,
) {
    if embedding.filename.is_some() {
        return;
    }
    let filename = state.attachments.next_filename(embedding.mime());
    let data = embedding.data.take().unwrap_or_default();
    let (bytes, decoded) = decode_payload(&data);
    if !decoded {
        warn!(
            attachment = %filename,
            mime_type = %embedding.mime_type,
            "attachment payload is not base64; writing it verbatim"
        );
    }
    if let Err(err) = sink.store(&filename, &bytes) {
        warn!(attachment = %filename, error = %err, "could not write attachment");
        state.attachment_failures.push(AttachmentFailure {
            filename: filename.clone(),
            detail: err.to_string(),
        });
    }
    embedding.filename = Some(filename);
}
