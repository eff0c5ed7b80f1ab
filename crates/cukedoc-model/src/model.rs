//! Document model for one run: `Report -> Element -> Step -> Embedding`.
//!
//! The structs deserialize straight from Cucumber JSON. Fields marked
//! `#[serde(skip)]` are filled in by the enrichment pass and the scenario
//! indexer, never by the parser.

use std::hash::{Hash, Hasher};
use std::ops::Range;

use serde::{Deserialize, Deserializer};

use crate::attachment::MimeType;
use crate::status::Status;

/// One feature's execution result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Report {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub elements: Vec<Element>,
    /// First-seen position of `name` among all reports of the run.
    #[serde(skip)]
    pub feature_index: usize,
}

impl Report {
    /// Non-background elements, in order.
    pub fn scenarios(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|element| element.is_scenario())
    }
}

/// A scenario, scenario outline example or background block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Element {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub element_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub before: Vec<ResultMatch>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub after: Vec<ResultMatch>,
    #[serde(default)]
    pub start_timestamp: Option<String>,
    /// Global sequence number; meaningful only after indexing.
    #[serde(skip)]
    pub scenario_index: usize,
    #[serde(skip)]
    pub feature_name: String,
    #[serde(skip)]
    pub feature_index: usize,
}

impl Element {
    pub fn is_background(&self) -> bool {
        self.element_type.eq_ignore_ascii_case("background")
    }

    pub fn is_scenario(&self) -> bool {
        !self.is_background()
    }

    /// Every result attached to this element: element hooks, step hooks and
    /// steps, in execution order.
    pub fn results(&self) -> impl Iterator<Item = &StepResult> {
        self.before
            .iter()
            .map(|hook| &hook.result)
            .chain(self.steps.iter().flat_map(Step::results))
            .chain(self.after.iter().map(|hook| &hook.result))
    }

    /// Basic status of the scenario.
    ///
    /// Failed if any step or hook failed, passed if all of them passed,
    /// skipped otherwise. A scenario without steps or hooks is skipped.
    pub fn status(&self, fail_pending_or_undefined: bool) -> Status {
        let mut any = false;
        let mut all_passed = true;
        for result in self.results() {
            any = true;
            match result.status.basic(fail_pending_or_undefined) {
                Status::Failed => return Status::Failed,
                Status::Passed => {}
                _ => all_passed = false,
            }
        }
        if any && all_passed {
            Status::Passed
        } else {
            Status::Skipped
        }
    }

    /// Sum of every step and hook duration, in nanoseconds.
    pub fn total_duration(&self) -> u64 {
        self.results()
            .fold(0_u64, |total, result| total.saturating_add(result.duration))
    }

    /// First error message of any failing step or hook.
    pub fn first_error_message(&self) -> Option<&str> {
        self.results()
            .find_map(|result| result.error_message.as_deref())
    }

    pub fn has_hooks(&self) -> bool {
        !self.before.is_empty() || !self.after.is_empty()
    }

    pub fn has_step_hooks(&self) -> bool {
        self.steps
            .iter()
            .any(|step| !step.before.is_empty() || !step.after.is_empty())
    }

    pub fn has_doc_strings(&self) -> bool {
        self.steps.iter().any(|step| step.doc_string.is_some())
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    pub fn has_step(&self, normalized_name: &str) -> bool {
        self.steps
            .iter()
            .any(|step| step.normalized_name() == normalized_name)
    }

    /// Count of steps per exact status.
    pub fn step_status_counts(&self) -> [usize; 6] {
        let mut counts = [0_usize; 6];
        for step in &self.steps {
            counts[step.result.status.ordinal()] += 1;
        }
        counts
    }
}

/// One Gherkin step with its result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: StepResult,
    #[serde(rename = "match", default)]
    pub glue: Option<GlueMatch>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub embeddings: Vec<Embedding>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub doc_string: Option<DocString>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub before: Vec<ResultMatch>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub after: Vec<ResultMatch>,
}

impl Step {
    /// Step hooks and the step itself, in execution order.
    pub fn results(&self) -> impl Iterator<Item = &StepResult> {
        self.before
            .iter()
            .map(|hook| &hook.result)
            .chain(std::iter::once(&self.result))
            .chain(self.after.iter().map(|hook| &hook.result))
    }

    /// Match arguments, ordered by offset.
    pub fn arguments(&self) -> Vec<&Argument> {
        let mut arguments: Vec<&Argument> = self
            .glue
            .as_ref()
            .map(|glue| glue.arguments.iter().filter(|arg| arg.val.is_some()).collect())
            .unwrap_or_default();
        arguments.sort_by_key(|arg| arg.offset);
        arguments
    }

    /// Byte range of `argument` in the step name.
    ///
    /// Runners report offsets in UTF-16 code units. `None` when the offset
    /// falls outside the name or the text there is not the argument value.
    pub fn argument_span(&self, argument: &Argument) -> Option<Range<usize>> {
        let value = argument.val.as_deref()?;
        let start = utf16_to_byte_offset(&self.name, argument.offset)?;
        let end = start.checked_add(value.len())?;
        (self.name.get(start..end) == Some(value)).then_some(start..end)
    }

    /// Non-overlapping argument spans in name order.
    pub fn argument_spans(&self) -> Vec<Range<usize>> {
        let mut spans: Vec<Range<usize>> = Vec::new();
        for argument in self.arguments() {
            let Some(span) = self.argument_span(argument) else {
                continue;
            };
            if spans.last().is_none_or(|last| span.start >= last.end) {
                spans.push(span);
            }
        }
        spans
    }

    /// Step text with every match argument replaced by `{}` and whitespace
    /// collapsed. Steps sharing a definition share this text.
    pub fn normalized_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut cursor = 0_usize;
        for span in self.argument_spans() {
            out.push_str(&self.name[cursor..span.start]);
            out.push_str("{}");
            cursor = span.end;
        }
        out.push_str(&self.name[cursor..]);
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Glue code location, if the runner reported one.
    pub fn location(&self) -> Option<&str> {
        self.glue.as_ref().and_then(|glue| glue.location.as_deref())
    }
}

/// A before/after hook invocation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultMatch {
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: StepResult,
    #[serde(rename = "match", default)]
    pub glue: Option<GlueMatch>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub embeddings: Vec<Embedding>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: Vec<String>,
}

impl ResultMatch {
    pub fn location(&self) -> Option<&str> {
        self.glue.as_ref().and_then(|glue| glue.location.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: Status,
    /// Nanoseconds.
    #[serde(default, deserialize_with = "crate::parse::duration_nanos")]
    pub duration: u64,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlueMatch {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub val: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Row {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocString {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line: u32,
}

/// Binary attachment captured during a step or hook.
///
/// Before enrichment `data` holds the base64 payload. Afterwards `data` is
/// `None` and `filename` names the file under `attachments/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Embedding {
    #[serde(default, deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(skip)]
    pub filename: Option<String>,
}

impl Embedding {
    pub fn mime(&self) -> MimeType {
        MimeType::from_mime(&self.mime_type)
    }
}

/// Gherkin tag such as `@smoke`. Identity is the tag name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub line: u32,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line: 0,
        }
    }

    /// Path-segment-safe form of the name: every `@` is dropped, and only
    /// alphanumerics (any script) plus `-`, `_` and `%` are kept.
    pub fn url_friendly_name(&self) -> String {
        self.name
            .chars()
            .filter(|ch| ch.is_alphanumeric() || matches!(ch, '-' | '_' | '%'))
            .collect()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

fn utf16_to_byte_offset(text: &str, offset: usize) -> Option<usize> {
    let mut units = 0_usize;
    for (idx, ch) in text.char_indices() {
        if units == offset {
            return Some(idx);
        }
        if units > offset {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == offset).then_some(text.len())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
