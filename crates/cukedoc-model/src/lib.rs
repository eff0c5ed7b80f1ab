//! Document model and enrichment pipeline for Cucumber JSON reports.
//!
//! ```text
//! JSON text --parse--> Vec<Report> --enrich--> RunBuilder --finish--> IndexedRun
//! ```
//!
//! Parsing builds plain records. Enrichment assigns feature indices, copies
//! feature metadata and tags onto scenarios, folds backgrounds into the
//! scenarios that follow them and externalizes attachments. Indexing numbers
//! the scenarios once the whole run has been loaded.

pub mod attachment;
pub mod enrich;
pub mod index;
pub mod model;
pub mod parse;
pub mod status;

pub use attachment::{
    ATTACHMENT_DIRECTORY, AttachmentSequence, AttachmentSink, DirectoryAttachmentSink,
    MemoryAttachmentSink, MimeType,
};
pub use enrich::{AttachmentFailure, EnrichmentState, FeatureRegistry};
pub use index::{IndexedRun, RunBuilder};
pub use model::{
    Argument, DocString, Element, Embedding, GlueMatch, Report, ResultMatch, Row, Step,
    StepResult, Tag,
};
pub use parse::parse_reports;
pub use status::Status;
