//! End-to-end report generation.
//!
//! ```text
//! source dir --discover--> *.json (by name) --parse--> RunBuilder --finish--> IndexedRun
//!     --> css assets --> visitors --> pages under the destination dir
//! ```

use std::path::{Path, PathBuf};
use std::{fs, io};

use cukedoc_error::{CukedocError, Result};
use cukedoc_model::{
    ATTACHMENT_DIRECTORY, AttachmentFailure, DirectoryAttachmentSink, RunBuilder, parse_reports,
};
use cukedoc_render::{
    AllScenariosPageCollection, Dispatch, HtmlTemplates, PageFailure, PageVisitor, PageWriter,
    RenderContext, TemplateEngine, assets, default_visitors, dispatch, paths,
};
use tracing::{debug, info, warn};

use crate::config::ReportConfig;
use crate::properties::{display_parameters, load_properties};

/// What one generation did.
#[derive(Debug, Default)]
pub struct GenerationSummary {
    /// The skip switch was on; nothing was read or written.
    pub skipped: bool,
    pub files_parsed: usize,
    /// Files that could not be read or parsed.
    pub files_skipped: usize,
    pub features: usize,
    pub scenarios: usize,
    pub attachments_written: usize,
    pub attachment_failures: usize,
    pub pages_written: usize,
    /// Pages and attachments that could not be written, sorted by path.
    pub failures: Vec<PageFailure>,
    /// The start page.
    pub report_path: PathBuf,
}

impl GenerationSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn collected page and attachment failures into
    /// [`CukedocError::PagesFailed`].
    pub fn into_result(self) -> Result<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(CukedocError::PagesFailed {
                count: self.failures.len(),
            })
        }
    }
}

/// Runs the whole pipeline for one [`ReportConfig`].
pub struct ReportGenerator {
    config: ReportConfig,
    engine: Box<dyn TemplateEngine>,
    visitors: Vec<Box<dyn PageVisitor>>,
    dispatch: Dispatch,
}

impl ReportGenerator {
    /// Generator with the built-in templates and every page family.
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            engine: Box::new(HtmlTemplates),
            visitors: default_visitors(),
            dispatch: Dispatch::default(),
        }
    }

    pub fn with_engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    pub fn with_visitors(mut self, visitors: Vec<Box<dyn PageVisitor>>) -> Self {
        self.visitors = visitors;
        self
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Generate the report.
    ///
    /// Fails only when the configuration is unusable or the output directories
    /// cannot be created. Unreadable input files are skipped and failing pages
    /// are collected in the summary.
    pub fn generate(&self) -> Result<GenerationSummary> {
        let config = &self.config;
        if config.skip {
            info!("report generation skipped");
            return Ok(GenerationSummary {
                skipped: true,
                ..GenerationSummary::default()
            });
        }
        config.validate()?;
        log_configuration(config);

        let destination = &config.destination_dir;
        create_dir(destination)?;
        let attachment_dir = destination.join(ATTACHMENT_DIRECTORY);
        create_dir(&attachment_dir)?;

        let file_parameters = match &config.custom_parameters_file {
            Some(path) => load_properties(path)?,
            None => Vec::new(),
        };
        let parameters = display_parameters(&config.custom_parameters, &file_parameters);
        let settings = config.render_settings(parameters);

        let sources = discover_json_files(&config.source_dir)?;
        info!(
            files = sources.len(),
            source = %config.source_dir.display(),
            "reading Cucumber JSON files"
        );
        let mut builder = RunBuilder::new(DirectoryAttachmentSink::new(&attachment_dir));
        let mut files_parsed = 0_usize;
        let mut files_skipped = 0_usize;
        for path in &sources {
            match read_reports(path) {
                Ok(reports) => {
                    debug!(path = %path.display(), reports = reports.len(), "file parsed");
                    builder.add_reports(reports);
                    files_parsed += 1;
                }
                Err(err) => {
                    warn!(error = %err, "skipping input file");
                    files_skipped += 1;
                }
            }
        }
        let (run, _sink) = builder.finish();

        let writer = PageWriter::new(destination);
        write_stylesheets(config, &settings.palette, &writer)?;

        let scenarios = AllScenariosPageCollection::new(
            &run,
            config.fail_scenarios_on_pending_or_undefined_steps,
        );
        let ctx = RenderContext {
            engine: self.engine.as_ref(),
            settings: &settings,
            writer: &writer,
        };
        dispatch(&self.visitors, &scenarios, &ctx, self.dispatch);
        let report = writer.finish();

        let summary = GenerationSummary {
            skipped: false,
            files_parsed,
            files_skipped,
            features: run.feature_count(),
            scenarios: run.scenario_count(),
            attachments_written: run
                .attachment_count()
                .saturating_sub(run.attachment_failures().len()),
            attachment_failures: run.attachment_failures().len(),
            pages_written: report.pages_written,
            failures: merge_failures(report.failures, run.attachment_failures()),
            report_path: destination.join(paths::INDEX),
        };
        if summary.is_clean() {
            info!(
                pages = summary.pages_written,
                scenarios = summary.scenarios,
                report = %summary.report_path.display(),
                "report generated"
            );
        } else {
            warn!(
                pages = summary.pages_written,
                failed = summary.failures.len(),
                report = %summary.report_path.display(),
                "report generated with failing pages"
            );
        }
        Ok(summary)
    }
}

/// Page failures plus one entry per attachment that could not be written,
/// sorted by output path.
fn merge_failures(pages: Vec<PageFailure>, attachments: &[AttachmentFailure]) -> Vec<PageFailure> {
    let mut failures = pages;
    failures.extend(attachments.iter().map(|failure| PageFailure {
        path: format!("{ATTACHMENT_DIRECTORY}/{}", failure.filename),
        error: CukedocError::Io(io::Error::other(failure.detail.clone())),
    }));
    failures.sort_by(|a, b| a.path.cmp(&b.path));
    failures
}

fn log_configuration(config: &ReportConfig) {
    debug!("------------------------------------------------------------");
    for (key, value) in config.describe() {
        debug!("{key}: {value}");
    }
    for param in &config.custom_parameters {
        debug!("custom parameter {}: {}", param.key, param.value);
    }
    debug!("------------------------------------------------------------");
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|err| {
        warn!(path = %path.display(), error = %err, "directory creation failed");
        CukedocError::path_creation(path)
    })
}

/// `*.json` files directly inside `dir`, sorted by file name.
pub fn discover_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CukedocError::invalid_config(
            "source_dir",
            dir.display().to_string(),
            "not a directory",
        ));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn read_reports(path: &Path) -> Result<Vec<cukedoc_model::Report>> {
    let text = fs::read_to_string(path)
        .map_err(|err| CukedocError::input_parse(path, err.to_string()))?;
    parse_reports(&text).map_err(|err| CukedocError::input_parse(path, err.to_string()))
}

fn write_stylesheets(
    config: &ReportConfig,
    palette: &cukedoc_render::StatusPalette,
    writer: &PageWriter,
) -> Result<()> {
    let css = assets::stylesheet(palette);
    if let Err(err) = writer.write(paths::STYLESHEET, css.as_bytes()) {
        writer.record_failure(paths::STYLESHEET, err.into());
    }
    if let Some(custom) = &config.custom_css {
        let contents = fs::read(custom).map_err(|err| {
            CukedocError::invalid_config("custom_css", custom.display().to_string(), err.to_string())
        })?;
        if let Err(err) = writer.write(paths::CUSTOM_STYLESHEET, &contents) {
            writer.record_failure(paths::CUSTOM_STYLESHEET, err.into());
        }
    }
    Ok(())
}
