use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use cukedoc_error::{CukedocError, RenderError};
use cukedoc_model::{IndexedRun, MemoryAttachmentSink, RunBuilder, parse_reports};
use cukedoc_render::{
    AllScenariosPageCollection, Dispatch, HtmlTemplates, PageModel, PageTemplate, PageVisitor,
    PageWriter, RenderContext, RenderSettings, TagVisitor, TemplateEngine, default_visitors,
    dispatch,
};

const RUN: &str = r#"[
  {"name": "Accounts", "uri": "features/accounts.feature", "elements": [
    {"type": "scenario", "keyword": "Scenario", "name": "open account", "tags": [{"name": "@myTag"}],
     "steps": [
       {"keyword": "Given ", "name": "a customer named Ann",
        "match": {"location": "Steps.customer(String)", "arguments": [{"val": "Ann", "offset": 17}]},
        "result": {"status": "passed", "duration": 1200000}},
       {"keyword": "Then ", "name": "the account exists", "result": {"status": "passed", "duration": 300000}}
     ]},
    {"type": "scenario", "keyword": "Scenario", "name": "close account", "tags": [{"name": "@myTag"}, {"name": "@slow"}],
     "steps": [
       {"keyword": "Given ", "name": "a customer named Bob",
        "match": {"location": "Steps.customer(String)", "arguments": [{"val": "Bob", "offset": 17}]},
        "result": {"status": "failed", "duration": 500000, "error_message": "no such customer"}}
     ]}
  ]},
  {"name": "Reports", "elements": [
    {"type": "scenario", "keyword": "Scenario", "name": "monthly report",
     "steps": [{"keyword": "When ", "name": "the month ends", "result": {"status": "undefined"}}]}
  ]}
]"#;

fn indexed_run() -> IndexedRun {
    let mut builder = RunBuilder::new(MemoryAttachmentSink::default());
    builder.add_reports(parse_reports(RUN).expect("fixture should parse"));
    builder.finish().0
}

fn render_all(run: &IndexedRun, out: &Path, mode: Dispatch) -> cukedoc_render::WriteReport {
    let settings = RenderSettings::default();
    let writer = PageWriter::new(out);
    let ctx = RenderContext {
        engine: &HtmlTemplates,
        settings: &settings,
        writer: &writer,
    };
    let scenarios = AllScenariosPageCollection::new(run, settings.fail_scenarios_on_pending_or_undefined_steps);
    dispatch(&default_visitors(), &scenarios, &ctx, mode);
    writer.finish()
}

fn tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
        for entry in fs::read_dir(dir).expect("directory should be readable") {
            let path = entry.expect("entry should be readable").path();
            if path.is_dir() {
                walk(root, &path, files);
            } else {
                let relative = path
                    .strip_prefix(root)
                    .expect("path should be under root")
                    .to_string_lossy()
                    .replace('\\', "/");
                files.insert(relative, fs::read(&path).expect("file should be readable"));
            }
        }
    }
    let mut files = BTreeMap::new();
    walk(root, root, &mut files);
    files
}

#[test]
fn tag_visitor_writes_summary_and_tag_pages() {
    let run = indexed_run();
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let settings = RenderSettings::default();
    let writer = PageWriter::new(dir.path());
    let ctx = RenderContext {
        engine: &HtmlTemplates,
        settings: &settings,
        writer: &writer,
    };
    let scenarios = AllScenariosPageCollection::new(&run, false);
    TagVisitor.visit(&scenarios, &ctx);
    let report = writer.finish();
    assert!(report.is_clean());
    assert_eq!(report.pages_written, 3);

    let summary = fs::read_to_string(dir.path().join("pages/tag-summary.html"))
        .expect("tag summary should exist");
    assert!(summary.contains("href=\"../pages/tag-scenarios/tag_myTag.html\""));
    let tag_page = fs::read_to_string(dir.path().join("pages/tag-scenarios/tag_myTag.html"))
        .expect("tag page should exist");
    assert!(tag_page.contains("open account"));
    assert!(tag_page.contains("close account"));
    assert!(!tag_page.contains("monthly report"));
    assert!(tag_page.contains("href=\"../../pages/scenario-detail-1.html\""));
    assert!(dir.path().join("pages/tag-scenarios/tag_slow.html").is_file());
}

#[test]
fn full_dispatch_writes_every_page_family() {
    let run = indexed_run();
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let report = render_all(&run, dir.path(), Dispatch::Parallel);
    assert!(report.is_clean(), "unexpected failures: {:?}", report.failures);

    let files = tree(dir.path());
    for expected in [
        "index.html",
        "pages/scenario-sequence.html",
        "pages/feature-summary.html",
        "pages/tag-summary.html",
        "pages/step-summary.html",
        "pages/feature-scenarios/feature_0.html",
        "pages/feature-scenarios/feature_1.html",
        "pages/step-scenarios/step_a_customer_named___.html",
        "pages/step-scenarios/step_the_month_ends.html",
    ] {
        assert!(files.contains_key(expected), "missing {expected}");
    }
    let details = files
        .keys()
        .filter(|path| path.starts_with("pages/scenario-detail-"))
        .count();
    assert_eq!(details, run.scenario_count());
    assert_eq!(report.pages_written, files.len());
}

#[test]
fn parallel_and_sequential_dispatch_agree() {
    let run = indexed_run();
    let sequential = tempfile::tempdir().expect("tempdir should be created");
    let parallel = tempfile::tempdir().expect("tempdir should be created");
    render_all(&run, sequential.path(), Dispatch::Sequential);
    render_all(&run, parallel.path(), Dispatch::Parallel);
    assert_eq!(tree(sequential.path()), tree(parallel.path()));
}

/// Fails detail pages with a template error and the step summary with an I/O
/// error; everything else goes through the built-in templates.
struct FlakyTemplates;

impl TemplateEngine for FlakyTemplates {
    fn render(&self, template: PageTemplate, model: &PageModel<'_>) -> Result<String, RenderError> {
        match template {
            PageTemplate::ScenarioDetail => Err(RenderError::template(template.id(), "unknown variable")),
            PageTemplate::StepSummary => Err(RenderError::io(
                template.id(),
                io::Error::new(io::ErrorKind::NotFound, "template file missing"),
            )),
            _ => HtmlTemplates.render(template, model),
        }
    }
}

#[test]
fn render_failures_are_collected_without_stopping_the_batch() {
    let run = indexed_run();
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let settings = RenderSettings::default();
    let writer = PageWriter::new(dir.path());
    let ctx = RenderContext {
        engine: &FlakyTemplates,
        settings: &settings,
        writer: &writer,
    };
    let scenarios = AllScenariosPageCollection::new(&run, false);
    dispatch(&default_visitors(), &scenarios, &ctx, Dispatch::Parallel);
    let report = writer.finish();

    let failed: Vec<&str> = report.failures.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        failed,
        vec![
            "pages/scenario-detail-0.html",
            "pages/scenario-detail-1.html",
            "pages/scenario-detail-2.html",
            "pages/step-summary.html",
        ]
    );
    for failure in &report.failures[..3] {
        assert!(matches!(&failure.error, CukedocError::Render(err) if !err.is_io()));
    }
    assert!(matches!(&report.failures[3].error, CukedocError::Render(err) if err.is_io()));
    assert!(dir.path().join("index.html").is_file());
    assert!(dir.path().join("pages/tag-summary.html").is_file());
    assert!(!dir.path().join("pages/step-summary.html").exists());
}
