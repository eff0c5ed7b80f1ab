//! Built-in HTML templates.
//!
//! Pages are plain HTML with one shared stylesheet. Charts are drawn by
//! Chart.js in the browser from the configuration object inlined into the
//! page; everything else works without scripts.

use std::fmt::{self, Write};

use cukedoc_error::RenderError;
use cukedoc_model::{Element, Embedding, ResultMatch, Status, Step, Tag};

use crate::chart::{Chart, StatusCounts};
use crate::collections::{
    AllFeaturesPageCollection, AllStepsPageCollection, AllTagsPageCollection,
    ScenarioDetailsPageCollection, ScenarioFilter, ScenarioListing,
};
use crate::format::{format_duration, href_escape, html_escape as esc, script_safe_json};
use crate::paths;
use crate::template::{PageContent, PageModel, PageTemplate, TemplateEngine};

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Template engine backed by compiled-in `write!` templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTemplates;

impl TemplateEngine for HtmlTemplates {
    fn render(&self, template: PageTemplate, model: &PageModel<'_>) -> Result<String, RenderError> {
        let chart_json = model
            .chart
            .as_ref()
            .map(Chart::to_json)
            .transpose()
            .map_err(|err| RenderError::template(template.id(), format!("chart data: {err}")))?;

        let mut out = String::with_capacity(16 * 1024);
        let written = match (template, model.content) {
            (
                PageTemplate::ScenarioSummary | PageTemplate::ScenarioSequence,
                PageContent::Scenarios(listing),
            ) => scenario_listing(&mut out, template, model, listing),
            (PageTemplate::ScenarioDetail, PageContent::ScenarioDetail(detail)) => {
                scenario_detail(&mut out, model, detail)
            }
            (PageTemplate::FeatureSummary, PageContent::Features(features)) => {
                feature_summary(&mut out, model, features)
            }
            (PageTemplate::TagSummary, PageContent::Tags(tags)) => tag_summary(&mut out, model, tags),
            (PageTemplate::StepSummary, PageContent::Steps(steps)) => {
                step_summary(&mut out, model, steps)
            }
            (template, content) => {
                return Err(RenderError::template(
                    template.id(),
                    format!("cannot expand a {} model", content.kind()),
                ));
            }
        };
        written
            .and_then(|()| close_page(&mut out, chart_json.as_deref()))
            .map_err(|_| RenderError::template(template.id(), "formatting failed"))?;
        Ok(out)
    }
}

// ── Page frame ──────────────────────────────────────────────────────────

fn open_page(out: &mut String, model: &PageModel<'_>) -> fmt::Result {
    let root = &model.root;
    let title = esc(&model.settings.page_title);
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(
        out,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
    )?;
    writeln!(out, "<title>{title} - {}</title>", esc(&model.heading))?;
    writeln!(
        out,
        "<link rel=\"stylesheet\" href=\"{root}{}\">",
        paths::STYLESHEET
    )?;
    if model.settings.custom_css {
        writeln!(
            out,
            "<link rel=\"stylesheet\" href=\"{root}{}\">",
            paths::CUSTOM_STYLESHEET
        )?;
    }
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<nav class=\"navbar\">")?;
    writeln!(out, "<span class=\"brand\">{title}</span>")?;
    for (href, label) in [
        (paths::INDEX, "All Scenarios"),
        (paths::SCENARIO_SEQUENCE, "Scenario Sequence"),
        (paths::FEATURE_SUMMARY, "All Features"),
        (paths::TAG_SUMMARY, "All Tags"),
        (paths::STEP_SUMMARY, "All Steps"),
    ] {
        writeln!(out, "<a href=\"{root}{href}\">{label}</a>")?;
    }
    writeln!(out, "</nav>")?;
    writeln!(out, "<main>")?;
    writeln!(out, "<h1>{}</h1>", esc(&model.heading))?;
    if model.chart.is_some() {
        writeln!(out, "<div class=\"chart\"><canvas id=\"chart\"></canvas></div>")?;
    }
    Ok(())
}

fn close_page(out: &mut String, chart_json: Option<&str>) -> fmt::Result {
    writeln!(out, "</main>")?;
    if let Some(json) = chart_json {
        writeln!(out, "<script src=\"{CHART_JS}\"></script>")?;
        writeln!(
            out,
            "<script>new Chart(document.getElementById(\"chart\"), {});</script>",
            script_safe_json(json)
        )?;
    }
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn status_cell(out: &mut String, status: Status) -> fmt::Result {
    write!(
        out,
        "<td class=\"status status-{}\">{status}</td>",
        status.basic(false)
    )
}

fn basic_counts(out: &mut String, counts: &StatusCounts) -> fmt::Result {
    write!(out, "<ul class=\"counts\">")?;
    for status in Status::ALL {
        let count = counts.get(status);
        if count > 0 || status.is_basic() {
            write!(out, "<li class=\"status-{}\">{status}: {count}</li>", status.basic(false))?;
        }
    }
    writeln!(out, "</ul>")
}

fn basic_count_cells(out: &mut String, counts: &StatusCounts) -> fmt::Result {
    for status in Status::BASIC {
        write!(out, "<td class=\"num\">{}</td>", counts.get(status))?;
    }
    Ok(())
}

fn tag_links(out: &mut String, root: &str, tags: &[Tag]) -> fmt::Result {
    for tag in tags {
        write!(
            out,
            "<a class=\"tag\" href=\"{root}{}\">{}</a> ",
            href_escape(&paths::tag_scenarios(&tag.url_friendly_name())),
            esc(&tag.name)
        )?;
    }
    Ok(())
}

fn open_attr(open: bool) -> &'static str {
    if open { " open" } else { "" }
}

// ── Scenario listings ───────────────────────────────────────────────────

fn scenario_listing(
    out: &mut String,
    template: PageTemplate,
    model: &PageModel<'_>,
    listing: &ScenarioListing<'_>,
) -> fmt::Result {
    open_page(out, model)?;
    let root = &model.root;

    let show_parameters = template == PageTemplate::ScenarioSummary
        && *listing.filter() == ScenarioFilter::All
        && !model.settings.custom_parameters.is_empty();
    if show_parameters {
        writeln!(out, "<table class=\"parameters\">")?;
        for (key, value) in &model.settings.custom_parameters {
            writeln!(out, "<tr><th>{}</th><td>{}</td></tr>", esc(key), esc(value))?;
        }
        writeln!(out, "</table>")?;
    }

    writeln!(
        out,
        "<p class=\"summary\">{} scenario(s) in {} feature(s), total duration {}</p>",
        listing.rows().len(),
        listing.feature_count(),
        format_duration(listing.total_duration())
    )?;
    basic_counts(out, listing.counts())?;

    if listing.is_empty() {
        writeln!(out, "<p class=\"empty\">No scenarios.</p>")?;
        return Ok(());
    }

    writeln!(out, "<table class=\"scenarios\">")?;
    writeln!(
        out,
        "<tr><th>#</th><th>Feature</th><th>Scenario</th><th>Status</th><th>Duration</th></tr>"
    )?;
    for (position, row) in listing.rows().iter().enumerate() {
        let element = row.element;
        write!(out, "<tr><td class=\"num\">{}</td>", position + 1)?;
        write!(
            out,
            "<td><a href=\"{root}{}\">{}</a></td>",
            paths::feature_scenarios(element.feature_index),
            esc(&element.feature_name)
        )?;
        write!(
            out,
            "<td><a href=\"{root}{}\">{}</a></td>",
            paths::scenario_detail(element.scenario_index),
            esc(&element.name)
        )?;
        status_cell(out, row.status)?;
        writeln!(out, "<td>{}</td></tr>", format_duration(row.duration))?;
    }
    writeln!(out, "</table>")
}

// ── Scenario detail ─────────────────────────────────────────────────────

fn scenario_detail(
    out: &mut String,
    model: &PageModel<'_>,
    detail: &ScenarioDetailsPageCollection<'_>,
) -> fmt::Result {
    open_page(out, model)?;
    let root = &model.root;
    let settings = model.settings;
    let element = detail.element();

    writeln!(out, "<table class=\"scenario-info\">")?;
    writeln!(
        out,
        "<tr><th>Feature</th><td><a href=\"{root}{}\">{}</a></td></tr>",
        paths::feature_scenarios(element.feature_index),
        esc(&element.feature_name)
    )?;
    writeln!(
        out,
        "<tr><th>{}</th><td>{}</td></tr>",
        esc(element.keyword.trim()),
        esc(&element.name)
    )?;
    if !element.description.trim().is_empty() {
        writeln!(
            out,
            "<tr><th>Description</th><td>{}</td></tr>",
            esc(element.description.trim())
        )?;
    }
    if !element.tags.is_empty() {
        write!(out, "<tr><th>Tags</th><td>")?;
        tag_links(out, root, &element.tags)?;
        writeln!(out, "</td></tr>")?;
    }
    write!(out, "<tr><th>Status</th>")?;
    status_cell(out, detail.status())?;
    writeln!(out, "</tr>")?;
    writeln!(
        out,
        "<tr><th>Duration</th><td>{}</td></tr>",
        format_duration(detail.duration())
    )?;
    if let Some(started) = &element.start_timestamp {
        writeln!(out, "<tr><th>Started</th><td>{}</td></tr>", esc(started))?;
    }
    writeln!(out, "</table>")?;

    hooks(out, model, "Before hooks", &element.before, settings.expand_before_after_hooks)?;
    steps(out, model, element)?;
    hooks(out, model, "After hooks", &element.after, settings.expand_before_after_hooks)
}

fn hooks(
    out: &mut String,
    model: &PageModel<'_>,
    label: &str,
    hooks: &[ResultMatch],
    open: bool,
) -> fmt::Result {
    if hooks.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "<details class=\"hooks\"{}><summary>{label} ({})</summary>",
        open_attr(open),
        hooks.len()
    )?;
    writeln!(out, "<table class=\"hooks\">")?;
    for hook in hooks {
        write!(
            out,
            "<tr><td>{}</td>",
            esc(hook.location().unwrap_or("hook"))
        )?;
        status_cell(out, hook.result.status)?;
        writeln!(out, "<td>{}</td></tr>", format_duration(hook.result.duration))?;
        if let Some(error) = &hook.result.error_message {
            writeln!(out, "<tr><td colspan=\"3\"><pre class=\"error\">{}</pre></td></tr>", esc(error))?;
        }
        if !hook.output.is_empty() || !hook.embeddings.is_empty() {
            write!(out, "<tr><td colspan=\"3\">")?;
            output_lines(out, &hook.output)?;
            embeddings(out, model, &hook.embeddings)?;
            writeln!(out, "</td></tr>")?;
        }
    }
    writeln!(out, "</table>")?;
    writeln!(out, "</details>")
}

fn steps(out: &mut String, model: &PageModel<'_>, element: &Element) -> fmt::Result {
    let settings = model.settings;
    writeln!(out, "<h2>Steps</h2>")?;
    if element.steps.is_empty() {
        return writeln!(out, "<p class=\"empty\">No steps.</p>");
    }
    writeln!(out, "<table class=\"steps\">")?;
    writeln!(
        out,
        "<tr><th>#</th><th>Step</th><th>Status</th><th>Duration</th></tr>"
    )?;
    for (position, step) in element.steps.iter().enumerate() {
        write!(
            out,
            "<tr><td class=\"num\">{}</td><td><span class=\"keyword\">{}</span> {}",
            position + 1,
            esc(step.keyword.trim()),
            highlighted_name(step)
        )?;
        if let Some(location) = step.location() {
            write!(out, "<div class=\"location\">{}</div>", esc(location))?;
        }
        write!(out, "</td>")?;
        status_cell(out, step.result.status)?;
        writeln!(out, "<td>{}</td></tr>", format_duration(step.result.duration))?;

        let has_extras = !step.rows.is_empty()
            || step.doc_string.is_some()
            || step.result.error_message.is_some()
            || !step.output.is_empty()
            || !step.embeddings.is_empty()
            || !step.before.is_empty()
            || !step.after.is_empty();
        if !has_extras {
            continue;
        }
        write!(out, "<tr class=\"step-extras\"><td></td><td colspan=\"3\">")?;
        hooks(out, model, "Before step hooks", &step.before, settings.expand_step_hooks)?;
        if !step.rows.is_empty() {
            write!(out, "<table class=\"data-table\">")?;
            for row in &step.rows {
                write!(out, "<tr>")?;
                for cell in &row.cells {
                    write!(out, "<td>{}</td>", esc(cell))?;
                }
                write!(out, "</tr>")?;
            }
            writeln!(out, "</table>")?;
        }
        if let Some(doc) = &step.doc_string {
            writeln!(
                out,
                "<details class=\"doc-string\"{}><summary>Doc string</summary><pre>{}</pre></details>",
                open_attr(settings.expand_doc_strings),
                esc(&doc.value)
            )?;
        }
        if let Some(error) = &step.result.error_message {
            writeln!(out, "<pre class=\"error\">{}</pre>", esc(error))?;
        }
        output_lines(out, &step.output)?;
        embeddings(out, model, &step.embeddings)?;
        hooks(out, model, "After step hooks", &step.after, settings.expand_step_hooks)?;
        writeln!(out, "</td></tr>")?;
    }
    writeln!(out, "</table>")
}

/// Step name with match arguments wrapped in `<strong>`.
fn highlighted_name(step: &Step) -> String {
    let name = &step.name;
    let mut out = String::with_capacity(name.len() + 32);
    let mut cursor = 0_usize;
    for span in step.argument_spans() {
        out.push_str(&esc(&name[cursor..span.start]));
        out.push_str("<strong>");
        out.push_str(&esc(&name[span.clone()]));
        out.push_str("</strong>");
        cursor = span.end;
    }
    out.push_str(&esc(&name[cursor..]));
    out
}

fn output_lines(out: &mut String, lines: &[String]) -> fmt::Result {
    if lines.is_empty() {
        return Ok(());
    }
    writeln!(out, "<pre class=\"output\">{}</pre>", esc(&lines.join("\n")))
}

fn embeddings(out: &mut String, model: &PageModel<'_>, embeddings: &[Embedding]) -> fmt::Result {
    let open = open_attr(model.settings.expand_attachments);
    for embedding in embeddings {
        let Some(filename) = embedding.filename.as_deref() else {
            continue;
        };
        let href = format!("{}{}", model.root, esc(&paths::attachment(filename)));
        let label = esc(embedding.name.as_deref().unwrap_or(filename));
        write!(
            out,
            "<details class=\"attachment\"{open}><summary>{label} ({})</summary>",
            esc(&embedding.mime_type)
        )?;
        if embedding.mime().is_image() {
            write!(out, "<a href=\"{href}\"><img src=\"{href}\" alt=\"{label}\"></a>")?;
        } else {
            write!(out, "<a href=\"{href}\">{}</a>", esc(filename))?;
        }
        writeln!(out, "</details>")?;
    }
    Ok(())
}

// ── Summaries ───────────────────────────────────────────────────────────

fn feature_summary(
    out: &mut String,
    model: &PageModel<'_>,
    features: &AllFeaturesPageCollection,
) -> fmt::Result {
    open_page(out, model)?;
    let root = &model.root;
    writeln!(
        out,
        "<p class=\"summary\">{} feature(s), {} scenario(s)</p>",
        features.features().len(),
        features.counts().total()
    )?;
    basic_counts(out, &features.feature_counts())?;
    writeln!(out, "<table class=\"features\">")?;
    writeln!(
        out,
        "<tr><th>Feature</th><th>Scenarios</th><th>Passed</th><th>Failed</th><th>Skipped</th><th>Duration</th><th>Status</th></tr>"
    )?;
    for feature in features.features() {
        write!(
            out,
            "<tr><td><a href=\"{root}{}\">{}</a></td><td class=\"num\">{}</td>",
            paths::feature_scenarios(feature.index),
            esc(&feature.name),
            feature.scenario_count()
        )?;
        basic_count_cells(out, &feature.counts)?;
        write!(out, "<td>{}</td>", format_duration(feature.total_duration))?;
        status_cell(out, feature.status())?;
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</table>")
}

fn tag_summary(out: &mut String, model: &PageModel<'_>, tags: &AllTagsPageCollection) -> fmt::Result {
    open_page(out, model)?;
    let root = &model.root;
    writeln!(out, "<p class=\"summary\">{} tag(s)</p>", tags.tags().len())?;
    basic_counts(out, &tags.tag_counts())?;
    if tags.tags().is_empty() {
        return writeln!(out, "<p class=\"empty\">No tags.</p>");
    }
    writeln!(out, "<table class=\"tags\">")?;
    writeln!(
        out,
        "<tr><th>Tag</th><th>Scenarios</th><th>Passed</th><th>Failed</th><th>Skipped</th><th>Duration</th><th>Status</th></tr>"
    )?;
    for tag in tags.tags() {
        write!(
            out,
            "<tr><td><a href=\"{root}{}\">{}</a></td><td class=\"num\">{}</td>",
            href_escape(&paths::tag_scenarios(&tag.slug)),
            esc(&tag.tag.name),
            tag.scenario_count()
        )?;
        basic_count_cells(out, &tag.counts)?;
        write!(out, "<td>{}</td>", format_duration(tag.total_duration))?;
        status_cell(out, tag.status())?;
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</table>")
}

fn step_summary(out: &mut String, model: &PageModel<'_>, steps: &AllStepsPageCollection) -> fmt::Result {
    open_page(out, model)?;
    let root = &model.root;
    writeln!(out, "<p class=\"summary\">{} distinct step(s)</p>", steps.steps().len())?;
    basic_counts(out, &steps.step_counts())?;
    if steps.steps().is_empty() {
        return writeln!(out, "<p class=\"empty\">No steps.</p>");
    }
    writeln!(out, "<table class=\"steps\">")?;
    writeln!(
        out,
        "<tr><th>Step</th><th>Location</th><th>Usages</th><th>Scenarios</th><th>Passed</th><th>Failed</th><th>Skipped</th><th>Min</th><th>Avg</th><th>Max</th><th>Status</th></tr>"
    )?;
    for step in steps.steps() {
        write!(
            out,
            "<tr><td><a href=\"{root}{}\">{}</a></td><td class=\"location\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td>",
            paths::step_scenarios(&step.slug),
            esc(&step.text),
            esc(step.location.as_deref().unwrap_or("")),
            step.occurrences,
            step.scenario_count
        )?;
        basic_count_cells(out, &step.counts)?;
        write!(
            out,
            "<td>{}</td><td>{}</td><td>{}</td>",
            format_duration(step.min_duration),
            format_duration(step.average_duration()),
            format_duration(step.max_duration)
        )?;
        status_cell(out, step.status())?;
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</table>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::StatusPalette;
    use crate::collections::AllScenariosPageCollection;
    use crate::settings::RenderSettings;
    use cukedoc_model::{
        Argument, GlueMatch, IndexedRun, MemoryAttachmentSink, Report, RunBuilder, StepResult,
    };

    fn run() -> IndexedRun {
        let step = Step {
            keyword: "Given ".to_owned(),
            name: "a <b> with 3 items".to_owned(),
            result: StepResult {
                status: Status::Failed,
                duration: 2_000_000,
                error_message: Some("expected </script>".to_owned()),
            },
            glue: Some(GlueMatch {
                location: None,
                arguments: vec![Argument {
                    val: Some("3".to_owned()),
                    offset: 11,
                }],
            }),
            ..Step::default()
        };
        let mut builder = RunBuilder::new(MemoryAttachmentSink::default());
        builder.add_reports(vec![Report {
            name: "Cart & Co".to_owned(),
            elements: vec![Element {
                name: "checkout".to_owned(),
                keyword: "Scenario".to_owned(),
                element_type: "scenario".to_owned(),
                tags: vec![Tag::new("@cart")],
                steps: vec![step],
                ..Element::default()
            }],
            ..Report::default()
        }]);
        builder.finish().0
    }

    fn model<'a>(settings: &'a RenderSettings, content: PageContent<'a>, root: &str) -> PageModel<'a> {
        PageModel {
            settings,
            root: root.to_owned(),
            heading: "Heading".to_owned(),
            chart: None,
            content,
        }
    }

    #[test]
    fn listing_links_are_relative_to_the_page() {
        let run = run();
        let all = AllScenariosPageCollection::new(&run, false);
        let listing = all.listing();
        let settings = RenderSettings::default();
        let page = HtmlTemplates
            .render(
                PageTemplate::ScenarioSummary,
                &model(&settings, PageContent::Scenarios(&listing), ""),
            )
            .expect("listing renders");
        assert!(page.contains("href=\"pages/scenario-detail-0.html\""));
        assert!(page.contains("href=\"pages/feature-scenarios/feature_0.html\""));
        assert!(page.contains("Cart &amp; Co"));
        assert!(page.contains("href=\"css/cukedoc.css\""));
        assert!(!page.contains("custom.css"));
    }

    #[test]
    fn detail_escapes_and_highlights() {
        let run = run();
        let all = AllScenariosPageCollection::new(&run, false);
        let detail = ScenarioDetailsPageCollection::new(&all.rows()[0]);
        let settings = RenderSettings::default();
        let page = HtmlTemplates
            .render(
                PageTemplate::ScenarioDetail,
                &model(&settings, PageContent::ScenarioDetail(&detail), "../"),
            )
            .expect("detail renders");
        assert!(page.contains("a &lt;b&gt; with <strong>3</strong> items"));
        assert!(page.contains("expected &lt;/script&gt;"));
        assert!(page.contains("href=\"../pages/tag-scenarios/tag_cart.html\""));
        assert!(page.contains("href=\"../css/cukedoc.css\""));
    }

    #[test]
    fn highlight_uses_utf16_offsets() {
        let step = Step {
            name: "Größe 10 wählen".to_owned(),
            glue: Some(GlueMatch {
                location: None,
                arguments: vec![Argument {
                    val: Some("10".to_owned()),
                    offset: 6,
                }],
            }),
            ..Step::default()
        };
        assert_eq!(highlighted_name(&step), "Größe <strong>10</strong> wählen");
    }

    #[test]
    fn tag_hrefs_encode_percent() {
        let mut out = String::new();
        tag_links(&mut out, "../", &[Tag::new("@a%20b")]).expect("links render");
        assert!(out.contains("href=\"../pages/tag-scenarios/tag_a%2520b.html\""));
        assert!(out.contains(">@a%20b</a>"));
    }

    #[test]
    fn chart_is_inlined_safely() {
        let run = run();
        let all = AllScenariosPageCollection::new(&run, false);
        let listing = all.listing();
        let settings = RenderSettings {
            page_title: "</script>".to_owned(),
            ..RenderSettings::default()
        };
        let mut page_model = model(&settings, PageContent::Scenarios(&listing), "");
        let mut chart = Chart::status_doughnut(listing.counts(), &StatusPalette::default());
        chart.data.labels[0] = "</script>".to_owned();
        page_model.chart = Some(chart);
        let page = HtmlTemplates
            .render(PageTemplate::ScenarioSummary, &page_model)
            .expect("listing renders");
        assert_eq!(page.matches("</script>").count(), 2);
        assert!(page.contains("<canvas id=\"chart\">"));
    }

    #[test]
    fn mismatched_model_is_a_template_error() {
        let settings = RenderSettings::default();
        let tags = AllTagsPageCollection::default();
        let err = HtmlTemplates
            .render(
                PageTemplate::StepSummary,
                &model(&settings, PageContent::Tags(&tags), "../"),
            )
            .expect_err("step template cannot expand tags");
        assert!(!err.is_io());
        assert_eq!(err.template_name(), "step-summary");
    }

    #[test]
    fn custom_parameters_only_on_start_page() {
        let run = run();
        let all = AllScenariosPageCollection::new(&run, false);
        let listing = all.listing();
        let settings = RenderSettings {
            custom_parameters: vec![("Build".to_owned(), "1.2.3".to_owned())],
            custom_css: true,
            ..RenderSettings::default()
        };
        let start = HtmlTemplates
            .render(
                PageTemplate::ScenarioSummary,
                &model(&settings, PageContent::Scenarios(&listing), ""),
            )
            .expect("start page renders");
        assert!(start.contains("<th>Build</th><td>1.2.3</td>"));
        assert!(start.contains("href=\"css/custom.css\""));

        let sequence = all.sequence();
        let page = HtmlTemplates
            .render(
                PageTemplate::ScenarioSequence,
                &model(&settings, PageContent::Scenarios(&sequence), "../"),
            )
            .expect("sequence renders");
        assert!(!page.contains("1.2.3"));
    }

    #[test]
    fn summary_counts_list_basic_statuses() {
        let mut out = String::new();
        basic_counts(&mut out, &StatusCounts::from_statuses([Status::Passed])).unwrap();
        assert!(out.contains("passed: 1"));
        assert!(out.contains("failed: 0"));
        assert!(!out.contains("pending"));
    }
}
