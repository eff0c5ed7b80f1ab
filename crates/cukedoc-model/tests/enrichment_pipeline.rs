use cukedoc_model::{MemoryAttachmentSink, RunBuilder, Tag, parse_reports};
use proptest::prelude::*;

const LOGIN_CHECKOUT: &str = r#"[
  {
    "name": "Login",
    "tags": [{"name": "@smoke"}],
    "elements": [
      {"type": "background", "name": "", "steps": [
        {"keyword": "Given ", "name": "B1", "result": {"status": "passed", "duration": 10}},
        {"keyword": "And ", "name": "B2", "result": {"status": "passed", "duration": 10}}
      ]},
      {"type": "scenario", "name": "fast login", "tags": [{"name": "@fast"}], "steps": [
        {"keyword": "When ", "name": "S1", "result": {"status": "passed", "duration": 10},
         "embeddings": [{"mime_type": "image/png", "data": "iVBORw0KGgo="}]}
      ]}
    ]
  },
  {
    "name": "Checkout",
    "elements": [
      {"type": "scenario", "name": "pay", "steps": [
        {"keyword": "Given ", "name": "a cart", "result": {"status": "failed", "duration": 5, "error_message": "boom"}}
      ]}
    ]
  }
]"#;

const LOGIN_AGAIN: &str = r#"[
  {"name": "Login", "elements": [
    {"type": "scenario", "name": "logout", "steps": [
      {"keyword": "Then ", "name": "bye", "result": {"status": "skipped"},
       "embeddings": [{"mime_type": "text/plain", "data": "Ynll"}]}
    ]}
  ]}
]"#;

fn build_run() -> (cukedoc_model::IndexedRun, MemoryAttachmentSink) {
    let mut builder = RunBuilder::new(MemoryAttachmentSink::default());
    builder.add_reports(parse_reports(LOGIN_CHECKOUT).expect("first document parses"));
    builder.add_reports(parse_reports(LOGIN_AGAIN).expect("second document parses"));
    builder.finish()
}

#[test]
fn background_steps_precede_scenario_steps() {
    let (run, _) = build_run();
    let login = &run.reports()[0];
    assert_eq!(login.elements.len(), 1, "background must be removed");
    let names: Vec<&str> = login.elements[0]
        .steps
        .iter()
        .map(|step| step.name.as_str())
        .collect();
    assert_eq!(names, vec!["B1", "B2", "S1"]);
}

#[test]
fn feature_indices_reuse_first_occurrence() {
    let (run, _) = build_run();
    let indices: Vec<usize> = run.reports().iter().map(|r| r.feature_index).collect();
    assert_eq!(indices, vec![0, 1, 0]);
    assert_eq!(run.feature_count(), 2);
    for report in run.reports() {
        for element in &report.elements {
            assert_eq!(element.feature_index, report.feature_index);
            assert_eq!(element.feature_name, report.name);
        }
    }
}

#[test]
fn feature_tags_merge_once() {
    let (run, _) = build_run();
    let tags = &run.reports()[0].elements[0].tags;
    assert_eq!(tags.iter().filter(|t| **t == Tag::new("@smoke")).count(), 1);
    assert_eq!(tags.iter().filter(|t| **t == Tag::new("@fast")).count(), 1);
    assert_eq!(tags.len(), 2);
}

#[test]
fn scenarios_are_numbered_across_documents() {
    let (run, _) = build_run();
    assert_eq!(run.scenario_count(), 3);
    let indices: Vec<usize> = run
        .reports()
        .iter()
        .flat_map(|r| r.elements.iter().map(|e| e.scenario_index))
        .collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn attachments_numbered_in_traversal_order() {
    let (run, sink) = build_run();
    assert_eq!(run.attachment_count(), 2);
    let names: Vec<&String> = sink.files.keys().collect();
    assert_eq!(names, vec!["attachment001.png", "attachment002.txt"]);
    assert_eq!(sink.files["attachment002.txt"], b"bye");
    let login_again = &run.reports()[2];
    assert_eq!(
        login_again.elements[0].steps[0].embeddings[0].filename.as_deref(),
        Some("attachment002.txt")
    );
}

#[test]
fn enrichment_is_deterministic() {
    let (first, first_sink) = build_run();
    let (second, second_sink) = build_run();
    assert_eq!(first_sink.files, second_sink.files);
    let shape = |run: &cukedoc_model::IndexedRun| -> Vec<(String, usize, usize, Vec<String>)> {
        run.reports()
            .iter()
            .flat_map(|r| {
                r.elements.iter().map(|e| {
                    (
                        e.name.clone(),
                        e.scenario_index,
                        e.feature_index,
                        e.steps.iter().map(|s| s.name.clone()).collect(),
                    )
                })
            })
            .collect()
    };
    assert_eq!(shape(&first), shape(&second));
}

proptest! {
    #[test]
    fn prop_slug_never_contains_marker_or_separator(name in "[@a-zA-Z0-9_%/\\\\ .:-]{0,40}") {
        let slug = Tag::new(name).url_friendly_name();
        prop_assert!(!slug.contains('@'));
        prop_assert!(!slug.contains('/'));
        prop_assert!(!slug.contains('\\'));
        prop_assert!(!slug.contains(' '));
    }

    #[test]
    fn prop_scenario_indices_are_dense(counts in proptest::collection::vec((0usize..4, 0usize..2), 0..6)) {
        let mut builder = RunBuilder::new(MemoryAttachmentSink::default());
        let mut expected = 0usize;
        for (idx, (scenarios, backgrounds)) in counts.iter().enumerate() {
            let mut elements = Vec::new();
            for _ in 0..*backgrounds {
                elements.push(r#"{"type": "background", "steps": []}"#.to_owned());
            }
            for _ in 0..*scenarios {
                elements.push(r#"{"type": "scenario", "steps": []}"#.to_owned());
            }
            expected += scenarios;
            let json = format!(r#"[{{"name": "F{idx}", "elements": [{}]}}]"#, elements.join(","));
            builder.add_reports(parse_reports(&json).unwrap());
        }
        let (run, _) = builder.finish();
        prop_assert_eq!(run.scenario_count(), expected);
        let mut seen: Vec<usize> = run
            .reports()
            .iter()
            .flat_map(|r| r.elements.iter().map(|e| e.scenario_index))
            .collect();
        prop_assert_eq!(seen.len(), expected);
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..expected).collect::<Vec<_>>());
    }
}
