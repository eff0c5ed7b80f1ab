//! Status counts and the Chart.js configurations built from them.
//!
//! [`StatusCounts`] is the pure converter: it reduces any collection of
//! statuses to six counts in the canonical order
//! (`passed, failed, skipped, pending, undefined, ambiguous`). Zero counts are
//! kept so a status always sits at the same position and gets the same color.
//! The `Chart*` structs serialize to the configuration object Chart.js expects.

use cukedoc_model::Status;
use serde::Serialize;

/// Per-status counts in canonical order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    counts: [usize; 6],
}

impl StatusCounts {
    pub fn from_statuses(statuses: impl IntoIterator<Item = Status>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.add(status);
        }
        counts
    }

    pub fn add(&mut self, status: Status) {
        self.counts[status.ordinal()] += 1;
    }

    pub fn merge(&mut self, other: &Self) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
    }

    pub const fn get(&self, status: Status) -> usize {
        self.counts[status.ordinal()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub const fn values(&self) -> [usize; 6] {
        self.counts
    }

    /// Status names, parallel to [`StatusCounts::values`].
    pub fn labels() -> [&'static str; 6] {
        Status::ALL.map(Status::as_str)
    }

    /// Group status under the shared rollup rule. Counts are expected to hold
    /// basic statuses already; anything else is collapsed without the
    /// fail-on-pending rule.
    pub fn rollup(&self) -> Status {
        Status::rollup(
            Status::ALL
                .into_iter()
                .filter(|status| self.get(*status) > 0)
                .map(|status| status.basic(false)),
        )
    }
}

/// Hex colors used for the three basic statuses.
///
/// Pending and undefined share the skipped color, ambiguous shares the failed
/// color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPalette {
    pub passed: String,
    pub failed: String,
    pub skipped: String,
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self {
            passed: "#04B404".to_owned(),
            failed: "#C94A38".to_owned(),
            skipped: "#F48F00".to_owned(),
        }
    }
}

impl StatusPalette {
    pub fn color(&self, status: Status) -> &str {
        match status.basic(false) {
            Status::Passed => &self.passed,
            Status::Failed => &self.failed,
            _ => &self.skipped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Doughnut,
    Bar,
}

/// Chart.js configuration object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<usize>,
    pub background_color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub stacked: bool,
    pub title: AxisTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

impl Chart {
    /// Doughnut over all six statuses.
    pub fn status_doughnut(counts: &StatusCounts, palette: &StatusPalette) -> Self {
        Self {
            chart_type: ChartType::Doughnut,
            data: ChartData {
                labels: StatusCounts::labels().map(str::to_owned).to_vec(),
                datasets: vec![Dataset {
                    label: None,
                    data: counts.values().to_vec(),
                    background_color: Status::ALL
                        .map(|status| palette.color(status).to_owned())
                        .to_vec(),
                }],
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                scales: None,
            },
        }
    }

    /// Stacked bar chart with one bar per row and one dataset per status.
    pub fn stacked_bars<'a>(
        rows: impl IntoIterator<Item = (&'a str, &'a StatusCounts)>,
        palette: &StatusPalette,
        x_title: &str,
        y_title: &str,
    ) -> Self {
        let (labels, counts): (Vec<String>, Vec<StatusCounts>) = rows
            .into_iter()
            .map(|(label, counts)| (label.to_owned(), *counts))
            .unzip();
        let datasets = Status::ALL
            .into_iter()
            .map(|status| Dataset {
                label: Some(status.as_str().to_owned()),
                data: counts.iter().map(|c| c.get(status)).collect(),
                background_color: vec![palette.color(status).to_owned(); counts.len()],
            })
            .collect();
        let axis = |text: &str| Axis {
            stacked: true,
            title: AxisTitle {
                display: true,
                text: text.to_owned(),
            },
        };
        Self {
            chart_type: ChartType::Bar,
            data: ChartData { labels, datasets },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                scales: Some(Scales {
                    x: axis(x_title),
                    y: axis(y_title),
                }),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
