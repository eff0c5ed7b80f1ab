//! Execution statuses and the rollup rule shared by every aggregate view.

use std::fmt;

use serde::Deserialize;

/// Status of a step, hook or scenario as reported by the test runner.
///
/// Unrecognized status strings deserialize as [`Status::Undefined`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Skipped,
    Pending,
    Ambiguous,
    #[default]
    #[serde(other)]
    Undefined,
}

impl Status {
    /// Canonical ordering used by charts and count tables.
    pub const ALL: [Self; 6] = [
        Self::Passed,
        Self::Failed,
        Self::Skipped,
        Self::Pending,
        Self::Undefined,
        Self::Ambiguous,
    ];

    /// The three statuses a scenario, feature, tag or step row can end up with.
    pub const BASIC: [Self; 3] = [Self::Passed, Self::Failed, Self::Skipped];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Pending => "pending",
            Self::Undefined => "undefined",
            Self::Ambiguous => "ambiguous",
        }
    }

    /// Position in [`Status::ALL`].
    pub const fn ordinal(self) -> usize {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
            Self::Skipped => 2,
            Self::Pending => 3,
            Self::Undefined => 4,
            Self::Ambiguous => 5,
        }
    }

    /// Collapse to passed/failed/skipped.
    ///
    /// Ambiguous steps always count as failed. Pending and undefined steps count
    /// as skipped unless `fail_pending_or_undefined` is set.
    pub const fn basic(self, fail_pending_or_undefined: bool) -> Self {
        match self {
            Self::Passed => Self::Passed,
            Self::Failed | Self::Ambiguous => Self::Failed,
            Self::Skipped => Self::Skipped,
            Self::Pending | Self::Undefined => {
                if fail_pending_or_undefined {
                    Self::Failed
                } else {
                    Self::Skipped
                }
            }
        }
    }

    pub const fn is_basic(self) -> bool {
        matches!(self, Self::Passed | Self::Failed | Self::Skipped)
    }

    /// Group status: failed if any member failed, else skipped if any member
    /// was skipped, else passed. Members are expected to be basic statuses;
    /// an empty group is passed.
    pub fn rollup(members: impl IntoIterator<Item = Self>) -> Self {
        let mut any_skipped = false;
        for status in members {
            match status {
                Self::Failed => return Self::Failed,
                Self::Passed => {}
                _ => any_skipped = true,
            }
        }
        if any_skipped {
            Self::Skipped
        } else {
            Self::Passed
        }
    }

    /// Case-insensitive parse of a status name.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
