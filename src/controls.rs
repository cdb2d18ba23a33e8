//! Option lists for the two selection controls.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::dataset::{Dataset, VitalRow};

/// Signal selected when the dataset is first shown
pub const DEFAULT_SIGNAL: &str = "map";

/// Grouping dimension selected when the dataset is first shown
pub const DEFAULT_GROUP: GroupField = GroupField::Emop;

/// Column used to split one signal into several curves
#[derive(
    AsRefStr, Clone, Copy, Debug, Default, EnumString, PartialEq, Eq, Hash, Serialize,
    Deserialize,
)]
pub enum GroupField {
    #[strum(serialize = "optype")]
    #[serde(rename = "optype")]
    OpType,
    #[default]
    #[strum(serialize = "emop")]
    #[serde(rename = "emop")]
    Emop,
}

impl GroupField {
    /// Internal identifier, matching the CSV column name
    pub fn id(&self) -> &str {
        self.as_ref()
    }

    /// Human-readable label shown in the control
    pub fn label(&self) -> &'static str {
        match self {
            GroupField::OpType => "Surgery Type",
            GroupField::Emop => "Emergency Status",
        }
    }

    /// Group key of a row under this dimension
    pub fn key_of<'a>(&self, row: &'a VitalRow) -> &'a str {
        match self {
            GroupField::OpType => &row.optype,
            GroupField::Emop => &row.emop,
        }
    }

    /// Both dimensions, in control order
    pub fn all() -> [GroupField; 2] {
        [GroupField::OpType, GroupField::Emop]
    }
}

/// One entry of a selection control
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlOption {
    pub value: String,
    pub label: String,
}

/// Options offered by the signal and grouping controls
#[derive(Clone, Debug, Default)]
pub struct ControlOptions {
    /// Every distinct signal exactly once, in first-seen order
    pub signals: Vec<String>,
    pub groups: [GroupField; 2],
}

impl ControlOptions {
    /// Derive the option lists from a loaded dataset
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut signals: Vec<String> = Vec::new();
        for row in &dataset.rows {
            if !signals.iter().any(|s| s == &row.signal) {
                signals.push(row.signal.clone());
            }
        }

        Self {
            signals,
            groups: GroupField::all(),
        }
    }

    pub fn has_signal(&self, signal: &str) -> bool {
        self.signals.iter().any(|s| s == signal)
    }

    /// Signal entries; value and label are the same string
    pub fn signal_options(&self) -> Vec<ControlOption> {
        self.signals
            .iter()
            .map(|s| ControlOption {
                value: s.clone(),
                label: s.clone(),
            })
            .collect()
    }

    /// Grouping entries with their translated labels
    pub fn group_options(&self) -> Vec<ControlOption> {
        self.groups
            .iter()
            .map(|g| ControlOption {
                value: g.id().to_string(),
                label: g.label().to_string(),
            })
            .collect()
    }
}

/// The signal/grouping pair currently shown
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub signal: String,
    pub group: GroupField,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            signal: DEFAULT_SIGNAL.to_string(),
            group: DEFAULT_GROUP,
        }
    }
}
