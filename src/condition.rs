//! The adverse-condition vocabulary of the risk assessment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category of adverse weather a sample can be tested against.
///
/// The four base kinds mirror the threshold flags; `Any` is their union and
/// `Multiple` requires at least two flags on the same sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionKind {
    Hot,
    Cold,
    Windy,
    Wet,
    Any,
    Multiple,
}

impl ConditionKind {
    /// Stable lowercase label used in exports and responses.
    pub fn label(&self) -> &'static str {
        match self {
            ConditionKind::Hot => "hot",
            ConditionKind::Cold => "cold",
            ConditionKind::Windy => "windy",
            ConditionKind::Wet => "wet",
            ConditionKind::Any => "any",
            ConditionKind::Multiple => "multiple",
        }
    }

    /// The five kinds reported by a risk assessment, in response order.
    pub fn reported() -> [ConditionKind; 5] {
        [
            ConditionKind::Hot,
            ConditionKind::Cold,
            ConditionKind::Windy,
            ConditionKind::Wet,
            ConditionKind::Any,
        ]
    }

    /// Every kind the probability engine accepts.
    pub fn all() -> [ConditionKind; 6] {
        [
            ConditionKind::Hot,
            ConditionKind::Cold,
            ConditionKind::Windy,
            ConditionKind::Wet,
            ConditionKind::Any,
            ConditionKind::Multiple,
        ]
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(ConditionKind::Hot.to_string(), "hot");
        assert_eq!(ConditionKind::Multiple.to_string(), "multiple");
    }

    #[test]
    fn reported_kinds_exclude_multiple() {
        assert!(!ConditionKind::reported().contains(&ConditionKind::Multiple));
        assert_eq!(ConditionKind::all().len(), 6);
    }
}
