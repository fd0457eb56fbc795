//! Declarative-to-imperative update planning
//!
//! One update pass compares the newly declared props against what the
//! controller last observed and produces the minimal imperative calls.
//! Planning is pure; the component executes the plan.

use crate::props::EditorProps;
use editor_api::EditorMode;

/// Imperative calls one update pass requires
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePlan {
    /// Content to push into the editor
    pub content_write: Option<String>,
    /// Mode to switch to
    pub mode: Option<EditorMode>,
}

impl UpdatePlan {
    /// Plans an update pass
    ///
    /// `previous_disabled` is the `disabled` value the editor last reflected;
    /// `mirror` is the last content the controller wrote or read.
    pub fn compute(
        previous_disabled: Option<bool>,
        next: &EditorProps,
        mirror: Option<&str>,
    ) -> Self {
        let content_write = match &next.value {
            Some(value) if mirror != Some(value.as_str()) => Some(value.clone()),
            _ => None,
        };
        let mode = match next.disabled {
            Some(disabled) if previous_disabled != Some(disabled) => {
                Some(EditorMode::from_disabled(disabled))
            }
            _ => None,
        };
        Self {
            content_write,
            mode,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content_write.is_none() && self.mode.is_none()
    }
}
