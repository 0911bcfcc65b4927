use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::ids::WeekId;

/// Per-week checked-goal state, independent of whole-week completion.
///
/// Maps a week id to the set of 0-based goal indices the user has ticked
/// individually. Checking every goal does not mark the week complete; the
/// two signals are combined only by the presentation layer. Ordered
/// collections keep the serialized document stable across rewrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalChecklist {
    checked: BTreeMap<WeekId, BTreeSet<usize>>,
}

impl GoalChecklist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the checked state of one goal, creating the week's set on first
    /// use and dropping it again when the last goal is unticked.
    pub fn toggle(&mut self, week_id: &WeekId, goal_index: usize) {
        let set = self.checked.entry(week_id.clone()).or_default();
        if !set.remove(&goal_index) {
            set.insert(goal_index);
        }
        if set.is_empty() {
            self.checked.remove(week_id);
        }
    }

    /// Returns true if the given goal is currently checked.
    #[must_use]
    pub fn is_checked(&self, week_id: &WeekId, goal_index: usize) -> bool {
        self.checked
            .get(week_id)
            .is_some_and(|set| set.contains(&goal_index))
    }

    /// Number of checked goals for the week; 0 when the week has no entry.
    #[must_use]
    pub fn checked_count(&self, week_id: &WeekId) -> usize {
        self.checked.get(week_id).map_or(0, BTreeSet::len)
    }

    /// The checked indices for a week, if any are set.
    #[must_use]
    pub fn checked_indices(&self, week_id: &WeekId) -> Option<&BTreeSet<usize>> {
        self.checked.get(week_id)
    }

    /// Drops all checked state for a week.
    pub fn clear_week(&mut self, week_id: &WeekId) {
        self.checked.remove(week_id);
    }

    /// Drops all checked state.
    pub fn clear(&mut self) {
        self.checked.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_checks_and_unchecks() {
        let mut checklist = GoalChecklist::new();
        let w1 = WeekId::new("w1");

        checklist.toggle(&w1, 0);
        checklist.toggle(&w1, 1);
        assert_eq!(checklist.checked_count(&w1), 2);
        assert!(checklist.is_checked(&w1, 0));

        checklist.toggle(&w1, 0);
        assert_eq!(checklist.checked_count(&w1), 1);
        assert!(!checklist.is_checked(&w1, 0));
    }

    #[test]
    fn double_toggle_restores_prior_state() {
        let mut checklist = GoalChecklist::new();
        let w1 = WeekId::new("w1");
        checklist.toggle(&w1, 2);
        let before = checklist.clone();

        checklist.toggle(&w1, 0);
        checklist.toggle(&w1, 0);
        assert_eq!(checklist, before);
    }

    #[test]
    fn empty_week_reads_as_zero() {
        let checklist = GoalChecklist::new();
        assert_eq!(checklist.checked_count(&WeekId::new("w9")), 0);
        assert!(!checklist.is_checked(&WeekId::new("w9"), 0));
    }

    #[test]
    fn unticking_last_goal_drops_the_week_entry() {
        let mut checklist = GoalChecklist::new();
        let w1 = WeekId::new("w1");
        checklist.toggle(&w1, 0);
        checklist.toggle(&w1, 0);
        assert!(checklist.is_empty());
    }

    #[test]
    fn serializes_as_a_plain_id_to_indices_map() {
        let mut checklist = GoalChecklist::new();
        checklist.toggle(&WeekId::new("w1"), 1);
        checklist.toggle(&WeekId::new("w1"), 0);

        let json = serde_json::to_string(&checklist).unwrap();
        assert_eq!(json, r#"{"w1":[0,1]}"#);

        let restored: GoalChecklist = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, checklist);
    }
}
