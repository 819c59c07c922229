use std::collections::HashMap;

use crate::modules::homework::{HomeworkKey, HomeworkStatus, StatusPayload};

/// A status change observed between two polls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub item_id: HomeworkKey,
    pub item_name: String,
    pub old_status: Option<HomeworkStatus>,
    pub new_status: HomeworkStatus,
}

/// Last status seen per homework, for the lifetime of the process.
///
/// Entries are only ever added or overwritten through [`TrackedState::commit`].
#[derive(Debug, Default, Clone)]
pub struct TrackedState {
    statuses: HashMap<HomeworkKey, HomeworkStatus>,
}

impl TrackedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &HomeworkKey) -> Option<HomeworkStatus> {
        self.statuses.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Records a transition whose notification went out.
    pub fn commit(&mut self, transition: &Transition) {
        self.statuses
            .insert(transition.item_id.clone(), transition.new_status);
    }
}

/// Transitions in `payload` relative to `state`, in payload order.
/// Does not touch `state`.
pub fn diff(payload: &StatusPayload, state: &TrackedState) -> Vec<Transition> {
    payload
        .homeworks
        .iter()
        .filter_map(|homework| {
            let key = homework.key();
            let old_status = state.get(&key);

            if old_status == Some(homework.status) {
                return None;
            }

            Some(Transition {
                item_id: key,
                item_name: homework.name.clone(),
                old_status,
                new_status: homework.status,
            })
        })
        .collect()
}
