//! Sparse per-owner availability map and its toggle state machine.

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use shared::AvailabilityState;
use std::collections::BTreeMap;

/// What the caller must do with the booking detail after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    /// New state is busy or tentative: ask for contact details
    Prompt,
    /// New state is available: an existing detail no longer applies
    Discard,
    /// Nothing to do
    Keep,
}

/// Result of toggling one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Blank slot; nothing changed
    Ignored,
    /// Same state requested on a day with a saved detail; the detail is shown
    /// instead of clearing the day
    ViewDetails { state: AvailabilityState },
    /// Day returned to unset; any detail must be removed
    Cleared { previous: AvailabilityState },
    /// Day now holds `state`
    Set {
        state: AvailabilityState,
        previous: AvailabilityState,
        detail: DetailAction,
    },
}

impl ToggleOutcome {
    /// State of the day after the toggle, `None` when ignored
    pub fn resulting_state(&self) -> Option<AvailabilityState> {
        match *self {
            ToggleOutcome::Ignored => None,
            ToggleOutcome::ViewDetails { state } => Some(state),
            ToggleOutcome::Cleared { .. } => Some(AvailabilityState::Unset),
            ToggleOutcome::Set { state, .. } => Some(state),
        }
    }

    /// Whether the availability map changed
    pub fn changed_state(&self) -> bool {
        matches!(self, ToggleOutcome::Cleared { .. } | ToggleOutcome::Set { .. })
    }

    /// Whether the booking detail at the key has to go
    pub fn removes_detail(&self) -> bool {
        matches!(
            self,
            ToggleOutcome::Cleared { .. }
                | ToggleOutcome::Set {
                    detail: DetailAction::Discard,
                    ..
                }
        )
    }
}

/// Mapping from date key to availability state for one calendar owner.
///
/// `Unset` is never stored: setting it removes the key. The persisted form is
/// a plain JSON object of `"dateKey": "state"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AvailabilityMap {
    entries: BTreeMap<String, AvailabilityState>,
}

impl AvailabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a day, `Unset` when absent
    pub fn get(&self, key: &str) -> AvailabilityState {
        self.entries
            .get(key)
            .copied()
            .unwrap_or(AvailabilityState::Unset)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a state; `Unset` removes the entry and empty keys are ignored
    pub fn set(&mut self, key: &str, state: AvailabilityState) {
        if key.is_empty() {
            return;
        }
        if state.is_set() {
            self.entries.insert(key.to_string(), state);
        } else {
            self.entries.remove(key);
        }
    }

    pub fn remove(&mut self, key: &str) -> AvailabilityState {
        self.entries
            .remove(key)
            .unwrap_or(AvailabilityState::Unset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AvailabilityState)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Apply the owner's click on a day.
    ///
    /// Requesting the state a day already has clears it, unless a booking
    /// detail exists for that day, in which case the detail is shown and the
    /// map is left alone. Any other request overwrites the previous state.
    /// Requesting `Unset` always clears.
    pub fn toggle(
        &mut self,
        key: &str,
        requested: AvailabilityState,
        has_detail: bool,
    ) -> ToggleOutcome {
        if key.is_empty() {
            return ToggleOutcome::Ignored;
        }

        let current = self.get(key);

        if !requested.is_set() {
            self.remove(key);
            return ToggleOutcome::Cleared { previous: current };
        }

        if current == requested {
            if has_detail {
                return ToggleOutcome::ViewDetails { state: current };
            }
            self.remove(key);
            return ToggleOutcome::Cleared { previous: current };
        }

        self.set(key, requested);
        let detail = if requested.requires_booking_detail() {
            DetailAction::Prompt
        } else if has_detail {
            DetailAction::Discard
        } else {
            DetailAction::Keep
        };

        ToggleOutcome::Set {
            state: requested,
            previous: current,
            detail,
        }
    }
}

impl<'de> Deserialize<'de> for AvailabilityMap {
    /// Unknown or null states are skipped so one bad entry does not hide a
    /// whole calendar
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut map = AvailabilityMap::new();
        for (key, value) in raw {
            if value.is_null() {
                continue;
            }
            match serde_json::from_value::<AvailabilityState>(value) {
                Ok(state) => map.set(&key, state),
                Err(e) => warn!("Skipping unknown availability state for '{}': {}", key, e),
            }
        }
        Ok(map)
    }
}
