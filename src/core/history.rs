//! Log entry records.
//!
//! Every committed transition and every reset produces one immutable
//! [`LogEntry`]. Entries are plain data; the event log decides where they
//! are kept and for how long.

use super::auxiliary::Auxiliary;
use super::state::{StateId, Symbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    /// A table transition driven by an input symbol
    Transition,
    /// A system edge such as a reset, outside the table
    System,
}

/// Record of a single committed transition.
///
/// Serialized as a flat camelCase record; the auxiliary snapshot is
/// inlined.
///
/// # Example
///
/// ```rust
/// use brewfsm::core::{Auxiliary, EntryKind, LogEntry, StateId, Symbol};
/// use chrono::Utc;
///
/// let entry = LogEntry {
///     sequence: 1,
///     timestamp: Utc::now(),
///     kind: EntryKind::Transition,
///     from_state: StateId::new("q0"),
///     from_state_name: "IDLE".to_string(),
///     symbol: Symbol::new("START"),
///     to_state: StateId::new("q1"),
///     to_state_name: "SELECTING".to_string(),
///     auxiliary: Auxiliary::default(),
///     charged: 0,
///     is_accept_state: false,
/// };
///
/// let json = serde_json::to_value(&entry).unwrap();
/// assert_eq!(json["fromState"], "q0");
/// assert_eq!(json["balance"], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Monotonic sequence number; insertion order equals sequence order
    pub sequence: u64,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
    pub kind: EntryKind,
    pub from_state: StateId,
    pub from_state_name: String,
    /// Input symbol, or `RESET` for system entries
    pub symbol: Symbol,
    pub to_state: StateId,
    pub to_state_name: String,
    /// Auxiliary payload after the transition
    #[serde(flatten)]
    pub auxiliary: Auxiliary,
    /// Amount debited by this transition
    #[serde(default)]
    pub charged: u64,
    /// Whether `to_state` is accepting
    pub is_accept_state: bool,
}

impl LogEntry {
    pub fn is_system(&self) -> bool {
        self.kind == EntryKind::System
    }

    /// `δ(from, symbol) → to` rendering used in listings.
    pub fn arrow(&self) -> String {
        format!("δ({}, {}) → {}", self.from_state, self.symbol, self.to_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: EntryKind) -> LogEntry {
        LogEntry {
            sequence: 7,
            timestamp: Utc::now(),
            kind,
            from_state: StateId::new("q2"),
            from_state_name: "BREWING".to_string(),
            symbol: Symbol::new("BREW"),
            to_state: StateId::new("q3"),
            to_state_name: "READY".to_string(),
            auxiliary: Auxiliary {
                selected_item: Some("latte".to_string()),
                balance: 5,
            },
            charged: 25,
            is_accept_state: true,
        }
    }

    #[test]
    fn entry_serializes_as_flat_record() {
        let json = serde_json::to_value(entry(EntryKind::Transition)).unwrap();
        assert_eq!(json["sequence"], 7);
        assert_eq!(json["kind"], "TRANSITION");
        assert_eq!(json["symbol"], "BREW");
        assert_eq!(json["toStateName"], "READY");
        assert_eq!(json["selectedItem"], "latte");
        assert_eq!(json["balance"], 5);
        assert_eq!(json["charged"], 25);
        assert_eq!(json["isAcceptState"], true);
        assert!(json.get("auxiliary").is_none());
    }

    #[test]
    fn entry_survives_json() {
        let saved = entry(EntryKind::System);
        let json = serde_json::to_string(&saved).unwrap();
        let restored: LogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, saved);
        assert!(restored.is_system());
    }

    #[test]
    fn arrow_formats_transition() {
        assert_eq!(entry(EntryKind::Transition).arrow(), "δ(q2, BREW) → q3");
    }
}
