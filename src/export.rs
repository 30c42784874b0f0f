//! Log export: a plain-text report and a structured JSON document.
//!
//! Exports read the engine and never change it.

use crate::core::{Automaton, AutomatonSpec, Auxiliary, Catalog, LogEntry, StateId};
use crate::engine::EngineState;
use crate::stats::Statistics;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::{self, Write};
use thiserror::Error;
use uuid::Uuid;

/// Number of newest entries listed under `recentEntries` in JSON exports.
pub const JSON_RECENT_ENTRIES: usize = 10;

const PROJECT: &str = "Coffee Machine DFA Simulator";

/// Supported export formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Human readable report
    Text,
    /// Pretty-printed JSON document
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Text export failed: {0}")]
    Text(#[from] fmt::Error),
}

/// Everything an export needs, borrowed from the engine.
pub(crate) struct Report<'a> {
    pub device: &'a str,
    pub automaton: &'a Automaton,
    pub catalog: &'a Catalog,
    pub state: &'a EngineState,
    pub statistics: Statistics,
    pub entries: &'a VecDeque<LogEntry>,
    pub recent: Vec<&'a LogEntry>,
    pub generated_at: DateTime<Utc>,
}

impl Report<'_> {
    pub fn render(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Text => {
                let mut out = String::new();
                self.write_text(&mut out)?;
                Ok(out)
            }
            ExportFormat::Json => self.render_json(),
        }
    }

    fn item_name(&self, auxiliary: &Auxiliary) -> String {
        match auxiliary.selected_item.as_deref() {
            Some(id) => self
                .catalog
                .get(id)
                .map(|item| item.name.clone())
                .unwrap_or_else(|| id.to_string()),
            None => "None".to_string(),
        }
    }

    fn write_text(&self, out: &mut impl Write) -> fmt::Result {
        let automaton = self.automaton;
        let current = &self.state.current;

        out.write_str("COFFEE MACHINE DFA TRANSITION LOG\n")?;
        out.write_str("==================================\n\n")?;
        writeln!(out, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(out, "Device: {}", self.device)?;
        writeln!(out, "Total Entries: {}", self.entries.len())?;
        writeln!(out, "Total Transitions: {}", self.statistics.total_transitions)?;
        writeln!(out, "Accept Hits: {}", self.statistics.accept_hits)?;
        writeln!(out, "Revenue: {}", self.statistics.revenue)?;
        writeln!(
            out,
            "Current State: {} ({})",
            current,
            automaton.state_name(current)
        )?;
        writeln!(out, "Selected Item: {}", self.item_name(&self.state.auxiliary))?;
        writeln!(out, "Balance: {}\n", self.state.auxiliary.balance)?;

        out.write_str("DFA SPECIFICATION:\n")?;
        out.write_str("------------------\n")?;
        let states: Vec<String> = automaton
            .states()
            .iter()
            .map(|def| format!("{}={}", def.id, def.name))
            .collect();
        writeln!(out, "States Q: {{{}}}", states.join(", "))?;
        let alphabet: Vec<&str> = automaton.alphabet().iter().map(|s| s.as_str()).collect();
        writeln!(out, "Alphabet Σ: {{{}}}", alphabet.join(", "))?;
        writeln!(out, "Start State: {}", automaton.start())?;
        let accepting: Vec<&str> = automaton.accepting().map(StateId::as_str).collect();
        writeln!(out, "Accept States F: {{{}}}", accepting.join(", "))?;
        out.write_str("Transitions δ:\n")?;
        for entry in automaton.table().entries() {
            writeln!(out, "  δ({}, {}) = {}", entry.from, entry.symbol, entry.to)?;
        }

        out.write_str("\nTRANSITION HISTORY:\n")?;
        out.write_str("------------------\n\n")?;
        if self.entries.is_empty() {
            out.write_str("No transitions logged yet\n")?;
        }
        for (index, entry) in self.entries.iter().enumerate() {
            writeln!(
                out,
                "{}. {} (#{})",
                index + 1,
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                entry.sequence
            )?;
            writeln!(out, "   From: {} ({})", entry.from_state, entry.from_state_name)?;
            writeln!(out, "   Input: {}", entry.symbol)?;
            writeln!(out, "   To: {} ({})", entry.to_state, entry.to_state_name)?;
            writeln!(out, "   Item: {}", self.item_name(&entry.auxiliary))?;
            writeln!(out, "   Balance: {}", entry.auxiliary.balance)?;
            if entry.charged > 0 {
                writeln!(out, "   Charged: {}", entry.charged)?;
            }
            writeln!(
                out,
                "   Accept State: {}",
                if entry.is_accept_state { "Yes ✓" } else { "No" }
            )?;
            out.write_str("   ----------------------------\n")?;
        }
        Ok(())
    }

    fn render_json(&self) -> Result<String, ExportError> {
        let document = JsonExport {
            metadata: Metadata {
                export_date: self.generated_at,
                export_id: Uuid::new_v4(),
                project: PROJECT,
                device: self.device,
            },
            automaton_spec: self.automaton.to_spec(),
            current_state: CurrentState {
                code: &self.state.current,
                name: self.automaton.state_name(&self.state.current),
                auxiliary: &self.state.auxiliary,
            },
            statistics: JsonStatistics {
                counters: self.statistics,
                database_size: self.entries.len(),
            },
            recent_entries: self.recent.iter().take(JSON_RECENT_ENTRIES).copied().collect(),
            log: self.entries,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    metadata: Metadata<'a>,
    automaton_spec: AutomatonSpec,
    current_state: CurrentState<'a>,
    statistics: JsonStatistics,
    recent_entries: Vec<&'a LogEntry>,
    log: &'a VecDeque<LogEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    export_date: DateTime<Utc>,
    export_id: Uuid,
    project: &'static str,
    device: &'a str,
}

#[derive(Serialize)]
struct CurrentState<'a> {
    code: &'a StateId,
    name: &'a str,
    auxiliary: &'a Auxiliary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonStatistics {
    #[serde(flatten)]
    counters: Statistics,
    database_size: usize,
}

/// Quick database overview.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub entries: usize,
    pub current_state: StateId,
    pub current_state_name: String,
    pub statistics: Statistics,
    /// Size of the durable log as persisted, in bytes
    pub storage_bytes: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DATABASE STATISTICS")?;
        writeln!(f, "===================")?;
        writeln!(f, "Total Entries: {}", self.entries)?;
        writeln!(
            f,
            "Current State: {} ({})",
            self.current_state, self.current_state_name
        )?;
        writeln!(f, "Accept Hits: {}", self.statistics.accept_hits)?;
        writeln!(f, "Total Transitions: {}", self.statistics.total_transitions)?;
        writeln!(f, "Revenue: {}", self.statistics.revenue)?;
        write!(f, "Storage: {:.2} KB", self.storage_bytes as f64 / 1024.0)
    }
}
