//! Multiplayer synchronisation commands for setting changes.
//!
//! A change made on one side of a synchronised session is broadcast as a
//! [`SettingCommand`] and applied through the full validation pipeline
//! on every other side, so a stale or hostile payload is clamped and
//! validated exactly like local input. Only named scalar numeric and
//! boolean rows synchronise; strings, lists, and anything flagged
//! `NO_NETWORK_SYNC` never leave the machine.

use serde::{Deserialize, Serialize};

use crate::registry::SetError;
use crate::table::SettingTable;
use crate::value::SettingValue;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown setting `{0}`")]
    Unknown(String),
    #[error("setting `{0}` is not synchronised")]
    NotSynced(String),
    #[error("command encoding failed: {0}")]
    Encode(String),
    #[error("command decoding failed: {0}")]
    Decode(String),
    #[error(transparent)]
    Set(#[from] SetError),
}

/// A setting change on the wire. Booleans travel as 0/1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingCommand {
    pub name: String,
    pub value: i64,
}

impl SettingCommand {
    pub fn new(name: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }

    /// Serialize for transmission.
    pub fn encode(&self) -> Result<Vec<u8>, CommandError> {
        bitcode::serialize(self).map_err(|e| CommandError::Encode(e.to_string()))
    }

    /// Deserialize a received payload.
    pub fn decode(data: &[u8]) -> Result<Self, CommandError> {
        bitcode::deserialize(data).map_err(|e| CommandError::Decode(e.to_string()))
    }
}

impl<G, S> SettingTable<G, S> {
    /// Apply a received change command through the full assignment
    /// pipeline. Rows that do not participate in synchronisation reject
    /// the command outright.
    pub fn apply_command(
        &self,
        cmd: &SettingCommand,
        store: &mut G,
        base: Option<&mut S>,
    ) -> Result<SettingValue, CommandError> {
        let row = self
            .lookup(&cmd.name)
            .ok_or_else(|| CommandError::Unknown(cmd.name.clone()))?;
        if !row.synced() {
            return Err(CommandError::NotSynced(cmd.name.clone()));
        }
        Ok(row.set(store, base, SettingValue::Int(cmd.value))?)
    }
}
