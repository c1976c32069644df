//! Descriptor tables: ordered, immutable groups of settings per scope.

use std::collections::HashMap;

use crate::descriptor::SettingDesc;

/// Which structure a table's rows apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableScope {
    /// Engine-wide settings: persisted and synchronised.
    Global,
    /// Per-company settings, resolved against a company block.
    Company,
    /// Client-local settings: never saved, never synchronised.
    Client,
    /// Compatibility rows consulted only while reading old saves.
    Legacy,
}

/// An ordered, immutable sequence of descriptors.
///
/// Declaration order is the save-stream layout and must never be
/// reordered; config lookup is by name and order-independent.
pub struct SettingTable<G, S> {
    scope: TableScope,
    rows: Vec<SettingDesc<G, S>>,
    by_name: HashMap<&'static str, usize>,
}

impl<G, S> SettingTable<G, S> {
    /// Freeze `rows` into a table. Rows may share a name only when their
    /// version ranges are disjoint (a field whose stream layout changed
    /// across versions); name lookup returns the first such row.
    pub fn new(scope: TableScope, rows: Vec<SettingDesc<G, S>>) -> Self {
        let mut by_name = HashMap::new();
        for (index, row) in rows.iter().enumerate() {
            if !row.name.is_empty() {
                by_name.entry(row.name).or_insert(index);
            }
        }
        Self {
            scope,
            rows,
            by_name,
        }
    }

    pub fn scope(&self) -> TableScope {
        self.scope
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SettingDesc<G, S>> {
        self.rows.get(index)
    }

    /// All rows in declaration (stream) order.
    pub fn iter(&self) -> impl Iterator<Item = &SettingDesc<G, S>> {
        self.rows.iter()
    }

    /// Find a row by its config name.
    pub fn lookup(&self, name: &str) -> Option<&SettingDesc<G, S>> {
        self.by_name.get(name).map(|&index| &self.rows[index])
    }

    /// Rows that appear in the config file.
    pub fn config_rows(&self) -> impl Iterator<Item = &SettingDesc<G, S>> {
        self.rows.iter().filter(|row| row.in_config())
    }

    /// Rows that participate in multiplayer synchronisation.
    pub fn sync_rows(&self) -> impl Iterator<Item = &SettingDesc<G, S>> {
        self.rows.iter().filter(|row| row.synced())
    }

    /// Write every live row's default. Drivers call this before a binary
    /// load so rows outside the stream's version range end up at their
    /// defaults rather than whatever the block held before.
    pub fn reset_all(&self, store: &mut G, mut base: Option<&mut S>) {
        for row in &self.rows {
            row.reset(store, base.as_deref_mut());
        }
    }
}
