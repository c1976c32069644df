//! Storage locators: where a setting's live value resides and how to
//! reach it.
//!
//! A locator never holds an address. Each descriptor is wired to its
//! field with a pair of plain `fn` accessors at table-construction time;
//! per-company and similar runtime-selected blocks are reached through a
//! base object passed at call time. The registry reads and writes
//! through these accessors but never owns or allocates the memory they
//! point into.

use crate::value::SettingValue;

/// Base type for tables that have no scoped rows.
pub type NoBase = ();

/// Read/write access to one live field of `T`.
pub struct FieldAccess<T> {
    pub get: fn(&T) -> SettingValue,
    pub set: fn(&mut T, &SettingValue),
}

impl<T> Clone for FieldAccess<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldAccess<T> {}

impl<T> std::fmt::Debug for FieldAccess<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FieldAccess")
    }
}

/// Where a setting's live value resides.
///
/// `G` is the engine-wide state block handed to every registry call; `S`
/// is the runtime-selected base block for scoped settings (one block per
/// company and the like).
pub enum Location<G, S> {
    /// A field of the engine-wide block. Never needs a base.
    Global(FieldAccess<G>),
    /// A field of a caller-supplied base block.
    Scoped(FieldAccess<S>),
    /// No live destination. Reserves stream bytes so layouts that still
    /// contain a removed field keep parsing.
    Gap,
}

impl<G, S> Clone for Location<G, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G, S> Copy for Location<G, S> {}

impl<G, S> std::fmt::Debug for Location<G, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Global(_) => f.write_str("Global"),
            Location::Scoped(_) => f.write_str("Scoped"),
            Location::Gap => f.write_str("Gap"),
        }
    }
}

/// Shorthand for a global location.
pub fn global<G, S>(
    get: fn(&G) -> SettingValue,
    set: fn(&mut G, &SettingValue),
) -> Location<G, S> {
    Location::Global(FieldAccess { get, set })
}

/// Shorthand for a scoped location.
pub fn scoped<G, S>(
    get: fn(&S) -> SettingValue,
    set: fn(&mut S, &SettingValue),
) -> Location<G, S> {
    Location::Scoped(FieldAccess { get, set })
}

/// A location plus its element geometry.
#[derive(Debug, Clone, Copy)]
pub struct Locator<G, S> {
    pub location: Location<G, S>,
    /// 1 for scalars, the element count for fixed arrays, the byte
    /// capacity for fixed strings.
    pub element_count: usize,
}

impl<G, S> Locator<G, S> {
    pub fn scalar(location: Location<G, S>) -> Self {
        Self {
            location,
            element_count: 1,
        }
    }

    pub fn array(location: Location<G, S>, element_count: usize) -> Self {
        Self {
            location,
            element_count,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self.location, Location::Gap)
    }

    /// Read the live value.
    ///
    /// Panics if a scoped locator is resolved without a base, or on a
    /// gap row. Both are bugs in the calling subsystem, not data errors;
    /// continuing would read memory that does not belong to this
    /// setting.
    pub fn read(&self, store: &G, base: Option<&S>) -> SettingValue {
        match &self.location {
            Location::Global(access) => (access.get)(store),
            Location::Scoped(access) => {
                let base = base.expect("scoped setting resolved without a base block");
                (access.get)(base)
            }
            Location::Gap => panic!("gap rows have no live value"),
        }
    }

    /// Write the live value. Same contract as [`Locator::read`].
    pub fn write(&self, store: &mut G, base: Option<&mut S>, value: &SettingValue) {
        match &self.location {
            Location::Global(access) => (access.set)(store, value),
            Location::Scoped(access) => {
                let base = base.expect("scoped setting resolved without a base block");
                (access.set)(base, value);
            }
            Location::Gap => panic!("gap rows have no live value"),
        }
    }
}
