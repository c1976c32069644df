//! Magnate Settings -- the declarative settings registry for the
//! Magnate simulation engine.
//!
//! One [`descriptor::SettingDesc`] fully specifies a tunable value:
//! where it lives in memory ([`locator`]), how it converts to and from
//! config-file text ([`text`]), how it transfers through the versioned
//! binary save stream ([`saveload`]), what range or token table bounds
//! it, whether it takes part in multiplayer synchronisation
//! ([`command`]), and which hooks run around a change ([`registry`]).
//! Descriptors are grouped into per-scope [`table::SettingTable`]s,
//! immutable after construction.
//!
//! # Data flow
//!
//! - Config load: raw text -> decode per primitive type -> clamp into
//!   the legal range -> validation hook -> commit through the locator ->
//!   change hook. Out-of-range numbers are corrected silently; bad enum
//!   tokens are rejected and the caller falls back to the default.
//! - Save/load: rows transfer in declaration order, each gated by its
//!   [`descriptor::VersionRange`]; gap rows consume reserved bytes
//!   without touching memory, which is what keeps old stream layouts
//!   parseable after fields are removed.
//!
//! # Ownership
//!
//! The crate is generic over the application's state blocks: `G` is the
//! engine-wide block passed by reference to every call, `S` the
//! runtime-selected base for per-company rows. The registry reads and
//! writes those blocks through per-field accessors but never owns,
//! allocates, or frees them. All operations are synchronous, bounded
//! transforms driven from a single control thread.

pub mod command;
pub mod descriptor;
pub mod kind;
pub mod locator;
pub mod registry;
pub mod saveload;
pub mod stream;
pub mod table;
pub mod text;
pub mod value;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
