//! Magnate Data -- the concrete settings of the Magnate engine.
//!
//! The reusable descriptor machinery lives in `magnate-settings`; this
//! crate declares everything specific to the game: the live state
//! blocks ([`state`]), the descriptor tables ([`tables`]), the change
//! and validation hooks ([`callbacks`]), and the two persistence
//! drivers -- the TOML config file ([`config`]) and the binary save
//! block ([`savefile`]).

pub mod callbacks;
pub mod config;
pub mod savefile;
pub mod state;
pub mod tables;

pub use state::{CompanyId, CompanyPool, CompanySettings, EngineState, MAX_COMPANIES};
pub use tables::GameTables;
