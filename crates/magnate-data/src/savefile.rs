//! The settings block of a Magnate save.
//!
//! Framing: magic, format version, then the game table in declaration
//! order, then a count-prefixed block per company. Streams at or below
//! version 96 instead carry the old game-options layout and no company
//! blocks; per-field version gating inside the tables handles everything
//! finer-grained than that.
//!
//! A load resets all live rows to their defaults first, so fields
//! outside the stream's version range come out of the load at their
//! defaults rather than whatever the state held before.

use magnate_settings::stream::{StreamReader, StreamWriter};
use magnate_settings::value::Width;

use crate::state::{CompanyPool, EngineState, MAX_COMPANIES};
use crate::tables::GameTables;

/// Magic number identifying a Magnate settings block.
pub const SAVE_MAGIC: u32 = 0x4D47_0001;

/// Current save format version. Increment when the tables change shape.
pub const SAVE_VERSION: u32 = 163;

/// Last version whose settings lived in the old game-options layout.
pub const LAST_GAMEOPT_VERSION: u32 = 96;

/// First version that carries per-company blocks; before that, service
/// intervals and the like were engine-wide.
pub const COMPANY_BLOCKS_VERSION: u32 = 120;

#[derive(Debug, thiserror::Error)]
pub enum SaveFileError {
    #[error("not a settings block: bad magic 0x{0:08X}")]
    BadMagic(u32),
    #[error("save from future version {0} (this build writes {SAVE_VERSION})")]
    FutureVersion(u32),
    #[error("company count {0} exceeds the pool limit")]
    TooManyCompanies(u64),
    #[error(transparent)]
    Stream(#[from] magnate_settings::stream::StreamError),
    #[error(transparent)]
    SaveLoad(#[from] magnate_settings::saveload::SaveLoadError),
}

/// Serialize the settings block at the current version.
pub fn save_settings(
    tables: &GameTables,
    state: &EngineState,
    companies: &CompanyPool,
) -> Result<Vec<u8>, SaveFileError> {
    let mut w = StreamWriter::new();
    w.write_uint(u64::from(SAVE_MAGIC), Width::B4);
    w.write_uint(u64::from(SAVE_VERSION), Width::B4);
    tables.game.save(&mut w, SAVE_VERSION, state, None)?;
    w.write_uint(companies.len() as u64, Width::B1);
    for (_, company) in companies.iter() {
        tables.company.save(&mut w, SAVE_VERSION, state, Some(company))?;
    }
    Ok(w.into_bytes())
}

/// Load a settings block. Returns the stream's version.
///
/// Truncation aborts the whole load: once the cursor is lost, no later
/// field can be positioned, and the caller reports a corrupted save.
pub fn load_settings(
    data: &[u8],
    tables: &GameTables,
    state: &mut EngineState,
    companies: &mut CompanyPool,
) -> Result<u32, SaveFileError> {
    let mut r = StreamReader::new(data);
    let magic = r.read_uint(Width::B4)? as u32;
    if magic != SAVE_MAGIC {
        return Err(SaveFileError::BadMagic(magic));
    }
    let version = r.read_uint(Width::B4)? as u32;
    if version > SAVE_VERSION {
        return Err(SaveFileError::FutureVersion(version));
    }

    tables.game.reset_all(state, None);
    tables.legacy_gameopt.reset_all(state, None);
    companies.clear();

    if version <= LAST_GAMEOPT_VERSION {
        tables.legacy_gameopt.load(&mut r, version, state, None)?;
        return Ok(version);
    }

    tables.game.load(&mut r, version, state, None)?;

    if version >= COMPANY_BLOCKS_VERSION {
        let count = r.read_uint(Width::B1)?;
        if count as usize > MAX_COMPANIES {
            return Err(SaveFileError::TooManyCompanies(count));
        }
        for _ in 0..count {
            let id = companies
                .found_company()
                .expect("count checked against pool capacity");
            let block = companies.get_mut(id).expect("company was just founded");
            tables.company.reset_all(state, Some(block));
            tables.company.load(&mut r, version, state, Some(block))?;
        }
    }
    Ok(version)
}
