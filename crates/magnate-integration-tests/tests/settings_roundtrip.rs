//! Cross-crate save/load scenarios: version gating, legacy layouts, and
//! per-company isolation, driven through the real game tables.

use magnate_data::savefile::{self, SAVE_MAGIC, SAVE_VERSION};
use magnate_data::{CompanyPool, EngineState, GameTables};
use magnate_settings::stream::{StreamReader, StreamWriter};
use magnate_settings::value::{SettingValue, Width};

#[test]
fn full_round_trip_preserves_all_scopes() {
    let tables = GameTables::new();
    let mut state = EngineState::default();
    let mut pool = CompanyPool::new();

    state.game.difficulty.max_loan = 350_000;
    state.game.difficulty.terrain_type = 3;
    state.game.creation.starting_year = 1985;
    state.game.pathfinding.wait_twoway_signal = 99;
    state.game.vehicle.max_ships = 42;
    let a = pool.found_company().unwrap();
    let b = pool.found_company().unwrap();
    pool.get_mut(a).unwrap().renew_months = -6;
    pool.get_mut(b).unwrap().service_interval_trains = 25;

    let data = savefile::save_settings(&tables, &state, &pool).unwrap();

    let mut restored = EngineState::default();
    let mut restored_pool = CompanyPool::new();
    savefile::load_settings(&data, &tables, &mut restored, &mut restored_pool).unwrap();

    assert_eq!(restored.game, state.game);
    assert_eq!(restored_pool.len(), 2);
    let blocks: Vec<_> = restored_pool.iter().map(|(_, c)| c.clone()).collect();
    assert!(blocks.iter().any(|c| c.renew_months == -6));
    assert!(blocks.iter().any(|c| c.service_interval_trains == 25));
    // Client preferences never touch the save.
    assert_eq!(restored.client, EngineState::default().client);
}

#[test]
fn difficulty_block_is_gated_on_version_97() {
    let tables = GameTables::new();
    let desc = tables.game.lookup("difficulty.max_loan").unwrap();
    assert!(!desc.applicable(96));
    assert!(desc.applicable(97));
}

#[test]
fn version_3_stream_uses_the_seventeen_slot_layout() {
    let tables = GameTables::new();

    // Byte-for-byte: at version 3 the custom difficulty vector is 17
    // 16-bit slots; at version 4 it is 18.
    let rows: Vec<_> = tables
        .legacy_gameopt
        .iter()
        .filter(|row| row.name == "diff_custom")
        .collect();
    assert_eq!(rows[0].stream_len(3), 34);
    assert_eq!(rows[0].stream_len(4), 0);
    assert_eq!(rows[1].stream_len(3), 0);
    assert_eq!(rows[1].stream_len(4), 36);

    // Craft a version-3 game-options stream whose 17 slots hold 7s.
    let mut source = EngineState::default();
    source.legacy.diff_custom = [7; 18];
    let mut w = StreamWriter::new();
    w.write_uint(u64::from(SAVE_MAGIC), Width::B4);
    w.write_uint(3, Width::B4);
    tables.legacy_gameopt.save(&mut w, 3, &source, None).unwrap();
    let data = w.into_bytes();

    let mut restored = EngineState::default();
    let mut pool = CompanyPool::new();
    savefile::load_settings(&data, &tables, &mut restored, &mut pool).unwrap();

    // Seventeen slots were read into migration scratch; the eighteenth
    // stayed at its default, and the live difficulty block was never
    // written.
    assert_eq!(&restored.legacy.diff_custom[..17], &[7u16; 17][..]);
    assert_eq!(restored.legacy.diff_custom[17], 0);
    assert_eq!(restored.game.difficulty, EngineState::default().game.difficulty);
}

#[test]
fn pre_company_stream_fills_legacy_service_intervals() {
    let tables = GameTables::new();
    let mut source = EngineState::default();
    source.legacy.service_interval_ships = 400;

    // Version 110: difficulty block present, service intervals still
    // engine-wide, no company blocks yet.
    let mut w = StreamWriter::new();
    w.write_uint(u64::from(SAVE_MAGIC), Width::B4);
    w.write_uint(110, Width::B4);
    tables.game.save(&mut w, 110, &source, None).unwrap();
    let data = w.into_bytes();

    let mut restored = EngineState::default();
    let mut pool = CompanyPool::new();
    let version = savefile::load_settings(&data, &tables, &mut restored, &mut pool).unwrap();
    assert_eq!(version, 110);
    assert_eq!(restored.legacy.service_interval_ships, 400);
    assert!(pool.is_empty());

    // The same rows are absent from current streams.
    let mut current = StreamWriter::new();
    tables
        .game
        .save(&mut current, SAVE_VERSION, &source, None)
        .unwrap();
    let mut old = StreamWriter::new();
    tables.game.save(&mut old, 110, &source, None).unwrap();
    assert_ne!(current.position(), old.position());
}

#[test]
fn gap_rows_keep_old_offsets_parseable() {
    let tables = GameTables::new();
    let state = EngineState::default();

    // Versions 97 and 110 differ exactly by the two one-byte difficulty
    // gaps that closed at 110 and the 4-byte gap that closed at 105.
    let mut at_109 = StreamWriter::new();
    tables.game.save(&mut at_109, 109, &state, None).unwrap();
    let mut at_110 = StreamWriter::new();
    tables.game.save(&mut at_110, 110, &state, None).unwrap();
    assert_eq!(at_109.position(), at_110.position() + 2);

    // Loading consumes each stream completely.
    for version in [97u32, 100, 109, 110, 119, 120, 134, 145, SAVE_VERSION] {
        let mut w = StreamWriter::new();
        tables.game.save(&mut w, version, &state, None).unwrap();
        let bytes = w.into_bytes();
        let mut restored = EngineState::default();
        let mut r = StreamReader::new(&bytes);
        tables.game.load(&mut r, version, &mut restored, None).unwrap();
        assert!(r.is_at_end(), "version {version} left bytes behind");
    }
}

#[test]
fn company_blocks_stay_isolated() {
    let tables = GameTables::new();
    let mut state = EngineState::default();
    let mut pool = CompanyPool::new();
    let a = pool.found_company().unwrap();
    let b = pool.found_company().unwrap();

    let desc = tables.company.lookup("company.service_interval_trains").unwrap();
    desc.set(&mut state, Some(pool.get_mut(a).unwrap()), SettingValue::Int(30))
        .unwrap();
    desc.set(&mut state, Some(pool.get_mut(b).unwrap()), SettingValue::Int(600))
        .unwrap();

    assert_eq!(pool.get(a).unwrap().service_interval_trains, 30);
    assert_eq!(pool.get(b).unwrap().service_interval_trains, 600);
    // Defaults for future companies are untouched.
    assert_eq!(pool.defaults.service_interval_trains, 150);
}

#[test]
fn corrupted_save_reports_truncation() {
    let tables = GameTables::new();
    let state = EngineState::default();
    let mut pool = CompanyPool::new();
    pool.found_company().unwrap();

    let data = savefile::save_settings(&tables, &state, &pool).unwrap();
    for cut in [9, data.len() / 3, data.len() - 1] {
        let mut truncated = data.clone();
        truncated.truncate(cut);
        let mut restored = EngineState::default();
        let mut restored_pool = CompanyPool::new();
        assert!(
            savefile::load_settings(&truncated, &tables, &mut restored, &mut restored_pool)
                .is_err(),
            "cut at {cut} should fail"
        );
    }
}
