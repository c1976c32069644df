//! Shared fixtures for registry tests: a small state block, a scoped
//! block, and a table exercising every descriptor kind.

use crate::descriptor::{SettingDesc, SettingFlags};
use crate::kind::ValueType;
use crate::locator::{global, scoped};
use crate::table::{SettingTable, TableScope};
use crate::value::{SettingValue, Width};

/// Stream version the fixtures are saved at.
pub const TEST_VERSION: u32 = 163;

pub const CLIMATES: &[&str] = &["temperate", "arctic", "tropic", "toyland"];
pub const DISPLAY_OPTIONS: &[&str] = &["town_names", "station_names", "signs", "", "full_detail"];

/// Engine-wide fixture block.
#[derive(Debug, Clone, PartialEq)]
pub struct TestState {
    pub max_loan: u32,
    pub inflation: bool,
    pub landscape: u8,
    pub display_options: u8,
    pub client_name: String,
    pub resolution: [i32; 2],
    pub counter: u16,
    pub balance: i16,
    pub feeder_share: u8,
    /// Bumped by the change hook on `economy.max_loan`.
    pub changes_seen: u32,
}

impl Default for TestState {
    fn default() -> Self {
        Self {
            max_loan: 300_000,
            inflation: true,
            landscape: 0,
            display_options: 0,
            client_name: "Player".to_string(),
            resolution: [640, 480],
            counter: 0,
            balance: 0,
            feeder_share: 75,
            changes_seen: 0,
        }
    }
}

/// Scoped fixture block, standing in for a per-company structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestBlock {
    pub quota: u16,
}

fn count_change(state: &mut TestState, _new: &SettingValue) {
    state.changes_seen += 1;
}

fn trim_name(value: &mut SettingValue) -> bool {
    let trimmed = value.as_str().trim();
    if trimmed.is_empty() {
        return false;
    }
    *value = SettingValue::Str(trimmed.to_string());
    true
}

fn legacy_climate(token: &str) -> Option<i64> {
    match token {
        "normal" => Some(0),
        "hilly" => Some(1),
        "desert" => Some(2),
        "candy" => Some(3),
        _ => None,
    }
}

/// A table exercising every kind: clamped numeric with a change hook,
/// boolean, one-of-many with legacy conversion, many-of-many with a
/// reserved bit, validated string, list, gap, version-gated row, and a
/// scoped row.
pub fn test_table() -> SettingTable<TestState, TestBlock> {
    let rows = vec![
        SettingDesc::var(
            "economy.max_loan",
            ValueType::unsigned(Width::B4),
            global(
                |s: &TestState| SettingValue::Int(i64::from(s.max_loan)),
                |s, v| s.max_loan = v.as_int() as u32,
            ),
            300_000, 100_000, 500_000, 50_000,
        )
        .on_change(count_change),
        SettingDesc::boolean(
            "economy.inflation",
            global(
                |s: &TestState| SettingValue::Bool(s.inflation),
                |s, v| s.inflation = v.as_bool(),
            ),
            true,
        ),
        SettingDesc::one_of(
            "creation.landscape",
            Width::B1,
            global(
                |s: &TestState| SettingValue::Int(i64::from(s.landscape)),
                |s, v| s.landscape = v.as_int() as u8,
            ),
            0,
            CLIMATES,
        )
        .convert(legacy_climate),
        SettingDesc::many_of(
            "gui.display_options",
            Width::B1,
            global(
                |s: &TestState| SettingValue::Int(i64::from(s.display_options)),
                |s, v| s.display_options = v.as_int() as u8,
            ),
            0,
            DISPLAY_OPTIONS,
        ),
        SettingDesc::string(
            "network.client_name",
            global(
                |s: &TestState| SettingValue::Str(s.client_name.clone()),
                |s, v| s.client_name = v.as_str().to_string(),
            ),
            16,
            "Player",
        )
        .flags(SettingFlags::NOT_IN_SAVE | SettingFlags::NO_NETWORK_SYNC)
        .validate(trim_name),
        SettingDesc::list(
            "gui.resolution",
            ValueType::signed(Width::B4),
            global(
                |s: &TestState| SettingValue::List(s.resolution.iter().map(|&v| i64::from(v)).collect()),
                |s, v| {
                    for (slot, &value) in s.resolution.iter_mut().zip(v.as_list()) {
                        *slot = value as i32;
                    }
                },
            ),
            2,
            &[640, 480],
        ),
        SettingDesc::gap(Width::B1, 2, 0, 50),
        SettingDesc::var(
            "stats.counter",
            ValueType::unsigned(Width::B2),
            global(
                |s: &TestState| SettingValue::Int(i64::from(s.counter)),
                |s, v| s.counter = v.as_int() as u16,
            ),
            0, 0, 65_535, 0,
        ),
        SettingDesc::var(
            "economy.feeder_share",
            ValueType::unsigned(Width::B1),
            global(
                |s: &TestState| SettingValue::Int(i64::from(s.feeder_share)),
                |s, v| s.feeder_share = v.as_int() as u8,
            ),
            75, 0, 100, 0,
        )
        .since(97),
        SettingDesc::var(
            "company.quota",
            ValueType::unsigned(Width::B2),
            scoped(
                |b: &TestBlock| SettingValue::Int(i64::from(b.quota)),
                |b, v| b.quota = v.as_int() as u16,
            ),
            25, 0, 100, 5,
        )
        .flags(SettingFlags::PER_COMPANY),
    ];
    SettingTable::new(TableScope::Global, rows)
}
