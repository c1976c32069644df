//! The Magnate descriptor tables.
//!
//! Row order is the save-stream layout: append new rows, never reorder,
//! and replace removed rows with gaps over their old version range.
//! Config names are stable keys and independent of row order.

use magnate_settings::descriptor::{SettingDesc, SettingFlags};
use magnate_settings::kind::ValueType;
use magnate_settings::locator::{Location, NoBase, global, scoped};
use magnate_settings::table::{SettingTable, TableScope};
use magnate_settings::value::{SettingValue, Width};

use crate::callbacks;
use crate::state::{CompanySettings, EngineState};

pub const CLIMATES: &[&str] = &["temperate", "arctic", "tropic", "toyland"];
pub const TOWN_NAME_STYLES: &[&str] = &["english", "french", "german", "american", "silly"];
pub const AUTOSAVE_INTERVALS: &[&str] = &["off", "monthly", "quarterly", "half year", "yearly"];
pub const ROAD_SIDES: &[&str] = &["left", "right"];
/// Index 4 is a reserved bit from a removed overlay; it stays storable
/// but has no token.
pub const DISPLAY_OPTIONS: &[&str] = &[
    "town_names",
    "station_names",
    "signs",
    "animation",
    "",
    "full_detail",
    "waypoints",
];

type GameDesc = SettingDesc<EngineState, NoBase>;
type CompanyDesc = SettingDesc<EngineState, CompanySettings>;

fn engine(
    get: fn(&EngineState) -> SettingValue,
    set: fn(&mut EngineState, &SettingValue),
) -> Location<EngineState, NoBase> {
    global(get, set)
}

fn company(
    get: fn(&CompanySettings) -> SettingValue,
    set: fn(&mut CompanySettings, &SettingValue),
) -> Location<EngineState, CompanySettings> {
    scoped(get, set)
}

/// All descriptor tables, built once at startup.
pub struct GameTables {
    /// Engine-wide settings: persisted and synchronised.
    pub game: SettingTable<EngineState, NoBase>,
    /// Per-company settings, saved as one block per company.
    pub company: SettingTable<EngineState, CompanySettings>,
    /// Client preferences: config file only.
    pub client: SettingTable<EngineState, NoBase>,
    /// The old game-options stream layout, consulted only for saves at
    /// version 96 and below.
    pub legacy_gameopt: SettingTable<EngineState, NoBase>,
}

impl GameTables {
    pub fn new() -> Self {
        Self {
            game: game_table(),
            company: company_table(),
            client: client_table(),
            legacy_gameopt: legacy_gameopt_table(),
        }
    }
}

impl Default for GameTables {
    fn default() -> Self {
        Self::new()
    }
}

/// The difficulty block moved out of the game-options layout at version
/// 97; everything in it is gated on that.
fn game_table() -> SettingTable<EngineState, NoBase> {
    let rows: Vec<GameDesc> = vec![
        SettingDesc::var(
            "difficulty.max_competitors",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.max_competitors)),
                |s, v| s.game.difficulty.max_competitors = v.as_int() as u8,
            ),
            0, 0, 14, 1,
        )
        .since(97)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::gap(Width::B1, 1, 97, 109),
        SettingDesc::var(
            "difficulty.number_towns",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.number_towns)),
                |s, v| s.game.difficulty.number_towns = v.as_int() as u8,
            ),
            2, 0, 4, 1,
        )
        .since(97)
        .flags(SettingFlags::NEW_GAME_ONLY)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.industry_density",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.industry_density)),
                |s, v| s.game.difficulty.industry_density = v.as_int() as u8,
            ),
            5, 0, 5, 1,
        )
        .since(97)
        .flags(SettingFlags::NEW_GAME_ONLY)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.max_loan",
            ValueType::unsigned(Width::B4),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.max_loan)),
                |s, v| s.game.difficulty.max_loan = v.as_int() as u32,
            ),
            300_000, 100_000, 500_000, 50_000,
        )
        .since(97)
        .flags(SettingFlags::NEW_GAME_ONLY | SettingFlags::SCENARIO_EDITOR | SettingFlags::CURRENCY)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.initial_interest",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.initial_interest)),
                |s, v| s.game.difficulty.initial_interest = v.as_int() as u8,
            ),
            2, 2, 4, 1,
        )
        .since(97)
        .flags(SettingFlags::NEW_GAME_ONLY | SettingFlags::SCENARIO_EDITOR)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.vehicle_costs",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.vehicle_costs)),
                |s, v| s.game.difficulty.vehicle_costs = v.as_int() as u8,
            ),
            0, 0, 2, 1,
        )
        .since(97)
        .flags(SettingFlags::NEW_GAME_ONLY | SettingFlags::SCENARIO_EDITOR)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.competitor_speed",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.competitor_speed)),
                |s, v| s.game.difficulty.competitor_speed = v.as_int() as u8,
            ),
            2, 0, 4, 1,
        )
        .since(97)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::gap(Width::B1, 1, 97, 109),
        SettingDesc::var(
            "difficulty.vehicle_breakdowns",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.vehicle_breakdowns)),
                |s, v| s.game.difficulty.vehicle_breakdowns = v.as_int() as u8,
            ),
            1, 0, 2, 1,
        )
        .since(97)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.subsidy_multiplier",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.subsidy_multiplier)),
                |s, v| s.game.difficulty.subsidy_multiplier = v.as_int() as u8,
            ),
            2, 0, 3, 1,
        )
        .since(97)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.construction_cost",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.construction_cost)),
                |s, v| s.game.difficulty.construction_cost = v.as_int() as u8,
            ),
            0, 0, 2, 1,
        )
        .since(97)
        .flags(SettingFlags::NEW_GAME_ONLY | SettingFlags::SCENARIO_EDITOR)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.terrain_type",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.terrain_type)),
                |s, v| s.game.difficulty.terrain_type = v.as_int() as u8,
            ),
            1, 0, 3, 1,
        )
        .since(97)
        .flags(SettingFlags::NEW_GAME_ONLY)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.quantity_sea_lakes",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.quantity_sea_lakes)),
                |s, v| s.game.difficulty.quantity_sea_lakes = v.as_int() as u8,
            ),
            0, 0, 4, 1,
        )
        .since(97)
        .flags(SettingFlags::NEW_GAME_ONLY)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.disasters",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.disasters)),
                |s, v| s.game.difficulty.disasters = v.as_int() as u8,
            ),
            0, 0, 1, 1,
        )
        .since(97)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.town_council_tolerance",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.town_council_tolerance)),
                |s, v| s.game.difficulty.town_council_tolerance = v.as_int() as u8,
            ),
            0, 0, 2, 1,
        )
        .since(97)
        .on_change(callbacks::difficulty_changed),
        SettingDesc::var(
            "difficulty.preset",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.preset)),
                |s, v| s.game.difficulty.preset = v.as_int() as u8,
            ),
            3, 0, 3, 0,
        )
        .since(97)
        .on_change(callbacks::redraw_screen),
        SettingDesc::one_of(
            "creation.landscape",
            Width::B1,
            engine(
                |s| SettingValue::Int(i64::from(s.game.creation.landscape)),
                |s, v| s.game.creation.landscape = v.as_int() as u8,
            ),
            0,
            CLIMATES,
        )
        .since(97)
        .flags(SettingFlags::NEW_GAME_ONLY)
        .convert(callbacks::convert_landscape),
        SettingDesc::one_of(
            "creation.town_name_style",
            Width::B1,
            engine(
                |s| SettingValue::Int(i64::from(s.game.creation.town_name_style)),
                |s, v| s.game.creation.town_name_style = v.as_int() as u8,
            ),
            0,
            TOWN_NAME_STYLES,
        )
        .since(97)
        .flags(SettingFlags::NEW_GAME_ONLY),
        SettingDesc::var(
            "creation.snow_line_height",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.creation.snow_line_height)),
                |s, v| s.game.creation.snow_line_height = v.as_int() as u8,
            ),
            7, 2, 13, 1,
        ),
        SettingDesc::gap(Width::B4, 1, 0, 104),
        SettingDesc::var(
            "creation.starting_year",
            ValueType::signed(Width::B4),
            engine(
                |s| SettingValue::Int(i64::from(s.game.creation.starting_year)),
                |s, v| s.game.creation.starting_year = v.as_int() as i32,
            ),
            1950, 1920, 2100, 1,
        )
        .flags(SettingFlags::NO_COMMA),
        SettingDesc::boolean(
            "economy.inflation",
            engine(
                |s| SettingValue::Bool(s.game.economy.inflation),
                |s, v| s.game.economy.inflation = v.as_bool(),
            ),
            true,
        ),
        SettingDesc::var(
            "economy.town_growth_rate",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.economy.town_growth_rate)),
                |s, v| s.game.economy.town_growth_rate = v.as_int() as u8,
            ),
            2, 0, 4, 0,
        ),
        SettingDesc::var(
            "economy.larger_towns",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.economy.larger_towns)),
                |s, v| s.game.economy.larger_towns = v.as_int() as u8,
            ),
            4, 0, 255, 1,
        )
        .flags(SettingFlags::ZERO_IS_DISABLED),
        SettingDesc::var(
            "economy.initial_city_size",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.economy.initial_city_size)),
                |s, v| s.game.economy.initial_city_size = v.as_int() as u8,
            ),
            2, 1, 10, 1,
        ),
        SettingDesc::var(
            "economy.feeder_payment_share",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.economy.feeder_payment_share)),
                |s, v| s.game.economy.feeder_payment_share = v.as_int() as u8,
            ),
            75, 0, 100, 0,
        )
        .since(134),
        SettingDesc::boolean(
            "pathfinding.forbid_90_deg",
            engine(
                |s| SettingValue::Bool(s.game.pathfinding.forbid_90_deg),
                |s, v| s.game.pathfinding.forbid_90_deg = v.as_bool(),
            ),
            false,
        ),
        SettingDesc::boolean(
            "pathfinding.road_vehicle_queueing",
            engine(
                |s| SettingValue::Bool(s.game.pathfinding.road_vehicle_queueing),
                |s, v| s.game.pathfinding.road_vehicle_queueing = v.as_bool(),
            ),
            true,
        ),
        SettingDesc::var(
            "pathfinding.wait_oneway_signal",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.pathfinding.wait_oneway_signal)),
                |s, v| s.game.pathfinding.wait_oneway_signal = v.as_int() as u8,
            ),
            15, 2, 255, 0,
        ),
        SettingDesc::var(
            "pathfinding.wait_twoway_signal",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.pathfinding.wait_twoway_signal)),
                |s, v| s.game.pathfinding.wait_twoway_signal = v.as_int() as u8,
            ),
            41, 2, 255, 0,
        ),
        SettingDesc::var(
            "pathfinding.wait_for_pbs_path",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.pathfinding.wait_for_pbs_path)),
                |s, v| s.game.pathfinding.wait_for_pbs_path = v.as_int() as u8,
            ),
            30, 2, 255, 0,
        )
        .since(100),
        SettingDesc::boolean(
            "pathfinding.reserve_paths",
            engine(
                |s| SettingValue::Bool(s.game.pathfinding.reserve_paths),
                |s, v| s.game.pathfinding.reserve_paths = v.as_bool(),
            ),
            false,
        )
        .since(100),
        SettingDesc::var(
            "pathfinding.pathfinder_for_trains",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.pathfinding.pathfinder_for_trains)),
                |s, v| s.game.pathfinding.pathfinder_for_trains = v.as_int() as u8,
            ),
            2, 1, 2, 1,
        )
        .since(87),
        SettingDesc::one_of(
            "vehicle.road_side",
            Width::B1,
            engine(
                |s| SettingValue::Int(i64::from(s.game.vehicle.road_side)),
                |s, v| s.game.vehicle.road_side = v.as_int() as u8,
            ),
            1,
            ROAD_SIDES,
        )
        .flags(SettingFlags::NEW_GAME_ONLY),
        SettingDesc::var(
            "vehicle.max_trains",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.game.vehicle.max_trains)),
                |s, v| s.game.vehicle.max_trains = v.as_int() as u16,
            ),
            500, 0, 5000, 0,
        )
        .on_change(callbacks::redraw_screen),
        SettingDesc::var(
            "vehicle.max_road_vehicles",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.game.vehicle.max_road_vehicles)),
                |s, v| s.game.vehicle.max_road_vehicles = v.as_int() as u16,
            ),
            500, 0, 5000, 0,
        )
        .on_change(callbacks::redraw_screen),
        SettingDesc::var(
            "vehicle.max_aircraft",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.game.vehicle.max_aircraft)),
                |s, v| s.game.vehicle.max_aircraft = v.as_int() as u16,
            ),
            200, 0, 5000, 0,
        )
        .on_change(callbacks::redraw_screen),
        SettingDesc::var(
            "vehicle.max_ships",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.game.vehicle.max_ships)),
                |s, v| s.game.vehicle.max_ships = v.as_int() as u16,
            ),
            300, 0, 5000, 0,
        )
        .on_change(callbacks::redraw_screen),
        SettingDesc::gap(Width::B1, 1, 0, 158),
        SettingDesc::var(
            "vehicle.plane_speed",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.vehicle.plane_speed)),
                |s, v| s.game.vehicle.plane_speed = v.as_int() as u8,
            ),
            4, 1, 4, 0,
        )
        .since(90),
        SettingDesc::var(
            "vehicle.smoke_amount",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.vehicle.smoke_amount)),
                |s, v| s.game.vehicle.smoke_amount = v.as_int() as u8,
            ),
            1, 0, 2, 0,
        )
        .since(145),
        SettingDesc::boolean(
            "vehicle.never_expire_vehicles",
            engine(
                |s| SettingValue::Bool(s.game.vehicle.never_expire_vehicles),
                |s, v| s.game.vehicle.never_expire_vehicles = v.as_bool(),
            ),
            false,
        ),
        // Service intervals were engine-wide until the per-company block
        // arrived in version 120. These rows drain the old stream bytes
        // into migration scratch.
        SettingDesc::boolean(
            "",
            engine(
                |s| SettingValue::Bool(s.legacy.service_interval_is_percent),
                |s, v| s.legacy.service_interval_is_percent = v.as_bool(),
            ),
            false,
        )
        .versions(97, 119)
        .flags(SettingFlags::NOT_IN_CONFIG),
        SettingDesc::var(
            "",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.legacy.service_interval_trains)),
                |s, v| s.legacy.service_interval_trains = v.as_int() as u16,
            ),
            150, 5, 800, 0,
        )
        .versions(97, 119)
        .flags(SettingFlags::NOT_IN_CONFIG | SettingFlags::ZERO_IS_DISABLED),
        SettingDesc::var(
            "",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.legacy.service_interval_road_vehicles)),
                |s, v| s.legacy.service_interval_road_vehicles = v.as_int() as u16,
            ),
            150, 5, 800, 0,
        )
        .versions(97, 119)
        .flags(SettingFlags::NOT_IN_CONFIG | SettingFlags::ZERO_IS_DISABLED),
        SettingDesc::var(
            "",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.legacy.service_interval_ships)),
                |s, v| s.legacy.service_interval_ships = v.as_int() as u16,
            ),
            360, 5, 800, 0,
        )
        .versions(97, 119)
        .flags(SettingFlags::NOT_IN_CONFIG | SettingFlags::ZERO_IS_DISABLED),
        SettingDesc::var(
            "",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.legacy.service_interval_aircraft)),
                |s, v| s.legacy.service_interval_aircraft = v.as_int() as u16,
            ),
            150, 5, 800, 0,
        )
        .versions(97, 119)
        .flags(SettingFlags::NOT_IN_CONFIG | SettingFlags::ZERO_IS_DISABLED),
    ];
    SettingTable::new(TableScope::Global, rows)
}

fn company_table() -> SettingTable<EngineState, CompanySettings> {
    let rows: Vec<CompanyDesc> = vec![
        SettingDesc::boolean(
            "company.renew_vehicles",
            company(
                |c| SettingValue::Bool(c.renew_vehicles),
                |c, v| c.renew_vehicles = v.as_bool(),
            ),
            false,
        )
        .flags(SettingFlags::PER_COMPANY),
        SettingDesc::var(
            "company.renew_months",
            ValueType::signed(Width::B2),
            company(
                |c| SettingValue::Int(i64::from(c.renew_months)),
                |c, v| c.renew_months = v.as_int() as i16,
            ),
            6, -12, 12, 1,
        )
        .flags(SettingFlags::PER_COMPANY),
        SettingDesc::var(
            "company.renew_money",
            ValueType::unsigned(Width::B4),
            company(
                |c| SettingValue::Int(i64::from(c.renew_money)),
                |c, v| c.renew_money = v.as_int() as u32,
            ),
            100_000, 0, 2_000_000, 0,
        )
        .flags(SettingFlags::PER_COMPANY | SettingFlags::CURRENCY),
        SettingDesc::boolean(
            "company.renew_keep_length",
            company(
                |c| SettingValue::Bool(c.renew_keep_length),
                |c, v| c.renew_keep_length = v.as_bool(),
            ),
            false,
        )
        .flags(SettingFlags::PER_COMPANY),
        SettingDesc::boolean(
            "company.service_interval_is_percent",
            company(
                |c| SettingValue::Bool(c.service_interval_is_percent),
                |c, v| c.service_interval_is_percent = v.as_bool(),
            ),
            false,
        )
        .flags(SettingFlags::PER_COMPANY)
        .on_change(callbacks::service_intervals_changed),
        SettingDesc::var(
            "company.service_interval_trains",
            ValueType::unsigned(Width::B2),
            company(
                |c| SettingValue::Int(i64::from(c.service_interval_trains)),
                |c, v| c.service_interval_trains = v.as_int() as u16,
            ),
            150, 5, 800, 0,
        )
        .flags(SettingFlags::PER_COMPANY | SettingFlags::ZERO_IS_DISABLED)
        .on_change(callbacks::invalidate_detail_windows),
        SettingDesc::var(
            "company.service_interval_road_vehicles",
            ValueType::unsigned(Width::B2),
            company(
                |c| SettingValue::Int(i64::from(c.service_interval_road_vehicles)),
                |c, v| c.service_interval_road_vehicles = v.as_int() as u16,
            ),
            150, 5, 800, 0,
        )
        .flags(SettingFlags::PER_COMPANY | SettingFlags::ZERO_IS_DISABLED)
        .on_change(callbacks::invalidate_detail_windows),
        SettingDesc::var(
            "company.service_interval_ships",
            ValueType::unsigned(Width::B2),
            company(
                |c| SettingValue::Int(i64::from(c.service_interval_ships)),
                |c, v| c.service_interval_ships = v.as_int() as u16,
            ),
            360, 5, 800, 0,
        )
        .flags(SettingFlags::PER_COMPANY | SettingFlags::ZERO_IS_DISABLED)
        .on_change(callbacks::invalidate_detail_windows),
        SettingDesc::var(
            "company.service_interval_aircraft",
            ValueType::unsigned(Width::B2),
            company(
                |c| SettingValue::Int(i64::from(c.service_interval_aircraft)),
                |c, v| c.service_interval_aircraft = v.as_int() as u16,
            ),
            100, 5, 800, 0,
        )
        .flags(SettingFlags::PER_COMPANY | SettingFlags::ZERO_IS_DISABLED)
        .on_change(callbacks::invalidate_detail_windows),
    ];
    SettingTable::new(TableScope::Company, rows)
}

/// Client preferences never reach the save or the network.
fn client_table() -> SettingTable<EngineState, NoBase> {
    let local = SettingFlags::NOT_IN_SAVE | SettingFlags::NO_NETWORK_SYNC;
    let rows: Vec<GameDesc> = vec![
        SettingDesc::one_of(
            "gui.autosave",
            Width::B1,
            engine(
                |s| SettingValue::Int(i64::from(s.client.gui.autosave)),
                |s, v| s.client.gui.autosave = v.as_int() as u8,
            ),
            1,
            AUTOSAVE_INTERVALS,
        )
        .flags(local),
        SettingDesc::many_of(
            "gui.display_options",
            Width::B1,
            engine(
                |s| SettingValue::Int(i64::from(s.client.gui.display_options)),
                |s, v| s.client.gui.display_options = v.as_int() as u8,
            ),
            0b110_1111,
            DISPLAY_OPTIONS,
        )
        .flags(local)
        .on_change(callbacks::redraw_screen),
        SettingDesc::boolean(
            "gui.fullscreen",
            engine(
                |s| SettingValue::Bool(s.client.gui.fullscreen),
                |s, v| s.client.gui.fullscreen = v.as_bool(),
            ),
            false,
        )
        .flags(local)
        .on_change(callbacks::redraw_screen),
        SettingDesc::var(
            "gui.console_backlog_length",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.client.gui.console_backlog_length)),
                |s, v| s.client.gui.console_backlog_length = v.as_int() as u16,
            ),
            100, 10, 65_500, 0,
        )
        .flags(local),
        SettingDesc::var(
            "gui.window_snap_radius",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.client.gui.window_snap_radius)),
                |s, v| s.client.gui.window_snap_radius = v.as_int() as u8,
            ),
            10, 0, 32, 1,
        )
        .flags(local | SettingFlags::ZERO_IS_DISABLED),
        SettingDesc::string(
            "network.client_name",
            engine(
                |s| SettingValue::Str(s.client.network.client_name.clone()),
                |s, v| s.client.network.client_name = v.as_str().to_string(),
            ),
            24,
            "Player",
        )
        .flags(local)
        .validate(callbacks::trim_client_name),
        SettingDesc::string(
            "network.server_name",
            engine(
                |s| SettingValue::Str(s.client.network.server_name.clone()),
                |s, v| s.client.network.server_name = v.as_str().to_string(),
            ),
            40,
            "Unnamed server",
        )
        .flags(local | SettingFlags::NETWORK_ONLY),
        SettingDesc::var(
            "network.server_port",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.client.network.server_port)),
                |s, v| s.client.network.server_port = v.as_int() as u16,
            ),
            3979, 0, 65_535, 0,
        )
        .flags(local | SettingFlags::NETWORK_ONLY),
        SettingDesc::var(
            "network.max_clients",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.client.network.max_clients)),
                |s, v| s.client.network.max_clients = v.as_int() as u8,
            ),
            25, 2, 255, 0,
        )
        .flags(local | SettingFlags::NETWORK_ONLY)
        .on_change(callbacks::client_limits_changed),
        SettingDesc::var(
            "network.max_companies",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.client.network.max_companies)),
                |s, v| s.client.network.max_companies = v.as_int() as u8,
            ),
            15, 1, 15, 0,
        )
        .flags(local | SettingFlags::NETWORK_ONLY)
        .on_change(callbacks::client_limits_changed),
        SettingDesc::var(
            "network.max_spectators",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.client.network.max_spectators)),
                |s, v| s.client.network.max_spectators = v.as_int() as u8,
            ),
            15, 0, 255, 0,
        )
        .flags(local | SettingFlags::NETWORK_ONLY)
        .on_change(callbacks::client_limits_changed),
        // Wire pacing knobs are tuned by the server at runtime, never by
        // hand in the config file.
        SettingDesc::var(
            "network.sync_freq",
            ValueType::unsigned(Width::B2),
            engine(
                |s| SettingValue::Int(i64::from(s.client.network.sync_freq)),
                |s, v| s.client.network.sync_freq = v.as_int() as u16,
            ),
            100, 0, 100, 0,
        )
        .flags(local | SettingFlags::NETWORK_ONLY | SettingFlags::NOT_IN_CONFIG),
        SettingDesc::var(
            "network.frame_freq",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.client.network.frame_freq)),
                |s, v| s.client.network.frame_freq = v.as_int() as u8,
            ),
            0, 0, 100, 0,
        )
        .flags(local | SettingFlags::NETWORK_ONLY | SettingFlags::NOT_IN_CONFIG),
        SettingDesc::boolean(
            "network.pause_on_join",
            engine(
                |s| SettingValue::Bool(s.client.network.pause_on_join),
                |s, v| s.client.network.pause_on_join = v.as_bool(),
            ),
            true,
        )
        .flags(local | SettingFlags::NETWORK_ONLY),
        SettingDesc::var(
            "network.lan_internet",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.client.network.lan_internet)),
                |s, v| s.client.network.lan_internet = v.as_int() as u8,
            ),
            0, 0, 1, 0,
        )
        .flags(local),
    ];
    SettingTable::new(TableScope::Client, rows)
}

/// The pre-97 game-options stream layout. Only the save/load driver
/// reads this table, and only for old streams; the config file never
/// sees these rows.
fn legacy_gameopt_table() -> SettingTable<EngineState, NoBase> {
    let rows: Vec<GameDesc> = vec![
        // Version 4 grew the custom difficulty vector from 17 to 18
        // slots; both layouts land in migration scratch, never in the
        // live difficulty block.
        SettingDesc::list(
            "diff_custom",
            ValueType::unsigned(Width::B2),
            engine(
                |s| {
                    SettingValue::List(
                        s.legacy.diff_custom[..17].iter().map(|&v| i64::from(v)).collect(),
                    )
                },
                |s, v| {
                    for (slot, &value) in s.legacy.diff_custom.iter_mut().zip(v.as_list()) {
                        *slot = value as u16;
                    }
                },
            ),
            17,
            &[0; 17],
        )
        .versions(0, 3)
        .flags(SettingFlags::NOT_IN_CONFIG),
        SettingDesc::list(
            "diff_custom",
            ValueType::unsigned(Width::B2),
            engine(
                |s| {
                    SettingValue::List(s.legacy.diff_custom.iter().map(|&v| i64::from(v)).collect())
                },
                |s, v| {
                    for (slot, &value) in s.legacy.diff_custom.iter_mut().zip(v.as_list()) {
                        *slot = value as u16;
                    }
                },
            ),
            18,
            &[0; 18],
        )
        .since(4)
        .flags(SettingFlags::NOT_IN_CONFIG),
        SettingDesc::var(
            "difficulty.preset",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.difficulty.preset)),
                |s, v| s.game.difficulty.preset = v.as_int() as u8,
            ),
            3, 0, 3, 0,
        )
        .flags(SettingFlags::NOT_IN_CONFIG),
        SettingDesc::one_of(
            "creation.landscape",
            Width::B1,
            engine(
                |s| SettingValue::Int(i64::from(s.game.creation.landscape)),
                |s, v| s.game.creation.landscape = v.as_int() as u8,
            ),
            0,
            CLIMATES,
        )
        .flags(SettingFlags::NOT_IN_CONFIG)
        .convert(callbacks::convert_landscape),
        SettingDesc::var(
            "creation.snow_line_height",
            ValueType::unsigned(Width::B1),
            engine(
                |s| SettingValue::Int(i64::from(s.game.creation.snow_line_height)),
                |s, v| s.game.creation.snow_line_height = v.as_int() as u8,
            ),
            7, 2, 13, 0,
        )
        .flags(SettingFlags::NOT_IN_CONFIG),
        SettingDesc::gap(Width::B1, 1, 0, 22),
        SettingDesc::one_of(
            "gui.autosave",
            Width::B1,
            engine(
                |s| SettingValue::Int(i64::from(s.client.gui.autosave)),
                |s, v| s.client.gui.autosave = v.as_int() as u8,
            ),
            1,
            AUTOSAVE_INTERVALS,
        )
        .since(23)
        .flags(SettingFlags::NOT_IN_CONFIG),
        SettingDesc::one_of(
            "vehicle.road_side",
            Width::B1,
            engine(
                |s| SettingValue::Int(i64::from(s.game.vehicle.road_side)),
                |s, v| s.game.vehicle.road_side = v.as_int() as u8,
            ),
            1,
            ROAD_SIDES,
        )
        .flags(SettingFlags::NOT_IN_CONFIG),
    ];
    SettingTable::new(TableScope::Legacy, rows)
}
