//! Live storage blocks for every Magnate setting.
//!
//! The registry never owns a value; everything it reads and writes
//! lives here. [`EngineState`] is the process-wide configuration object,
//! constructed at startup and passed by reference to every registry
//! call. Per-company blocks live in the [`CompanyPool`], which hands out
//! the base references for `PER_COMPANY` rows.
//!
//! `Default` impls must agree with the descriptor defaults in
//! [`crate::tables`]; a test over the full tables enforces that.

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Identifies a company's settings block in the pool.
    pub struct CompanyId;
}

/// Hard limit on simultaneous companies.
pub const MAX_COMPANIES: usize = 15;

// ---------------------------------------------------------------------------
// Game settings (persisted, synchronised)
// ---------------------------------------------------------------------------

/// Difficulty block. Editing any component flips `preset` to custom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultySettings {
    pub max_competitors: u8,
    pub competitor_speed: u8,
    pub number_towns: u8,
    pub industry_density: u8,
    pub max_loan: u32,
    pub initial_interest: u8,
    pub vehicle_costs: u8,
    pub vehicle_breakdowns: u8,
    pub subsidy_multiplier: u8,
    pub construction_cost: u8,
    pub terrain_type: u8,
    pub quantity_sea_lakes: u8,
    pub disasters: u8,
    pub town_council_tolerance: u8,
    /// 0-2 named presets; 3 means the components were hand-edited.
    pub preset: u8,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self {
            max_competitors: 0,
            competitor_speed: 2,
            number_towns: 2,
            industry_density: 5,
            max_loan: 300_000,
            initial_interest: 2,
            vehicle_costs: 0,
            vehicle_breakdowns: 1,
            subsidy_multiplier: 2,
            construction_cost: 0,
            terrain_type: 1,
            quantity_sea_lakes: 0,
            disasters: 0,
            town_council_tolerance: 0,
            preset: 3,
        }
    }
}

/// World-creation block. Only consulted when starting a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationSettings {
    pub landscape: u8,
    pub town_name_style: u8,
    pub snow_line_height: u8,
    pub starting_year: i32,
}

impl Default for CreationSettings {
    fn default() -> Self {
        Self {
            landscape: 0,
            town_name_style: 0,
            snow_line_height: 7,
            starting_year: 1950,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomySettings {
    pub inflation: bool,
    pub town_growth_rate: u8,
    pub larger_towns: u8,
    pub initial_city_size: u8,
    pub feeder_payment_share: u8,
}

impl Default for EconomySettings {
    fn default() -> Self {
        Self {
            inflation: true,
            town_growth_rate: 2,
            larger_towns: 4,
            initial_city_size: 2,
            feeder_payment_share: 75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathfindingSettings {
    pub forbid_90_deg: bool,
    pub road_vehicle_queueing: bool,
    pub wait_oneway_signal: u8,
    pub wait_twoway_signal: u8,
    pub wait_for_pbs_path: u8,
    pub reserve_paths: bool,
    pub pathfinder_for_trains: u8,
}

impl Default for PathfindingSettings {
    fn default() -> Self {
        Self {
            forbid_90_deg: false,
            road_vehicle_queueing: true,
            wait_oneway_signal: 15,
            wait_twoway_signal: 41,
            wait_for_pbs_path: 30,
            reserve_paths: false,
            pathfinder_for_trains: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleSettings {
    pub road_side: u8,
    pub max_trains: u16,
    pub max_road_vehicles: u16,
    pub max_aircraft: u16,
    pub max_ships: u16,
    pub plane_speed: u8,
    pub smoke_amount: u8,
    pub never_expire_vehicles: bool,
}

impl Default for VehicleSettings {
    fn default() -> Self {
        Self {
            road_side: 1,
            max_trains: 500,
            max_road_vehicles: 500,
            max_aircraft: 200,
            max_ships: 300,
            plane_speed: 4,
            smoke_amount: 1,
            never_expire_vehicles: false,
        }
    }
}

/// Everything that travels with the save and is synchronised across a
/// network game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSettings {
    pub difficulty: DifficultySettings,
    pub creation: CreationSettings,
    pub economy: EconomySettings,
    pub pathfinding: PathfindingSettings,
    pub vehicle: VehicleSettings,
}

// ---------------------------------------------------------------------------
// Client settings (local preferences, never saved, never synchronised)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuiSettings {
    pub autosave: u8,
    pub display_options: u8,
    pub fullscreen: bool,
    pub console_backlog_length: u16,
    pub window_snap_radius: u8,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            autosave: 1,
            display_options: 0b110_1111,
            fullscreen: false,
            console_backlog_length: 100,
            window_snap_radius: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSettings {
    pub client_name: String,
    pub server_name: String,
    pub server_port: u16,
    pub max_clients: u8,
    pub max_companies: u8,
    pub max_spectators: u8,
    pub sync_freq: u16,
    pub frame_freq: u8,
    pub pause_on_join: bool,
    pub lan_internet: u8,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            client_name: "Player".to_string(),
            server_name: "Unnamed server".to_string(),
            server_port: 3979,
            max_clients: 25,
            max_companies: 15,
            max_spectators: 15,
            sync_freq: 100,
            frame_freq: 0,
            pause_on_join: true,
            lan_internet: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSettings {
    pub gui: GuiSettings,
    pub network: NetworkSettings,
}

// ---------------------------------------------------------------------------
// Legacy scratch and side effects
// ---------------------------------------------------------------------------

/// Scratch targets for rows that only exist while reading old saves.
/// Nothing in the live simulation reads these; migration code inspects
/// them after a legacy load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyState {
    /// Custom difficulty vector from the old game-options layout.
    /// Version 4 grew it from 17 to 18 slots.
    pub diff_custom: [u16; 18],
    /// Service intervals before they moved into the company block.
    pub service_interval_trains: u16,
    pub service_interval_road_vehicles: u16,
    pub service_interval_ships: u16,
    pub service_interval_aircraft: u16,
    pub service_interval_is_percent: bool,
}

impl Default for LegacyState {
    fn default() -> Self {
        Self {
            diff_custom: [0; 18],
            service_interval_trains: 150,
            service_interval_road_vehicles: 150,
            service_interval_ships: 360,
            service_interval_aircraft: 150,
            service_interval_is_percent: false,
        }
    }
}

/// Side effects recorded by change hooks. The UI and network layers
/// drain these once per frame; the registry itself never reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEffects {
    pub redraw_screen: bool,
    pub detail_windows_invalidated: u32,
    pub client_limits_dirty: bool,
    pub service_intervals_dirty: bool,
}

impl PendingEffects {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// The process-wide state object
// ---------------------------------------------------------------------------

/// The process-wide settings object: constructed at startup, torn down
/// at shutdown, and passed by reference to every registry call. Global
/// descriptor rows bind into this block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    pub game: GameSettings,
    pub client: ClientSettings,
    pub legacy: LegacyState,
    pub effects: PendingEffects,
}

// ---------------------------------------------------------------------------
// Per-company blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySettings {
    pub renew_vehicles: bool,
    pub renew_months: i16,
    pub renew_money: u32,
    pub renew_keep_length: bool,
    pub service_interval_is_percent: bool,
    pub service_interval_trains: u16,
    pub service_interval_road_vehicles: u16,
    pub service_interval_ships: u16,
    pub service_interval_aircraft: u16,
}

impl Default for CompanySettings {
    fn default() -> Self {
        Self {
            renew_vehicles: false,
            renew_months: 6,
            renew_money: 100_000,
            renew_keep_length: false,
            service_interval_is_percent: false,
            service_interval_trains: 150,
            service_interval_road_vehicles: 150,
            service_interval_ships: 360,
            service_interval_aircraft: 100,
        }
    }
}

/// Pool of per-company settings blocks. Owns the base references handed
/// to the registry for `PER_COMPANY` rows; the registry itself never
/// allocates or frees a block.
#[derive(Debug, Clone, Default)]
pub struct CompanyPool {
    companies: SlotMap<CompanyId, CompanySettings>,
    /// Block cloned into each newly founded company. The config file
    /// edits this one.
    pub defaults: CompanySettings,
}

impl CompanyPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Found a new company with the current defaults. `None` when the
    /// pool is full.
    pub fn found_company(&mut self) -> Option<CompanyId> {
        if self.companies.len() >= MAX_COMPANIES {
            return None;
        }
        Some(self.companies.insert(self.defaults.clone()))
    }

    /// Remove a company, returning its block if it existed.
    pub fn remove(&mut self, id: CompanyId) -> Option<CompanySettings> {
        self.companies.remove(id)
    }

    pub fn get(&self, id: CompanyId) -> Option<&CompanySettings> {
        self.companies.get(id)
    }

    pub fn get_mut(&mut self, id: CompanyId) -> Option<&mut CompanySettings> {
        self.companies.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CompanyId, &CompanySettings)> {
        self.companies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CompanyId, &mut CompanySettings)> {
        self.companies.iter_mut()
    }

    pub fn clear(&mut self) {
        self.companies.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_capacity_is_enforced() {
        let mut pool = CompanyPool::new();
        for _ in 0..MAX_COMPANIES {
            assert!(pool.found_company().is_some());
        }
        assert!(pool.found_company().is_none());
        assert_eq!(pool.len(), MAX_COMPANIES);
    }

    #[test]
    fn founded_companies_clone_the_defaults() {
        let mut pool = CompanyPool::new();
        pool.defaults.renew_vehicles = true;
        pool.defaults.renew_money = 250_000;
        let id = pool.found_company().unwrap();
        let block = pool.get(id).unwrap();
        assert!(block.renew_vehicles);
        assert_eq!(block.renew_money, 250_000);
    }

    #[test]
    fn removed_companies_free_their_slot() {
        let mut pool = CompanyPool::new();
        let id = pool.found_company().unwrap();
        assert!(pool.remove(id).is_some());
        assert!(pool.get(id).is_none());
        assert!(pool.is_empty());
        // A stale id never resolves again.
        assert!(pool.remove(id).is_none());
    }

    #[test]
    fn company_blocks_are_independent() {
        let mut pool = CompanyPool::new();
        let a = pool.found_company().unwrap();
        let b = pool.found_company().unwrap();
        pool.get_mut(a).unwrap().service_interval_trains = 20;
        assert_eq!(pool.get(b).unwrap().service_interval_trains, 150);
    }

    #[test]
    fn effects_clear_resets_everything() {
        let mut effects = PendingEffects {
            redraw_screen: true,
            detail_windows_invalidated: 4,
            client_limits_dirty: true,
            service_intervals_dirty: true,
        };
        effects.clear();
        assert_eq!(effects, PendingEffects::default());
    }
}
