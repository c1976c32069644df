//! Validation and change hooks wired into the descriptor tables.
//!
//! The registry guarantees only that a hook runs; what it means is
//! decided here. Change hooks record into
//! [`PendingEffects`](crate::state::PendingEffects) and the UI and
//! network layers drain those flags once per frame.

use magnate_settings::value::SettingValue;

use crate::state::EngineState;

/// Preset index meaning "components were hand-edited".
pub const CUSTOM_PRESET: u8 = 3;

/// Editing any difficulty component forces the preset to custom so the
/// UI stops claiming a named level.
pub fn difficulty_changed(state: &mut EngineState, _new: &SettingValue) {
    state.game.difficulty.preset = CUSTOM_PRESET;
    state.effects.redraw_screen = true;
}

pub fn redraw_screen(state: &mut EngineState, _new: &SettingValue) {
    state.effects.redraw_screen = true;
}

pub fn invalidate_detail_windows(state: &mut EngineState, _new: &SettingValue) {
    state.effects.detail_windows_invalidated += 1;
}

/// Client/company limits changed on a server; connected clients need the
/// new values pushed.
pub fn client_limits_changed(state: &mut EngineState, _new: &SettingValue) {
    state.effects.client_limits_dirty = true;
}

/// Service-interval semantics changed; every vehicle's due date must be
/// recomputed.
pub fn service_intervals_changed(state: &mut EngineState, _new: &SettingValue) {
    state.effects.service_intervals_dirty = true;
}

/// Client names are trimmed before commit; an all-whitespace name is
/// vetoed.
pub fn trim_client_name(value: &mut SettingValue) -> bool {
    let trimmed = value.as_str().trim();
    if trimmed.is_empty() {
        return false;
    }
    *value = SettingValue::Str(trimmed.to_string());
    true
}

/// Pre-1.0 config files used different climate names.
pub fn convert_landscape(token: &str) -> Option<i64> {
    match token {
        "normal" => Some(0),
        "hilly" => Some(1),
        "desert" => Some(2),
        "candy" => Some(3),
        _ => None,
    }
}
