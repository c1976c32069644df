//! Setting descriptors: the unit of the registry.
//!
//! One descriptor fully specifies a tunable value: its primitive type,
//! where it lives, its default and legal range, the save-format versions
//! in which it occupies stream bytes, its behavioural flags, and the
//! hooks that run around a change. Descriptors are built once at startup
//! through the typed constructors below and never mutated afterwards;
//! only the values they point at change.

use crate::kind::ValueType;
use crate::locator::{Location, Locator};
use crate::value::{SettingValue, Width};

bitflags::bitflags! {
    /// Behavioural flags on a setting.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SettingFlags: u16 {
        /// Never written to or read from the save stream.
        const NOT_IN_SAVE = 1 << 0;
        /// Never written to or read from the config file.
        const NOT_IN_CONFIG = 1 << 1;
        /// Excluded from multiplayer synchronisation.
        const NO_NETWORK_SYNC = 1 << 2;
        /// Only meaningful while running a network game.
        const NETWORK_ONLY = 1 << 3;
        /// Zero turns the tuned feature off entirely.
        const ZERO_IS_DISABLED = 1 << 4;
        /// Lives in a per-company block.
        const PER_COMPANY = 1 << 5;
        /// May only be changed when starting a new game.
        const NEW_GAME_ONLY = 1 << 6;
        /// Also editable from the scenario editor.
        const SCENARIO_EDITOR = 1 << 7;
        /// Displayed as a currency amount.
        const CURRENCY = 1 << 8;
        /// Displayed without digit grouping.
        const NO_COMMA = 1 << 9;
    }
}

/// Highest representable format version; used as `to` for fields that
/// are still current.
pub const VERSION_MAX: u32 = u32::MAX;

/// Save-format version interval in which a field occupies its declared
/// stream position. Outside the interval the field is absent from the
/// stream entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRange {
    pub from: u32,
    pub to: u32,
}

impl VersionRange {
    /// Present in every format version.
    pub const FULL: VersionRange = VersionRange {
        from: 0,
        to: VERSION_MAX,
    };

    pub const fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    pub const fn since(from: u32) -> Self {
        Self {
            from,
            to: VERSION_MAX,
        }
    }

    pub fn contains(&self, version: u32) -> bool {
        self.from <= version && version <= self.to
    }
}

/// Pre-commit hook: may normalise the proposed value in place, or veto
/// the change by returning `false`.
pub type ValidateFn = fn(&mut SettingValue) -> bool;

/// Post-commit hook for side effects (window invalidation, derived-state
/// recompute). By the time it runs the value is committed; nothing it
/// does is rolled back.
pub type OnChangeFn<G> = fn(&mut G, &SettingValue);

/// Legacy text conversion for one-of-many values whose token names
/// changed across releases.
pub type ConvertFn = fn(&str) -> Option<i64>;

/// One entry of the settings registry.
pub struct SettingDesc<G, S> {
    /// Config-file key in `section.name` form. Empty for save-only
    /// fields and gaps.
    pub name: &'static str,
    pub ty: ValueType,
    pub locator: Locator<G, S>,
    pub default: SettingValue,
    /// Legality bounds for numeric kinds. `step` is UI metadata only and
    /// never affects validity.
    pub min: i64,
    pub max: i64,
    pub step: i64,
    /// Token table for one-of-many / many-of-many kinds. Index position
    /// is the encoded value / bit position; empty entries reserve
    /// unnamed bits.
    pub tokens: &'static [&'static str],
    pub versions: VersionRange,
    pub flags: SettingFlags,
    pub validate: Option<ValidateFn>,
    pub on_change: Option<OnChangeFn<G>>,
    pub convert: Option<ConvertFn>,
}

impl<G, S> SettingDesc<G, S> {
    fn base(name: &'static str, ty: ValueType, locator: Locator<G, S>, default: SettingValue) -> Self {
        Self {
            name,
            ty,
            locator,
            default,
            min: 0,
            max: 0,
            step: 0,
            tokens: &[],
            versions: VersionRange::FULL,
            flags: SettingFlags::empty(),
            validate: None,
            on_change: None,
            convert: None,
        }
    }

    /// A plain numeric setting.
    pub fn var(
        name: &'static str,
        ty: ValueType,
        location: Location<G, S>,
        default: i64,
        min: i64,
        max: i64,
        step: i64,
    ) -> Self {
        let mut desc = Self::base(name, ty, Locator::scalar(location), SettingValue::Int(default));
        desc.min = min;
        desc.max = max;
        desc.step = step;
        desc
    }

    /// A boolean setting.
    pub fn boolean(name: &'static str, location: Location<G, S>, default: bool) -> Self {
        let mut desc = Self::base(
            name,
            ValueType::boolean(),
            Locator::scalar(location),
            SettingValue::Bool(default),
        );
        desc.max = 1;
        desc
    }

    /// A fixed-capacity string setting. `capacity` bounds both the live
    /// field and the stream representation, in bytes.
    pub fn string(
        name: &'static str,
        location: Location<G, S>,
        capacity: usize,
        default: &str,
    ) -> Self {
        Self::base(
            name,
            ValueType::string(),
            Locator::array(location, capacity),
            SettingValue::Str(default.to_string()),
        )
    }

    /// A one-of-many setting over `tokens`.
    pub fn one_of(
        name: &'static str,
        width: Width,
        location: Location<G, S>,
        default: i64,
        tokens: &'static [&'static str],
    ) -> Self {
        let mut desc = Self::base(
            name,
            ValueType::one_of(width),
            Locator::scalar(location),
            SettingValue::Int(default),
        );
        desc.max = tokens.len() as i64 - 1;
        desc.tokens = tokens;
        desc
    }

    /// A many-of-many bitmask over `tokens`.
    pub fn many_of(
        name: &'static str,
        width: Width,
        location: Location<G, S>,
        default: i64,
        tokens: &'static [&'static str],
    ) -> Self {
        let mut desc = Self::base(
            name,
            ValueType::many_of(width),
            Locator::scalar(location),
            SettingValue::Int(default),
        );
        desc.tokens = tokens;
        desc
    }

    /// A fixed-length integer list.
    pub fn list(
        name: &'static str,
        ty: ValueType,
        location: Location<G, S>,
        element_count: usize,
        default: &[i64],
    ) -> Self {
        Self::base(
            name,
            ty,
            Locator::array(location, element_count),
            SettingValue::List(default.to_vec()),
        )
    }

    /// A gap: reserved stream bytes for a field that no longer exists.
    /// Occupies `file_width * element_count` bytes in streams whose
    /// version falls inside `[from, to]` and touches no memory.
    pub fn gap(file_width: Width, element_count: usize, from: u32, to: u32) -> Self {
        let mut desc = Self::base(
            "",
            ValueType::unsigned(file_width),
            Locator::array(Location::Gap, element_count),
            SettingValue::Int(0),
        );
        desc.versions = VersionRange::new(from, to);
        desc.flags = SettingFlags::NOT_IN_CONFIG;
        desc
    }

    // -- chainable refinements, used at table construction --

    pub fn flags(mut self, flags: SettingFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn versions(mut self, from: u32, to: u32) -> Self {
        self.versions = VersionRange::new(from, to);
        self
    }

    pub fn since(mut self, from: u32) -> Self {
        self.versions = VersionRange::since(from);
        self
    }

    pub fn validate(mut self, hook: ValidateFn) -> Self {
        self.validate = Some(hook);
        self
    }

    pub fn on_change(mut self, hook: OnChangeFn<G>) -> Self {
        self.on_change = Some(hook);
        self
    }

    pub fn convert(mut self, hook: ConvertFn) -> Self {
        self.convert = Some(hook);
        self
    }

    pub fn in_file(mut self, width: Width) -> Self {
        self.ty = self.ty.in_file(width);
        self
    }

    // -- predicates --

    /// Whether this field occupies stream bytes at `version`.
    pub fn applicable(&self, version: u32) -> bool {
        self.versions.contains(version)
    }

    pub fn is_gap(&self) -> bool {
        self.locator.is_gap()
    }

    pub fn in_save(&self) -> bool {
        !self.flags.contains(SettingFlags::NOT_IN_SAVE)
    }

    pub fn in_config(&self) -> bool {
        !self.name.is_empty() && !self.flags.contains(SettingFlags::NOT_IN_CONFIG)
    }

    /// Whether this row participates in multiplayer synchronisation.
    /// Only named scalar numeric and boolean rows do; strings, lists,
    /// and anything flagged out stay local.
    pub fn synced(&self) -> bool {
        !self.name.is_empty()
            && !self.is_gap()
            && !self.flags.contains(SettingFlags::NO_NETWORK_SYNC)
            && self.locator.element_count == 1
    }

    /// Bitmask of storable bits for many-of-many rows; reserved (empty)
    /// token positions are still storable.
    pub fn valid_mask(&self) -> i64 {
        if self.tokens.len() >= 63 {
            -1
        } else {
            (1i64 << self.tokens.len()) - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{NoBase, global};

    #[derive(Default)]
    struct Store {
        limit: u32,
    }

    fn limit_desc() -> SettingDesc<Store, NoBase> {
        SettingDesc::var(
            "economy.limit",
            ValueType::unsigned(Width::B4),
            global(
                |s: &Store| SettingValue::Int(i64::from(s.limit)),
                |s, v| s.limit = v.as_int() as u32,
            ),
            300, 100, 500, 50,
        )
    }

    #[test]
    fn version_range_contains_is_inclusive() {
        let range = VersionRange::since(97);
        assert!(!range.contains(96));
        assert!(range.contains(97));
        assert!(range.contains(VERSION_MAX));

        let bounded = VersionRange::new(4, 9);
        assert!(bounded.contains(4));
        assert!(bounded.contains(9));
        assert!(!bounded.contains(10));
    }

    #[test]
    fn var_constructor_fills_bounds() {
        let desc = limit_desc();
        assert_eq!(desc.min, 100);
        assert_eq!(desc.max, 500);
        assert_eq!(desc.step, 50);
        assert_eq!(desc.default, SettingValue::Int(300));
        assert_eq!(desc.versions, VersionRange::FULL);
    }

    #[test]
    fn one_of_derives_max_from_tokens() {
        const TOKENS: &[&str] = &["left", "right"];
        let desc: SettingDesc<Store, NoBase> = SettingDesc::one_of(
            "vehicle.road_side",
            Width::B1,
            global(|_| SettingValue::Int(0), |_, _| {}),
            1,
            TOKENS,
        );
        assert_eq!(desc.max, 1);
        assert_eq!(desc.tokens.len(), 2);
    }

    #[test]
    fn gap_reserves_bytes_only() {
        let desc: SettingDesc<Store, NoBase> = SettingDesc::gap(Width::B1, 4, 0, 143);
        assert!(desc.is_gap());
        assert!(!desc.in_config());
        assert!(!desc.synced());
        assert!(desc.applicable(143));
        assert!(!desc.applicable(144));
    }

    #[test]
    fn chained_refinements_accumulate() {
        let desc = limit_desc()
            .flags(SettingFlags::CURRENCY)
            .flags(SettingFlags::NEW_GAME_ONLY)
            .since(97);
        assert!(desc.flags.contains(SettingFlags::CURRENCY | SettingFlags::NEW_GAME_ONLY));
        assert!(!desc.applicable(96));
        assert!(desc.applicable(97));
    }

    #[test]
    fn sync_participation() {
        let desc = limit_desc();
        assert!(desc.synced());
        assert!(!limit_desc().flags(SettingFlags::NO_NETWORK_SYNC).synced());

        let nameless = SettingDesc::var(
            "",
            ValueType::unsigned(Width::B2),
            global::<Store, NoBase>(|_| SettingValue::Int(0), |_, _| {}),
            0, 0, 10, 0,
        );
        assert!(!nameless.synced());
    }

    #[test]
    fn valid_mask_covers_reserved_positions() {
        const TOKENS: &[&str] = &["a", "b", "", "d"];
        let desc: SettingDesc<Store, NoBase> = SettingDesc::many_of(
            "gui.display_options",
            Width::B1,
            global(|_| SettingValue::Int(0), |_, _| {}),
            0,
            TOKENS,
        );
        assert_eq!(desc.valid_mask(), 0b1111);
    }
}
