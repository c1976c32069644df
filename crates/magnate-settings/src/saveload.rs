//! Version-gated binary transfer of settings.
//!
//! A table serializes as a flat sequence of fixed-width fields in
//! declaration order. Each row occupies exactly
//! `file_width * element_count` bytes when the stream version falls in
//! its version range and zero bytes otherwise; gap rows consume their
//! reserved width without touching memory. That is the whole
//! backward-compatibility story: removing a field means replacing its
//! row with a gap over the old version range, and old streams keep
//! parsing byte for byte.
//!
//! No hooks fire on the load path, and out-of-range stream values clamp
//! the same way config text does.

use crate::descriptor::SettingDesc;
use crate::kind::SettingKind;
use crate::stream::{StreamError, StreamReader, StreamWriter};
use crate::table::SettingTable;
use crate::value::{SettingValue, extend, narrow};

#[derive(Debug, thiserror::Error)]
pub enum SaveLoadError {
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl<G, S> SettingDesc<G, S> {
    /// Number of stream bytes this row occupies at `version`.
    pub fn stream_len(&self, version: u32) -> usize {
        if !self.in_save() || !self.applicable(version) {
            return 0;
        }
        self.ty.file_width.bytes() * self.locator.element_count
    }

    /// Write this row's bytes for a stream at `version`.
    pub fn save_binary(
        &self,
        w: &mut StreamWriter,
        version: u32,
        store: &G,
        base: Option<&S>,
    ) -> Result<(), SaveLoadError> {
        if !self.in_save() || !self.applicable(version) {
            return Ok(());
        }
        let width = self.ty.file_width;
        let count = self.locator.element_count;
        if self.locator.is_gap() {
            w.write_zeros(width.bytes() * count);
            return Ok(());
        }
        let value = self.get(store, base);
        match self.ty.kind {
            SettingKind::Str => {
                let bytes = value.as_str().as_bytes();
                let n = bytes.len().min(count);
                w.write(&bytes[..n]);
                w.write_zeros(count - n);
            }
            SettingKind::Bool => w.write_uint(u64::from(value.as_bool()), width),
            _ => match &value {
                SettingValue::List(vs) => {
                    debug_assert_eq!(vs.len(), count);
                    for &v in vs {
                        w.write_uint(narrow(v, width), width);
                    }
                }
                _ => w.write_uint(narrow(value.as_int(), width), width),
            },
        }
        Ok(())
    }

    /// Read this row's bytes from a stream at `version`.
    ///
    /// Consumes exactly `stream_len(version)` bytes or fails with
    /// `Truncated`, leaving the row unwritten.
    pub fn load_binary(
        &self,
        r: &mut StreamReader<'_>,
        version: u32,
        store: &mut G,
        base: Option<&mut S>,
    ) -> Result<(), SaveLoadError> {
        if !self.in_save() || !self.applicable(version) {
            return Ok(());
        }
        let width = self.ty.file_width;
        let count = self.locator.element_count;
        if self.locator.is_gap() {
            r.skip(width.bytes() * count)?;
            return Ok(());
        }
        let value = match self.ty.kind {
            SettingKind::Str => {
                let bytes = r.read(count)?;
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                SettingValue::Str(String::from_utf8_lossy(&bytes[..end]).into_owned())
            }
            SettingKind::Bool => SettingValue::Bool(r.read_uint(width)? != 0),
            _ if count > 1 => {
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(extend(r.read_uint(width)?, width, self.ty.is_signed()));
                }
                SettingValue::List(values)
            }
            SettingKind::OneOfMany => {
                let raw = extend(r.read_uint(width)?, width, false);
                SettingValue::Int(raw.clamp(0, self.max))
            }
            SettingKind::ManyOfMany => {
                SettingValue::Int(extend(r.read_uint(width)?, width, false) & self.valid_mask())
            }
            _ => {
                let raw = extend(r.read_uint(width)?, width, self.ty.is_signed());
                SettingValue::Int(raw.clamp(self.min, self.max))
            }
        };
        self.locator.write(store, base, &value);
        Ok(())
    }
}

impl<G, S> SettingTable<G, S> {
    /// Serialized length of the whole table at `version`.
    pub fn stream_len(&self, version: u32) -> usize {
        self.iter().map(|row| row.stream_len(version)).sum()
    }

    /// Write every row in declaration order.
    pub fn save(
        &self,
        w: &mut StreamWriter,
        version: u32,
        store: &G,
        base: Option<&S>,
    ) -> Result<(), SaveLoadError> {
        for row in self.iter() {
            row.save_binary(w, version, store, base)?;
        }
        Ok(())
    }

    /// Read every row in declaration order.
    ///
    /// Fail-fast, not atomic: a truncated stream aborts at the failing
    /// row and leaves earlier rows committed. Callers abort the whole
    /// load and report a corrupted save.
    pub fn load(
        &self,
        r: &mut StreamReader<'_>,
        version: u32,
        store: &mut G,
        mut base: Option<&mut S>,
    ) -> Result<(), SaveLoadError> {
        for row in self.iter() {
            row.load_binary(r, version, store, base.as_deref_mut())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::value::{SettingValue, Width};

    #[test]
    fn table_round_trip_at_current_version() {
        let table = test_table();
        let mut state = TestState::default();
        let mut block = TestBlock::default();
        state.max_loan = 450_000;
        state.landscape = 2;
        state.display_options = 0b101;
        state.counter = 65_535;
        state.resolution = [1920, 1080];
        block.quota = 60;

        let mut w = StreamWriter::new();
        table.save(&mut w, TEST_VERSION, &state, Some(&block)).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), table.stream_len(TEST_VERSION));

        let mut restored = TestState::default();
        let mut restored_block = TestBlock::default();
        let mut r = StreamReader::new(&bytes);
        table
            .load(&mut r, TEST_VERSION, &mut restored, Some(&mut restored_block))
            .unwrap();
        assert!(r.is_at_end());
        assert_eq!(restored.max_loan, 450_000);
        assert_eq!(restored.landscape, 2);
        assert_eq!(restored.display_options, 0b101);
        assert_eq!(restored.counter, 65_535);
        assert_eq!(restored.resolution, [1920, 1080]);
        assert_eq!(restored_block.quota, 60);
        // Rows flagged out of the save kept their defaults.
        assert_eq!(restored.client_name, "Player");
    }

    #[test]
    fn sixteen_bit_boundary_round_trips() {
        let table = test_table();
        let desc = table.lookup("stats.counter").unwrap();
        let mut state = TestState::default();
        state.counter = 65_535;

        let mut w = StreamWriter::new();
        desc.save_binary(&mut w, TEST_VERSION, &state, None).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes, vec![0xFF, 0xFF]);

        let mut restored = TestState::default();
        let mut r = StreamReader::new(&bytes);
        desc.load_binary(&mut r, TEST_VERSION, &mut restored, None)
            .unwrap();
        assert_eq!(restored.counter, 65_535);
    }

    #[test]
    fn version_gating_skips_new_rows() {
        let table = test_table();
        let desc = table.lookup("economy.feeder_share").unwrap();
        assert!(!desc.applicable(96));
        assert!(desc.applicable(97));
        assert_eq!(desc.stream_len(96), 0);
        assert_eq!(desc.stream_len(97), 1);
    }

    #[test]
    fn load_at_old_version_leaves_default() {
        let table = test_table();
        let mut state = TestState::default();
        state.feeder_share = 10;

        // A version-96 stream carries no byte for the row; loading from
        // a defaults-reset state leaves the default in place.
        let mut w = StreamWriter::new();
        table.save(&mut w, 96, &state, Some(&TestBlock::default())).unwrap();
        let bytes = w.into_bytes();

        let mut restored = TestState::default();
        let mut block = TestBlock::default();
        table.reset_all(&mut restored, Some(&mut block));
        let mut r = StreamReader::new(&bytes);
        table.load(&mut r, 96, &mut restored, Some(&mut block)).unwrap();
        assert!(r.is_at_end());
        assert_eq!(restored.feeder_share, 75);
    }

    #[test]
    fn gap_consumes_exact_width_without_writing() {
        let mut state = TestState::default();
        let gap: SettingDesc<TestState, TestBlock> = SettingDesc::gap(Width::B2, 3, 0, 50);

        let mut w = StreamWriter::new();
        gap.save_binary(&mut w, 40, &state, None).unwrap();
        assert_eq!(w.position(), 6);

        let bytes = w.into_bytes();
        let mut r = StreamReader::new(&bytes);
        gap.load_binary(&mut r, 40, &mut state, None).unwrap();
        assert_eq!(r.position(), 6);

        // Outside its version range the gap is absent entirely.
        let mut r = StreamReader::new(&bytes);
        gap.load_binary(&mut r, 51, &mut state, None).unwrap();
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn narrowed_file_width_sign_extends() {
        use crate::kind::ValueType;
        use crate::locator::global;

        // Stored as i16 in memory, i8 in streams before the field grew.
        let desc: SettingDesc<TestState, TestBlock> = SettingDesc::var(
            "legacy.balance",
            ValueType::signed(Width::B2).in_file(Width::B1),
            global(
                |s: &TestState| SettingValue::Int(i64::from(s.balance)),
                |s, v| s.balance = v.as_int() as i16,
            ),
            0, -100, 100, 0,
        );

        let mut state = TestState::default();
        state.balance = -3;
        let mut w = StreamWriter::new();
        desc.save_binary(&mut w, TEST_VERSION, &state, None).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes, vec![0xFD]);

        let mut restored = TestState::default();
        let mut r = StreamReader::new(&bytes);
        desc.load_binary(&mut r, TEST_VERSION, &mut restored, None)
            .unwrap();
        assert_eq!(restored.balance, -3);
    }

    #[test]
    fn stream_values_clamp_on_load() {
        let table = test_table();
        let desc = table.lookup("economy.max_loan").unwrap();
        // Craft a stream holding a value above the legal maximum.
        let mut w = StreamWriter::new();
        w.write_uint(900_000, Width::B4);
        let bytes = w.into_bytes();

        let mut state = TestState::default();
        let mut r = StreamReader::new(&bytes);
        desc.load_binary(&mut r, TEST_VERSION, &mut state, None)
            .unwrap();
        assert_eq!(state.max_loan, 500_000);
    }

    #[test]
    fn load_does_not_fire_hooks() {
        let table = test_table();
        let desc = table.lookup("economy.max_loan").unwrap();
        let mut w = StreamWriter::new();
        w.write_uint(200_000, Width::B4);
        let bytes = w.into_bytes();

        let mut state = TestState::default();
        let mut r = StreamReader::new(&bytes);
        desc.load_binary(&mut r, TEST_VERSION, &mut state, None)
            .unwrap();
        assert_eq!(state.max_loan, 200_000);
        assert_eq!(state.changes_seen, 0);
    }

    #[test]
    fn truncated_stream_fails_fast() {
        let table = test_table();
        let mut state = TestState::default();
        let mut block = TestBlock::default();
        let mut w = StreamWriter::new();
        table.save(&mut w, TEST_VERSION, &state, Some(&block)).unwrap();
        let mut bytes = w.into_bytes();
        bytes.truncate(bytes.len() - 1);

        let mut r = StreamReader::new(&bytes);
        let err = table
            .load(&mut r, TEST_VERSION, &mut state, Some(&mut block))
            .unwrap_err();
        assert!(matches!(err, SaveLoadError::Stream(StreamError::Truncated { .. })));
    }

    #[test]
    fn string_rows_pad_to_capacity() {
        let mut table_state = TestState::default();
        let desc: SettingDesc<TestState, TestBlock> = SettingDesc::string(
            "network.server_name",
            crate::locator::global(
                |s: &TestState| SettingValue::Str(s.client_name.clone()),
                |s, v| s.client_name = v.as_str().to_string(),
            ),
            8,
            "srv",
        );
        table_state.client_name = "abc".to_string();

        let mut w = StreamWriter::new();
        desc.save_binary(&mut w, TEST_VERSION, &table_state, None)
            .unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..3], b"abc");
        assert!(bytes[3..].iter().all(|&b| b == 0));

        let mut restored = TestState::default();
        let mut r = StreamReader::new(&bytes);
        desc.load_binary(&mut r, TEST_VERSION, &mut restored, None)
            .unwrap();
        assert_eq!(restored.client_name, "abc");
    }
}
