//! The resolution and validation engine: every read and write of a live
//! setting goes through here.
//!
//! The assignment pipeline is fixed: clamp the proposed value into the
//! descriptor's legal range, run the validation hook (which may
//! normalise further or veto), commit through the locator, then run the
//! change hook. Out-of-range numbers are corrected silently; a bad
//! one-of-many index is rejected. That asymmetry is part of the
//! config-file contract and is preserved on purpose.

use crate::descriptor::SettingDesc;
use crate::kind::SettingKind;
use crate::text::{self, TextError};
use crate::value::SettingValue;

/// Errors from a validated assignment.
#[derive(Debug, thiserror::Error)]
pub enum SetError {
    /// The proposed one-of-many value names no token.
    #[error("{0} is outside the token table")]
    InvalidEnum(i64),
    /// The validation hook vetoed the change.
    #[error("change vetoed by the validation hook")]
    Vetoed,
    #[error(transparent)]
    Text(#[from] TextError),
}

/// Truncate at the capacity without splitting a character.
fn truncate_to(s: &mut String, capacity: usize) {
    if s.len() <= capacity {
        return;
    }
    let mut end = capacity;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

impl<G, S> SettingDesc<G, S> {
    /// Read the current live value. No validation: `set` maintains the
    /// invariant that the store only ever holds legal values.
    pub fn get(&self, store: &G, base: Option<&S>) -> SettingValue {
        self.locator.read(store, base)
    }

    /// Clamp / legality-check a proposed value without committing it.
    ///
    /// Idempotent: `clamp(clamp(v)) == clamp(v)`.
    pub fn clamp(&self, proposed: SettingValue) -> Result<SettingValue, SetError> {
        match self.ty.kind {
            SettingKind::Signed | SettingKind::Unsigned => match proposed {
                SettingValue::Int(v) => Ok(SettingValue::Int(v.clamp(self.min, self.max))),
                // Bounds describe scalars; list elements are raw data.
                SettingValue::List(vs) => Ok(SettingValue::List(vs)),
                other => panic!("numeric setting given {other:?}"),
            },
            SettingKind::Bool => match proposed {
                SettingValue::Bool(_) => Ok(proposed),
                SettingValue::Int(v) => Ok(SettingValue::Bool(v != 0)),
                other => panic!("boolean setting given {other:?}"),
            },
            SettingKind::OneOfMany => {
                let v = proposed.as_int();
                if v < 0 || v > self.max {
                    return Err(SetError::InvalidEnum(v));
                }
                Ok(SettingValue::Int(v))
            }
            SettingKind::ManyOfMany => {
                Ok(SettingValue::Int(proposed.as_int() & self.valid_mask()))
            }
            SettingKind::Str => {
                let mut s = match proposed {
                    SettingValue::Str(s) => s,
                    other => panic!("string setting given {other:?}"),
                };
                truncate_to(&mut s, self.locator.element_count);
                Ok(SettingValue::Str(s))
            }
        }
    }

    /// Validated assignment.
    ///
    /// Returns the committed value, which may differ from the proposal
    /// through clamping or hook normalisation. A veto leaves the store
    /// untouched; once the commit happened, the change hook runs and is
    /// never rolled back.
    pub fn set(
        &self,
        store: &mut G,
        base: Option<&mut S>,
        proposed: SettingValue,
    ) -> Result<SettingValue, SetError> {
        let mut value = self.clamp(proposed)?;
        if let Some(validate) = self.validate {
            if !validate(&mut value) {
                return Err(SetError::Vetoed);
            }
        }
        self.locator.write(store, base, &value);
        if let Some(on_change) = self.on_change {
            on_change(store, &value);
        }
        Ok(value)
    }

    /// Decode a config-file text value for this descriptor.
    pub fn decode_text(&self, text_value: &str) -> Result<SettingValue, TextError> {
        text::decode(
            &self.ty,
            self.tokens,
            self.locator.element_count,
            self.convert,
            text_value,
        )
    }

    /// Encode a value as config-file text.
    pub fn encode_text(&self, value: &SettingValue) -> String {
        text::encode(&self.ty, self.tokens, value)
    }

    /// Decode and assign in one step: the config-load path.
    pub fn set_from_text(
        &self,
        store: &mut G,
        base: Option<&mut S>,
        text_value: &str,
    ) -> Result<SettingValue, SetError> {
        let proposed = self.decode_text(text_value)?;
        self.set(store, base, proposed)
    }

    /// Encode the current live value: the config-save path.
    pub fn encode_current(&self, store: &G, base: Option<&S>) -> String {
        self.encode_text(&self.get(store, base))
    }

    /// Write the default without clamping or hooks. Defaults are
    /// declared legal by the table author. No-op on gaps.
    pub fn reset(&self, store: &mut G, base: Option<&mut S>) {
        if self.locator.is_gap() {
            return;
        }
        self.locator.write(store, base, &self.default);
    }

    /// Read one element of an array row. Panics when `index` is outside
    /// the declared element count: that is a caller bug, the same class
    /// as an out-of-bounds slice index.
    pub fn get_element(&self, store: &G, base: Option<&S>, index: usize) -> i64 {
        assert!(
            index < self.locator.element_count,
            "element index {index} out of bounds for {} elements",
            self.locator.element_count
        );
        self.get(store, base).as_list()[index]
    }

    /// Replace one element of an array row through the full assignment
    /// pipeline. Same bounds contract as [`SettingDesc::get_element`].
    pub fn set_element(
        &self,
        store: &mut G,
        mut base: Option<&mut S>,
        index: usize,
        value: i64,
    ) -> Result<SettingValue, SetError> {
        assert!(
            index < self.locator.element_count,
            "element index {index} out of bounds for {} elements",
            self.locator.element_count
        );
        let mut list = self.get(store, base.as_deref()).as_list().to_vec();
        list[index] = value;
        self.set(store, base.as_deref_mut(), SettingValue::List(list))
    }
}
