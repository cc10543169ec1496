//! Binary snapshot codec for editable-list state
//!
//! One fixed, versionless record: an i32 item count, then per item an i32
//! byte length plus UTF-8 bytes, then i32 filter mode, i32 completion mode
//! and i32 enabled flag. All integers little-endian. No checksum and no
//! compression; everything after the item section may be absent.
//!
//! Truncation is tolerated by design: a buffer that ends mid-stream yields
//! the items read so far and leaves missing option fields at their
//! caller-supplied defaults. Only structurally unreadable input is an
//! error, and the caller then discards the whole restore.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::completer::{CompletionMode, FilterMode, SuggestOptions};

/// Structural decode failures. Truncation is not among them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    /// Fewer than four bytes where the item count should be.
    #[error("buffer too short for item count header")]
    ShortHeader,
    /// An item announced a negative byte length.
    #[error("negative length prefix for item {0}")]
    NegativeLength(usize),
    /// An item's bytes are not valid UTF-8.
    #[error("item {0} is not valid UTF-8")]
    InvalidUtf8(usize),
    /// The filter mode field holds a value outside the known range.
    #[error("unknown filter mode value {0}")]
    UnknownFilterMode(i32),
    /// The completion mode field holds a value outside the known range.
    #[error("unknown completion mode value {0}")]
    UnknownCompletionMode(i32),
}

/// Transient snapshot of an editable combo's user-entered items plus its
/// suggestion options.
///
/// Built fresh from live state on every save, rebuilt from bytes on load,
/// and discarded once applied; the byte buffer is the only durable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub items: Vec<String>,
    pub options: SuggestOptions,
}

impl SavedState {
    /// Serialize to the fixed record layout. Pure function of the input.
    pub fn encode(&self) -> Vec<u8> {
        let body: usize = self.items.iter().map(|item| 4 + item.len()).sum();
        let mut buf = Vec::with_capacity(16 + body);
        put_i32(&mut buf, self.items.len() as i32);
        for item in &self.items {
            put_i32(&mut buf, item.len() as i32);
            buf.extend_from_slice(item.as_bytes());
        }
        put_i32(&mut buf, self.options.filter.as_raw());
        put_i32(&mut buf, self.options.completion.as_raw());
        put_i32(&mut buf, self.options.enabled as i32);
        buf
    }

    /// Deserialize a snapshot, reading fields in the order written.
    ///
    /// An empty buffer means "nothing to restore" and returns `Ok(None)`;
    /// the caller leaves its state untouched. The item loop stops early,
    /// without error, when the buffer runs out before the declared count is
    /// reached. Each trailing option field is read only if four more bytes
    /// remain; missing fields keep the caller-supplied `defaults`.
    pub fn decode(bytes: &[u8], defaults: SuggestOptions) -> Result<Option<Self>, StateError> {
        if bytes.is_empty() {
            return Ok(None);
        }
        let mut reader = Reader::new(bytes);
        let count = reader.read_i32().ok_or(StateError::ShortHeader)?;

        let mut items = Vec::new();
        if count > 0 {
            for index in 0..count as usize {
                let Some(len) = reader.read_i32() else {
                    break;
                };
                if len < 0 {
                    return Err(StateError::NegativeLength(index));
                }
                let Some(raw) = reader.read_bytes(len as usize) else {
                    break;
                };
                let text =
                    std::str::from_utf8(raw).map_err(|_| StateError::InvalidUtf8(index))?;
                items.push(text.to_owned());
            }
        }

        let mut options = defaults;
        if let Some(raw) = reader.read_i32() {
            options.filter =
                FilterMode::from_raw(raw).ok_or(StateError::UnknownFilterMode(raw))?;
            if let Some(raw) = reader.read_i32() {
                options.completion = CompletionMode::from_raw(raw)
                    .ok_or(StateError::UnknownCompletionMode(raw))?;
                if let Some(raw) = reader.read_i32() {
                    options.enabled = raw != 0;
                }
            }
        }

        Ok(Some(Self { items, options }))
    }
}

fn put_i32(buf: &mut Vec<u8>, value: i32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Forward-only cursor over the snapshot bytes.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn read_i32(&mut self) -> Option<i32> {
        let end = self.pos.checked_add(4)?;
        let raw = self.buf.get(self.pos..end)?;
        self.pos = end;
        Some(i32::from_le_bytes(raw.try_into().ok()?))
    }

    fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let raw = self.buf.get(self.pos..end)?;
        self.pos = end;
        Some(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SavedState {
        SavedState {
            items: vec!["alpha".into(), "beta".into(), "gamma".into()],
            options: SuggestOptions {
                filter: FilterMode::Contains,
                completion: CompletionMode::Inline,
                enabled: false,
            },
        }
    }

    fn raw(values: &[i32]) -> Vec<u8> {
        let mut buf = Vec::new();
        for &value in values {
            put_i32(&mut buf, value);
        }
        buf
    }

    #[test]
    fn test_roundtrip() {
        let state = sample();
        let decoded = SavedState::decode(&state.encode(), SuggestOptions::default()).unwrap();
        assert_eq!(decoded, Some(state));
    }

    #[test]
    fn test_roundtrip_empty_list() {
        let state = SavedState {
            items: Vec::new(),
            options: SuggestOptions::default(),
        };
        let decoded = SavedState::decode(
            &state.encode(),
            SuggestOptions {
                filter: FilterMode::EndsWith,
                completion: CompletionMode::UnfilteredPopup,
                enabled: false,
            },
        )
        .unwrap();
        assert_eq!(decoded, Some(state));
    }

    #[test]
    fn test_roundtrip_unicode_and_empty_strings() {
        let state = SavedState {
            items: vec!["".into(), "héllo wörld".into(), "日本語テキスト".into()],
            options: SuggestOptions::default(),
        };
        let decoded = SavedState::decode(&state.encode(), SuggestOptions::default()).unwrap();
        assert_eq!(decoded, Some(state));
    }

    #[test]
    fn test_reencode_idempotent() {
        let bytes = sample().encode();
        let decoded = SavedState::decode(&bytes, SuggestOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(decoded.encode(), bytes);
    }

    #[test]
    fn test_empty_buffer_is_no_state() {
        assert_eq!(
            SavedState::decode(&[], SuggestOptions::default()).unwrap(),
            None
        );
    }

    #[test]
    fn test_short_header_fails() {
        let err = SavedState::decode(&[7], SuggestOptions::default()).unwrap_err();
        assert_eq!(err, StateError::ShortHeader);
    }

    #[test]
    fn test_truncation_keeps_complete_items() {
        let defaults = SuggestOptions::default();
        let bytes = sample().encode();
        // Count header plus the first full item ("alpha": 4 + 5 bytes)
        let cut = &bytes[..4 + 4 + 5];

        let decoded = SavedState::decode(cut, defaults).unwrap().unwrap();
        assert_eq!(decoded.items, vec!["alpha"]);
        assert_eq!(decoded.options, defaults);
    }

    #[test]
    fn test_truncation_mid_item_drops_partial() {
        let defaults = SuggestOptions::default();
        let bytes = sample().encode();
        // Cut inside the second item's bytes
        let cut = &bytes[..4 + 4 + 5 + 4 + 2];

        let decoded = SavedState::decode(cut, defaults).unwrap().unwrap();
        assert_eq!(decoded.items, vec!["alpha"]);
    }

    #[test]
    fn test_options_missing_keeps_defaults() {
        let defaults = SuggestOptions {
            filter: FilterMode::EndsWith,
            completion: CompletionMode::UnfilteredPopup,
            enabled: false,
        };
        // Count and items only, no trailing option fields
        let mut bytes = raw(&[2]);
        for item in ["one", "two"] {
            put_i32(&mut bytes, item.len() as i32);
            bytes.extend_from_slice(item.as_bytes());
        }

        let decoded = SavedState::decode(&bytes, defaults).unwrap().unwrap();
        assert_eq!(decoded.items, vec!["one", "two"]);
        assert_eq!(decoded.options, defaults);
    }

    #[test]
    fn test_partial_trailing_field_keeps_defaults() {
        let defaults = SuggestOptions::default();
        let mut bytes = raw(&[0]);
        bytes.extend_from_slice(&[1, 2]);

        let decoded = SavedState::decode(&bytes, defaults).unwrap().unwrap();
        assert!(decoded.items.is_empty());
        assert_eq!(decoded.options, defaults);
    }

    #[test]
    fn test_negative_count_reads_no_items() {
        let bytes = raw(&[-3, 1, 2, 1]);
        let decoded = SavedState::decode(&bytes, SuggestOptions::default())
            .unwrap()
            .unwrap();
        assert!(decoded.items.is_empty());
        assert_eq!(decoded.options.filter, FilterMode::Contains);
        assert_eq!(decoded.options.completion, CompletionMode::UnfilteredPopup);
        assert!(decoded.options.enabled);
    }

    #[test]
    fn test_count_larger_than_buffer_reads_what_is_there() {
        let mut bytes = raw(&[1000]);
        put_i32(&mut bytes, 2);
        bytes.extend_from_slice(b"ok");

        let decoded = SavedState::decode(&bytes, SuggestOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(decoded.items, vec!["ok"]);
    }

    #[test]
    fn test_negative_item_length_fails() {
        let bytes = raw(&[1, -5]);
        let err = SavedState::decode(&bytes, SuggestOptions::default()).unwrap_err();
        assert_eq!(err, StateError::NegativeLength(0));
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let mut bytes = raw(&[1, 2]);
        bytes.extend_from_slice(&[0xff, 0xfe]);
        let err = SavedState::decode(&bytes, SuggestOptions::default()).unwrap_err();
        assert_eq!(err, StateError::InvalidUtf8(0));
    }

    #[test]
    fn test_unknown_filter_mode_fails() {
        let bytes = raw(&[0, 99]);
        let err = SavedState::decode(&bytes, SuggestOptions::default()).unwrap_err();
        assert_eq!(err, StateError::UnknownFilterMode(99));
    }

    #[test]
    fn test_unknown_completion_mode_fails() {
        let bytes = raw(&[0, 1, -7]);
        let err = SavedState::decode(&bytes, SuggestOptions::default()).unwrap_err();
        assert_eq!(err, StateError::UnknownCompletionMode(-7));
    }

    #[test]
    fn test_enabled_any_nonzero_is_true() {
        let bytes = raw(&[0, 0, 0, 7]);
        let decoded = SavedState::decode(&bytes, SuggestOptions::default())
            .unwrap()
            .unwrap();
        assert!(decoded.options.enabled);
        assert_eq!(decoded.options.filter, FilterMode::StartsWith);
        assert_eq!(decoded.options.completion, CompletionMode::Inline);
    }

    #[test]
    fn test_serde_snapshot_shape() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: SavedState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
