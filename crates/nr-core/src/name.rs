//! City-name validation.
//!
//! A valid name is non-empty and contains neither `;` (the description
//! field separator) nor any byte in `0x00..=0x1F`.  Bytes of multi-byte
//! UTF-8 sequences are all `>= 0x80` and therefore always allowed.

use crate::{MapError, MapResult};

/// `true` if `name` may be used as a city name.
#[inline]
pub fn is_valid_city_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b > 0x1F && b != b';')
}

/// Like [`is_valid_city_name`] but returns [`MapError::InvalidName`] on failure.
pub fn validate_city_name(name: &str) -> MapResult<()> {
    if is_valid_city_name(name) {
        Ok(())
    } else {
        Err(MapError::InvalidName(name.to_owned()))
    }
}
