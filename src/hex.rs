//! Hexadecimal literal lists for generated C++ sources

use std::fmt::Display;

use crate::error::ErrorKind;
use crate::{Error, Result};

/// Formats `bytes` as a comma-separated list of `0x`-prefixed two-digit literals, preserving order.
pub fn array_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("0x{b:02x}")).collect::<Vec<_>>().join(", ")
}

/// Formats `value` as its two little-endian bytes using [`array_hex`].
///
/// Fails with [`ErrorKind::OutOfRange`] unless `value` fits in a `u16`.
pub fn int_hex<T>(value: T) -> Result<String>
where
    T: TryInto<u16> + Copy + Display,
{
    let value: u16 = value.try_into().map_err(|_| {
        Error::new(
            ErrorKind::OutOfRange,
            None,
            format!("{value} does not fit in a 16-bit unsigned integer"),
        )
    })?;
    Ok(array_hex(&value.to_le_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_keep_their_order() {
        assert_eq!(array_hex(&[0x02, 0x15, 0xff, 0x00]), "0x02, 0x15, 0xff, 0x00");
        assert_eq!(array_hex(&[]), "");
    }

    #[test]
    fn one_token_per_byte() {
        let bytes: Vec<u8> = (0..=40).collect();
        let out = array_hex(&bytes);
        let tokens: Vec<&str> = out.split(", ").collect();
        assert_eq!(tokens.len(), bytes.len());
        for (token, byte) in tokens.iter().zip(&bytes) {
            assert_eq!(token.len(), 4);
            assert_eq!(u8::from_str_radix(token.trim_start_matches("0x"), 16).unwrap(), *byte);
        }
    }

    #[test]
    fn integers_are_little_endian() {
        assert_eq!(int_hex(0).unwrap(), "0x00, 0x00");
        assert_eq!(int_hex(65535).unwrap(), "0xff, 0xff");
        assert_eq!(int_hex(0x004cu16).unwrap(), "0x4c, 0x00");
    }

    #[test]
    fn integers_outside_u16_are_rejected() {
        assert_eq!(int_hex(65536).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(int_hex(-1).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(int_hex(u64::MAX).unwrap_err().kind(), ErrorKind::OutOfRange);
    }
}
