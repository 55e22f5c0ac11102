//! Endian-aware primitive readers for the DE/INPOP wire format
//!
//! DE-family files are written in whatever byte order their producing
//! host used. The loader discovers the order from the header and passes
//! a `swap` flag down to these primitives, which read native-order
//! values and reverse the bytes when asked.

use std::io::Read;

use byteorder::{ByteOrder, NativeEndian, ReadBytesExt};

use crate::jplephem::errors::Result;

/// Read a 32-bit unsigned integer from the stream, reversing byte order
/// when `swap` is set.
pub fn read_u32<R: Read>(r: &mut R, swap: bool) -> Result<u32> {
    let v = r.read_u32::<NativeEndian>()?;
    Ok(if swap { v.swap_bytes() } else { v })
}

/// Read an IEEE-754 binary64 from the stream, reversing byte order when
/// `swap` is set.
///
/// The value is assembled from its bit pattern, so nothing beyond
/// IEEE-754 is assumed of the host float format.
pub fn read_f64<R: Read>(r: &mut R, swap: bool) -> Result<f64> {
    let bits = r.read_u64::<NativeEndian>()?;
    let bits = if swap { bits.swap_bytes() } else { bits };
    Ok(f64::from_bits(bits))
}

/// Read a `u32` out of an already-buffered header at `offset`.
pub fn get_u32(buf: &[u8], offset: usize, swap: bool) -> u32 {
    let v = NativeEndian::read_u32(&buf[offset..offset + 4]);
    if swap {
        v.swap_bytes()
    } else {
        v
    }
}

/// Read an `f64` out of an already-buffered header at `offset`.
pub fn get_f64(buf: &[u8], offset: usize, swap: bool) -> f64 {
    let bits = NativeEndian::read_u64(&buf[offset..offset + 8]);
    f64::from_bits(if swap { bits.swap_bytes() } else { bits })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_u32_native_and_swapped() {
        let native = 0x0000_0195u32; // 405
        let mut cur = Cursor::new(native.to_ne_bytes());
        assert_eq!(read_u32(&mut cur, false).unwrap(), 405);

        let mut reversed = native.to_ne_bytes();
        reversed.reverse();
        let mut cur = Cursor::new(reversed);
        assert_eq!(read_u32(&mut cur, true).unwrap(), 405);
    }

    #[test]
    fn test_read_f64_native_and_swapped() {
        let value = 2451545.0f64;
        let mut cur = Cursor::new(value.to_bits().to_ne_bytes());
        assert_eq!(read_f64(&mut cur, false).unwrap(), value);

        let mut reversed = value.to_bits().to_ne_bytes();
        reversed.reverse();
        let mut cur = Cursor::new(reversed);
        assert_eq!(read_f64(&mut cur, true).unwrap(), value);
    }

    #[test]
    fn test_truncated_stream_errors() {
        let mut cur = Cursor::new([0u8; 3]);
        assert!(read_u32(&mut cur, false).is_err());
        let mut cur = Cursor::new([0u8; 7]);
        assert!(read_f64(&mut cur, false).is_err());
    }

    #[test]
    fn test_slice_readers_match_stream_readers() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&123456u32.to_ne_bytes());
        buf.extend_from_slice(&(-0.5f64).to_bits().to_ne_bytes());
        assert_eq!(get_u32(&buf, 0, false), 123456);
        assert_eq!(get_f64(&buf, 4, false), -0.5);
    }
}
