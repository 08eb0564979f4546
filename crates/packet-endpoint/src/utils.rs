//! Utils used internally in other modules.

use std::fmt::{self, Write};

/// Writes the bytes as contiguous lowercase hex, without a leading 0x.
pub(crate) fn write_hex<W: Write>(out: &mut W, bytes: &[u8]) -> fmt::Result {
    for byte in bytes {
        write!(out, "{:02x}", byte)?;
    }
    Ok(())
}

/// Returns the bytes as a contiguous lowercase hex string.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    // Writing to a String cannot fail
    let _ = write_hex(&mut out, bytes);
    out
}
