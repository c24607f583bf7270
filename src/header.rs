// Copyright © 2024 Nathaniel Hardesty
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the “Software”), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

//! ## ITEM HEADER
//! **Based on SEMI E5§9.3**
//!
//! ----------------------------------------------------------------------------
//!
//! An [Item]'s header is one format byte followed by 1, 2, or 3 big-endian
//! length bytes:
//!
//! ```text
//! 7 6 5 4 3 2   1 0
//! [  format  ] [N]
//! ```
//!
//! Bits 7..2 are the 6-bit format code; bits 1..0 are `N`, the number of
//! length bytes that follow. The encoder always chooses the minimal `N` that
//! admits the length; the decoder accepts any `N` a well-formed header can
//! carry, even a non-minimal one, for interop with other implementations.
//!
//! [Item]: crate::Item

use crate::error::Error;
use crate::format::Format;
use crate::MAX_LENGTH;

/// Appends the header (format byte + minimal length bytes) for `(format,
/// len)` to `out`. Fails with [`ErrorKind::LengthOverflow`] if `len` exceeds
/// [`MAX_LENGTH`]. The caller (the message codec) is responsible for not
/// having appended anything else to `out` yet for this node, so no rollback
/// is needed here.
///
/// [`ErrorKind::LengthOverflow`]: crate::ErrorKind::LengthOverflow
pub fn encode_header(format: Format, len: u32, out: &mut Vec<u8>) -> Result<(), Error> {
  let code: u8 = format.into();
  if len <= 0xFF {
    out.push(code | 1);
    out.push(len as u8);
  } else if len <= 0xFFFF {
    out.push(code | 2);
    out.extend_from_slice(&(len as u16).to_be_bytes());
  } else if len <= MAX_LENGTH {
    out.push(code | 3);
    out.extend_from_slice(&len.to_be_bytes()[1..4]);
  } else {
    return Err(Error::length_overflow(format!(
      "length {len} exceeds MAX_LENGTH ({MAX_LENGTH})"
    )));
  }
  Ok(())
}

/// Decodes one header from the front of `buf`, returning `(format, len,
/// consumed)` where `consumed = 1 + N`. Accepts any `N` in `{1, 2, 3}`
/// regardless of whether a smaller `N` would have sufficed (decoder
/// tolerance).
pub fn decode_header(buf: &[u8]) -> Result<(Format, u32, usize), Error> {
  let format_byte = *buf
    .first()
    .ok_or_else(|| Error::incomplete("buffer is empty, expected a format byte"))?;
  let n = (format_byte & 0b0000_0011) as usize;
  if n == 0 {
    return Err(Error::invalid_len_byte_count(
      "length-byte count N must be 1, 2, or 3, got 0",
    ));
  }
  let total = 1 + n;
  if buf.len() < total {
    return Err(Error::incomplete(format!(
      "header needs {total} bytes, buffer has {}",
      buf.len()
    )));
  }
  let mut len_bytes = [0u8; 4];
  len_bytes[4 - n..].copy_from_slice(&buf[1..total]);
  let len = u32::from_be_bytes(len_bytes);

  let code = format_byte & 0b1111_1100;
  let format = Format::try_from(code)
    .map_err(|_| Error::unknown_type(format!("format code {code:#010b} is not recognized")))?;

  Ok((format, len, total))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ErrorKind;

  #[test]
  fn minimal_n_boundaries() {
    let mut out = vec![];
    encode_header(Format::Bin, 0xFF, &mut out).unwrap();
    assert_eq!(out[0] & 0b11, 1);
    out.clear();
    encode_header(Format::Bin, 0x100, &mut out).unwrap();
    assert_eq!(out[0] & 0b11, 2);
    out.clear();
    encode_header(Format::Bin, 0x10000, &mut out).unwrap();
    assert_eq!(out[0] & 0b11, 3);
  }

  #[test]
  fn overflow_is_rejected() {
    let mut out = vec![];
    let err = encode_header(Format::Bin, MAX_LENGTH + 1, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthOverflow);
    assert!(out.is_empty());
  }

  #[test]
  fn decoder_accepts_non_minimal_n() {
    // format BIN with N=3 even though len=2 would fit in N=1.
    let buf = [crate::format::BIN | 3, 0x00, 0x00, 0x02];
    let (format, len, consumed) = decode_header(&buf).unwrap();
    assert_eq!(format, Format::Bin);
    assert_eq!(len, 2);
    assert_eq!(consumed, 4);
  }

  #[test]
  fn invalid_n_is_rejected() {
    let buf = [crate::format::BIN, 0x00];
    let err = decode_header(&buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidLenByteCount);
  }

  #[test]
  fn unknown_type_is_rejected() {
    let buf = [0b1111_1101u8, 0x00];
    let err = decode_header(&buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownType);
  }

  #[test]
  fn incomplete_header_is_rejected() {
    let buf = [crate::format::BIN | 2, 0x00];
    let err = decode_header(&buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Incomplete);
  }
}
