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

//! # ITEM
//! **Based on SEMI E5§9.6**
//!
//! ---------------------------------------------------------------------------
//!
//! The tree data model shared by the header codec, the message codec, and
//! the SML printer: a [List] of child [Item]s, or one of 13 homogeneous leaf
//! variants. There is no `Unknown` member. A format byte outside this set is
//! a decode failure, never a constructible value.
//!
//! [List]: Item::List

use crate::error::Error;
use crate::format::Format;

/// ## GENERIC ITEM
/// **Based on SEMI E5§9**
///
/// A node in a SECS-II message tree. [List]'s element is a child [Item];
/// every other variant's element is a fixed-width primitive. Equality is
/// structural: same variant, same element sequence, recursively for lists.
///
/// [List]: Item::List
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
  /// ### LIST
  /// **Based on SEMI E5§9.3**
  ///
  /// An ordered set of child [Item]s. Unlike every other variant, a list's
  /// stored length is the number of direct children, not a byte count.
  ///
  /// [Item]: Item
  List(Vec<Item>),

  /// ### BINARY
  /// **Based on SEMI E5§9.2.2**
  ///
  /// Opaque octets; no meaning is assigned to the value.
  Bin(Vec<u8>),

  /// ### BOOLEAN
  /// **Based on SEMI E5§9.2.2**
  ///
  /// One byte per element; zero is `false`, any nonzero byte is `true`.
  Bool(Vec<bool>),

  /// ### ASCII
  /// **Based on SEMI E5§9.2.2**
  ///
  /// 7-bit character string, stored as raw octets. Not NUL-terminated and
  /// not validated to have the high bit clear. The codec passes bytes
  /// through verbatim.
  Ascii(Vec<u8>),

  /// ### 1-BYTE SIGNED INTEGER
  I1(Vec<i8>),
  /// ### 2-BYTE SIGNED INTEGER
  I2(Vec<i16>),
  /// ### 4-BYTE SIGNED INTEGER
  I4(Vec<i32>),
  /// ### 8-BYTE SIGNED INTEGER
  I8(Vec<i64>),

  /// ### 1-BYTE UNSIGNED INTEGER
  U1(Vec<u8>),
  /// ### 2-BYTE UNSIGNED INTEGER
  U2(Vec<u16>),
  /// ### 4-BYTE UNSIGNED INTEGER
  U4(Vec<u32>),
  /// ### 8-BYTE UNSIGNED INTEGER
  U8(Vec<u64>),

  /// ### 4-BYTE FLOATING POINT NUMBER
  ///
  /// IEEE-754 binary32. Decoded from its bit pattern; NaN and infinities
  /// are preserved exactly.
  F4(Vec<f32>),
  /// ### 8-BYTE FLOATING POINT NUMBER
  ///
  /// IEEE-754 binary64. Decoded from its bit pattern; NaN and infinities
  /// are preserved exactly.
  F8(Vec<f64>),
}

impl Item {
  /// ### SINGLE BINARY ITEM
  ///
  /// Constructs a [Binary][Item::Bin] item with a single member.
  pub fn bin(value: u8) -> Self {
    Self::Bin(vec![value])
  }

  /// ### SINGLE BOOLEAN ITEM
  pub fn bool(value: bool) -> Self {
    Self::Bool(vec![value])
  }

  /// ### ASCII ITEM
  ///
  /// Constructs an [Ascii][Item::Ascii] item from any byte source.
  pub fn ascii(value: impl Into<Vec<u8>>) -> Self {
    Self::Ascii(value.into())
  }

  /// ### SINGLE 1-BYTE SIGNED INTEGER ITEM
  pub fn i1(value: i8) -> Self {
    Self::I1(vec![value])
  }
  /// ### SINGLE 2-BYTE SIGNED INTEGER ITEM
  pub fn i2(value: i16) -> Self {
    Self::I2(vec![value])
  }
  /// ### SINGLE 4-BYTE SIGNED INTEGER ITEM
  pub fn i4(value: i32) -> Self {
    Self::I4(vec![value])
  }
  /// ### SINGLE 8-BYTE SIGNED INTEGER ITEM
  pub fn i8(value: i64) -> Self {
    Self::I8(vec![value])
  }

  /// ### SINGLE 1-BYTE UNSIGNED INTEGER ITEM
  pub fn u1(value: u8) -> Self {
    Self::U1(vec![value])
  }
  /// ### SINGLE 2-BYTE UNSIGNED INTEGER ITEM
  pub fn u2(value: u16) -> Self {
    Self::U2(vec![value])
  }
  /// ### SINGLE 4-BYTE UNSIGNED INTEGER ITEM
  pub fn u4(value: u32) -> Self {
    Self::U4(vec![value])
  }
  /// ### SINGLE 8-BYTE UNSIGNED INTEGER ITEM
  pub fn u8(value: u64) -> Self {
    Self::U8(vec![value])
  }

  /// ### SINGLE 4-BYTE FLOATING POINT NUMBER ITEM
  pub fn f4(value: f32) -> Self {
    Self::F4(vec![value])
  }
  /// ### SINGLE 8-BYTE FLOATING POINT NUMBER ITEM
  pub fn f8(value: f64) -> Self {
    Self::F8(vec![value])
  }

  /// The variant tag of this item.
  pub fn kind(&self) -> Format {
    match self {
      Item::List(_) => Format::List,
      Item::Bin(_) => Format::Bin,
      Item::Bool(_) => Format::Bool,
      Item::Ascii(_) => Format::Ascii,
      Item::I1(_) => Format::I1,
      Item::I2(_) => Format::I2,
      Item::I4(_) => Format::I4,
      Item::I8(_) => Format::I8,
      Item::U1(_) => Format::U1,
      Item::U2(_) => Format::U2,
      Item::U4(_) => Format::U4,
      Item::U8(_) => Format::U8,
      Item::F4(_) => Format::F4,
      Item::F8(_) => Format::F8,
    }
  }

  /// Element count: child count for [`List`](Item::List), element count for
  /// every leaf. This is the `count` the SML printer shows, not the wire
  /// length-in-bytes.
  pub fn len(&self) -> usize {
    match self {
      Item::List(v) => v.len(),
      Item::Bin(v) => v.len(),
      Item::Bool(v) => v.len(),
      Item::Ascii(v) => v.len(),
      Item::I1(v) => v.len(),
      Item::I2(v) => v.len(),
      Item::I4(v) => v.len(),
      Item::I8(v) => v.len(),
      Item::U1(v) => v.len(),
      Item::U2(v) => v.len(),
      Item::U4(v) => v.len(),
      Item::U8(v) => v.len(),
      Item::F4(v) => v.len(),
      Item::F8(v) => v.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The wire payload length in bytes: `count * width` for leaves, the
  /// child count for [`List`](Item::List).
  pub(crate) fn wire_len(&self) -> usize {
    match self.kind().element_width() {
      Some(width) => self.len() * width,
      None => self.len(),
    }
  }

  pub fn as_list(&self) -> Option<&[Item]> {
    match self {
      Item::List(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_bin(&self) -> Option<&[u8]> {
    match self {
      Item::Bin(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_bool(&self) -> Option<&[bool]> {
    match self {
      Item::Bool(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_ascii(&self) -> Option<&[u8]> {
    match self {
      Item::Ascii(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_i1(&self) -> Option<&[i8]> {
    match self {
      Item::I1(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_i2(&self) -> Option<&[i16]> {
    match self {
      Item::I2(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_i4(&self) -> Option<&[i32]> {
    match self {
      Item::I4(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_i8(&self) -> Option<&[i64]> {
    match self {
      Item::I8(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_u1(&self) -> Option<&[u8]> {
    match self {
      Item::U1(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_u2(&self) -> Option<&[u16]> {
    match self {
      Item::U2(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_u4(&self) -> Option<&[u32]> {
    match self {
      Item::U4(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_u8(&self) -> Option<&[u64]> {
    match self {
      Item::U8(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_f4(&self) -> Option<&[f32]> {
    match self {
      Item::F4(v) => Some(v),
      _ => None,
    }
  }
  pub fn as_f8(&self) -> Option<&[f64]> {
    match self {
      Item::F8(v) => Some(v),
      _ => None,
    }
  }

  /// Appends this leaf's body (element bytes only, no header) to `out`.
  /// Panics if called on [`List`](Item::List). Lists have no body of their
  /// own; the message codec recurses into their children instead.
  pub(crate) fn encode_body(&self, out: &mut Vec<u8>) {
    match self {
      Item::List(_) => unreachable!("List has no body; the message codec recurses instead"),
      Item::Bin(v) => out.extend_from_slice(v),
      Item::Bool(v) => out.extend(v.iter().map(|&b| b as u8)),
      Item::Ascii(v) => out.extend_from_slice(v),
      Item::I1(v) => out.extend(v.iter().flat_map(|x| x.to_be_bytes())),
      Item::I2(v) => out.extend(v.iter().flat_map(|x| x.to_be_bytes())),
      Item::I4(v) => out.extend(v.iter().flat_map(|x| x.to_be_bytes())),
      Item::I8(v) => out.extend(v.iter().flat_map(|x| x.to_be_bytes())),
      Item::U1(v) => out.extend_from_slice(v),
      Item::U2(v) => out.extend(v.iter().flat_map(|x| x.to_be_bytes())),
      Item::U4(v) => out.extend(v.iter().flat_map(|x| x.to_be_bytes())),
      Item::U8(v) => out.extend(v.iter().flat_map(|x| x.to_be_bytes())),
      Item::F4(v) => out.extend(v.iter().flat_map(|x| x.to_be_bytes())),
      Item::F8(v) => out.extend(v.iter().flat_map(|x| x.to_be_bytes())),
    }
  }
}

/// Decodes `len` bytes of `buf` as the body of a leaf of type `format`.
/// `format` must not be [`Format::List`]. The message codec handles lists
/// itself. Returns the decoded item; the caller already knows `len` bytes
/// were consumed.
pub(crate) fn decode_body(format: Format, len: u32, buf: &[u8]) -> Result<Item, Error> {
  let len = len as usize;
  if buf.len() < len {
    return Err(Error::incomplete(format!(
      "leaf body needs {len} bytes, buffer has {}",
      buf.len()
    )));
  }
  let body = &buf[..len];

  let width = format
    .element_width()
    .expect("decode_body is never called with Format::List");
  if len % width != 0 {
    return Err(Error::unaligned_length(format!(
      "length {len} is not a multiple of element width {width}"
    )));
  }
  let count = len / width;

  Ok(match format {
    Format::List => unreachable!(),
    Format::Bin => Item::Bin(body.to_vec()),
    Format::Bool => Item::Bool(body.iter().map(|&b| b != 0).collect()),
    Format::Ascii => Item::Ascii(body.to_vec()),
    Format::I1 => Item::I1(body.iter().map(|&b| b as i8).collect()),
    Format::I2 => Item::I2(read_be::<2, i16>(body, count, i16::from_be_bytes)),
    Format::I4 => Item::I4(read_be::<4, i32>(body, count, i32::from_be_bytes)),
    Format::I8 => Item::I8(read_be::<8, i64>(body, count, i64::from_be_bytes)),
    Format::U1 => Item::U1(body.to_vec()),
    Format::U2 => Item::U2(read_be::<2, u16>(body, count, u16::from_be_bytes)),
    Format::U4 => Item::U4(read_be::<4, u32>(body, count, u32::from_be_bytes)),
    Format::U8 => Item::U8(read_be::<8, u64>(body, count, u64::from_be_bytes)),
    Format::F4 => Item::F4(read_be::<4, f32>(body, count, f32::from_be_bytes)),
    Format::F8 => Item::F8(read_be::<8, f64>(body, count, f64::from_be_bytes)),
  })
}

/// Reads `count` big-endian elements of width `WIDTH` out of `body`, which
/// must already be confirmed long enough and aligned.
fn read_be<const WIDTH: usize, T>(
  body: &[u8],
  count: usize,
  from_be_bytes: impl Fn([u8; WIDTH]) -> T,
) -> Vec<T> {
  let mut out = Vec::with_capacity(count);
  for chunk in body.chunks_exact(WIDTH).take(count) {
    let mut bytes = [0u8; WIDTH];
    bytes.copy_from_slice(chunk);
    out.push(from_be_bytes(bytes));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_leaf_round_trips_through_body_codec() {
    let item = Item::U2(vec![]);
    let mut buf = vec![];
    item.encode_body(&mut buf);
    assert!(buf.is_empty());
    let decoded = decode_body(Format::U2, 0, &buf).unwrap();
    assert_eq!(decoded, item);
  }

  #[test]
  fn boolean_decode_accepts_any_nonzero_byte() {
    let buf = [0x01, 0xFF, 0x00];
    let decoded = decode_body(Format::Bool, 3, &buf).unwrap();
    assert_eq!(decoded, Item::Bool(vec![true, true, false]));
  }

  #[test]
  fn unaligned_u2_length_is_rejected() {
    let buf = [0x00, 0x01, 0x00];
    let err = decode_body(Format::U2, 3, &buf).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::UnalignedLength);
  }

  #[test]
  fn float_round_trip_preserves_nan_bit_pattern() {
    let item = Item::F8(vec![f64::NAN]);
    let mut buf = vec![];
    item.encode_body(&mut buf);
    let decoded = decode_body(Format::F8, 8, &buf).unwrap();
    match decoded {
      Item::F8(v) => assert_eq!(v[0].to_bits(), f64::NAN.to_bits()),
      _ => panic!("wrong variant"),
    }
  }

  #[test]
  fn typed_projection_matches_variant_only() {
    let item = Item::U1(vec![1, 2, 3]);
    assert_eq!(item.as_u1(), Some(&[1u8, 2, 3][..]));
    assert_eq!(item.as_bin(), None);
  }
}
