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

//! ## MESSAGE CODEC
//!
//! The recursive driver that composes the header codec (`crate::header`)
//! with either a leaf body (`crate::item::decode_body`/`Item::encode_body`)
//! or a sequence of child messages. This is the only place in the crate
//! where `List` recursion happens; the [Item Body Codec] handles only the
//! 13 leaf types.
//!
//! [Item Body Codec]: crate::item

use crate::error::Error;
use crate::format::Format;
use crate::header;
use crate::item::{self, Item};
use crate::{MAX_DEPTH, MAX_LENGTH};

/// Encodes `item` to its wire bytes. Fails only if some node's declared
/// length would exceed [`MAX_LENGTH`] or the tree nests deeper than
/// [`MAX_DEPTH`]; on failure, no partial output escapes this call. Encode is
/// all-or-nothing.
pub fn encode(item: &Item) -> Result<Vec<u8>, Error> {
  let mut out = Vec::new();
  encode_node(item, &mut out, 0)?;
  Ok(out)
}

/// Appends `item`'s wire bytes to `out`, returning the number of bytes
/// appended. On failure, `out` is truncated back to its length at entry.
/// Callers that build up a buffer across multiple `encode_into` calls can
/// rely on each call being all-or-nothing.
pub fn encode_into(item: &Item, out: &mut Vec<u8>) -> Result<usize, Error> {
  let start = out.len();
  encode_node(item, out, 0)?;
  Ok(out.len() - start)
}

fn encode_node(item: &Item, out: &mut Vec<u8>, depth: usize) -> Result<(), Error> {
  let start = out.len();
  if let Err(e) = encode_node_uninstrumented(item, out, depth) {
    out.truncate(start);
    return Err(e);
  }
  Ok(())
}

fn encode_node_uninstrumented(item: &Item, out: &mut Vec<u8>, depth: usize) -> Result<(), Error> {
  if depth > MAX_DEPTH {
    return Err(Error::too_deep(format!(
      "nesting exceeds the maximum depth of {MAX_DEPTH}"
    )));
  }
  let wire_len = item.wire_len();
  if wire_len > MAX_LENGTH as usize {
    return Err(Error::length_overflow(format!(
      "{} has length {wire_len}, exceeding MAX_LENGTH ({MAX_LENGTH})",
      match item {
        Item::List(_) => "list child count",
        _ => "leaf payload size",
      }
    )));
  }
  header::encode_header(item.kind(), wire_len as u32, out)?;
  match item {
    Item::List(children) => {
      for child in children {
        encode_node(child, out, depth + 1)?;
      }
    }
    leaf => leaf.encode_body(out),
  }
  Ok(())
}

/// Decodes one message from the front of `buf`, returning `(item, consumed)`.
/// A trailing suffix beyond the decoded message is left alone. `consumed`
/// tells the caller where it starts.
pub fn decode(buf: &[u8]) -> Result<(Item, usize), Error> {
  decode_node(buf, 0)
}

fn decode_node(buf: &[u8], depth: usize) -> Result<(Item, usize), Error> {
  if depth > MAX_DEPTH {
    return Err(Error::too_deep(format!(
      "nesting exceeds the maximum depth of {MAX_DEPTH}"
    )));
  }
  let (format, len, header_len) = header::decode_header(buf)?;
  let rest = &buf[header_len..];

  if format == Format::List {
    // Cautious allocation: an attacker can declare up to MAX_LENGTH
    // children without supplying any bytes for them. Each child needs
    // at least 2 bytes on the wire, so the remaining buffer bounds a
    // sane upper bound on how many children we ever pre-reserve for.
    let capacity = (len as usize).min(rest.len());
    let mut children = Vec::with_capacity(capacity);
    let mut consumed = header_len;
    for _ in 0..len {
      let (child, child_consumed) = decode_node(&buf[consumed..], depth + 1)?;
      children.push(child);
      consumed += child_consumed;
    }
    Ok((Item::List(children), consumed))
  } else {
    let value = item::decode_body(format, len, rest)?;
    Ok((value, header_len + len as usize))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ErrorKind;

  #[test]
  fn round_trips_nested_tree_with_trailing_suffix() {
    // List = [ U1{1,2}, List{U1{1,2}}, ASCII"msg", U1{} ]
    let value = Item::List(vec![
      Item::U1(vec![1, 2]),
      Item::List(vec![Item::U1(vec![1, 2])]),
      Item::Ascii(b"msg".to_vec()),
      Item::U1(vec![]),
    ]);
    let mut bytes = encode(&value).unwrap();
    assert_eq!(bytes.len(), 19);
    bytes.extend_from_slice(&[0xAA, 0xBB, 0xCC]);

    let (decoded, consumed) = decode(&bytes).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(consumed, 19);
  }

  #[test]
  fn encode_rolls_back_on_overflow_inside_a_list() {
    let mut out = vec![0xDE, 0xAD];
    let huge = Item::Bin(vec![0u8; (MAX_LENGTH as usize) + 1]);
    let value = Item::List(vec![Item::u1(1), huge]);
    let err = encode_into(&value, &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthOverflow);
    assert_eq!(out, vec![0xDE, 0xAD]);
  }

  #[test]
  fn decode_fails_incomplete_when_list_runs_out_of_children() {
    // List header declares 2 children, buffer only supplies one.
    let mut buf = vec![crate::format::LIST | 1, 0x02];
    buf.extend(encode(&Item::u1(7)).unwrap());
    let err = decode(&buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Incomplete);
  }

  #[test]
  fn excessive_nesting_is_rejected_on_decode() {
    // Build a buffer nesting single-child lists MAX_DEPTH + 2 deep.
    let mut value = Item::List(vec![]);
    for _ in 0..(MAX_DEPTH + 2) {
      value = Item::List(vec![value]);
    }
    // Build bytes by hand since `encode` would itself refuse this depth.
    fn encode_unchecked(item: &Item, out: &mut Vec<u8>) {
      match item {
        Item::List(children) => {
          out.push(crate::format::LIST | 1);
          out.push(children.len() as u8);
          for c in children {
            encode_unchecked(c, out);
          }
        }
        _ => unreachable!(),
      }
    }
    let mut buf = vec![];
    encode_unchecked(&value, &mut buf);
    let err = decode(&buf).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooDeep);
  }

  #[test]
  fn excessive_nesting_is_rejected_on_encode() {
    let mut value = Item::List(vec![]);
    for _ in 0..(MAX_DEPTH + 2) {
      value = Item::List(vec![value]);
    }
    let err = encode(&value).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooDeep);
  }
}
