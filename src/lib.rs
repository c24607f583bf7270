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

//! # SEMI EQUIPMENT COMMUNICATIONS STANDARD 2 (SECS-II) MESSAGE CONTENT
//! **Based on:**
//! - **[SEMI E5]-0712**
//!
//! This third-party codebase will be updated to reflect more up-to-date SEMI
//! standards if/when they can be acquired for this purpose.
//!
//! ---------------------------------------------------------------------------
//!
//! [SECS-II] is a Presentation Protocol designed to facilitate a common
//! communications language between semiconductor equipment and host
//! controllers. This crate implements only the message-content layer: the
//! [Item] tree, the binary codec that is symmetric between [encode] and
//! [decode], and the [SML] pretty-printer.
//!
//! It does not open sockets or frame messages for a transport (SECS-I,
//! HSMS), and it does not validate stream/function semantics or specific
//! item dictionaries. Those are schema concerns layered on top of a
//! decoded [Item] tree, not wire-format concerns.
//!
//! [SECS-II]: crate
//! [SML]:     crate::render_sml
//!
//! ---------------------------------------------------------------------------
//!
//! ## REFERENCED STANDARDS
//!
//! - SEMI E5  - SEMI Equipment Communications Standard 2 (SECS-II) Message Content
//! - IEEE 754 - Standards for Binary Floating Point Arithmetic
//! - ANSI X3.4-1977 - Code for Information Interchange (ASCII)
//!
//! [SEMI E5]: https://store-us.semi.org/products/e00500-semi-e5-specification-for-semi-equipment-communications-standard-2-message-content-secs-ii

mod codec;
mod error;
pub mod format;
mod header;
mod item;
mod sml;

pub use codec::{decode, encode, encode_into};
pub use error::{Error, ErrorKind};
pub use format::Format;
pub use item::Item;
pub use sml::{render_sml, render_sml_with_indent};

/// ## MAXIMUM LENGTH
/// **Based on SEMI E5§9.3**
///
/// The largest length a header's length bytes can carry: `2^24 - 1`, since
/// at most 3 length bytes follow the format byte. Applies to a leaf's
/// payload byte count and to a list's direct child count alike.
pub const MAX_LENGTH: u32 = 0xFF_FFFF;

/// ## MAXIMUM NESTING DEPTH
///
/// The default cap on recursive `List` nesting for both [`encode`] and
/// [`decode`]. Not part of SEMI E5; the standard places no limit on nesting
/// depth, so this crate imposes one to keep adversarial input from
/// exhausting the call stack.
pub const MAX_DEPTH: usize = 64;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_binary_round_trips() {
    let value = Item::Bin(vec![]);
    let bytes = encode(&value).unwrap();
    assert_eq!(bytes, vec![0x21, 0x00]);
    let (decoded, consumed) = decode(&bytes).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(consumed, 2);
  }

  #[test]
  fn boolean_encode_and_tolerant_decode() {
    let value = Item::Bool(vec![true, false]);
    let bytes = encode(&value).unwrap();
    assert_eq!(bytes, vec![0x25, 0x02, 0x01, 0x00]);

    let (decoded, _) = decode(&[0x25, 0x03, 0x01, 0xFF, 0x00]).unwrap();
    assert_eq!(decoded, Item::Bool(vec![true, true, false]));
  }

  #[test]
  fn u1_of_256_uses_two_length_bytes() {
    let value = Item::U1(vec![0xFF; 256]);
    let bytes = encode(&value).unwrap();
    assert_eq!(&bytes[0..2], &[0xA6, 0x01, 0x00][0..2]);
    assert_eq!(bytes[2], 0x00);
    assert_eq!(bytes[3], 0xFF);
    assert_eq!(bytes.len(), 3 + 256);
    let (decoded, consumed) = decode(&bytes).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(consumed, bytes.len());
  }

  #[test]
  fn u2_truncated_buffer_is_incomplete() {
    let value = Item::U2(vec![1, 2, 3, 4]);
    let bytes = encode(&value).unwrap();
    assert_eq!(
      bytes,
      vec![0xA9, 0x08, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04]
    );
    let truncated = &bytes[..9];
    let err = decode(truncated).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Incomplete);
  }

  #[test]
  fn unknown_type_is_rejected() {
    let err = decode(&[0xFD, 0x01, 0xFF]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownType);
  }

  #[test]
  fn boundary_length_encodes_use_minimal_n() {
    for (len, expected_n) in [(0xFFu32, 1u8), (0x100, 2), (0x10000, 3)] {
      let value = Item::Bin(vec![0u8; len as usize]);
      let bytes = encode(&value).unwrap();
      assert_eq!(bytes[0] & 0b11, expected_n, "len={len}");
    }
  }

  #[test]
  fn empty_list_round_trips() {
    let value = Item::List(vec![]);
    let bytes = encode(&value).unwrap();
    assert_eq!(bytes, vec![0b0000_0001, 0x00]);
    let (decoded, consumed) = decode(&bytes).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(consumed, 2);
  }

  #[test]
  fn length_overflow_rejected_for_leaf() {
    let huge_leaf = Item::Bin(vec![0u8; MAX_LENGTH as usize + 1]);
    assert_eq!(encode(&huge_leaf).unwrap_err().kind(), ErrorKind::LengthOverflow);
  }
}
