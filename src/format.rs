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

//! ## ITEM FORMAT
//! **Based on SEMI E5§9.2.2**
//!
//! ----------------------------------------------------------------------------
//!
//! The list of format codes associated with various [Item] types, plus the
//! [Format] enum used to dispatch on a decoded format byte. The raw constants
//! exist so the codes can be referenced by name without the syntax overhead
//! of an enum when only the bit pattern is wanted (e.g. masking a header
//! byte).
//!
//! [Item]: crate::Item

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// ### LIST
/// **Based on SEMI E5§9.2.2**
///
/// **Format Code 0o00**
pub const LIST: u8 = 0b000000_00;

/// ### BINARY
/// **Based on SEMI E5§9.2.2**
///
/// **Format Code 0o10**
pub const BIN: u8 = 0b001000_00;

/// ### BOOLEAN
/// **Based on SEMI E5§9.2.2**
///
/// **Format Code 0o11**
pub const BOOL: u8 = 0b001001_00;

/// ### ASCII
/// **Based on SEMI E5§9.2.2**
///
/// **Format Code 0o20**
pub const ASCII: u8 = 0b010000_00;

/// ### 8-BYTE SIGNED INTEGER
/// **Based on SEMI E5§9.2.2**
///
/// **Format Code 0o30**
pub const I8: u8 = 0b011000_00;

/// ### 1-BYTE SIGNED INTEGER
/// **Based on SEMI E5§9.2.2**
///
/// **Format Code 0o31**
pub const I1: u8 = 0b011001_00;

/// ### 2-BYTE SIGNED INTEGER
/// **Based on SEMI E5§9.2.2**
///
/// **Format Code 0o32**
pub const I2: u8 = 0b011010_00;

/// ### 4-BYTE SIGNED INTEGER
/// **Based on SEMI E5§9.2.2**
///
/// **Format Code 0o34**
pub const I4: u8 = 0b011100_00;

/// ### 8-BYTE FLOATING POINT NUMBER
/// **Based on SEMI E5§9.2.2**
///
/// - **Format Code 0o40**
pub const F8: u8 = 0b100000_00;

/// ### 4-BYTE FLOATING POINT NUMBER
/// **Based on SEMI E5§9.2.2**
///
/// - **Format Code 0o44**
pub const F4: u8 = 0b100100_00;

/// ### 8-BYTE UNSIGNED INTEGER
/// **Based on SEMI E5§9.2.2**
///
/// - **Format Code 0o50**
pub const U8: u8 = 0b101000_00;

/// ### 1-BYTE UNSIGNED INTEGER
/// **Based on SEMI E5§9.2.2**
///
/// **Format Code 0o51**
pub const U1: u8 = 0b101001_00;

/// ### 2-BYTE UNSIGNED INTEGER
/// **Based on SEMI E5§9.2.2**
///
/// **Format Code 0o52**
pub const U2: u8 = 0b101010_00;

/// ### 4-BYTE UNSIGNED INTEGER
/// **Based on SEMI E5§9.2.2**
///
/// - **Format Code 0o54**
pub const U4: u8 = 0b101100_00;

/// ## ITEM FORMAT (TYPED)
///
/// The 14 valid format codes as an exhaustive enum, used wherever the codec
/// needs to dispatch on the type of an [Item] rather than just mask a byte.
/// There is deliberately no `Unknown` member here: a format byte outside this
/// set is a decode failure ([`ErrorKind::UnknownType`]), never a value.
///
/// [Item]: crate::Item
/// [`ErrorKind::UnknownType`]: crate::ErrorKind::UnknownType
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum Format {
  List = LIST,
  Bin = BIN,
  Bool = BOOL,
  Ascii = ASCII,
  I1 = I1,
  I2 = I2,
  I4 = I4,
  I8 = I8,
  U1 = U1,
  U2 = U2,
  U4 = U4,
  U8 = U8,
  F4 = F4,
  F8 = F8,
}

impl Format {
  /// The width in bytes of a single element of this format's payload.
  /// [`Format::List`] has no fixed element width: its length counts child
  /// nodes, not bytes.
  pub const fn element_width(self) -> Option<usize> {
    match self {
      Format::List => None,
      Format::Bin | Format::Bool | Format::Ascii | Format::I1 | Format::U1 => Some(1),
      Format::I2 | Format::U2 => Some(2),
      Format::I4 | Format::U4 | Format::F4 => Some(4),
      Format::I8 | Format::U8 | Format::F8 => Some(8),
    }
  }

  /// The SML tag used to render this format.
  pub const fn sml_tag(self) -> &'static str {
    match self {
      Format::List => "L",
      Format::Bin => "B",
      Format::Bool => "Boolean",
      Format::Ascii => "A",
      Format::I1 => "I1",
      Format::I2 => "I2",
      Format::I4 => "I4",
      Format::I8 => "I8",
      Format::U1 => "U1",
      Format::U2 => "U2",
      Format::U4 => "U4",
      Format::U8 => "U8",
      Format::F4 => "F4",
      Format::F8 => "F8",
    }
  }
}
