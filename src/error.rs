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

//! ## CODEC ERROR
//! **Based on SEMI E5§9**
//!
//! Errors are values, never panics: every fallible operation in this crate
//! returns a [`Result<T, Error>`]. [`ErrorKind`] is the stable, matchable
//! surface; the attached message is diagnostic only, per the propagation
//! policy below.

use std::fmt;

/// ## ERROR KIND
///
/// The machine-matchable taxonomy of codec failures. Callers should match on
/// this, not on [`Error`]'s `Display` text, which may change between
/// versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
  /// The buffer ended before the declared length was satisfied.
  Incomplete,

  /// A header's length-byte count was zero (only 1, 2, or 3 are legal).
  InvalidLenByteCount,

  /// The header's format code is not one of the 14 known variants.
  UnknownType,

  /// A leaf item's declared length is not a multiple of its element width.
  UnalignedLength,

  /// A declared length exceeds [`MAX_LENGTH`](crate::MAX_LENGTH).
  LengthOverflow,

  /// Nesting depth exceeded the configured maximum.
  TooDeep,
}

/// ## ERROR
///
/// A codec failure: a stable [`ErrorKind`] plus a human-readable diagnostic.
/// The deepest failure in a recursive encode/decode is returned verbatim to
/// the top-level caller. No error is remapped or swallowed en route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
  kind: ErrorKind,
  message: String,
}

impl Error {
  pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
    }
  }

  pub(crate) fn incomplete(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::Incomplete, message)
  }

  pub(crate) fn invalid_len_byte_count(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::InvalidLenByteCount, message)
  }

  pub(crate) fn unknown_type(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::UnknownType, message)
  }

  pub(crate) fn unaligned_length(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::UnalignedLength, message)
  }

  pub(crate) fn length_overflow(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::LengthOverflow, message)
  }

  pub(crate) fn too_deep(message: impl Into<String>) -> Self {
    Self::new(ErrorKind::TooDeep, message)
  }

  /// The stable, machine-matchable kind of this error.
  pub fn kind(&self) -> ErrorKind {
    self.kind
  }

  /// The diagnostic message. Not part of the contract; match on
  /// [`Error::kind`] instead.
  pub fn message(&self) -> &str {
    &self.message
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      ErrorKind::Incomplete => write!(f, "incomplete buffer: {}", self.message),
      ErrorKind::InvalidLenByteCount => {
        write!(f, "invalid length-byte count: {}", self.message)
      }
      ErrorKind::UnknownType => write!(f, "unknown item type: {}", self.message),
      ErrorKind::UnalignedLength => write!(f, "unaligned item length: {}", self.message),
      ErrorKind::LengthOverflow => write!(f, "length exceeds MAX_LENGTH: {}", self.message),
      ErrorKind::TooDeep => write!(f, "nesting too deep: {}", self.message),
    }
  }
}

impl std::error::Error for Error {}
