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

//! SML (SECS Message Language) rendering: a minor output sink for turning
//! an [Item] tree into the indented, bracketed text form used in logs.
//!
//! [Item]: crate::Item

use crate::item::Item;
use std::fmt::Write as _;

const DEFAULT_INDENT_WIDTH: usize = 4;

/// Renders `item` as SML with the default indent width of 4 spaces per
/// nesting level.
pub fn render_sml(item: &Item) -> String {
  render_sml_with_indent(item, DEFAULT_INDENT_WIDTH)
}

/// Renders `item` as SML, indenting `indent_width` spaces per nesting level.
pub fn render_sml_with_indent(item: &Item, indent_width: usize) -> String {
  let mut out = String::new();
  write_node(item, 0, indent_width, &mut out);
  out
}

fn write_node(item: &Item, level: usize, indent_width: usize, out: &mut String) {
  let pad = " ".repeat(level * indent_width);
  let tag = item.kind().sml_tag();
  let count = item.len();

  if let Item::List(children) = item {
    if children.is_empty() {
      let _ = write!(out, "{pad}<{tag} [0]\n{pad}>");
      return;
    }
    let _ = write!(out, "{pad}<{tag} [{count}]\n");
    for child in children {
      write_node(child, level + 1, indent_width, out);
      out.push('\n');
    }
    let _ = write!(out, "{pad}>");
    return;
  }

  if count == 0 {
    let _ = write!(out, "{pad}<{tag} [0]>");
    return;
  }

  let _ = write!(out, "{pad}<{tag} [{count}]");
  match item {
    Item::Bin(v) => {
      for b in v {
        let _ = write!(out, " 0x{b:02X}");
      }
    }
    Item::Bool(v) => {
      for b in v {
        let _ = write!(out, " {}", if *b { "true" } else { "false" });
      }
    }
    Item::Ascii(v) => {
      let _ = write!(out, " \"{}\"", String::from_utf8_lossy(v));
    }
    Item::I1(v) => write_ints(v, out),
    Item::I2(v) => write_ints(v, out),
    Item::I4(v) => write_ints(v, out),
    Item::I8(v) => write_ints(v, out),
    Item::U1(v) => write_ints(v, out),
    Item::U2(v) => write_ints(v, out),
    Item::U4(v) => write_ints(v, out),
    Item::U8(v) => write_ints(v, out),
    Item::F4(v) => {
      for f in v {
        let _ = write!(out, " {f}");
      }
    }
    Item::F8(v) => {
      for f in v {
        let _ = write!(out, " {f}");
      }
    }
    Item::List(_) => unreachable!("handled above"),
  }
  out.push('>');
}

fn write_ints<T: std::fmt::Display>(values: &[T], out: &mut String) {
  for v in values {
    let _ = write!(out, " {v}");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_list_is_a_literal_newline_between_brackets() {
    assert_eq!(render_sml(&Item::List(vec![])), "<L [0]\n>");
  }

  #[test]
  fn leaf_forms_match_expected_text() {
    assert_eq!(render_sml(&Item::Bin(vec![])), "<B [0]>");
    assert_eq!(render_sml(&Item::Bin(vec![1, 2])), "<B [2] 0x01 0x02>");
    assert_eq!(render_sml(&Item::Bool(vec![true, false])), "<Boolean [2] true false>");
    assert_eq!(render_sml(&Item::Ascii(b"hello".to_vec())), "<A [5] \"hello\">");
    assert_eq!(render_sml(&Item::I2(vec![-1, 2])), "<I2 [2] -1 2>");
  }

  #[test]
  fn mixed_nested_tree_renders_with_indentation() {
    let value = Item::List(vec![
      Item::I1(vec![]),
      Item::Bin(vec![0x01, 0x02]),
      Item::List(vec![Item::I1(vec![]), Item::Bin(vec![0x01, 0x02])]),
      Item::Ascii(b"hello".to_vec()),
    ]);
    let expected = "<L [4]\n    <I1 [0]>\n    <B [2] 0x01 0x02>\n    <L [2]\n        <I1 [0]>\n        <B [2] 0x01 0x02>\n    >\n    <A [5] \"hello\">\n>";
    assert_eq!(render_sml(&value), expected);
  }
}
