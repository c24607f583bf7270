//! Boundary cases expensive enough in memory or time that they belong in an
//! integration binary rather than the crate's inline unit tests.

use secs2::{encode, Error, ErrorKind, Item, MAX_LENGTH};

#[test]
fn length_overflow_rejected_for_a_list_with_too_many_children() {
    // MAX_LENGTH + 1 zero-sized children: a list's declared length is its
    // child count, so this is the cheapest possible way to cross the
    // boundary for Item::List specifically.
    let huge_list = Item::List(vec![Item::U1(vec![]); MAX_LENGTH as usize + 1]);
    let err = encode(&huge_list).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthOverflow);
}

#[test]
fn length_at_the_boundary_is_accepted() {
    let at_boundary = Item::Bin(vec![0u8; MAX_LENGTH as usize]);
    let bytes = encode(&at_boundary).unwrap();
    assert_eq!(bytes[0] & 0b11, 3);
    assert_eq!(bytes.len(), 1 + 3 + MAX_LENGTH as usize);
}

fn assert_is_send_and_sync<T: Send + Sync>() {}

#[test]
fn public_types_are_send_and_sync() {
    assert_is_send_and_sync::<Item>();
    assert_is_send_and_sync::<Error>();
}
