//! Selector dispatch-table recognition and extraction.
//!
//! Solidity-style runtime code begins function dispatch with a fixed
//! prologue that bounds-checks the calldata length, loads the first calldata
//! word and shifts it right to isolate the 4-byte selector. What follows is
//! a run of dispatch entries in one of two shapes:
//!
//! * equality form `DUP1 PUSH3/4 <sel> EQ PUSH2/3 <tag> JUMPI`: a leaf;
//!   the pushed value is a selector the contract dispatches on;
//! * split form `DUP1 PUSH3/4 <pivot> GT PUSH2/3 <tag> JUMPI`: a
//!   binary-search branch node; the pivot is not a selector, and both halves
//!   of the table follow sequentially in the instruction stream, so one
//!   linear scan covers them.
//!
//! The table ends at its no-match fallback, `PUSH0/PUSH1 DUP1 REVERT`.
//! Nested or non-sequential table layouts would defeat the linear scan; none
//! have been observed in compiler output, but extraction from such code is a
//! known gap.

use std::collections::BTreeSet;

use crate::decoder::Scanner;
use crate::matcher::{pattern_matches, scan_for, Matcher, Pattern};
use crate::opcode::Opcode;

fn prologue_pattern() -> Pattern {
    vec![
        Matcher::op(Opcode::PUSH1),
        Matcher::op(Opcode::CALLDATASIZE),
        Matcher::op(Opcode::LT),
        Matcher::op_in(&[Opcode::PUSH2, Opcode::PUSH3]),
        Matcher::op(Opcode::JUMPI),
        Matcher::op(Opcode::PUSH1),
        Matcher::op(Opcode::CALLDATALOAD),
        Matcher::op(Opcode::PUSH1),
        Matcher::op(Opcode::SHR),
    ]
}

fn equality_entry_pattern() -> Pattern {
    vec![
        Matcher::op(Opcode::DUP1),
        Matcher::op_in(&[Opcode::PUSH3, Opcode::PUSH4]),
        Matcher::op(Opcode::EQ),
        Matcher::op_in(&[Opcode::PUSH2, Opcode::PUSH3]),
        Matcher::op(Opcode::JUMPI),
    ]
}

fn split_entry_pattern() -> Pattern {
    vec![
        Matcher::op(Opcode::DUP1),
        Matcher::op_in(&[Opcode::PUSH3, Opcode::PUSH4]),
        Matcher::op(Opcode::GT),
        Matcher::op_in(&[Opcode::PUSH2, Opcode::PUSH3]),
        Matcher::op(Opcode::JUMPI),
    ]
}

fn end_of_table_pattern() -> Pattern {
    vec![
        Matcher::op_in(&[Opcode::PUSH0, Opcode::PUSH1]),
        Matcher::op(Opcode::DUP1),
        Matcher::op(Opcode::REVERT),
    ]
}

/// Extract every 4-byte selector the dispatch table branches on,
/// hex-encoded and deduplicated. Empty when no dispatch prologue is found.
pub fn extract_selectors(code: &[u8]) -> BTreeSet<String> {
    let mut selectors = BTreeSet::new();
    let mut scanner = Scanner::new(code);
    if !scan_for(&mut scanner, &prologue_pattern()) {
        log::debug!("no dispatch prologue in {} bytes", code.len());
        return selectors;
    }

    let equality = equality_entry_pattern();
    let split = split_entry_pattern();
    let end = end_of_table_pattern();

    // Read the first entry after the prologue; a split node there means the
    // binary-search layout, whose halves follow in stream order anyway.
    for _ in 0..equality.len() {
        if !scanner.advance() {
            return selectors;
        }
    }
    if pattern_matches(&scanner.window(split.len()), &split) {
        scanner.advance();
    }

    loop {
        let window = scanner.window(equality.len());
        if pattern_matches(&window, &equality) {
            selectors.insert(selector_hex(&window[1].operand));
        }
        if pattern_matches(&scanner.window(end.len()), &end) {
            break;
        }
        if !scanner.advance() {
            break;
        }
    }
    log::debug!("extracted {} selectors", selectors.len());
    selectors
}

/// Left-pad a pushed 3- or 4-byte selector to the canonical 8-hex-digit form.
fn selector_hex(operand: &[u8]) -> String {
    let mut buf = [0u8; 4];
    let n = operand.len().min(4);
    buf[4 - n..].copy_from_slice(&operand[operand.len() - n..]);
    hex::encode(buf)
}

const ERC20_SELECTORS: [&str; 6] = [
    "dd62ed3e", // allowance(address,address)
    "095ea7b3", // approve(address,uint256)
    "70a08231", // balanceOf(address)
    "18160ddd", // totalSupply()
    "a9059cbb", // transfer(address,uint256)
    "23b872dd", // transferFrom(address,address,uint256)
];

const ERC721_SELECTORS: [&str; 10] = [
    "095ea7b3", // approve(address,uint256)
    "70a08231", // balanceOf(address)
    "081812fc", // getApproved(uint256)
    "e985e9c5", // isApprovedForAll(address,address)
    "6352211e", // ownerOf(uint256)
    "42842e0e", // safeTransferFrom(address,address,uint256)
    "b88d4fde", // safeTransferFrom(address,address,uint256,bytes)
    "a22cb465", // setApprovalForAll(address,bool)
    "01ffc9a7", // supportsInterface(bytes4)
    "23b872dd", // transferFrom(address,address,uint256)
];

/// Whether the dispatch table covers the full ERC-20 method set.
pub fn is_erc20(code: &[u8]) -> bool {
    contains_all(&extract_selectors(code), &ERC20_SELECTORS)
}

/// Whether the dispatch table covers the full ERC-721 method set.
pub fn is_erc721(code: &[u8]) -> bool {
    contains_all(&extract_selectors(code), &ERC721_SELECTORS)
}

fn contains_all(extracted: &BTreeSet<String>, wanted: &[&str]) -> bool {
    wanted.iter().all(|sel| extracted.contains(*sel))
}
