//! Delegating-proxy detection.

use crate::decoder::Scanner;
use crate::matcher::{scan_for, Matcher, Pattern};
use crate::opcode::Opcode;

/// The minimal forwarding-proxy body: copy the full calldata into memory,
/// DELEGATECALL with all remaining gas, copy the return data back, then
/// branch on the call's status flag into a RETURN or REVERT epilogue.
fn proxy_pattern() -> Pattern {
    vec![
        Matcher::op(Opcode::CALLDATASIZE),
        Matcher::push_value("0x00"),
        Matcher::op(Opcode::DUP1),
        Matcher::op(Opcode::CALLDATACOPY),
        Matcher::push_value("0x00"),
        Matcher::op(Opcode::DUP1),
        Matcher::op(Opcode::CALLDATASIZE),
        Matcher::push_value("0x00"),
        Matcher::op(Opcode::DUP5),
        Matcher::op(Opcode::GAS),
        Matcher::op(Opcode::DELEGATECALL),
        Matcher::op(Opcode::RETURNDATASIZE),
        Matcher::push_value("0x00"),
        Matcher::op(Opcode::DUP1),
        Matcher::op(Opcode::RETURNDATACOPY),
        Matcher::op(Opcode::DUP1),
        Matcher::op(Opcode::DUP1),
        Matcher::op(Opcode::ISZERO),
        Matcher::op(Opcode::PUSH2),
        Matcher::op(Opcode::JUMPI),
        Matcher::op(Opcode::RETURNDATASIZE),
        Matcher::push_value("0x00"),
        Matcher::op(Opcode::RETURN),
        Matcher::op(Opcode::JUMPDEST),
        Matcher::op(Opcode::RETURNDATASIZE),
        Matcher::push_value("0x00"),
        Matcher::op(Opcode::REVERT),
    ]
}

/// Whether the canonical minimal-proxy template occurs anywhere in `code`.
///
/// A match is a strong (not certain) signal that every call is forwarded to
/// another contract via DELEGATECALL. No match means only that this specific
/// proxy shape was not found; semantically equivalent but reordered
/// instruction sequences are not recognized.
pub fn is_proxy(code: &[u8]) -> bool {
    let mut scanner = Scanner::new(code);
    let found = scan_for(&mut scanner, &proxy_pattern());
    log::debug!("proxy template {} in {} bytes", if found { "found" } else { "not found" }, code.len());
    found
}
