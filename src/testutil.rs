//! Test-only helpers for assembling synthetic bytecode streams.

use crate::opcode::Opcode;

/// A single argument-less instruction.
pub fn op(opcode: Opcode) -> Vec<u8> {
    vec![opcode.0]
}

/// A push of `bytes`, choosing PUSH1..PUSH32 by length.
pub fn push(bytes: &[u8]) -> Vec<u8> {
    assert!(!bytes.is_empty() && bytes.len() <= 32);
    let mut out = vec![0x5f + bytes.len() as u8];
    out.extend_from_slice(bytes);
    out
}

pub fn assemble(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.concat()
}

/// The compiler-emitted prologue that begins a selector dispatch table:
/// calldata-length bounds check, first-word load, shift to isolate the
/// selector.
pub fn dispatch_prologue() -> Vec<u8> {
    assemble(&[
        push(&[0x04]),
        op(Opcode::CALLDATASIZE),
        op(Opcode::LT),
        push(&[0x00, 0x41]),
        op(Opcode::JUMPI),
        push(&[0x00]),
        op(Opcode::CALLDATALOAD),
        push(&[0xe0]),
        op(Opcode::SHR),
    ])
}

/// An equality-form dispatch entry for `selector` (3 or 4 bytes).
pub fn equality_entry(selector: &[u8]) -> Vec<u8> {
    assemble(&[
        op(Opcode::DUP1),
        push(selector),
        op(Opcode::EQ),
        push(&[0x01, 0x00]),
        op(Opcode::JUMPI),
    ])
}

/// A split-form (binary-search branch) dispatch entry pivoting on `pivot`.
pub fn split_entry(pivot: &[u8]) -> Vec<u8> {
    assemble(&[
        op(Opcode::DUP1),
        push(pivot),
        op(Opcode::GT),
        push(&[0x02, 0x00]),
        op(Opcode::JUMPI),
    ])
}

/// The dispatch table's no-match fallback branch.
pub fn end_of_table() -> Vec<u8> {
    assemble(&[push(&[0x00]), op(Opcode::DUP1), op(Opcode::REVERT)])
}

/// The canonical minimal delegating-proxy body, 27 instructions.
pub fn proxy_template() -> Vec<u8> {
    assemble(&[
        op(Opcode::CALLDATASIZE),
        push(&[0x00]),
        op(Opcode::DUP1),
        op(Opcode::CALLDATACOPY),
        push(&[0x00]),
        op(Opcode::DUP1),
        op(Opcode::CALLDATASIZE),
        push(&[0x00]),
        op(Opcode::DUP5),
        op(Opcode::GAS),
        op(Opcode::DELEGATECALL),
        op(Opcode::RETURNDATASIZE),
        push(&[0x00]),
        op(Opcode::DUP1),
        op(Opcode::RETURNDATACOPY),
        op(Opcode::DUP1),
        op(Opcode::DUP1),
        op(Opcode::ISZERO),
        push(&[0x00, 0x2b]),
        op(Opcode::JUMPI),
        op(Opcode::RETURNDATASIZE),
        push(&[0x00]),
        op(Opcode::RETURN),
        op(Opcode::JUMPDEST),
        op(Opcode::RETURNDATASIZE),
        push(&[0x00]),
        op(Opcode::REVERT),
    ])
}
