//! Instruction matchers and positional window patterns.
//!
//! Matchers are small data values rather than closures so detector patterns
//! stay inspectable and can be unit-tested away from the decoder. A pattern
//! is an ordered list of matchers applied positionally to a window of
//! instructions; a window shorter than the pattern never matches.

use crate::decoder::Scanner;
use crate::opcode::Opcode;
use crate::Instruction;

/// A predicate over a single instruction.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact opcode equality.
    Op(Opcode),
    /// Opcode is any of the listed values.
    OpIn(Vec<Opcode>),
    /// Any push opcode whose operand equals the given bytes.
    PushValue(Vec<u8>),
    /// At least one inner matcher accepts the instruction.
    AnyOf(Vec<Matcher>),
}

impl Matcher {
    pub fn op(op: Opcode) -> Matcher {
        Matcher::Op(op)
    }

    pub fn op_in(ops: &[Opcode]) -> Matcher {
        Matcher::OpIn(ops.to_vec())
    }

    /// Match a push carrying exactly the bytes of `literal` (a hex string,
    /// `0x` prefix optional). An undecodable literal matches only an empty
    /// operand.
    pub fn push_value(literal: &str) -> Matcher {
        let stripped = literal.trim_start_matches("0x");
        Matcher::PushValue(hex::decode(stripped).unwrap_or_default())
    }

    pub fn any_of(matchers: Vec<Matcher>) -> Matcher {
        Matcher::AnyOf(matchers)
    }

    pub fn matches(&self, insn: &Instruction) -> bool {
        match self {
            Matcher::Op(op) => insn.opcode == *op,
            Matcher::OpIn(ops) => ops.contains(&insn.opcode),
            Matcher::PushValue(value) => insn.opcode.is_push() && insn.operand == *value,
            Matcher::AnyOf(matchers) => matchers.iter().any(|m| m.matches(insn)),
        }
    }
}

/// An ordered instruction-sequence pattern.
pub type Pattern = Vec<Matcher>;

/// Test `pattern` positionally against `window` (oldest first). Fails closed
/// when the window is shorter than the pattern.
pub fn pattern_matches(window: &[&Instruction], pattern: &[Matcher]) -> bool {
    if window.len() < pattern.len() {
        return false;
    }
    pattern.iter().zip(window).all(|(m, insn)| m.matches(insn))
}

/// Advance `scanner` until its trailing window satisfies `pattern` or the
/// stream ends. Returns whether a match was found; on success the scanner is
/// positioned on the pattern's last instruction.
pub fn scan_for(scanner: &mut Scanner<'_>, pattern: &[Matcher]) -> bool {
    while scanner.advance() {
        if pattern_matches(&scanner.window(pattern.len()), pattern) {
            return true;
        }
    }
    false
}
