//! Lazy EVM instruction decoding and the bounded backward scan window.

use std::collections::VecDeque;

use crate::opcode::Opcode;
use crate::Instruction;

/// Number of recently decoded instructions a [`Scanner`] retains. This is
/// also the lookback bound for the event-topic heuristic.
pub const WINDOW_CAPACITY: usize = 50;

/// A lazy, forward-only decoder over a raw bytecode buffer.
///
/// Decoding never fails: a push whose operand would run past the end of the
/// buffer yields a short operand (deployed bytecode routinely ends mid-push
/// inside appended metadata), and bytes with no assigned operation decode as
/// argument-less instructions. Re-decoding means constructing a new iterator.
pub struct InstructionIter<'a> {
    code: &'a [u8],
    offset: usize,
}

impl<'a> InstructionIter<'a> {
    pub fn new(code: &'a [u8]) -> Self {
        InstructionIter { code, offset: 0 }
    }
}

impl Iterator for InstructionIter<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        if self.offset >= self.code.len() {
            return None;
        }
        let opcode = Opcode(self.code[self.offset]);
        let start = self.offset + 1;
        // Clamp so a truncated trailing push still decodes.
        let end = (start + opcode.push_size()).min(self.code.len());
        let insn = Instruction {
            offset: self.offset,
            opcode,
            operand: self.code[start..end].to_vec(),
        };
        self.offset = end;
        Some(insn)
    }
}

/// A forward scan position over a bytecode buffer plus a ring of the last
/// [`WINDOW_CAPACITY`] decoded instructions.
///
/// Detectors only ever look backward from the current position, so the ring
/// keeps memory bounded on large bytecode instead of logging every
/// instruction decoded so far.
pub struct Scanner<'a> {
    iter: InstructionIter<'a>,
    window: VecDeque<Instruction>,
}

impl<'a> Scanner<'a> {
    pub fn new(code: &'a [u8]) -> Self {
        Scanner {
            iter: InstructionIter::new(code),
            window: VecDeque::with_capacity(WINDOW_CAPACITY),
        }
    }

    /// Decode one more instruction. Returns false once the buffer is
    /// exhausted.
    pub fn advance(&mut self) -> bool {
        match self.iter.next() {
            Some(insn) => {
                if self.window.len() == WINDOW_CAPACITY {
                    self.window.pop_front();
                }
                self.window.push_back(insn);
                true
            }
            None => false,
        }
    }

    /// The last `k` decoded instructions, oldest first. Shorter than `k`
    /// while fewer instructions have been decoded.
    pub fn window(&self, k: usize) -> Vec<&Instruction> {
        let skip = self.window.len().saturating_sub(k);
        self.window.iter().skip(skip).collect()
    }

    /// The most recently decoded instruction.
    pub fn current(&self) -> Option<&Instruction> {
        self.window.back()
    }
}
