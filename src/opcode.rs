//! EVM opcode identification and immediate-width table.

use std::fmt;

/// One EVM opcode byte.
///
/// Every byte value is a valid `Opcode`: bytes with no assigned operation are
/// opaque, argument-less instructions, so a scan over unknown or future
/// opcodes keeps going instead of aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Opcode(pub u8);

impl Opcode {
    pub const STOP: Opcode = Opcode(0x00);
    pub const ADD: Opcode = Opcode(0x01);
    pub const MUL: Opcode = Opcode(0x02);
    pub const SUB: Opcode = Opcode(0x03);
    pub const DIV: Opcode = Opcode(0x04);
    pub const LT: Opcode = Opcode(0x10);
    pub const GT: Opcode = Opcode(0x11);
    pub const EQ: Opcode = Opcode(0x14);
    pub const ISZERO: Opcode = Opcode(0x15);
    pub const AND: Opcode = Opcode(0x16);
    pub const OR: Opcode = Opcode(0x17);
    pub const SHL: Opcode = Opcode(0x1b);
    pub const SHR: Opcode = Opcode(0x1c);
    pub const KECCAK256: Opcode = Opcode(0x20);
    pub const ADDRESS: Opcode = Opcode(0x30);
    pub const CALLER: Opcode = Opcode(0x33);
    pub const CALLVALUE: Opcode = Opcode(0x34);
    pub const CALLDATALOAD: Opcode = Opcode(0x35);
    pub const CALLDATASIZE: Opcode = Opcode(0x36);
    pub const CALLDATACOPY: Opcode = Opcode(0x37);
    pub const CODECOPY: Opcode = Opcode(0x39);
    pub const RETURNDATASIZE: Opcode = Opcode(0x3d);
    pub const RETURNDATACOPY: Opcode = Opcode(0x3e);
    pub const POP: Opcode = Opcode(0x50);
    pub const MLOAD: Opcode = Opcode(0x51);
    pub const MSTORE: Opcode = Opcode(0x52);
    pub const SLOAD: Opcode = Opcode(0x54);
    pub const SSTORE: Opcode = Opcode(0x55);
    pub const JUMP: Opcode = Opcode(0x56);
    pub const JUMPI: Opcode = Opcode(0x57);
    pub const GAS: Opcode = Opcode(0x5a);
    pub const JUMPDEST: Opcode = Opcode(0x5b);
    pub const PUSH0: Opcode = Opcode(0x5f);
    pub const PUSH1: Opcode = Opcode(0x60);
    pub const PUSH2: Opcode = Opcode(0x61);
    pub const PUSH3: Opcode = Opcode(0x62);
    pub const PUSH4: Opcode = Opcode(0x63);
    pub const PUSH20: Opcode = Opcode(0x73);
    pub const PUSH32: Opcode = Opcode(0x7f);
    pub const DUP1: Opcode = Opcode(0x80);
    pub const DUP2: Opcode = Opcode(0x81);
    pub const DUP5: Opcode = Opcode(0x84);
    pub const SWAP1: Opcode = Opcode(0x90);
    pub const LOG0: Opcode = Opcode(0xa0);
    pub const LOG1: Opcode = Opcode(0xa1);
    pub const LOG2: Opcode = Opcode(0xa2);
    pub const LOG3: Opcode = Opcode(0xa3);
    pub const LOG4: Opcode = Opcode(0xa4);
    pub const CREATE: Opcode = Opcode(0xf0);
    pub const CALL: Opcode = Opcode(0xf1);
    pub const RETURN: Opcode = Opcode(0xf3);
    pub const DELEGATECALL: Opcode = Opcode(0xf4);
    pub const CREATE2: Opcode = Opcode(0xf5);
    pub const STATICCALL: Opcode = Opcode(0xfa);
    pub const REVERT: Opcode = Opcode(0xfd);
    pub const INVALID: Opcode = Opcode(0xfe);
    pub const SELFDESTRUCT: Opcode = Opcode(0xff);

    /// True for PUSH0 through PUSH32.
    pub const fn is_push(self) -> bool {
        self.0 >= 0x5f && self.0 <= 0x7f
    }

    /// Number of immediate operand bytes following this opcode in the byte
    /// stream. PUSH0 carries no immediate.
    pub const fn push_size(self) -> usize {
        if self.0 >= 0x60 && self.0 <= 0x7f {
            (self.0 - 0x5f) as usize
        } else {
            0
        }
    }

    /// Mnemonic for the opcode, if the byte value has an assigned operation.
    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            0x00 => Some("STOP"),
            0x01 => Some("ADD"),
            0x02 => Some("MUL"),
            0x03 => Some("SUB"),
            0x04 => Some("DIV"),
            0x05 => Some("SDIV"),
            0x06 => Some("MOD"),
            0x07 => Some("SMOD"),
            0x08 => Some("ADDMOD"),
            0x09 => Some("MULMOD"),
            0x0a => Some("EXP"),
            0x0b => Some("SIGNEXTEND"),
            0x10 => Some("LT"),
            0x11 => Some("GT"),
            0x12 => Some("SLT"),
            0x13 => Some("SGT"),
            0x14 => Some("EQ"),
            0x15 => Some("ISZERO"),
            0x16 => Some("AND"),
            0x17 => Some("OR"),
            0x18 => Some("XOR"),
            0x19 => Some("NOT"),
            0x1a => Some("BYTE"),
            0x1b => Some("SHL"),
            0x1c => Some("SHR"),
            0x1d => Some("SAR"),
            0x20 => Some("KECCAK256"),
            0x30 => Some("ADDRESS"),
            0x31 => Some("BALANCE"),
            0x32 => Some("ORIGIN"),
            0x33 => Some("CALLER"),
            0x34 => Some("CALLVALUE"),
            0x35 => Some("CALLDATALOAD"),
            0x36 => Some("CALLDATASIZE"),
            0x37 => Some("CALLDATACOPY"),
            0x38 => Some("CODESIZE"),
            0x39 => Some("CODECOPY"),
            0x3a => Some("GASPRICE"),
            0x3b => Some("EXTCODESIZE"),
            0x3c => Some("EXTCODECOPY"),
            0x3d => Some("RETURNDATASIZE"),
            0x3e => Some("RETURNDATACOPY"),
            0x3f => Some("EXTCODEHASH"),
            0x40 => Some("BLOCKHASH"),
            0x41 => Some("COINBASE"),
            0x42 => Some("TIMESTAMP"),
            0x43 => Some("NUMBER"),
            0x44 => Some("PREVRANDAO"),
            0x45 => Some("GASLIMIT"),
            0x46 => Some("CHAINID"),
            0x47 => Some("SELFBALANCE"),
            0x48 => Some("BASEFEE"),
            0x49 => Some("BLOBHASH"),
            0x4a => Some("BLOBBASEFEE"),
            0x50 => Some("POP"),
            0x51 => Some("MLOAD"),
            0x52 => Some("MSTORE"),
            0x53 => Some("MSTORE8"),
            0x54 => Some("SLOAD"),
            0x55 => Some("SSTORE"),
            0x56 => Some("JUMP"),
            0x57 => Some("JUMPI"),
            0x58 => Some("PC"),
            0x59 => Some("MSIZE"),
            0x5a => Some("GAS"),
            0x5b => Some("JUMPDEST"),
            0x5c => Some("TLOAD"),
            0x5d => Some("TSTORE"),
            0x5e => Some("MCOPY"),
            0x5f => Some("PUSH0"),
            0x60 => Some("PUSH1"),
            0x61 => Some("PUSH2"),
            0x62 => Some("PUSH3"),
            0x63 => Some("PUSH4"),
            0x64 => Some("PUSH5"),
            0x65 => Some("PUSH6"),
            0x66 => Some("PUSH7"),
            0x67 => Some("PUSH8"),
            0x68 => Some("PUSH9"),
            0x69 => Some("PUSH10"),
            0x6a => Some("PUSH11"),
            0x6b => Some("PUSH12"),
            0x6c => Some("PUSH13"),
            0x6d => Some("PUSH14"),
            0x6e => Some("PUSH15"),
            0x6f => Some("PUSH16"),
            0x70 => Some("PUSH17"),
            0x71 => Some("PUSH18"),
            0x72 => Some("PUSH19"),
            0x73 => Some("PUSH20"),
            0x74 => Some("PUSH21"),
            0x75 => Some("PUSH22"),
            0x76 => Some("PUSH23"),
            0x77 => Some("PUSH24"),
            0x78 => Some("PUSH25"),
            0x79 => Some("PUSH26"),
            0x7a => Some("PUSH27"),
            0x7b => Some("PUSH28"),
            0x7c => Some("PUSH29"),
            0x7d => Some("PUSH30"),
            0x7e => Some("PUSH31"),
            0x7f => Some("PUSH32"),
            0x80 => Some("DUP1"),
            0x81 => Some("DUP2"),
            0x82 => Some("DUP3"),
            0x83 => Some("DUP4"),
            0x84 => Some("DUP5"),
            0x85 => Some("DUP6"),
            0x86 => Some("DUP7"),
            0x87 => Some("DUP8"),
            0x88 => Some("DUP9"),
            0x89 => Some("DUP10"),
            0x8a => Some("DUP11"),
            0x8b => Some("DUP12"),
            0x8c => Some("DUP13"),
            0x8d => Some("DUP14"),
            0x8e => Some("DUP15"),
            0x8f => Some("DUP16"),
            0x90 => Some("SWAP1"),
            0x91 => Some("SWAP2"),
            0x92 => Some("SWAP3"),
            0x93 => Some("SWAP4"),
            0x94 => Some("SWAP5"),
            0x95 => Some("SWAP6"),
            0x96 => Some("SWAP7"),
            0x97 => Some("SWAP8"),
            0x98 => Some("SWAP9"),
            0x99 => Some("SWAP10"),
            0x9a => Some("SWAP11"),
            0x9b => Some("SWAP12"),
            0x9c => Some("SWAP13"),
            0x9d => Some("SWAP14"),
            0x9e => Some("SWAP15"),
            0x9f => Some("SWAP16"),
            0xa0 => Some("LOG0"),
            0xa1 => Some("LOG1"),
            0xa2 => Some("LOG2"),
            0xa3 => Some("LOG3"),
            0xa4 => Some("LOG4"),
            0xf0 => Some("CREATE"),
            0xf1 => Some("CALL"),
            0xf2 => Some("CALLCODE"),
            0xf3 => Some("RETURN"),
            0xf4 => Some("DELEGATECALL"),
            0xf5 => Some("CREATE2"),
            0xfa => Some("STATICCALL"),
            0xfd => Some("REVERT"),
            0xfe => Some("INVALID"),
            0xff => Some("SELFDESTRUCT"),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "UNKNOWN(0x{:02x})", self.0),
        }
    }
}
