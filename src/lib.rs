//! Heuristic analysis of deployed EVM bytecode.
//!
//! This library recovers facts about a contract that are not recorded on
//! chain: the 4-byte function selectors its dispatch table branches on, the
//! 32-byte event topics it can emit, whether it is a delegating proxy, and
//! which known interface definitions the extracted signatures are consistent
//! with. Everything works from the raw byte buffer alone; there is no
//! symbolic execution and no control-flow reconstruction, so every detector
//! output is a best-effort signal rather than a proof.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use evmscope::abi::{AbiElement, Interface};
//!
//! // Bytecode is supplied by the caller, e.g. from an eth_getCode response.
//! let bytecode = std::fs::read("contract.bin").unwrap();
//!
//! // Interface definitions arrive as parsed ABI element lists.
//! let elems: Vec<AbiElement> =
//!     serde_json::from_str(&std::fs::read_to_string("erc20.json").unwrap()).unwrap();
//! let erc20 = Interface::new("ERC20", elems).unwrap();
//!
//! let analysis = evmscope::analyze(&bytecode, &[erc20]);
//! println!("proxy: {}", analysis.proxy);
//! for selector in &analysis.selectors {
//!     println!("selector 0x{selector}");
//! }
//! for name in &analysis.interfaces {
//!     println!("implements {name}");
//! }
//! ```

pub mod abi;
pub mod decoder;
pub mod heuristics;
pub mod matcher;
pub mod opcode;
pub mod report;

#[cfg(test)]
pub(crate) mod testutil;

use std::collections::BTreeSet;
use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::abi::Interface;
use crate::opcode::Opcode;

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Byte position in the original buffer
    pub offset: usize,
    /// Operation identified by the leading byte
    pub opcode: Opcode,
    /// Immediate bytes for push operations, empty otherwise
    pub operand: Vec<u8>,
}

impl Instruction {
    /// Size in bytes: the opcode byte plus its immediates.
    pub fn size(&self) -> usize {
        1 + self.operand.len()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operand.is_empty() {
            write!(f, "{}", self.opcode)
        } else {
            write!(f, "{} 0x{}", self.opcode, hex::encode(&self.operand))
        }
    }
}

/// Error type for analysis operations.
///
/// Decoding and detection never fail; only interface construction and
/// report serialization can.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// More than one fallback element in one interface
    #[error("invalid interface {0}: only a single fallback is allowed")]
    DuplicateFallback(String),

    /// More than one receive element in one interface
    #[error("invalid interface {0}: only a single receive is allowed")]
    DuplicateReceive(String),

    /// A receive element whose state mutability is not payable
    #[error("invalid interface {0}: the state mutability of receive can only be payable")]
    NonPayableReceive(String),

    /// JSON serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Aggregated results of analyzing one bytecode buffer.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Whether the delegating-proxy template was found
    pub proxy: bool,
    /// Extracted 4-byte selector hex strings
    pub selectors: BTreeSet<String>,
    /// Extracted 32-byte event-topic hex strings
    pub topics: BTreeSet<String>,
    /// Names of the interfaces whose required signatures are all present
    pub interfaces: Vec<String>,
}

/// Run every detector over `code` and match the extracted signature set
/// against `interfaces`.
pub fn analyze(code: &[u8], interfaces: &[Interface]) -> Analysis {
    let proxy = heuristics::is_proxy(code);
    let selectors = heuristics::extract_selectors(code);
    let topics = heuristics::extract_topics(code);

    let extracted: BTreeSet<String> = selectors.union(&topics).cloned().collect();
    let interfaces = abi::matching_interfaces(&extracted, interfaces);

    log::debug!(
        "analyzed {} bytes: proxy={}, {} selectors, {} topics, {} interfaces",
        code.len(),
        proxy,
        selectors.len(),
        topics.len(),
        interfaces.len()
    );

    Analysis {
        proxy,
        selectors,
        topics,
        interfaces,
    }
}

/// Analyze many independent buffers in parallel, preserving input order.
///
/// Each analysis touches only its own buffer, so the buffers fan out across
/// the rayon pool without coordination.
pub fn analyze_all(codes: &[Vec<u8>], interfaces: &[Interface]) -> Vec<Analysis> {
    codes
        .par_iter()
        .map(|code| analyze(code, interfaces))
        .collect()
}
