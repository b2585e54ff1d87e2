//! Event-topic extraction.
//!
//! Non-anonymous events load their 32-byte topic hash with a PUSH32 shortly
//! before the LOG instruction that emits them. For every LOG0..LOG4 in the
//! stream, the nearest preceding PUSH32 inside the bounded backward window
//! is recorded as a topic. The bound trades recall for bounded work; a LOG
//! with no qualifying push in range yields nothing for that occurrence.

use std::collections::BTreeSet;

use crate::decoder::{Scanner, WINDOW_CAPACITY};
use crate::matcher::Matcher;
use crate::opcode::Opcode;

/// Extract the 32-byte event-topic hashes `code` can emit, hex-encoded and
/// deduplicated.
pub fn extract_topics(code: &[u8]) -> BTreeSet<String> {
    let mut topics = BTreeSet::new();
    let log_ops = Matcher::op_in(&[
        Opcode::LOG0,
        Opcode::LOG1,
        Opcode::LOG2,
        Opcode::LOG3,
        Opcode::LOG4,
    ]);
    let mut scanner = Scanner::new(code);
    while scanner.advance() {
        let is_log = scanner.current().map(|i| log_ops.matches(i)).unwrap_or(false);
        if !is_log {
            continue;
        }
        let window = scanner.window(WINDOW_CAPACITY);
        if let Some(push) = window.iter().rev().find(|i| i.opcode == Opcode::PUSH32) {
            topics.insert(topic_hex(&push.operand));
        }
    }
    log::debug!("extracted {} topics", topics.len());
    topics
}

/// Left-pad (or truncate to the low bytes) a pushed operand to the 32-byte
/// topic width.
fn topic_hex(operand: &[u8]) -> String {
    let mut buf = [0u8; 32];
    let n = operand.len().min(32);
    buf[32 - n..].copy_from_slice(&operand[operand.len() - n..]);
    hex::encode(buf)
}
