//! Heuristic bytecode detectors.
//!
//! Each detector is one or more fixed instruction patterns run over a single
//! forward scan of the decoded stream. They make conservative judgments:
//! "found" is a strong signal, "not found" only means the specific compiler
//! idiom was absent. There is no symbolic execution behind any of them.

pub mod dispatch;
pub mod proxy;
pub mod topics;

pub use dispatch::{extract_selectors, is_erc20, is_erc721};
pub use proxy::is_proxy;
pub use topics::extract_topics;
