//! ABI element and interface model: canonical signatures, signature hashes,
//! and selector/interface matching.
//!
//! Elements arrive already parsed from their external JSON form (standard
//! Solidity ABI JSON deserializes directly into [`AbiElement`]); this module
//! only derives canonical identifiers and their keccak256 hashes from the
//! typed arguments, and answers set-containment questions against hashes
//! extracted from bytecode.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::AnalysisError;

/// The role of an ABI element. Unknown kind strings are rejected when
/// deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiKind {
    Constructor,
    Function,
    Event,
    Fallback,
    Receive,
    Error,
}

/// State mutability of a function-like element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    #[default]
    NonPayable,
    Payable,
}

/// One typed, optionally indexed argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Tuple member types; present only for tuple arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Argument>,
    #[serde(default)]
    pub indexed: bool,
}

impl Argument {
    /// Canonical type string, with tuples expanded to parenthesized member
    /// lists (`tuple[]` becomes `(t1,t2)[]`, etc).
    pub fn canonical_type(&self) -> String {
        if let Some(suffix) = self.kind.strip_prefix("tuple") {
            let inner: Vec<String> = self.components.iter().map(Argument::canonical_type).collect();
            format!("({}){}", inner.join(","), suffix)
        } else {
            self.kind.clone()
        }
    }
}

/// A single interface member as found in ABI JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiElement {
    #[serde(rename = "type")]
    pub kind: AbiKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<Argument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<Argument>,
    #[serde(default, rename = "stateMutability")]
    pub state_mutability: StateMutability,
    #[serde(default)]
    pub anonymous: bool,
}

impl AbiElement {
    /// Canonical signature `name(type1,type2,...)`. Argument names and
    /// indexed-ness are excluded.
    pub fn identifier(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(Argument::canonical_type).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// Hex signature hash: the first 4 bytes of keccak256(identifier) for
    /// selector-addressed kinds, the full 32 bytes for events.
    pub fn signature_hash(&self) -> String {
        match self.kind {
            AbiKind::Event => event_topic(&self.identifier()),
            _ => four_byte_sig(&self.identifier()),
        }
    }
}

/// First 4 bytes of the keccak256 hash of `sig`, hex-encoded.
pub fn four_byte_sig(sig: &str) -> String {
    let digest = Keccak256::digest(sig.as_bytes());
    hex::encode(&digest[..4])
}

/// Full 32-byte keccak256 hash of `sig`, hex-encoded.
pub fn event_topic(sig: &str) -> String {
    hex::encode(Keccak256::digest(sig.as_bytes()))
}

/// A named, immutable set of ABI elements keyed by signature hash.
///
/// Functions, errors and events are keyed; constructor, fallback and receive
/// members have no on-chain hash and are only validated. Hash collisions
/// inside one interface resolve to the later element, deterministically in
/// input order.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    elements: HashMap<String, AbiElement>,
}

impl Interface {
    /// Build an interface, enforcing the single-fallback, single-receive and
    /// payable-receive rules up front.
    pub fn new(name: impl Into<String>, elems: Vec<AbiElement>) -> Result<Interface, AnalysisError> {
        let name = name.into();
        let mut elements = HashMap::new();
        let mut has_fallback = false;
        let mut has_receive = false;
        for elem in elems {
            match elem.kind {
                AbiKind::Fallback => {
                    if has_fallback {
                        return Err(AnalysisError::DuplicateFallback(name));
                    }
                    has_fallback = true;
                }
                AbiKind::Receive => {
                    if has_receive {
                        return Err(AnalysisError::DuplicateReceive(name));
                    }
                    if elem.state_mutability != StateMutability::Payable {
                        return Err(AnalysisError::NonPayableReceive(name));
                    }
                    has_receive = true;
                }
                AbiKind::Constructor => {}
                AbiKind::Function | AbiKind::Event | AbiKind::Error => {
                    elements.insert(elem.signature_hash(), elem);
                }
            }
        }
        Ok(Interface { name, elements })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element keyed by `hash`, if any.
    pub fn get(&self, hash: &str) -> Option<&AbiElement> {
        self.elements.get(hash)
    }

    /// All keyed elements with their hashes.
    pub fn elements(&self) -> impl Iterator<Item = (&String, &AbiElement)> {
        self.elements.iter()
    }

    /// Selector hashes of the interface's functions, sorted.
    pub fn method_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .elements
            .iter()
            .filter(|(_, e)| e.kind == AbiKind::Function)
            .map(|(hash, _)| hash.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Hashes a contract must expose for this interface to count as
    /// implemented: function selectors and non-anonymous event topics.
    /// Error selectors only surface in revert data, never in the dispatch
    /// table, so they are not required.
    pub fn required_hashes(&self) -> BTreeSet<String> {
        self.elements
            .iter()
            .filter(|(_, e)| match e.kind {
                AbiKind::Function => true,
                AbiKind::Event => !e.anonymous,
                _ => false,
            })
            .map(|(hash, _)| hash.clone())
            .collect()
    }

    /// Whether every required hash appears in `extracted`. Extra extracted
    /// hashes never disqualify a match; an interface with nothing required
    /// trivially matches.
    pub fn is_implemented_by(&self, extracted: &BTreeSet<String>) -> bool {
        self.required_hashes().iter().all(|h| extracted.contains(h))
    }
}

/// Every known identifier sharing `hash` across `interfaces`. Four-byte
/// collisions between differently named methods are all reported, not
/// resolved to one.
pub fn lookup_selector(hash: &str, interfaces: &[Interface]) -> BTreeSet<String> {
    interfaces
        .iter()
        .filter_map(|iface| iface.get(hash))
        .map(AbiElement::identifier)
        .collect()
}

/// Names of the interfaces whose required hashes are all contained in
/// `extracted`, sorted.
pub fn matching_interfaces(extracted: &BTreeSet<String>, interfaces: &[Interface]) -> Vec<String> {
    let mut names: Vec<String> = interfaces
        .iter()
        .filter(|iface| iface.is_implemented_by(extracted))
        .map(|iface| iface.name().to_string())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(kind: &str) -> Argument {
        Argument {
            name: String::new(),
            kind: kind.to_string(),
            components: Vec::new(),
            indexed: false,
        }
    }

    fn function(name: &str, inputs: &[&str]) -> AbiElement {
        AbiElement {
            kind: AbiKind::Function,
            name: name.to_string(),
            inputs: inputs.iter().map(|k| arg(k)).collect(),
            outputs: Vec::new(),
            state_mutability: StateMutability::NonPayable,
            anonymous: false,
        }
    }

    fn event(name: &str, inputs: &[&str]) -> AbiElement {
        AbiElement {
            kind: AbiKind::Event,
            name: name.to_string(),
            inputs: inputs.iter().map(|k| arg(k)).collect(),
            outputs: Vec::new(),
            state_mutability: StateMutability::NonPayable,
            anonymous: false,
        }
    }

    #[test]
    fn identifier_excludes_names_and_indexing() {
        let mut transfer = event("Transfer", &["address", "address", "uint256"]);
        transfer.inputs[0].name = "from".to_string();
        transfer.inputs[0].indexed = true;
        assert_eq!(transfer.identifier(), "Transfer(address,address,uint256)");
    }

    #[test]
    fn known_selector_vectors() {
        assert_eq!(four_byte_sig("transfer(address,uint256)"), "a9059cbb");
        assert_eq!(four_byte_sig("balanceOf(address)"), "70a08231");
        assert_eq!(four_byte_sig("totalSupply()"), "18160ddd");
    }

    #[test]
    fn known_event_topic_vector() {
        assert_eq!(
            event_topic("Transfer(address,address,uint256)"),
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn hashing_is_stable_across_calls() {
        let a = four_byte_sig("transfer(address,uint256)");
        let b = four_byte_sig("transfer(address,uint256)");
        assert_eq!(a, b);
    }

    #[test]
    fn tuples_expand_in_canonical_types() {
        let mut tuple = arg("tuple[]");
        tuple.components = vec![arg("address"), arg("uint256")];
        assert_eq!(tuple.canonical_type(), "(address,uint256)[]");

        let swap = AbiElement {
            kind: AbiKind::Function,
            name: "submit".to_string(),
            inputs: vec![tuple],
            outputs: Vec::new(),
            state_mutability: StateMutability::NonPayable,
            anonymous: false,
        };
        assert_eq!(swap.identifier(), "submit((address,uint256)[])");
    }

    #[test]
    fn element_deserializes_from_abi_json() {
        let json = r#"{
            "type": "function",
            "name": "transfer",
            "inputs": [
                {"name": "to", "type": "address", "internalType": "address"},
                {"name": "amount", "type": "uint256"}
            ],
            "outputs": [{"name": "", "type": "bool"}],
            "stateMutability": "nonpayable"
        }"#;
        let elem: AbiElement = serde_json::from_str(json).unwrap();
        assert_eq!(elem.kind, AbiKind::Function);
        assert_eq!(elem.signature_hash(), "a9059cbb");
    }

    #[test]
    fn unknown_kind_is_rejected_at_deserialization() {
        let json = r#"{"type": "impl", "name": "bogus"}"#;
        assert!(serde_json::from_str::<AbiElement>(json).is_err());
    }

    #[test]
    fn duplicate_fallback_is_rejected() {
        let fallback = AbiElement {
            kind: AbiKind::Fallback,
            name: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            state_mutability: StateMutability::NonPayable,
            anonymous: false,
        };
        let err = Interface::new("Broken", vec![fallback.clone(), fallback]).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn duplicate_receive_is_rejected() {
        let receive = AbiElement {
            kind: AbiKind::Receive,
            name: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            state_mutability: StateMutability::Payable,
            anonymous: false,
        };
        let err = Interface::new("Vault", vec![receive.clone(), receive]).unwrap_err();
        assert!(matches!(err, AnalysisError::DuplicateReceive(_)));
    }

    #[test]
    fn receive_must_be_payable() {
        let receive = AbiElement {
            kind: AbiKind::Receive,
            name: String::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            state_mutability: StateMutability::NonPayable,
            anonymous: false,
        };
        let err = Interface::new("Vault", vec![receive.clone()]).unwrap_err();
        assert!(matches!(err, AnalysisError::NonPayableReceive(_)));

        let payable = AbiElement {
            state_mutability: StateMutability::Payable,
            ..receive
        };
        assert!(Interface::new("Vault", vec![payable]).is_ok());
    }

    #[test]
    fn subset_matching_is_one_directional() {
        let iface = Interface::new(
            "Token",
            vec![
                function("transfer", &["address", "uint256"]),
                function("balanceOf", &["address"]),
            ],
        )
        .unwrap();

        let mut extracted: BTreeSet<String> =
            ["a9059cbb", "70a08231", "deadbeef"].iter().map(|s| s.to_string()).collect();
        assert!(iface.is_implemented_by(&extracted));

        extracted.remove("70a08231");
        assert!(!iface.is_implemented_by(&extracted));
    }

    #[test]
    fn empty_interface_trivially_matches() {
        let iface = Interface::new("Marker", Vec::new()).unwrap();
        assert!(iface.is_implemented_by(&BTreeSet::new()));
    }

    #[test]
    fn events_are_required_via_their_topics() {
        let iface = Interface::new(
            "Emitting",
            vec![event("Transfer", &["address", "address", "uint256"])],
        )
        .unwrap();

        let mut extracted = BTreeSet::new();
        assert!(!iface.is_implemented_by(&extracted));
        extracted.insert(
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef".to_string(),
        );
        assert!(iface.is_implemented_by(&extracted));
    }

    #[test]
    fn anonymous_events_are_not_required() {
        let mut anon = event("Ping", &[]);
        anon.anonymous = true;
        let iface = Interface::new("Anon", vec![anon]).unwrap();
        assert!(iface.is_implemented_by(&BTreeSet::new()));
    }

    #[test]
    fn lookup_reports_identifiers_across_interfaces() {
        let erc20 = Interface::new("IERC20", vec![function("transfer", &["address", "uint256"])])
            .unwrap();
        let token = Interface::new("MyToken", vec![function("transfer", &["address", "uint256"])])
            .unwrap();
        let ids = lookup_selector("a9059cbb", &[erc20, token]);
        // Identical signatures collapse; the set still reports every
        // distinct identifier sharing the hash.
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("transfer(address,uint256)"));
        assert!(lookup_selector("ffffffff", &[]).is_empty());
    }

    #[test]
    fn method_ids_cover_functions_only() {
        let iface = Interface::new(
            "Mixed",
            vec![
                function("transfer", &["address", "uint256"]),
                event("Transfer", &["address", "address", "uint256"]),
            ],
        )
        .unwrap();
        assert_eq!(iface.method_ids(), vec!["a9059cbb".to_string()]);
    }

    #[test]
    fn matching_interfaces_returns_sorted_names() {
        let a = Interface::new("B", vec![]).unwrap();
        let b = Interface::new("A", vec![]).unwrap();
        let needs_more = Interface::new(
            "C",
            vec![function("mint", &["address", "uint256"])],
        )
        .unwrap();
        let names = matching_interfaces(&BTreeSet::new(), &[a, b, needs_more]);
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    }
}
