use serde::{Deserialize, Serialize};

use crate::model::{NameKind, Names};
use crate::services::registry::NameRegistry;

/// One candidate as shown in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub name: String,
    pub kind: NameKind,
}

/// All candidates for one address, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    /// `0x`-prefixed hex address.
    pub address: String,
    pub preferred: String,
    pub kind: NameKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demangled: Option<String>,
    pub candidates: Vec<CandidateEntry>,
}

/// Serializable listing of a registry, ascending by address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameReport {
    pub entries: Vec<AddressEntry>,
}

impl NameReport {
    /// Addresses whose candidate set is empty are left out.
    pub fn from_registry(registry: &NameRegistry) -> Self {
        let entries = registry
            .iter()
            .filter(|(_, names)| !names.is_empty())
            .map(|(address, names)| AddressEntry {
                address: address.to_string(),
                preferred: names.preferred().text().to_string(),
                kind: names.preferred().kind(),
                demangled: registry.demangled_name_at(address),
                candidates: candidates(names),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for an address rendered as `0x...`.
    pub fn entry(&self, address: &str) -> Option<&AddressEntry> {
        self.entries.iter().find(|e| e.address == address)
    }
}

fn candidates(names: &Names) -> Vec<CandidateEntry> {
    names
        .iter()
        .map(|n| CandidateEntry { name: n.text().to_string(), kind: n.kind() })
        .collect()
}
