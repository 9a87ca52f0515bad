use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming::normalize_name;

/// Provenance of a candidate name.
///
/// Precedence is defined by `NAME_KIND_PRECEDENCE`, not by the order of the
/// variants below: curated configuration first, then debug information, then
/// names read from the image tables, then synthesized placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameKind {
    /// Sentinel kind; never attached to a real address.
    Invalid,
    ConfigEntryPoint,
    ConfigFunction,
    ConfigGlobal,
    ConfigSegment,
    DebugFunction,
    DebugGlobal,
    /// Placeholder synthesized for an import known only by ordinal.
    ImportGenerated,
    Import,
    Export,
    SymbolFunction,
    SymbolObject,
    SymbolFile,
    SymbolOther,
    /// Entry point reported directly by the image format.
    EntryPoint,
    /// Section / segment name from the image.
    Segment,
}

/// Every `NameKind`, best first. `NameKind::rank` is the index into this table.
pub const NAME_KIND_PRECEDENCE: [NameKind; 16] = [
    NameKind::Invalid,
    NameKind::ConfigEntryPoint,
    NameKind::ConfigFunction,
    NameKind::ConfigGlobal,
    NameKind::ConfigSegment,
    NameKind::DebugFunction,
    NameKind::DebugGlobal,
    NameKind::Import,
    NameKind::Export,
    NameKind::SymbolFunction,
    NameKind::SymbolObject,
    NameKind::SymbolFile,
    NameKind::SymbolOther,
    NameKind::ImportGenerated,
    NameKind::EntryPoint,
    NameKind::Segment,
];

impl NameKind {
    /// Position in `NAME_KIND_PRECEDENCE`; lower ranks win.
    pub fn rank(self) -> usize {
        match self {
            NameKind::Invalid => 0,
            NameKind::ConfigEntryPoint => 1,
            NameKind::ConfigFunction => 2,
            NameKind::ConfigGlobal => 3,
            NameKind::ConfigSegment => 4,
            NameKind::DebugFunction => 5,
            NameKind::DebugGlobal => 6,
            NameKind::Import => 7,
            NameKind::Export => 8,
            NameKind::SymbolFunction => 9,
            NameKind::SymbolObject => 10,
            NameKind::SymbolFile => 11,
            NameKind::SymbolOther => 12,
            NameKind::ImportGenerated => 13,
            NameKind::EntryPoint => 14,
            NameKind::Segment => 15,
        }
    }

    /// Stable kebab-case label, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            NameKind::Invalid => "invalid",
            NameKind::ConfigEntryPoint => "config-entry-point",
            NameKind::ConfigFunction => "config-function",
            NameKind::ConfigGlobal => "config-global",
            NameKind::ConfigSegment => "config-segment",
            NameKind::DebugFunction => "debug-function",
            NameKind::DebugGlobal => "debug-global",
            NameKind::ImportGenerated => "import-generated",
            NameKind::Import => "import",
            NameKind::Export => "export",
            NameKind::SymbolFunction => "symbol-function",
            NameKind::SymbolObject => "symbol-object",
            NameKind::SymbolFile => "symbol-file",
            NameKind::SymbolOther => "symbol-other",
            NameKind::EntryPoint => "entry-point",
            NameKind::Segment => "segment",
        }
    }
}

impl PartialOrd for NameKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NameKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate name for an address.
///
/// Ordered by kind precedence first, then lexically by text. The default value
/// is the invalid sentinel: empty text, `NameKind::Invalid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Name {
    text: String,
    kind: NameKind,
}

impl Name {
    /// Build a candidate, normalizing `text`. Emptiness is the caller's concern.
    pub fn new(text: impl Into<String>, kind: NameKind) -> Self {
        Self { text: normalize_name(text.into()), kind }
    }

    pub const fn invalid() -> Self {
        Self { text: String::new(), kind: NameKind::Invalid }
    }

    /// `false` only for the invalid sentinel.
    pub fn is_valid(&self) -> bool {
        self.kind != NameKind::Invalid
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> NameKind {
        self.kind
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::invalid()
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind.cmp(&other.kind).then_with(|| self.text.cmp(&other.text))
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.text
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
