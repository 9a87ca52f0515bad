//! Per-session database of candidate names, keyed by address.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::model::{Address, Name, NameKind, Names};
use crate::naming::{generate_import_name, ENTRY_POINT_NAME};
use crate::services::ordinals::OrdinalCache;
use crate::sources::{
    ConfigSource, DebugSource, Demangler, ImageSource, ImportTable, SymbolUsage,
};

/// All candidate names known for one analysis session.
///
/// Built once from configuration, debug information, and the image; further
/// names may be added later. Lookups by address create an empty `Names` for
/// addresses seen for the first time.
pub struct NameRegistry {
    names: BTreeMap<Address, Names>,
    ordinals: OrdinalCache,
    demangler: Arc<dyn Demangler>,
}

impl std::fmt::Debug for NameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameRegistry")
            .field("addresses", &self.names.len())
            .field("ordinals", &self.ordinals)
            .field("demangler", &self.demangler.name())
            .finish()
    }
}

impl NameRegistry {
    /// Create a registry and populate it: configuration, then debug info (if
    /// any), then the image. Missing optional data only yields fewer names.
    pub fn new(
        config: &dyn ConfigSource,
        debug: Option<&dyn DebugSource>,
        image: &dyn ImageSource,
        demangler: Arc<dyn Demangler>,
    ) -> Self {
        let ordinals = OrdinalCache::new(config.ordinals_directory().map(|p| p.to_path_buf()));
        let mut registry = Self::empty(ordinals, demangler);

        // Per-phase counts are accepted names, duplicates included.
        let accepted_from_config = registry.init_from_config(config);
        let accepted_from_debug = debug.map_or(0, |d| registry.init_from_debug(d));
        let accepted_from_image = registry.init_from_image(image);
        debug!(
            accepted_from_config,
            accepted_from_debug,
            accepted_from_image,
            candidates = registry.candidate_count(),
            addresses = registry.names.len(),
            "name registry populated"
        );
        registry
    }

    /// A registry with no names, using `ordinals` for ordinal lookups.
    pub fn empty(ordinals: OrdinalCache, demangler: Arc<dyn Demangler>) -> Self {
        Self { names: BTreeMap::new(), ordinals, demangler }
    }

    /// Add a candidate name. Rejected with `false` when `address` is undefined
    /// or `text` is empty.
    pub fn add_name(&mut self, address: Address, text: &str, kind: NameKind) -> bool {
        if address.is_undefined() || text.is_empty() {
            return false;
        }
        self.names.entry(address).or_default().add(text, kind)
    }

    /// All candidates at `address`, creating an empty set if none exists yet.
    pub fn names_at(&mut self, address: Address) -> &Names {
        self.names.entry(address).or_default()
    }

    /// Best candidate at `address`, or the invalid sentinel. Creates an empty
    /// set for unseen addresses, like `names_at`.
    pub fn preferred_name_at(&mut self, address: Address) -> &Name {
        self.names_at(address).preferred()
    }

    /// Read-only lookup that never creates an entry.
    pub fn find_names(&self, address: Address) -> Option<&Names> {
        self.names.get(&address)
    }

    /// Function name recorded for `ordinal` in `library`'s ordinal file.
    pub fn resolve_ordinal_name(&mut self, library: &str, ordinal: u64) -> Option<&str> {
        self.ordinals.resolve(library, ordinal)
    }

    /// Demangled form of the preferred name at `address`, if it is mangled.
    pub fn demangled_name_at(&self, address: Address) -> Option<String> {
        let preferred = self.find_names(address)?.preferred();
        if !preferred.is_valid() {
            return None;
        }
        self.demangler.demangle(preferred.text())
    }

    pub fn demangler(&self) -> &dyn Demangler {
        self.demangler.as_ref()
    }

    pub fn ordinals(&self) -> &OrdinalCache {
        &self.ordinals
    }

    /// Addresses and their candidate sets, ascending by address. Includes
    /// empty sets created by lookups.
    pub fn iter(&self) -> impl Iterator<Item = (Address, &Names)> + '_ {
        self.names.iter().map(|(a, n)| (*a, n))
    }

    /// Number of distinct candidates across all addresses.
    pub fn candidate_count(&self) -> usize {
        self.names.values().map(Names::len).sum()
    }

    /// Number of addresses with an entry (empty or not).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn init_from_config(&mut self, config: &dyn ConfigSource) -> usize {
        let mut added =
            self.add_name(config.entry_point(), ENTRY_POINT_NAME, NameKind::ConfigEntryPoint)
                as usize;

        let declared = [
            (config.functions(), NameKind::ConfigFunction),
            (config.globals(), NameKind::ConfigGlobal),
            (config.segments(), NameKind::ConfigSegment),
        ];
        for (declarations, kind) in declared {
            for decl in declarations {
                added += self.add_name(decl.address, &decl.name, kind) as usize;
            }
        }
        added
    }

    fn init_from_debug(&mut self, debug: &dyn DebugSource) -> usize {
        let mut added = 0;
        for func in debug.functions() {
            added += self.add_name(func.address, &func.name, NameKind::DebugFunction) as usize;
        }
        for global in debug.globals() {
            // Register- and stack-resident globals have no address to name.
            if let Some(address) = global.storage.memory_address() {
                added += self.add_name(address, &global.name, NameKind::DebugGlobal) as usize;
            }
        }
        added
    }

    fn init_from_image(&mut self, image: &dyn ImageSource) -> usize {
        let mut added = 0;

        if let Some(table) = image.import_table() {
            added += self.add_imports(table);
        }

        if let Some(exports) = image.export_table() {
            for export in exports {
                added += self.add_name(export.address, &export.name, NameKind::Export) as usize;
            }
        }

        for table in image.symbol_tables() {
            for symbol in &table.symbols {
                let Some(address) = symbol.address else { continue };
                let kind = match symbol.usage {
                    SymbolUsage::Function => NameKind::SymbolFunction,
                    SymbolUsage::Object => NameKind::SymbolObject,
                    SymbolUsage::File => NameKind::SymbolFile,
                    SymbolUsage::Other => NameKind::SymbolOther,
                };
                added += self.add_name(address, &symbol.name, kind) as usize;
            }
        }

        if let Some(entry) = image.entry_point() {
            added += self.add_name(entry, ENTRY_POINT_NAME, NameKind::EntryPoint) as usize;
        }

        for segment in image.segments() {
            added += self.add_name(segment.start, &segment.name, NameKind::Segment) as usize;
        }
        added
    }

    /// Named imports are used as-is. Unnamed imports with an ordinal are looked
    /// up in the owning library's ordinal file, falling back to a generated
    /// placeholder.
    fn add_imports(&mut self, table: &ImportTable) -> usize {
        let mut added = 0;
        for import in &table.imports {
            if let Some(name) = import.name.as_deref().filter(|n| !n.is_empty()) {
                added += self.add_name(import.address, name, NameKind::Import) as usize;
                continue;
            }
            let Some(ordinal) = import.ordinal else { continue };

            let resolved = match table.library_of(import) {
                Some(library) => self
                    .resolve_ordinal_name(library, ordinal)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned),
                None => None,
            };
            let inserted = match resolved {
                Some(name) => self.add_name(import.address, &name, NameKind::Import),
                None => self.add_name(
                    import.address,
                    &generate_import_name(ordinal),
                    NameKind::ImportGenerated,
                ),
            };
            added += inserted as usize;
        }
        added
    }
}
