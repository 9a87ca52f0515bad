use serde::{Deserialize, Serialize};

use crate::model::Address;
use crate::sources::ImageSource;

/// One entry of the import table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageImport {
    /// Address of the import slot.
    pub address: Address,
    /// Imported symbol name; `None` for imports known only by ordinal.
    pub name: Option<String>,
    /// Index into `ImportTable::libraries`, when the format records it.
    pub library_index: Option<usize>,
    pub ordinal: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTable {
    pub libraries: Vec<String>,
    pub imports: Vec<ImageImport>,
}

impl ImportTable {
    pub fn library(&self, index: usize) -> Option<&str> {
        self.libraries.get(index).map(String::as_str)
    }

    /// Library owning `import`, if recorded.
    pub fn library_of(&self, import: &ImageImport) -> Option<&str> {
        import.library_index.and_then(|i| self.library(i))
    }

    /// Index of `library`, appending it if not yet present.
    pub fn intern_library(&mut self, library: &str) -> usize {
        match self.libraries.iter().position(|l| l == library) {
            Some(index) => index,
            None => {
                self.libraries.push(library.to_string());
                self.libraries.len() - 1
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageExport {
    pub address: Address,
    pub name: String,
}

/// Declared usage of a symbol-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolUsage {
    Function,
    Object,
    File,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSymbol {
    pub name: String,
    /// Real address; `None` when the symbol does not resolve to one (undefined, absolute zero).
    pub address: Option<Address>,
    pub usage: SymbolUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    pub name: String,
    pub symbols: Vec<ImageSymbol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSegment {
    pub name: String,
    pub start: Address,
}

/// Everything the registry consumes from a parsed executable image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Short format label ("elf", "pe", "mach-o").
    pub format: String,
    pub import_table: Option<ImportTable>,
    pub export_table: Option<Vec<ImageExport>>,
    pub symbol_tables: Vec<SymbolTable>,
    pub entry_point: Option<Address>,
    pub segments: Vec<ImageSegment>,
}

impl ImageSource for ImageInfo {
    fn import_table(&self) -> Option<&ImportTable> {
        self.import_table.as_ref()
    }

    fn export_table(&self) -> Option<&[ImageExport]> {
        self.export_table.as_deref()
    }

    fn symbol_tables(&self) -> &[SymbolTable] {
        &self.symbol_tables
    }

    fn entry_point(&self) -> Option<Address> {
        self.entry_point
    }

    fn segments(&self) -> &[ImageSegment] {
        &self.segments
    }
}
