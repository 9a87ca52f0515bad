use std::path::{Path, PathBuf};

use goblin::{elf, mach, pe, Object};
use thiserror::Error;
use tracing::debug;

use crate::model::Address;
use crate::sources::{
    ImageExport, ImageImport, ImageInfo, ImageSegment, ImageSymbol, ImportTable, SymbolTable,
    SymbolUsage,
};

/// Section attributes marking Mach-O sections that hold code.
const MACH_CODE_SECTION_ATTRS: u32 =
    mach::constants::S_ATTR_PURE_INSTRUCTIONS | mach::constants::S_ATTR_SOME_INSTRUCTIONS;

/// Name goblin gives to PE imports that only carry an ordinal.
const PE_ORDINAL_IMPORT_PREFIX: &str = "ORDINAL ";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to read binary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse binary: {0}")]
    Parse(#[from] goblin::error::Error),
    #[error("Unsupported binary format: {0}")]
    Unsupported(&'static str),
}

/// Parse an ELF, PE, or Mach-O image.
pub fn load_image(bytes: &[u8]) -> Result<ImageInfo, ImageError> {
    let info = match Object::parse(bytes)? {
        Object::Elf(elf) => elf_image(&elf),
        Object::PE(pe) => pe_image(&pe),
        Object::Mach(mach::Mach::Binary(bin)) => mach_image(&bin),
        Object::Mach(mach::Mach::Fat(_)) => return Err(ImageError::Unsupported("fat Mach-O")),
        Object::Archive(_) => return Err(ImageError::Unsupported("archive")),
        _ => return Err(ImageError::Unsupported("unknown")),
    };
    debug!(
        format = %info.format,
        symbol_tables = info.symbol_tables.len(),
        segments = info.segments.len(),
        "loaded image"
    );
    Ok(info)
}

pub fn load_image_file(path: impl AsRef<Path>) -> Result<ImageInfo, ImageError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|source| ImageError::Io { path: path.to_path_buf(), source })?;
    load_image(&bytes)
}

fn elf_usage(sym: &elf::sym::Sym) -> SymbolUsage {
    match sym.st_type() {
        elf::sym::STT_FUNC => SymbolUsage::Function,
        elf::sym::STT_OBJECT => SymbolUsage::Object,
        elf::sym::STT_FILE => SymbolUsage::File,
        _ => SymbolUsage::Other,
    }
}

fn elf_symbol_table(
    name: &str,
    syms: &elf::sym::Symtab,
    strtab: &goblin::strtab::Strtab,
) -> Option<SymbolTable> {
    if syms.is_empty() {
        return None;
    }
    let symbols = syms
        .iter()
        .filter_map(|sym| {
            let sym_name = strtab.get_at(sym.st_name).unwrap_or("");
            if sym_name.is_empty() {
                return None;
            }
            let defined = sym.st_shndx != elf::section_header::SHN_UNDEF as usize;
            let address = (defined && sym.st_value != 0).then(|| Address::new(sym.st_value));
            Some(ImageSymbol { name: sym_name.to_string(), address, usage: elf_usage(&sym) })
        })
        .collect();
    Some(SymbolTable { name: name.to_string(), symbols })
}

fn elf_imports(elf: &elf::Elf) -> Option<ImportTable> {
    if elf.pltrelocs.is_empty() {
        return None;
    }
    let mut table = ImportTable {
        libraries: elf.libraries.iter().map(|l| l.to_string()).collect(),
        imports: Vec::new(),
    };
    for reloc in elf.pltrelocs.iter() {
        let name = elf
            .dynsyms
            .get(reloc.r_sym)
            .and_then(|sym| elf.dynstrtab.get_at(sym.st_name))
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        // ELF does not tie an import to a specific DT_NEEDED entry.
        table.imports.push(ImageImport {
            address: Address::new(reloc.r_offset),
            name,
            library_index: None,
            ordinal: None,
        });
    }
    Some(table)
}

fn elf_image(elf: &elf::Elf) -> ImageInfo {
    let symbol_tables = [
        elf_symbol_table(".symtab", &elf.syms, &elf.strtab),
        elf_symbol_table(".dynsym", &elf.dynsyms, &elf.dynstrtab),
    ]
    .into_iter()
    .flatten()
    .collect();

    let segments = elf
        .section_headers
        .iter()
        .filter(|sh| sh.is_alloc())
        .filter_map(|sh| {
            let name = elf.shdr_strtab.get_at(sh.sh_name).unwrap_or("");
            (!name.is_empty())
                .then(|| ImageSegment { name: name.to_string(), start: Address::new(sh.sh_addr) })
        })
        .collect();

    ImageInfo {
        format: "elf".into(),
        import_table: elf_imports(elf),
        export_table: None,
        symbol_tables,
        entry_point: (elf.entry != 0).then(|| Address::new(elf.entry)),
        segments,
    }
}

/// Convert one PE import, interning its DLL in `table`.
///
/// The address is the import's IAT slot rebased on `image_base`. Imports
/// bound by ordinal only come back without a name.
pub fn pe_import(
    table: &mut ImportTable,
    image_base: u64,
    import: &pe::import::Import,
) -> ImageImport {
    let library_index = Some(table.intern_library(import.dll));
    let (name, ordinal) = if import.name.starts_with(PE_ORDINAL_IMPORT_PREFIX) {
        (None, Some(u64::from(import.ordinal)))
    } else {
        (Some(import.name.to_string()), None)
    };
    ImageImport {
        address: Address::new(image_base.saturating_add(import.offset as u64)),
        name,
        library_index,
        ordinal,
    }
}

fn pe_image(pe: &pe::PE) -> ImageInfo {
    let base = pe.image_base as u64;
    let rebase = |rva: u64| Address::new(base.saturating_add(rva));

    let mut imports = ImportTable::default();
    for imp in &pe.imports {
        let import = pe_import(&mut imports, base, imp);
        imports.imports.push(import);
    }

    let exports = pe
        .exports
        .iter()
        .filter(|exp| exp.rva != 0)
        .filter_map(|exp| {
            exp.name
                .map(|name| ImageExport { name: name.to_string(), address: rebase(exp.rva as u64) })
        })
        .collect::<Vec<_>>();

    let segments = pe
        .sections
        .iter()
        .filter_map(|sec| {
            let name = sec.name().ok()?;
            Some(ImageSegment {
                name: name.to_string(),
                start: rebase(u64::from(sec.virtual_address)),
            })
        })
        .collect();

    ImageInfo {
        format: "pe".into(),
        import_table: (!imports.imports.is_empty()).then_some(imports),
        export_table: (!exports.is_empty()).then_some(exports),
        symbol_tables: Vec::new(),
        entry_point: (pe.entry != 0).then(|| rebase(pe.entry as u64)),
        segments,
    }
}

/// Section-defined symbols are functions when their section holds code and
/// objects otherwise.
fn mach_usage(nlist: &mach::symbols::Nlist, section_flags: &[u32]) -> SymbolUsage {
    if nlist.is_stab() || nlist.get_type() != mach::symbols::N_SECT {
        return SymbolUsage::Other;
    }
    // n_sect counts sections from 1 across all segments.
    match nlist.n_sect.checked_sub(1).and_then(|i| section_flags.get(i)) {
        Some(flags) if flags & MACH_CODE_SECTION_ATTRS != 0 => SymbolUsage::Function,
        Some(_) => SymbolUsage::Object,
        None => SymbolUsage::Other,
    }
}

fn mach_image(bin: &mach::MachO) -> ImageInfo {
    let section_flags: Vec<u32> = bin
        .segments
        .iter()
        .flat_map(|seg| seg.sections().into_iter().flatten())
        .map(|(section, _)| section.flags)
        .collect();

    let symbols: Vec<ImageSymbol> = bin
        .symbols()
        .filter_map(Result::ok)
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, nlist)| {
            let address =
                (!nlist.is_undefined() && nlist.n_value != 0).then(|| Address::new(nlist.n_value));
            let usage = mach_usage(&nlist, &section_flags);
            ImageSymbol { name: name.to_string(), address, usage }
        })
        .collect();

    let segments = bin
        .segments
        .iter()
        .filter_map(|seg| {
            let name = seg.name().ok()?;
            (!name.is_empty())
                .then(|| ImageSegment { name: name.to_string(), start: Address::new(seg.vmaddr) })
        })
        .collect();

    let symbol_tables = if symbols.is_empty() {
        Vec::new()
    } else {
        vec![SymbolTable { name: "symtab".into(), symbols }]
    };

    ImageInfo {
        format: "mach-o".into(),
        import_table: None,
        export_table: None,
        symbol_tables,
        entry_point: (bin.entry != 0).then(|| Address::new(bin.entry)),
        segments,
    }
}
