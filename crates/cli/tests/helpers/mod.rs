use std::path::{Path, PathBuf};

use object::write::{Object, Symbol, SymbolSection};
use object::{
    Architecture, BinaryFormat, Endianness, SectionKind, SymbolFlags, SymbolKind, SymbolScope,
};

/// Write a small relocatable ELF with two function symbols into `dir`.
pub fn write_elf_fixture(dir: &Path) -> PathBuf {
    let mut obj = Object::new(BinaryFormat::Elf, Architecture::X86_64, Endianness::Little);
    let text_id = obj.add_section(Vec::new(), b".text".to_vec(), SectionKind::Text);
    obj.section_mut(text_id).append_data(&[0x90; 0x40], 16);
    for (name, value) in [(&b"decode_frame"[..], 0x10u64), (&b"_main"[..], 0x20)] {
        obj.add_symbol(Symbol {
            name: name.to_vec(),
            value,
            size: 0,
            kind: SymbolKind::Text,
            scope: SymbolScope::Linkage,
            weak: false,
            section: SymbolSection::Section(text_id),
            flags: SymbolFlags::None,
        });
    }
    let path = dir.join("fixture.o");
    std::fs::write(&path, obj.write().unwrap()).unwrap();
    path
}

