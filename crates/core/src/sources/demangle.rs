/// Symbol demangling capability.
pub trait Demangler: Send + Sync {
    /// Human-readable name of the demangler.
    fn name(&self) -> &'static str;

    /// Demangled form of `symbol`, or `None` if it is not a mangled name this
    /// demangler understands.
    fn demangle(&self, symbol: &str) -> Option<String>;
}

/// Demangles Rust symbols (legacy and v0 schemes).
#[derive(Debug, Clone, Copy, Default)]
pub struct RustDemangler;

impl Demangler for RustDemangler {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn demangle(&self, symbol: &str) -> Option<String> {
        // Alternate formatting drops the trailing hash.
        rustc_demangle::try_demangle(symbol).ok().map(|d| format!("{d:#}"))
    }
}

/// Demangler that never recognizes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDemangler;

impl Demangler for NullDemangler {
    fn name(&self) -> &'static str {
        "none"
    }

    fn demangle(&self, _symbol: &str) -> Option<String> {
        None
    }
}
