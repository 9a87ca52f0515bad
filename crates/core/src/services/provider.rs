//! Session-scoped ownership of name registries.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::services::registry::NameRegistry;
use crate::sources::{ConfigSource, DebugSource, Demangler, ImageSource};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one analyzed module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// A process-unique id.
    pub fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Collaborators needed to build a registry.
///
/// Configuration, image, and demangler are required; debug information is optional.
#[derive(Default, Clone)]
pub struct RegistrySources<'a> {
    pub config: Option<&'a dyn ConfigSource>,
    pub debug: Option<&'a dyn DebugSource>,
    pub image: Option<&'a dyn ImageSource>,
    pub demangler: Option<Arc<dyn Demangler>>,
}

impl<'a> RegistrySources<'a> {
    pub fn new(
        config: &'a dyn ConfigSource,
        image: &'a dyn ImageSource,
        demangler: Arc<dyn Demangler>,
    ) -> Self {
        Self { config: Some(config), debug: None, image: Some(image), demangler: Some(demangler) }
    }

    pub fn with_debug(mut self, debug: &'a dyn DebugSource) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Name of the first missing required collaborator.
    fn missing(&self) -> Option<&'static str> {
        if self.config.is_none() {
            Some("config")
        } else if self.image.is_none() {
            Some("image")
        } else if self.demangler.is_none() {
            Some("demangler")
        } else {
            None
        }
    }
}

/// Owns one `NameRegistry` per session.
///
/// Registries live until removed individually or until `clear`.
#[derive(Debug, Default)]
pub struct NameRegistryProvider {
    registries: HashMap<SessionId, NameRegistry>,
}

impl NameRegistryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register the registry for `session`.
    ///
    /// Returns `None` without changes if a required collaborator is missing.
    /// If `session` already has a registry, that one is returned untouched and
    /// `sources` are not read.
    pub fn create(
        &mut self,
        session: SessionId,
        sources: RegistrySources<'_>,
    ) -> Option<&mut NameRegistry> {
        if let Some(missing) = sources.missing() {
            warn!(%session, missing, "cannot create name registry: collaborator missing");
            return None;
        }
        let RegistrySources { config, debug, image, demangler } = sources;
        let (config, image, demangler) = (config?, image?, demangler?);

        let registry = self.registries.entry(session).or_insert_with(|| {
            debug!(%session, "creating name registry");
            NameRegistry::new(config, debug, image, demangler)
        });
        Some(registry)
    }

    pub fn get(&self, session: SessionId) -> Option<&NameRegistry> {
        self.registries.get(&session)
    }

    pub fn get_mut(&mut self, session: SessionId) -> Option<&mut NameRegistry> {
        self.registries.get_mut(&session)
    }

    pub fn contains(&self, session: SessionId) -> bool {
        self.registries.contains_key(&session)
    }

    /// Drop the registry of a finished session.
    pub fn remove(&mut self, session: SessionId) -> Option<NameRegistry> {
        self.registries.remove(&session)
    }

    /// Drop every registry.
    pub fn clear(&mut self) {
        self.registries.clear();
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}
