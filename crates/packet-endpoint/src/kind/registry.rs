use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt::{self, Debug, Formatter},
    sync::{Arc, OnceLock},
};

use super::{
    render::{fallback, BuiltinRenderer},
    EndpointKind, InstallError, RegisterKindError, Render,
};

/// The name and renderer registered for an [`EndpointKind`].
#[derive(Clone)]
pub struct KindMetadata {
    name: Cow<'static, str>,
    renderer: Arc<dyn Render>,
}

impl KindMetadata {
    /// Creates metadata from a display name and a renderer.
    ///
    /// Names are informational and need not be unique across kinds, but must not be empty.
    pub fn new<R>(name: impl Into<Cow<'static, str>>, renderer: R) -> Self
    where
        R: Render + 'static,
    {
        Self {
            name: name.into(),
            renderer: Arc::new(renderer),
        }
    }

    /// Returns the display name of the kind.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders a raw payload with the kind's renderer.
    pub fn render(&self, raw: &[u8]) -> String {
        self.renderer.render(raw)
    }
}

impl Debug for KindMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindMetadata")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Table mapping each [`EndpointKind`] to its [`KindMetadata`].
///
/// A registry is filled during start-up, by the application and by any protocol module that
/// introduces its own kinds, and is only read afterwards. Sharing a `&Registry` across threads
/// requires no locking.
///
/// The reserved [`EndpointKind::INVALID`] is present in every registry.
///
/// # Examples
///
/// ```
/// # use packet_endpoint::{Endpoint, EndpointKind, KindMetadata, Registry};
/// let mut registry = Registry::with_builtins();
/// let quic_cid = registry.register(
///     EndpointKind::new(100),
///     KindMetadata::new("QUIC-CID", |raw: &[u8]| format!("cid:{}", raw.len())),
/// );
///
/// let endpoint = Endpoint::new(quic_cid, &[1, 2, 3, 4]);
/// assert_eq!(endpoint.render(&registry), "cid:4");
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    kinds: BTreeMap<EndpointKind, KindMetadata>,
}

impl Registry {
    /// Creates a registry holding only the reserved invalid kind.
    pub fn new() -> Self {
        let mut kinds = BTreeMap::new();
        kinds.insert(
            EndpointKind::INVALID,
            KindMetadata::new("Invalid", BuiltinRenderer::Invalid),
        );
        Self { kinds }
    }

    /// Creates a registry holding the complete built-in catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packet_endpoint::{EndpointKind, Registry};
    /// let registry = Registry::with_builtins();
    /// assert_eq!(registry.name(EndpointKind::UDPLITE_PORT), Some("UDPLite"));
    /// assert_eq!(registry.len(), 10);
    /// ```
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (kind, name) in EndpointKind::BUILTINS {
            let Some(renderer) = BuiltinRenderer::for_kind(kind) else {
                continue;
            };
            registry.kinds.insert(kind, KindMetadata::new(name, renderer));
        }
        registry
    }

    /// Adds a kind to the registry and returns it.
    ///
    /// # Errors
    ///
    /// Fails if the kind is already registered or if the name is empty. The registry is left
    /// unchanged in either case.
    pub fn try_register(
        &mut self,
        kind: EndpointKind,
        metadata: KindMetadata,
    ) -> Result<EndpointKind, RegisterKindError> {
        if metadata.name().is_empty() {
            return Err(RegisterKindError::EmptyName(kind));
        }
        if let Some(existing) = self.kinds.get(&kind) {
            return Err(RegisterKindError::Duplicate {
                kind,
                existing: existing.name().to_string(),
            });
        }

        tracing::debug!(%kind, name = metadata.name(), "registering endpoint kind");
        self.kinds.insert(kind, metadata);

        Ok(kind)
    }

    /// Adds a kind to the registry and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the kind is already registered or if the name is empty. Both indicate that
    /// the program is built incorrectly, see [`Self::try_register`] for a fallible variant.
    pub fn register(&mut self, kind: EndpointKind, metadata: KindMetadata) -> EndpointKind {
        match self.try_register(kind, metadata) {
            Ok(kind) => kind,
            Err(err) => {
                tracing::error!(%err, "failed to register endpoint kind");
                panic!("{err}");
            }
        }
    }

    /// Returns the metadata registered for the kind.
    pub fn lookup(&self, kind: EndpointKind) -> Option<&KindMetadata> {
        self.kinds.get(&kind)
    }

    /// Returns true if the kind is registered.
    pub fn contains(&self, kind: EndpointKind) -> bool {
        self.kinds.contains_key(&kind)
    }

    /// Returns the name registered for the kind.
    pub fn name(&self, kind: EndpointKind) -> Option<&str> {
        self.lookup(kind).map(KindMetadata::name)
    }

    /// Returns the registered kinds in ascending order.
    pub fn kinds(&self) -> impl Iterator<Item = EndpointKind> + '_ {
        self.kinds.keys().copied()
    }

    /// Returns the number of registered kinds, including the invalid kind.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Renders a raw payload of the given kind.
    ///
    /// Kinds missing from the registry are rendered as their decimal id followed by a colon and
    /// the payload in hex, for example `42:dead`.
    pub fn render(&self, kind: EndpointKind, raw: &[u8]) -> String {
        match self.lookup(kind) {
            Some(metadata) => metadata.render(raw),
            None => {
                tracing::trace!(%kind, "rendering endpoint of unregistered kind");
                fallback(kind, raw)
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Publishes a fully populated registry for process-wide use.
///
/// This is meant to be called once, after all kinds are registered and before any endpoint is
/// displayed. The installed registry backs [`global`] and the [`Display`][std::fmt::Display]
/// implementation of [`Endpoint`][crate::Endpoint].
///
/// # Errors
///
/// Fails if a registry was already installed, or if [`global`] was already called and fell
/// back to the built-in catalog.
pub fn install(registry: Registry) -> Result<&'static Registry, InstallError> {
    let n_kinds = registry.len();
    GLOBAL.set(registry).map_err(|_| InstallError)?;
    tracing::debug!(n_kinds, "installed process-wide endpoint kind registry");

    Ok(global())
}

/// Returns the process-wide registry.
///
/// If none was [installed][install], the built-in catalog is installed on first use.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(Registry::with_builtins)
}
