//! Typed, ordered and renderable endpoint identities (IP and MAC addresses, transport ports)
//! for packet-analysis code.
//!
//! An [`Endpoint`] pairs an [`EndpointKind`] with the raw bytes of an address. Endpoints of any
//! kind can be compared and sorted without decoding them, and rendered lazily through the
//! renderer registered for their kind in a [`Registry`].

pub mod endpoint;
pub use endpoint::Endpoint;

pub mod kind;
pub use kind::{
    global, install, EndpointKind, InstallError, KindMetadata, KindParseError, RegisterKindError,
    Registry, Render,
};

pub(crate) mod utils;
