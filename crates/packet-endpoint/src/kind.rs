//! Endpoint kinds and the registry that maps them to names and renderers.

mod id;
pub use id::EndpointKind;

mod render;
pub use render::Render;

mod registry;
pub use registry::{global, install, KindMetadata, Registry};

mod error;
pub use error::{InstallError, KindParseError, RegisterKindError};
