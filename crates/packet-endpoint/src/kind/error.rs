use super::EndpointKind;

/// Errors raised when a kind cannot be added to a [`Registry`][super::Registry].
///
/// These indicate a programming error, such as two independently developed protocol modules
/// choosing the same kind id, and are expected to abort start-up.
#[derive(Eq, PartialEq, Clone, Debug, thiserror::Error)]
pub enum RegisterKindError {
    #[error("endpoint kind {kind} is already registered as {existing:?}")]
    Duplicate {
        /// The id that was requested.
        kind: EndpointKind,
        /// Name of the kind already holding the id.
        existing: String,
    },
    #[error("endpoint kind {0} must have a non-empty name")]
    EmptyName(EndpointKind),
}

/// An error which can be returned when parsing an [`EndpointKind`] from a string.
#[derive(Eq, PartialEq, Clone, Debug, thiserror::Error)]
#[error("invalid endpoint kind string: {0}")]
pub struct KindParseError(pub(super) String);

/// Raised when installing a process-wide registry after one is already in place.
///
/// A registry is in place once [`install`][super::install] succeeded, or once
/// [`global`][super::global] was called and fell back to the built-in catalog.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, thiserror::Error)]
#[error("a process-wide endpoint kind registry is already installed")]
pub struct InstallError;
