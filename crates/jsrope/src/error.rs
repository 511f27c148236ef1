//! Errors raised while building nodes.

/// Contract violations detected while constructing or invoking a node.
///
/// Both kinds are programmer errors: they are reported at the violating call
/// and no partially built node escapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("argument `{0}` is already given")]
    DuplicateBinding(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
