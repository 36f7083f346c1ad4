use thiserror::Error;

use crate::animation::InstanceId;
use crate::schema::SchemaError;

/// Errors raised by an animation instance when its lifecycle contract is violated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// A lifecycle call reached an instance after `cleanup`
    #[error("animation instance {0} has already been cleaned up")]
    Cleaned(InstanceId),
}

/// Errors surfaced to the user by the gallery host.
///
/// None of these are fatal: the host logs them, shows a transient notice and
/// keeps whatever was running before.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("No animation with id '{0}'")]
    NotFound(String),

    #[error("Failed to load animation '{id}': {reason}")]
    LoadFailure { id: String, reason: String },

    #[error("Could not copy to clipboard: {0}")]
    ClipboardFailure(String),

    #[error("Invalid value for '{key}': {source}")]
    InvalidInput {
        key: String,
        #[source]
        source: SchemaError,
    },

    #[error("Could not serialize the parameters: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No animation is active")]
    NoActiveAnimation,

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

pub type GalleryResult<T> = Result<T, GalleryError>;
