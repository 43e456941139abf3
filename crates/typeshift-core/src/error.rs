use crate::introspect::TypeHandle;
use thiserror::Error;

/// Failures raised by the closure resolver, the model builder and the
/// partitioner. All of them abort the whole generation request; partial
/// modules with missing imports would be silently wrong.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("configuration error for type {handle}: {message}")]
    Configuration { handle: TypeHandle, message: String },

    #[error("type {name} ({handle}) is not a primitive, sequence, generic parameter, class, interface or enum")]
    UnsupportedType { handle: TypeHandle, name: String },

    #[error("generic parameter {name} cannot be matched on its declaring type {declaring}")]
    Resolution { declaring: TypeHandle, name: String },

    #[error("no declaration was built for {name} ({handle}); the closure computation has a gap")]
    InternalConsistency { handle: TypeHandle, name: String },
}
