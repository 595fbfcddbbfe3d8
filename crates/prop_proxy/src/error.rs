use prop_reflect::info::ReflectKind;
use prop_reflect::ops::MaterializeError;
use prop_reflect::path::ParseError;
use thiserror::Error;

use crate::ListenerError;

/// Failure of a property read or write.
///
/// Reads only fail on malformed paths: a missing property reads as `Null`.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("`{type_path}` has no property `{property}`")]
    NoSuchProperty {
        type_path: &'static str,
        property: String,
    },
    #[error("index {index} is out of bounds for `{property}` of length {len}")]
    IndexOutOfBounds {
        property: String,
        index: usize,
        len: usize,
    },
    #[error("cannot create `{property}`")]
    Materialize {
        property: String,
        #[source]
        source: MaterializeError,
    },
    #[error("cannot write through `{property}` ({kind})")]
    NotTraversable { property: String, kind: ReflectKind },
    #[error("property change listener failed")]
    Listener(#[source] ListenerError),
}
