use thiserror::Error;

use crate::graphs::Vertex;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// An operation was called in a lifecycle state that forbids it, e.g.
    /// `create_landmarks` on an already initialized storage.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A caller-supplied value is out of range for the current graph or
    /// landmark configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A weight cell holds the infinity sentinel. Callers are expected to
    /// filter unreachable landmarks before asking for their weights.
    #[error("weight for landmark index {landmark} and vertex {vertex} is infinite")]
    UnreachableWeight { landmark: usize, vertex: Vertex },

    /// The byte store rejected an operation.
    #[error("storage error: {0}")]
    Storage(String),

    /// A graph file could not be parsed.
    #[error("malformed graph file: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
