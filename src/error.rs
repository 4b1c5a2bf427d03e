use std::fmt;

use crate::graphs::Vertex;

// `Error` is implemented by hand rather than derived with thiserror: a field
// named `source` would otherwise be treated as the underlying error.
#[derive(Debug)]
pub enum ChError {
    InvalidVertex {
        vertex: Vertex,
        number_of_vertices: u32,
    },

    DistanceOverflow { source: Vertex, target: Vertex },

    Io(std::io::Error),

    Serialization(bincode::Error),
}

impl fmt::Display for ChError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChError::InvalidVertex {
                vertex,
                number_of_vertices,
            } => write!(
                f,
                "vertex {vertex} is out of range for a graph with {number_of_vertices} vertices"
            ),
            ChError::DistanceOverflow { source, target } => write!(
                f,
                "distance from {source} to {target} does not fit into a u64"
            ),
            ChError::Io(e) => write!(f, "i/o error: {e}"),
            ChError::Serialization(e) => {
                write!(f, "unable to (de)serialize contracted graph: {e}")
            }
        }
    }
}

impl std::error::Error for ChError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChError::Io(e) => Some(e),
            ChError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChError {
    fn from(e: std::io::Error) -> Self {
        ChError::Io(e)
    }
}

impl From<bincode::Error> for ChError {
    fn from(e: bincode::Error) -> Self {
        ChError::Serialization(e)
    }
}
