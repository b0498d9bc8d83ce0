//! Transit error types.
//!
//! Build errors abort construction as a whole; query errors are scoped to a
//! single request. A query with no connecting route is not an error.

use crate::graph::{EdgeId, GraphError};
use crate::router::RouterError;

use super::SettingsError;

/// Errors that abort building a route graph or router.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// A bus route names a stop the catalogue doesn't list
    #[error("bus {bus} stops at unknown stop {stop}")]
    UnknownStop { bus: String, stop: String },

    /// No road distance in either direction between adjacent stops
    #[error("no road distance between {from} and {to}")]
    MissingDistance { from: String, to: String },

    /// Routing settings out of range
    #[error("invalid routing settings: {0}")]
    Settings(#[from] SettingsError),

    /// Graph construction failed
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Routes table construction failed
    #[error(transparent)]
    Router(#[from] RouterError),
}

/// Errors for a single route query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// Endpoint isn't a known stop
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// Route uses an edge with no wait/ride tag
    #[error("edge {0} has no tag")]
    UntaggedEdge(EdgeId),

    /// Router state is inconsistent
    #[error(transparent)]
    Router(#[from] RouterError),
}

/// Tags and vertex roles don't match the graph they describe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("route layout is inconsistent: {0}")]
pub struct LayoutError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BuildError::UnknownStop {
            bus: "14".into(),
            stop: "Nowhere".into(),
        };
        assert_eq!(err.to_string(), "bus 14 stops at unknown stop Nowhere");

        let err = BuildError::MissingDistance {
            from: "A".into(),
            to: "B".into(),
        };
        assert_eq!(err.to_string(), "no road distance between A and B");

        let err = BuildError::from(SettingsError::InvalidWaitTime(-1.0));
        assert_eq!(
            err.to_string(),
            "invalid routing settings: bus wait time must be a non-negative number of minutes, got -1"
        );

        let err = QueryError::UnknownStop("Nowhere".into());
        assert_eq!(err.to_string(), "unknown stop: Nowhere");

        let err = QueryError::UntaggedEdge(12);
        assert_eq!(err.to_string(), "edge 12 has no tag");

        let err = LayoutError("2 vertex roles for 4 vertices".into());
        assert_eq!(
            err.to_string(),
            "route layout is inconsistent: 2 vertex roles for 4 vertices"
        );
    }
}
