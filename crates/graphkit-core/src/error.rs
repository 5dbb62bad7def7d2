use std::fmt;

/// Errors surfaced by graph operations.
///
/// Absent nodes and unreachable targets are not errors: those degrade to
/// empty results or `None`. Only usage errors and malformed input land here.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A directed-only algorithm was called on an undirected graph.
    #[error("{operation} requires a directed graph")]
    RequiresDirected { operation: &'static str },

    /// The operation needs an acyclic graph and found a cycle.
    #[error("{operation} requires an acyclic graph, but a cycle was found")]
    CycleDetected { operation: &'static str },

    /// An edge weight that shortest/longest path search cannot use.
    #[error("edge {from} -> {to} has weight {weight}; path search needs finite, non-negative weights")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// The JSON graph document could not be parsed or written.
    #[error("graph document error: {0}")]
    Document(#[from] serde_json::Error),
}

impl GraphError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::RequiresDirected { .. } => ErrorCode::RequiresDirected,
            Self::CycleDetected { .. } => ErrorCode::CycleDetected,
            Self::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            Self::Document(_) => ErrorCode::MalformedDocument,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Machine-readable error codes for callers that branch on failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    RequiresDirected,
    CycleDetected,
    InvalidWeight,
    MalformedDocument,
}

impl ErrorCode {
    /// Stable code identifier (`G####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::RequiresDirected => "G1001",
            Self::CycleDetected => "G1002",
            Self::InvalidWeight => "G2001",
            Self::MalformedDocument => "G3001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::RequiresDirected => "Operation requires a directed graph",
            Self::CycleDetected => "Graph contains a cycle",
            Self::InvalidWeight => "Invalid edge weight",
            Self::MalformedDocument => "Malformed graph document",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::RequiresDirected => Some("Construct the graph with `directed: true`."),
            Self::CycleDetected => Some("Remove an edge from each reported cycle and retry."),
            Self::InvalidWeight => Some("Use finite weights >= 0, or build an unweighted graph."),
            Self::MalformedDocument => {
                Some("Expected {\"nodes\": [...], \"edges\": [...], \"directed\": bool, \"weighted\": bool}.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
