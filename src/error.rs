//! Error type shared by the whole crate.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading, parsing or evaluating a risk model.
#[derive(Debug, Error)]
pub enum PraError {
    /// A logic string is not a valid expression.
    #[error("Malformed expression `{input}`: {message}")]
    MalformedExpression { input: String, message: String },

    /// The model itself is invalid (name collisions, invalid probabilities, missing sections).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A logic string references an event which is neither a basic event nor a top event.
    #[error("Unknown symbol `{0}`")]
    UnknownSymbol(String),

    /// A top event depends on itself. The payload is the cycle, starting and ending with
    /// the same top event.
    #[error("Cyclic top event definition: {}", .0.join(" -> "))]
    CyclicDefinition(Vec<String>),

    /// An event appears in a cut set, but there is no probability for it.
    #[error("No probability assigned to basic event `{0}`")]
    MissingProbability(String),

    /// The minimizer or the inclusion–exclusion step exceeded its configured budget.
    #[error("Resource limit exceeded: more than {limit} {what}")]
    ResourceExhaustion { what: &'static str, limit: usize },

    #[error("Cannot access `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid XML document: {0}")]
    Xml(String),

    #[error("Invalid solver configuration: {0}")]
    Config(String),
}

impl PraError {
    /// **(internal)** Shorthand for a `MalformedExpression` error.
    pub(crate) fn malformed_expression(input: &str, message: String) -> PraError {
        PraError::MalformedExpression {
            input: input.to_string(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::PraError;

    #[test]
    fn error_messages() {
        let cycle = PraError::CyclicDefinition(vec!["T1".into(), "T2".into(), "T1".into()]);
        assert_eq!("Cyclic top event definition: T1 -> T2 -> T1", cycle.to_string());
        let limit = PraError::ResourceExhaustion {
            what: "cut sets",
            limit: 10,
        };
        assert_eq!("Resource limit exceeded: more than 10 cut sets", limit.to_string());
        assert_eq!(
            "Unknown symbol `X`",
            PraError::UnknownSymbol("X".to_string()).to_string()
        );
    }
}
