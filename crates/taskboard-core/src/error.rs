//! Error Types

use thiserror::Error;

/// Failures raised by the GraphQL client
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with HTTP status {status}")]
    Http { status: u16 },

    #[error("{}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Response is missing field `{0}`")]
    MissingData(&'static str),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Joins server-reported business errors into one banner message
pub fn join_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        "Request failed".to_string()
    } else {
        errors.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_message() {
        let err = ClientError::GraphQl(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "a; b");
    }

    #[test]
    fn test_join_errors_empty() {
        assert_eq!(join_errors(&[]), "Request failed");
        assert_eq!(join_errors(&["Task not found".into()]), "Task not found");
    }
}
