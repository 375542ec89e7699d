//! GraphQL Documents and Wire Types
//!
//! Request bodies, the response envelope and the operations the app issues.

mod mutations;
mod queries;

use log::error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

pub use mutations::*;
pub use queries::*;

/// A single GraphQL operation ready to be posted
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: Value,
}

impl GraphQlRequest {
    pub fn new<V: Serialize>(
        operation_name: &'static str,
        query: &'static str,
        variables: &V,
    ) -> ClientResult<Self> {
        Ok(Self {
            operation_name,
            query,
            variables: serde_json::to_value(variables)?,
        })
    }

    pub fn to_payload(&self) -> ClientResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
    #[serde(default)]
    locations: Option<Value>,
    #[serde(default)]
    path: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<ErrorEntry>>,
}

/// Decode `data.<root_field>` from a response body.
///
/// Any entry in the top-level `errors` list fails the whole operation.
pub fn decode_response<T: DeserializeOwned>(body: Value, root_field: &'static str) -> ClientResult<T> {
    let envelope: Envelope = serde_json::from_value(body)?;

    if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
        for entry in &errors {
            error!(
                "[GraphQL error]: Message: {}, Location: {}, Path: {}",
                entry.message,
                entry.locations.as_ref().map(Value::to_string).unwrap_or_default(),
                entry.path.as_ref().map(Value::to_string).unwrap_or_default(),
            );
        }
        return Err(ClientError::GraphQl(errors.into_iter().map(|e| e.message).collect()));
    }

    let mut data = envelope.data.ok_or(ClientError::MissingData("data"))?;
    let field = data
        .get_mut(root_field)
        .map(Value::take)
        .ok_or(ClientError::MissingData(root_field))?;
    Ok(serde_json::from_value(field)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use serde_json::json;

    #[test]
    fn test_request_payload_shape() {
        let req = GraphQlRequest::new(
            "GetTasks",
            GET_TASKS,
            &TasksVars { project_id: "3", organization_slug: "acme-corp" },
        )
        .unwrap();
        let payload = req.to_payload().unwrap();
        assert_eq!(payload["operationName"], "GetTasks");
        assert_eq!(payload["variables"]["projectId"], "3");
        assert_eq!(payload["variables"]["organizationSlug"], "acme-corp");
    }

    #[test]
    fn test_decode_errors_take_precedence() {
        let body = json!({
            "data": null,
            "errors": [{ "message": "boom", "path": ["tasks"] }]
        });
        let res: ClientResult<Vec<Task>> = decode_response(body, "tasks");
        assert_eq!(res, Err(ClientError::GraphQl(vec!["boom".to_string()])));
    }

    #[test]
    fn test_decode_missing_root_field() {
        let res: ClientResult<Vec<Task>> = decode_response(json!({ "data": {} }), "tasks");
        assert_eq!(res, Err(ClientError::MissingData("tasks")));
    }

    #[test]
    fn test_decode_null_single_entity() {
        let res: ClientResult<Option<Task>> = decode_response(json!({ "data": { "project": null } }), "project");
        assert_eq!(res, Ok(None));
    }
}
