// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//! The normalized outcome of a lifecycle operation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt::Display;

/// Key of the data payload entry that carries the failure message.
pub const EXCEPTION_KEY: &str = "Exception";

/// Outcome status reported to CloudFormation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The operation succeeded.
    Success,
    /// The operation failed; CloudFormation rolls the stack back.
    Failed,
}

/// The `(status, data, resource id)` outcome reported for every invocation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultEnvelope {
    /// Whether the operation succeeded.
    pub status:      Status,
    /// Operation specific payload. On failure it holds the error message
    /// under [`EXCEPTION_KEY`].
    pub data:        Value,
    /// The identifier CloudFormation tracks the resource by.
    pub resource_id: Option<String>,
}

impl ResultEnvelope {
    /// Creates a successful envelope.
    pub fn success(data: Value, resource_id: impl Into<String>) -> Self {
        Self {
            status:      Status::Success,
            data,
            resource_id: Some(resource_id.into()),
        }
    }

    /// Creates a failed envelope carrying the error message.
    pub fn failed<E: Display>(error: E, resource_id: Option<String>) -> Self {
        Self {
            status: Status::Failed,
            data: json!({ EXCEPTION_KEY: error.to_string() }),
            resource_id,
        }
    }

    /// Returns true if the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Returns the failure message, if any.
    pub fn exception(&self) -> Option<&str> {
        self.data.get(EXCEPTION_KEY).and_then(Value::as_str)
    }

    /// Returns an empty data payload.
    pub fn empty_data() -> Value {
        Value::Object(Map::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_envelope_carries_message() {
        let envelope = ResultEnvelope::failed("not found", Some("abc123".to_string()));
        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.data, json!({ "Exception": "not found" }));
        assert_eq!(envelope.exception(), Some("not found"));
        assert_eq!(envelope.resource_id.as_deref(), Some("abc123"));
        assert!(!envelope.is_success());
    }

    #[test]
    fn status_wire_format() -> serde_json::Result<()> {
        assert_eq!(serde_json::to_value(Status::Success)?, json!("SUCCESS"));
        assert_eq!(serde_json::to_value(Status::Failed)?, json!("FAILED"));

        let envelope = ResultEnvelope::success(ResultEnvelope::empty_data(), "abc123");
        assert_eq!(
            serde_json::to_value(&envelope)?,
            json!({ "Status": "SUCCESS", "Data": {}, "ResourceId": "abc123" })
        );
        Ok(())
    }
}
