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
//! The CloudFormation custom resource request handed to the function.
//!
//! CloudFormation invokes the function with a JSON document such as:
//!
//! ```json
//! {
//!     "RequestType": "Create",
//!     "ResponseURL": "https://cloudformation-custom-resource-response-useast1.s3.amazonaws.com/...",
//!     "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/live/5b2c...",
//!     "RequestId": "unique id for this create request",
//!     "ResourceType": "Custom::MediaLiveInput",
//!     "LogicalResourceId": "MediaLiveInput",
//!     "ResourceProperties": {
//!         "ServiceToken": "arn:aws:lambda:...",
//!         "HLSPrimarySource": "https://example.com/primary/index.m3u8",
//!         "HLSSecondarySource": "https://example.com/secondary/index.m3u8"
//!     }
//! }
//! ```
//!
//! More details: <https://docs.aws.amazon.com/AWSCloudFormation/latest/UserGuide/crpg-ref-requests.html>

use crate::error::{LifecycleError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Resource property holding the URL of the primary HLS source.
pub const HLS_PRIMARY_SOURCE: &str = "HLSPrimarySource";
/// Resource property holding the URL of the secondary HLS source.
pub const HLS_SECONDARY_SOURCE: &str = "HLSSecondarySource";

/// The lifecycle operation CloudFormation asks the resource to perform.
///
/// Any tag outside of `Create`, `Update` and `Delete` is kept verbatim in
/// [`Operation::Unsupported`] so that the function can still answer
/// CloudFormation instead of failing to parse the event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    /// The resource is being created.
    Create,
    /// The resource properties changed.
    Update,
    /// The resource is being removed.
    Delete,
    /// A request type this resource does not know about.
    Unsupported(String),
}

impl From<String> for Operation {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Create" => Operation::Create,
            "Update" => Operation::Update,
            "Delete" => Operation::Delete,
            _ => Operation::Unsupported(tag),
        }
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        op.to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "Create"),
            Operation::Update => write!(f, "Update"),
            Operation::Delete => write!(f, "Delete"),
            Operation::Unsupported(tag) => write!(f, "{}", tag),
        }
    }
}

impl Default for Operation {
    fn default() -> Self {
        Operation::Unsupported(String::new())
    }
}

/// Reads an explicit `null` as the default value of the field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A CloudFormation custom resource request.
///
/// Every field is optional on the wire and may be `null`. A malformed event
/// still deserializes and ends in a `FAILED` response rather than an
/// invocation error that would leave the stack waiting for its own timeout.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LifecycleRequest {
    /// `Create`, `Update` or `Delete`.
    #[serde(deserialize_with = "null_as_default")]
    pub request_type:            Operation,
    /// The pre-signed S3 URL the response is `PUT` to.
    #[serde(rename = "ResponseURL", deserialize_with = "null_as_default")]
    pub response_url:            String,
    /// The ARN of the stack that contains the custom resource.
    #[serde(deserialize_with = "null_as_default")]
    pub stack_id:                String,
    /// A unique id for the request.
    #[serde(deserialize_with = "null_as_default")]
    pub request_id:              String,
    /// The template developer-chosen type of the custom resource.
    #[serde(deserialize_with = "null_as_default")]
    pub resource_type:           String,
    /// The template developer-chosen name of the custom resource.
    #[serde(deserialize_with = "null_as_default")]
    pub logical_resource_id:     String,
    /// The id the resource was reported with on a previous request. Absent on
    /// the first `Create`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_resource_id:    Option<String>,
    /// The ARN of the function that serves the custom resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_token:           Option<String>,
    /// The properties declared in the template.
    #[serde(deserialize_with = "null_as_default")]
    pub resource_properties:     Map<String, Value>,
    /// The properties before an `Update`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<Map<String, Value>>,
}

impl LifecycleRequest {
    /// Returns the string value of a resource property.
    pub fn property(&self, name: &str) -> Result<&str> {
        self.resource_properties
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| LifecycleError::MissingProperty(name.to_owned()))
    }

    /// Returns the physical resource id, which every operation but the first
    /// `Create` requires.
    pub fn physical_id(&self) -> Result<&str> {
        self.physical_resource_id
            .as_deref()
            .ok_or_else(|| LifecycleError::MissingProperty("PhysicalResourceId".to_owned()))
    }

    /// Returns the primary and secondary HLS source URLs, in that order.
    pub fn hls_sources(&self) -> Result<[String; 2]> {
        Ok([
            self.property(HLS_PRIMARY_SOURCE)?.to_owned(),
            self.property(HLS_SECONDARY_SOURCE)?.to_owned(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_create_event() -> Result<()> {
        let event = json!({
            "RequestType": "Create",
            "ResponseURL": "https://example.com/response",
            "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/live/guid",
            "RequestId": "req-1",
            "ResourceType": "Custom::MediaLiveInput",
            "LogicalResourceId": "Input1",
            "ResourceProperties": {
                "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:input",
                "HLSPrimarySource": "http://a",
                "HLSSecondarySource": "http://b"
            }
        });

        let request: LifecycleRequest = serde_json::from_value(event)?;
        assert_eq!(request.request_type, Operation::Create);
        assert_eq!(request.response_url, "https://example.com/response");
        assert_eq!(request.logical_resource_id, "Input1");
        assert_eq!(request.physical_resource_id, None);
        assert_eq!(request.hls_sources()?, ["http://a".to_string(), "http://b".to_string()]);
        assert!(request.physical_id().is_err());

        Ok(())
    }

    #[test]
    fn parse_unknown_request_type() -> Result<()> {
        let request: LifecycleRequest =
            serde_json::from_value(json!({ "RequestType": "Rollback" }))?;
        assert_eq!(
            request.request_type,
            Operation::Unsupported("Rollback".to_string())
        );
        assert_eq!(request.request_type.to_string(), "Rollback");
        Ok(())
    }

    #[test]
    fn parse_sparse_event() -> Result<()> {
        let request: LifecycleRequest = serde_json::from_value(json!({
            "RequestType": "Delete",
            "PhysicalResourceId": "abc123"
        }))?;
        assert_eq!(request.request_type, Operation::Delete);
        assert_eq!(request.physical_id()?, "abc123");
        assert!(request.resource_properties.is_empty());

        match request.property(HLS_PRIMARY_SOURCE) {
            Err(LifecycleError::MissingProperty(name)) => assert_eq!(name, HLS_PRIMARY_SOURCE),
            other => panic!("unexpected result: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn parse_null_fields() -> Result<()> {
        let request: LifecycleRequest = serde_json::from_value(json!({
            "RequestType": null,
            "ResponseURL": null,
            "StackId": null,
            "LogicalResourceId": null,
            "PhysicalResourceId": null,
            "ResourceProperties": null
        }))?;
        assert_eq!(request.request_type, Operation::Unsupported(String::new()));
        assert_eq!(request.response_url, "");
        assert_eq!(request.physical_resource_id, None);
        assert!(request.resource_properties.is_empty());
        Ok(())
    }

    #[test]
    fn request_type_round_trips_as_tag() -> Result<()> {
        let value = serde_json::to_value(Operation::Update)?;
        assert_eq!(value, json!("Update"));
        Ok(())
    }
}
