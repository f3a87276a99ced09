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
//! Sends the outcome of a custom resource request back to CloudFormation.
//!
//! CloudFormation waits for a JSON document to be `PUT` to the pre-signed
//! `ResponseURL` of the request:
//!
//! ```json
//! {
//!     "Status": "SUCCESS",
//!     "Reason": "See the details in CloudWatch Log Stream: 2021/01/01/[$LATEST]abcdef",
//!     "PhysicalResourceId": "abc123",
//!     "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/live/guid",
//!     "RequestId": "unique id for this create request",
//!     "LogicalResourceId": "MediaLiveInput",
//!     "Data": { "Input": { "Id": "abc123" } }
//! }
//! ```
//!
//! More details: <https://docs.aws.amazon.com/AWSCloudFormation/latest/UserGuide/crpg-ref-responses.html>

use crate::configs::RESPONSE_REASON_PREFIX;
use crate::context::InvocationContext;
use crate::envelope::ResultEnvelope;
use crate::error::Result;
use crate::request::LifecycleRequest;
use crate::services::Notifier;
use async_trait::async_trait;
use log::info;
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};

/// Builds the response document for the given request and outcome.
///
/// CloudFormation requires a physical resource id even for failed requests;
/// the log stream name stands in when the envelope has none.
pub fn response_body(
    request: &LifecycleRequest,
    context: &InvocationContext,
    envelope: &ResultEnvelope,
) -> Value {
    let mut reason = format!("{}{}", *RESPONSE_REASON_PREFIX, context.log_stream_name);
    if let Some(exception) = envelope.exception() {
        reason = format!("{}. {}", exception, reason);
    }

    json!({
        "Status": envelope.status,
        "Reason": reason,
        "PhysicalResourceId": envelope
            .resource_id
            .clone()
            .unwrap_or_else(|| context.log_stream_name.clone()),
        "StackId": request.stack_id,
        "RequestId": request.request_id,
        "LogicalResourceId": request.logical_resource_id,
        "Data": envelope.data,
    })
}

/// Reports outcomes to CloudFormation over HTTP.
#[derive(Default)]
pub struct CfnResponder {
    client: reqwest::Client,
}

impl CfnResponder {
    /// Creates a responder with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Notifier for CfnResponder {
    async fn send(
        &self,
        request: &LifecycleRequest,
        context: &InvocationContext,
        envelope: &ResultEnvelope,
    ) -> Result<()> {
        let body = serde_json::to_string(&response_body(request, context, envelope))?;
        info!("Response body: {}", body);

        // The pre-signed URL is signed without a content type.
        let response = self
            .client
            .put(&request.response_url)
            .header(CONTENT_TYPE, "")
            .body(body)
            .send()
            .await?
            .error_for_status()?;
        info!("Status code: {}", response.status());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::request_from;

    fn request() -> LifecycleRequest {
        request_from(json!({
            "RequestType": "Create",
            "ResponseURL": "http://127.0.0.1:1/response",
            "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/live/guid",
            "RequestId": "req-1",
            "LogicalResourceId": "Input1"
        }))
    }

    fn context() -> InvocationContext {
        InvocationContext {
            request_id:      "aws-req-1".to_string(),
            log_stream_name: "2021/01/01/[$LATEST]abcdef".to_string(),
            deadline:        None,
        }
    }

    #[test]
    fn success_body() {
        let envelope = ResultEnvelope::success(json!({ "Input": { "Id": "abc123" } }), "abc123");
        let body = response_body(&request(), &context(), &envelope);

        assert_eq!(
            body,
            json!({
                "Status": "SUCCESS",
                "Reason": "See the details in CloudWatch Log Stream: 2021/01/01/[$LATEST]abcdef",
                "PhysicalResourceId": "abc123",
                "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/live/guid",
                "RequestId": "req-1",
                "LogicalResourceId": "Input1",
                "Data": { "Input": { "Id": "abc123" } }
            })
        );
    }

    #[test]
    fn failure_body_without_id() {
        let envelope = ResultEnvelope::failed("not found", None);
        let body = response_body(&request(), &context(), &envelope);

        assert_eq!(body["Status"], json!("FAILED"));
        assert_eq!(body["PhysicalResourceId"], json!("2021/01/01/[$LATEST]abcdef"));
        assert_eq!(
            body["Reason"],
            json!("not found. See the details in CloudWatch Log Stream: 2021/01/01/[$LATEST]abcdef")
        );
        assert_eq!(body["Data"], json!({ "Exception": "not found" }));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let envelope = ResultEnvelope::success(ResultEnvelope::empty_data(), "abc123");
        let result = CfnResponder::new()
            .send(&request(), &context(), &envelope)
            .await;
        assert!(result.is_err());
    }
}
