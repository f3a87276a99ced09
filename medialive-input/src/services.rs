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
//! The collaborators the lifecycle dispatcher talks to.
//!
//! Both are traits so that the function can be exercised without AWS: the
//! Lambda entry point plugs in [`crate::aws::MediaLiveIngest`] and
//! [`crate::aws::CfnResponder`], the tests use the doubles in
//! [`crate::test_util`].

use crate::context::InvocationContext;
use crate::envelope::ResultEnvelope;
use crate::error::Result;
use crate::request::LifecycleRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The input to create on the ingest service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InputSpec {
    /// The name of the input.
    pub name:       String,
    /// How the service receives the stream, e.g. `URL_PULL`.
    pub input_type: String,
    /// The source URLs, primary first.
    pub sources:    Vec<String>,
}

/// The remote video ingest service.
#[async_trait]
pub trait IngestService: Send + Sync {
    /// Creates an ingest input.
    ///
    /// # Returns
    /// The raw service response. The assigned id is found at `Input.Id`.
    async fn create_input(&self, spec: &InputSpec) -> Result<Value>;

    /// Deletes the ingest input with the given id.
    async fn delete_input(&self, input_id: &str) -> Result<()>;
}

/// Reports the outcome of a lifecycle request back to the provisioning
/// system.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends the envelope for the given request.
    async fn send(
        &self,
        request: &LifecycleRequest,
        context: &InvocationContext,
        envelope: &ResultEnvelope,
    ) -> Result<()>;
}
