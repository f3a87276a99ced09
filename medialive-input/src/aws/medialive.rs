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
//! This crate contains all wrapped functions of the AWS Elemental MediaLive
//! service.

use crate::error::{LifecycleError, Result};
use crate::services::{IngestService, InputSpec};
use async_trait::async_trait;
use log::info;
use rusoto_core::Region;
use rusoto_medialive::{
    CreateInputRequest, DeleteInputRequest, InputSourceRequest, MediaLive, MediaLiveClient,
};
use serde_json::Value;

/// MediaLive inputs as an [`IngestService`].
pub struct MediaLiveIngest {
    client: MediaLiveClient,
}

impl MediaLiveIngest {
    /// Creates a MediaLive client for the given region.
    pub fn new(region: Region) -> Self {
        Self::with_client(MediaLiveClient::new(region))
    }

    /// Wraps an existing MediaLive client.
    pub fn with_client(client: MediaLiveClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IngestService for MediaLiveIngest {
    /// Creates a MediaLive input.
    ///
    /// <https://docs.aws.amazon.com/medialive/latest/apireference/inputs.html#inputspost>
    async fn create_input(&self, spec: &InputSpec) -> Result<Value> {
        let request = CreateInputRequest {
            name: Some(spec.name.clone()),
            type_: Some(spec.input_type.clone()),
            sources: Some(
                spec.sources
                    .iter()
                    .map(|url| InputSourceRequest {
                        url: Some(url.clone()),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        };

        let response = self
            .client
            .create_input(request)
            .await
            .map_err(|e| LifecycleError::AWS(e.to_string()))?;
        info!(
            "Created MediaLive input {:?}",
            response.input.as_ref().and_then(|input| input.id.as_ref())
        );

        Ok(serde_json::to_value(response)?)
    }

    /// Deletes a MediaLive input.
    ///
    /// <https://docs.aws.amazon.com/medialive/latest/apireference/inputs-inputid.html#inputs-inputiddelete>
    async fn delete_input(&self, input_id: &str) -> Result<()> {
        self.client
            .delete_input(DeleteInputRequest {
                input_id: input_id.to_owned(),
            })
            .await
            .map_err(|e| LifecycleError::AWS(e.to_string()))?;
        info!("Deleted MediaLive input {}", input_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusoto_medialive::{CreateInputResponse, Input};
    use serde_json::json;

    #[test]
    fn response_keeps_aws_field_names() -> Result<()> {
        let response = CreateInputResponse {
            input: Some(Input {
                id: Some("abc123".to_string()),
                name: Some("stk1-Input1-ABC123".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let value = serde_json::to_value(response)?;
        assert_eq!(value.pointer("/Input/Id"), Some(&json!("abc123")));
        assert_eq!(value.pointer("/Input/Name"), Some(&json!("stk1-Input1-ABC123")));
        Ok(())
    }
}
