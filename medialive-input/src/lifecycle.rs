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
//! The lifecycle dispatcher of the custom resource.
//!
//! Each invocation maps one CloudFormation request onto MediaLive:
//!
//! | Request  | MediaLive calls                 | Reported resource id        |
//! |----------|---------------------------------|-----------------------------|
//! | `Create` | `CreateInput`                   | the id MediaLive assigned   |
//! | `Update` | `DeleteInput`, then `CreateInput` | the existing physical id    |
//! | `Delete` | `DeleteInput`                   | the existing physical id    |
//!
//! Whatever happens, exactly one envelope is produced and handed to the
//! [`Notifier`] exactly once. Faults of the remote service are turned into a
//! `FAILED` envelope inside each operation; anything else that escapes an
//! operation is turned into a `FAILED` envelope without resource id.

use crate::configs::{DEADLINE_MARGIN_MS, MEDIALIVE_INPUT_TYPE};
use crate::context::InvocationContext;
use crate::envelope::ResultEnvelope;
use crate::error::{LifecycleError, Result};
use crate::identifier;
use crate::request::{LifecycleRequest, Operation};
use crate::services::{IngestService, InputSpec, Notifier};
use log::{error, info, warn};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Handles one lifecycle request and reports its outcome.
///
/// # Arguments
/// * `client` - The ingest service, created for this invocation.
/// * `notifier` - Where the outcome is reported to.
/// * `request` - The CloudFormation request.
/// * `context` - The invocation context.
///
/// # Returns
/// The envelope that was reported. A notifier failure is logged only: the
/// envelope is returned either way, so that Lambda does not retry an
/// operation whose effect on MediaLive has already happened.
pub async fn handle(
    client: &dyn IngestService,
    notifier: &dyn Notifier,
    request: &LifecycleRequest,
    context: &InvocationContext,
) -> Result<ResultEnvelope> {
    info!(
        "Event Input: {}",
        serde_json::to_string(request).unwrap_or_else(|_| format!("{:?}", request))
    );

    let budget = context.remaining(Duration::from_millis(*DEADLINE_MARGIN_MS));
    let envelope = dispatch(client, request, budget)
        .await
        .unwrap_or_else(|e| {
            error!("Exception: {}", e);
            ResultEnvelope::failed(e.message(), None)
        });

    if let Err(e) = notifier.send(request, context, &envelope).await {
        error!("Failed to report the outcome: {}", e);
    }
    Ok(envelope)
}

/// Routes the request to the operation named by its request type.
///
/// # Arguments
/// * `client` - The ingest service.
/// * `request` - The CloudFormation request.
/// * `budget` - The time the operation may take, if bounded.
pub async fn dispatch(
    client: &dyn IngestService,
    request: &LifecycleRequest,
    budget: Option<Duration>,
) -> Result<ResultEnvelope> {
    let physical_id = request.physical_resource_id.clone();
    match &request.request_type {
        Operation::Create => create_within(client, request, true, budget).await,
        Operation::Update => {
            within(budget, &request.request_type, physical_id, update(client, request)).await
        }
        Operation::Delete => {
            within(budget, &request.request_type, physical_id, delete(client, request)).await
        }
        Operation::Unsupported(tag) => {
            let e = LifecycleError::UnsupportedOperation(tag.clone());
            warn!("{}", e);
            Ok(ResultEnvelope::failed(e, physical_id))
        }
    }
}

/// Runs `operation` to completion, or until `budget` is spent. A timed out
/// operation is reported as failed with the given resource id.
async fn within<F>(
    budget: Option<Duration>,
    op: &Operation,
    resource_id: Option<String>,
    operation: F,
) -> Result<ResultEnvelope>
where
    F: Future<Output = Result<ResultEnvelope>>,
{
    let budget = match budget {
        Some(budget) => budget,
        None => return operation.await,
    };

    match tokio::time::timeout(budget, operation).await {
        Ok(outcome) => outcome,
        Err(_) => {
            let e = LifecycleError::Timeout(format!(
                "{} did not complete within {:?}",
                op, budget
            ));
            error!("{}", e);
            Ok(ResultEnvelope::failed(e, resource_id))
        }
    }
}

/// Creates a MediaLive input.
///
/// # Arguments
/// * `client` - The ingest service.
/// * `request` - The CloudFormation request.
/// * `auto_id` - Whether to generate a new input name from the stack and
///   logical resource, or to reuse the request's physical id.
///
/// # Returns
/// A `SUCCESS` envelope with the service response and the assigned input id,
/// or a `FAILED` envelope with the input name that was attempted.
pub async fn create(
    client: &dyn IngestService,
    request: &LifecycleRequest,
    auto_id: bool,
) -> Result<ResultEnvelope> {
    create_within(client, request, auto_id, None).await
}

/// Creates a MediaLive input within `budget`. On timeout the input name that
/// was attempted is reported, as for any other failed create.
async fn create_within(
    client: &dyn IngestService,
    request: &LifecycleRequest,
    auto_id: bool,
    budget: Option<Duration>,
) -> Result<ResultEnvelope> {
    let input_id = if auto_id {
        identifier::physical_id(&request.stack_id, &request.logical_resource_id)
    } else {
        request.physical_id()?.to_owned()
    };

    let outcome = async {
        match create_input(client, request, &input_id).await {
            Ok((response, assigned_id)) => {
                info!("{}", response);
                Ok(ResultEnvelope::success(response, assigned_id))
            }
            Err(e) => {
                warn!("Failed to create input {}: {}", input_id, e);
                Ok(ResultEnvelope::failed(e.message(), Some(input_id.clone())))
            }
        }
    };
    within(budget, &Operation::Create, Some(input_id.clone()), outcome).await
}

async fn create_input(
    client: &dyn IngestService,
    request: &LifecycleRequest,
    name: &str,
) -> Result<(Value, String)> {
    let spec = InputSpec {
        name:       name.to_owned(),
        input_type: MEDIALIVE_INPUT_TYPE.clone(),
        sources:    Vec::from(request.hls_sources()?),
    };
    let response = client.create_input(&spec).await?;
    let assigned_id = response
        .pointer("/Input/Id")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| LifecycleError::AWS("No input id in the CreateInput response!".to_owned()))?;
    Ok((response, assigned_id))
}

/// Replaces a MediaLive input: the existing input is deleted and, once that
/// succeeded, a new one is created under the existing physical id.
///
/// A failed delete is reported as is and no input is created.
pub async fn update(client: &dyn IngestService, request: &LifecycleRequest) -> Result<ResultEnvelope> {
    let physical_id = request.physical_id()?.to_owned();
    match replace(client, request, &physical_id).await {
        Ok(envelope) => Ok(envelope),
        Err(e) => {
            warn!("Failed to update input {}: {}", physical_id, e);
            Ok(ResultEnvelope::failed(e.message(), Some(physical_id)))
        }
    }
}

async fn replace(
    client: &dyn IngestService,
    request: &LifecycleRequest,
    physical_id: &str,
) -> Result<ResultEnvelope> {
    let deleted = delete(client, request).await?;
    if !deleted.is_success() {
        return Ok(deleted);
    }

    let mut created = create(client, request, false).await?;
    if created.is_success() {
        created.resource_id = Some(physical_id.to_owned());
    }
    Ok(created)
}

/// Deletes the MediaLive input named by the request's physical id.
///
/// The physical id is reported back on success and on failure, so that
/// CloudFormation keeps tracking the input.
pub async fn delete(client: &dyn IngestService, request: &LifecycleRequest) -> Result<ResultEnvelope> {
    let input_id = request.physical_id()?;
    match client.delete_input(input_id).await {
        Ok(()) => Ok(ResultEnvelope::success(
            ResultEnvelope::empty_data(),
            input_id,
        )),
        Err(e) => {
            warn!("Failed to delete input {}: {}", input_id, e);
            Ok(ResultEnvelope::failed(
                e.message(),
                Some(input_id.to_owned()),
            ))
        }
    }
}
