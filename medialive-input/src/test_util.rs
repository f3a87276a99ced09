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
//! Test doubles for the collaborators of the lifecycle dispatcher.

use crate::context::InvocationContext;
use crate::envelope::ResultEnvelope;
use crate::error::{LifecycleError, Result};
use crate::request::LifecycleRequest;
use crate::services::{IngestService, InputSpec, Notifier};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

/// A call received by [`MockIngest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestCall {
    /// `create_input` with the given spec.
    Create(InputSpec),
    /// `delete_input` with the given input id.
    Delete(String),
}

/// An in-memory ingest service that records its calls and answers with
/// canned results.
pub struct MockIngest {
    /// The calls received so far, in order.
    pub calls:        Mutex<Vec<IngestCall>>,
    /// The answer to `create_input`. An `Err` is raised as an AWS fault.
    pub create_reply: std::result::Result<Value, String>,
    /// The answer to `delete_input`. An `Err` is raised as an AWS fault.
    pub delete_reply: std::result::Result<(), String>,
    /// How long every call takes.
    pub latency:      Option<Duration>,
}

impl MockIngest {
    /// Creates a service on which every call succeeds and created inputs get
    /// the given id.
    pub fn new(assigned_id: &str) -> Self {
        Self {
            calls:        Mutex::new(vec![]),
            create_reply: Ok(json!({ "Input": { "Id": assigned_id } })),
            delete_reply: Ok(()),
            latency:      None,
        }
    }

    /// Makes `create_input` fail with the given message.
    pub fn failing_create(mut self, message: &str) -> Self {
        self.create_reply = Err(message.to_owned());
        self
    }

    /// Makes `create_input` answer with the given response.
    pub fn create_response(mut self, response: Value) -> Self {
        self.create_reply = Ok(response);
        self
    }

    /// Makes `delete_input` fail with the given message.
    pub fn failing_delete(mut self, message: &str) -> Self {
        self.delete_reply = Err(message.to_owned());
        self
    }

    /// Delays every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Returns the calls received so far.
    pub fn calls(&self) -> Vec<IngestCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl IngestService for MockIngest {
    async fn create_input(&self, spec: &InputSpec) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push(IngestCall::Create(spec.clone()));
        self.delay().await;
        self.create_reply.clone().map_err(LifecycleError::AWS)
    }

    async fn delete_input(&self, input_id: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(IngestCall::Delete(input_id.to_owned()));
        self.delay().await;
        self.delete_reply.clone().map_err(LifecycleError::AWS)
    }
}

/// A notifier that keeps every envelope it is given.
#[derive(Default)]
pub struct RecordingNotifier {
    /// The envelopes received so far, in order.
    pub sent:     Mutex<Vec<ResultEnvelope>>,
    /// The request and context each envelope was sent for.
    pub received: Mutex<Vec<(LifecycleRequest, InvocationContext)>>,
    /// Whether `send` fails after recording the envelope.
    pub broken:   bool,
}

impl RecordingNotifier {
    /// Creates a notifier whose transport always fails.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    /// Returns the envelopes received so far.
    pub fn sent(&self) -> Vec<ResultEnvelope> {
        self.sent.lock().unwrap().clone()
    }

    /// Returns the requests and contexts received so far.
    pub fn received(&self) -> Vec<(LifecycleRequest, InvocationContext)> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        request: &LifecycleRequest,
        context: &InvocationContext,
        envelope: &ResultEnvelope,
    ) -> Result<()> {
        self.sent.lock().unwrap().push(envelope.clone());
        self.received
            .lock()
            .unwrap()
            .push((request.clone(), context.clone()));
        if self.broken {
            return Err(LifecycleError::Internal("response transport is down".to_owned()));
        }
        Ok(())
    }
}

/// Builds a request from its JSON form.
pub fn request_from(event: Value) -> LifecycleRequest {
    serde_json::from_value(event).unwrap()
}
