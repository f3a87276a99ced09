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
//! The main entry point of the MediaLive input custom resource function.

mod cloud_context;

use cloud_context::invocation_context;
use lambda_runtime::{service_fn, LambdaEvent};
use log::info;
use medialive_input::prelude::*;
use rusoto_core::Region;
use serde_json::Value;

#[cfg(feature = "snmalloc")]
#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

async fn handler(event: LambdaEvent<LifecycleRequest>) -> Result<Value> {
    let context = invocation_context(&event.context);
    let request = event.payload;

    info!(
        "AWS Lambda function architecture: {}",
        std::env::consts::ARCH
    );

    // Both collaborators are created per invocation.
    let client = MediaLiveIngest::new(Region::default());
    let notifier = CfnResponder::new();

    let envelope = lifecycle::handle(&client, &notifier, &request, &context).await?;
    Ok(serde_json::to_value(envelope)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    lambda_runtime::run(service_fn(handler)).await?;
    Ok(())
}
