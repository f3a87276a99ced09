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
//! The invocation context passed along with every lifecycle request.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime information about the current invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InvocationContext {
    /// The AWS request id of the invocation.
    pub request_id:      String,
    /// The CloudWatch log stream of the function instance.
    pub log_stream_name: String,
    /// The execution deadline, in milliseconds since the Unix epoch.
    pub deadline:        Option<u64>,
}

impl InvocationContext {
    /// Returns the time left before the deadline minus `margin`, or `None`
    /// when the invocation has no deadline.
    pub fn remaining(&self, margin: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| {
            let now = Utc::now().timestamp_millis().max(0) as u64;
            Duration::from_millis(deadline.saturating_sub(now)).saturating_sub(margin)
        })
    }
}
