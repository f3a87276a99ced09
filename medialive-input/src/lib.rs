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
#![warn(missing_docs, clippy::needless_borrow)]
// Clippy lints, some should be disabled incrementally
#![allow(clippy::new_without_default, clippy::upper_case_acronyms)]

//! A CloudFormation custom resource that provisions AWS Elemental MediaLive
//! inputs.
//!
//! CloudFormation hands every `Create`, `Update` and `Delete` of the resource
//! to a Lambda function. The function turns the request into MediaLive calls
//! and reports a `SUCCESS` or `FAILED` outcome, together with the id of the
//! input, back to CloudFormation so that the stack can proceed or roll back.

pub mod aws;
pub mod configs;
pub mod context;
pub mod envelope;
pub mod error;
pub mod identifier;
pub mod lifecycle;
pub mod prelude;
pub mod request;
pub mod services;
pub mod test_util;
