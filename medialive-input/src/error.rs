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

//! Lifecycle error types

use std::error;
use std::fmt::{Display, Formatter};
use std::io;
use std::result;

/// Result type for operations that could result in an [LifecycleError]
pub type Result<T> = result::Result<T, LifecycleError>;

/// Lifecycle error
#[derive(Debug)]
pub enum LifecycleError {
    /// Error associated to Lambda runtime execution.
    LambdaError(Box<dyn std::error::Error + Send + Sync>),
    /// Error associated to I/O operations and associated traits.
    IoError(io::Error),
    /// Error returned when serde_json failed to serialize or deserialize data.
    SerdeJson(serde_json::Error),
    /// Error returned when the CloudFormation response could not be delivered.
    Http(reqwest::Error),
    /// Error returned when accessing the AWS services fails.
    AWS(String),
    /// Error returned when a required resource property is absent from the
    /// request.
    MissingProperty(String),
    /// Error returned when the request carries a lifecycle operation this
    /// resource does not model.
    UnsupportedOperation(String),
    /// Error returned when the invocation deadline is reached before the
    /// lifecycle operation completes.
    Timeout(String),
    /// Error returned as a consequence of an error in this crate.
    /// This error should not happen in normal usage. It is raised when one
    /// of the internal invariants is not verified during execution.
    Internal(String),
}

impl LifecycleError {
    /// Returns the message reported to CloudFormation. Remote service faults
    /// are relayed verbatim.
    pub fn message(&self) -> String {
        match self {
            LifecycleError::AWS(desc) => desc.clone(),
            _ => self.to_string(),
        }
    }
}

impl From<io::Error> for LifecycleError {
    fn from(e: io::Error) -> Self {
        LifecycleError::IoError(e)
    }
}

impl From<serde_json::Error> for LifecycleError {
    fn from(e: serde_json::Error) -> Self {
        LifecycleError::SerdeJson(e)
    }
}

impl From<reqwest::Error> for LifecycleError {
    fn from(e: reqwest::Error) -> Self {
        LifecycleError::Http(e)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LifecycleError {
    fn from(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LifecycleError::LambdaError(e)
    }
}

impl From<&str> for LifecycleError {
    fn from(e: &str) -> Self {
        LifecycleError::Internal(e.to_string())
    }
}

impl Display for LifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            LifecycleError::LambdaError(ref desc) => write!(f, "Lambda error: {}", desc),
            LifecycleError::IoError(ref desc) => write!(f, "IO error: {}", desc),
            LifecycleError::SerdeJson(ref desc) => write!(f, "serde_json error: {:?}", desc),
            LifecycleError::Http(ref desc) => write!(f, "HTTP error: {}", desc),
            LifecycleError::AWS(ref desc) => write!(f, "AWS error: {}", desc),
            LifecycleError::MissingProperty(ref desc) => {
                write!(f, "Missing resource property: {}", desc)
            }
            LifecycleError::UnsupportedOperation(ref desc) => {
                write!(f, "Unsupported operation: {}", desc)
            }
            LifecycleError::Timeout(ref desc) => write!(f, "Timed out: {}", desc),
            LifecycleError::Internal(ref desc) => write!(
                f,
                "Internal error: {}. This was likely caused by a bug in the MediaLive input \
                    resource and we would welcome that you file an bug report in our issue tracker",
                desc
            ),
        }
    }
}

impl error::Error for LifecycleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            LifecycleError::AWS("not found".to_string()).to_string(),
            "AWS error: not found"
        );
        assert_eq!(
            LifecycleError::MissingProperty("HLSPrimarySource".to_string()).to_string(),
            "Missing resource property: HLSPrimarySource"
        );
        assert_eq!(
            LifecycleError::UnsupportedOperation("Rollback".to_string()).to_string(),
            "Unsupported operation: Rollback"
        );
        assert_eq!(
            LifecycleError::AWS("not found".to_string()).message(),
            "not found"
        );
        assert!(LifecycleError::from("boom")
            .to_string()
            .starts_with("Internal error: boom."));
    }
}
