// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::InodeID;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Contract of the distributed filesystem holding HopsFS training datasets.
/// Paths are absolute, `/`-separated, and relative to the filesystem root.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait HopsFsClient: Send + Sync {
    /// `host:port` used in `hopsfs://` URIs
    fn authority(&self) -> String;

    /// Creates the directory together with any missing parents
    async fn mkdir(&self, path: &str) -> Result<InodeID, HopsFsMkdirError>;

    async fn rmdir(&self, path: &str, recursive: bool) -> Result<(), HopsFsRmdirError>;

    async fn exists(&self, path: &str) -> Result<bool, HopsFsIoError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum HopsFsMkdirError {
    #[error(transparent)]
    AlreadyExists(HopsFsPathAlreadyExistsError),

    #[error(transparent)]
    Io(#[from] HopsFsIoError),
}

#[derive(Error, Debug)]
pub enum HopsFsRmdirError {
    #[error(transparent)]
    NotFound(HopsFsPathNotFoundError),

    #[error(transparent)]
    Io(#[from] HopsFsIoError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Path '{path}' already exists")]
pub struct HopsFsPathAlreadyExistsError {
    pub path: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Path '{path}' does not exist")]
pub struct HopsFsPathNotFoundError {
    pub path: String,
}

/// Failure of the filesystem itself, worth retrying later
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Filesystem operation on '{path}' failed: {message}")]
pub struct HopsFsIoError {
    pub path: String,
    pub message: String,
}

impl HopsFsIoError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn timeout(path: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::new(path, format!("timed out after {}ms", timeout.as_millis()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
