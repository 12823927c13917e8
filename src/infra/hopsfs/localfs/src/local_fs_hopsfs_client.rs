// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use featurestore_training_datasets::*;

use crate::LocalFsHopsFsConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Maps HopsFS paths onto a local directory. Suitable for single node
/// deployments and integration tests.
pub struct LocalFsHopsFsClient {
    config: Arc<LocalFsHopsFsConfig>,
}

#[dill::component(pub)]
#[dill::interface(dyn HopsFsClient)]
impl LocalFsHopsFsClient {
    pub fn new(config: Arc<LocalFsHopsFsConfig>) -> Self {
        Self { config }
    }
}

impl LocalFsHopsFsClient {
    fn local_path(&self, path: &str) -> Result<PathBuf, HopsFsIoError> {
        if !path.starts_with('/') {
            return Err(HopsFsIoError::new(path, "path must be absolute"));
        }

        let mut local_path = self.config.root.clone();
        let mut depth = 0;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(HopsFsIoError::new(
                    path,
                    "relative segments are not allowed",
                ));
            }
            local_path.push(segment);
            depth += 1;
        }

        if depth == 0 {
            return Err(HopsFsIoError::new(path, "cannot operate on the root"));
        }

        Ok(local_path)
    }

    fn io_error(path: &str, err: &std::io::Error) -> HopsFsIoError {
        HopsFsIoError::new(path, err.to_string())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl HopsFsClient for LocalFsHopsFsClient {
    fn authority(&self) -> String {
        self.config.authority.clone()
    }

    #[tracing::instrument(level = "debug", name = "LocalFsHopsFsClient::mkdir", skip(self))]
    async fn mkdir(&self, path: &str) -> Result<InodeID, HopsFsMkdirError> {
        let local_path = self.local_path(path)?;

        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_error(path, &e))?;
        }

        match tokio::fs::create_dir(&local_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(HopsFsMkdirError::AlreadyExists(
                    HopsFsPathAlreadyExistsError {
                        path: path.to_string(),
                    },
                ));
            }
            Err(e) => return Err(Self::io_error(path, &e).into()),
        }

        let metadata = tokio::fs::metadata(&local_path)
            .await
            .map_err(|e| Self::io_error(path, &e))?;

        Ok(inode_id(&metadata))
    }

    #[tracing::instrument(level = "debug", name = "LocalFsHopsFsClient::rmdir", skip(self))]
    async fn rmdir(&self, path: &str, recursive: bool) -> Result<(), HopsFsRmdirError> {
        let local_path = self.local_path(path)?;

        let res = if recursive {
            tokio::fs::remove_dir_all(&local_path).await
        } else {
            tokio::fs::remove_dir(&local_path).await
        };

        match res {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(HopsFsRmdirError::NotFound(HopsFsPathNotFoundError {
                    path: path.to_string(),
                }))
            }
            Err(e) => Err(Self::io_error(path, &e).into()),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, HopsFsIoError> {
        let local_path = self.local_path(path)?;

        tokio::fs::try_exists(&local_path)
            .await
            .map_err(|e| Self::io_error(path, &e))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(unix)]
fn inode_id(metadata: &std::fs::Metadata) -> InodeID {
    use std::os::unix::fs::MetadataExt;

    InodeID::new(i64::from_ne_bytes(metadata.ino().to_ne_bytes()))
}

#[cfg(not(unix))]
fn inode_id(_metadata: &std::fs::Metadata) -> InodeID {
    use std::sync::atomic::{AtomicI64, Ordering};

    // No stable file identifier is exposed, hand out process-unique ones
    static NEXT_INODE_ID: AtomicI64 = AtomicI64::new(1);
    InodeID::new(NEXT_INODE_ID.fetch_add(1, Ordering::Relaxed))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
