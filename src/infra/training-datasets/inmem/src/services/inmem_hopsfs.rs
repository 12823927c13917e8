// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;
use std::sync::Arc;

use featurestore_training_datasets::*;
use tokio::sync::RwLock;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_HOPSFS_AUTHORITY: &str = "namenode.service.consul:8020";

#[derive(Default)]
struct State {
    last_inode_id: i64,
    directories: BTreeMap<String, InodeID>,
}

impl State {
    fn has_children(&self, path: &str) -> bool {
        let prefix = format!("{path}/");
        self.directories
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(p, _)| p.starts_with(&prefix))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Directory tree kept in memory, enough to observe what the registry does to
/// the filesystem
pub struct InMemoryHopsFs {
    authority: String,
    state: Arc<RwLock<State>>,
}

#[dill::component(pub)]
#[dill::interface(dyn HopsFsClient)]
#[dill::scope(dill::Singleton)]
impl InMemoryHopsFs {
    pub fn new() -> Self {
        Self::with_authority(DEFAULT_HOPSFS_AUTHORITY)
    }
}

impl InMemoryHopsFs {
    pub fn with_authority(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            state: Arc::new(RwLock::new(State::default())),
        }
    }

    /// All existing directories in lexicographic order
    pub async fn directories(&self) -> Vec<String> {
        self.state.read().await.directories.keys().cloned().collect()
    }

    fn normalize(path: &str) -> Result<String, HopsFsIoError> {
        if !path.starts_with('/') {
            return Err(HopsFsIoError::new(path, "path must be absolute"));
        }

        let normalized = join_path_segments([path]);
        if normalized.is_empty() {
            return Err(HopsFsIoError::new(path, "cannot operate on the root"));
        }

        Ok(format!("/{normalized}"))
    }
}

#[async_trait::async_trait]
impl HopsFsClient for InMemoryHopsFs {
    fn authority(&self) -> String {
        self.authority.clone()
    }

    async fn mkdir(&self, path: &str) -> Result<InodeID, HopsFsMkdirError> {
        let path = Self::normalize(path)?;
        let mut writable_state = self.state.write().await;

        if writable_state.directories.contains_key(&path) {
            return Err(HopsFsMkdirError::AlreadyExists(
                HopsFsPathAlreadyExistsError { path },
            ));
        }

        let mut current = String::new();
        let mut inode_id = None;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current.push('/');
            current.push_str(segment);

            if let Some(existing) = writable_state.directories.get(&current) {
                inode_id = Some(*existing);
            } else {
                writable_state.last_inode_id += 1;
                let new_inode_id = InodeID::new(writable_state.last_inode_id);
                writable_state
                    .directories
                    .insert(current.clone(), new_inode_id);
                inode_id = Some(new_inode_id);
            }
        }

        inode_id.ok_or_else(|| HopsFsIoError::new(path, "no directory was created").into())
    }

    async fn rmdir(&self, path: &str, recursive: bool) -> Result<(), HopsFsRmdirError> {
        let path = Self::normalize(path)?;
        let mut writable_state = self.state.write().await;

        if !writable_state.directories.contains_key(&path) {
            return Err(HopsFsRmdirError::NotFound(HopsFsPathNotFoundError { path }));
        }

        if writable_state.has_children(&path) {
            if !recursive {
                return Err(HopsFsIoError::new(path, "directory is not empty").into());
            }

            let prefix = format!("{path}/");
            writable_state
                .directories
                .retain(|p, _| !p.starts_with(&prefix));
        }

        writable_state.directories.remove(&path);

        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool, HopsFsIoError> {
        let path = Self::normalize(path)?;
        Ok(self.state.read().await.directories.contains_key(&path))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
