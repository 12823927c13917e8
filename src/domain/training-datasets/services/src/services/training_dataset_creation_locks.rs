// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use featurestore_training_datasets::{FeaturestoreID, TrainingDatasetName};
use tokio::sync::OwnedMutexGuard;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

type LockKey = (FeaturestoreID, TrainingDatasetName);

/// Serializes creations of the same training dataset name within a process,
/// so that version allocation, directory creation and the insert happen
/// without interleaving. Creations of different names do not wait on each
/// other. Other processes are still fenced off by the repository's unique
/// constraint.
pub struct TrainingDatasetCreationLocks {
    locks: Arc<Mutex<HashMap<LockKey, Arc<tokio::sync::Mutex<()>>>>>,
}

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
impl TrainingDatasetCreationLocks {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl TrainingDatasetCreationLocks {
    pub async fn lock(
        &self,
        featurestore_id: FeaturestoreID,
        name: &TrainingDatasetName,
    ) -> TrainingDatasetCreationGuard {
        let key = (featurestore_id, name.clone());

        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(key.clone()).or_default().clone()
        };

        let guard = mutex.lock_owned().await;

        TrainingDatasetCreationGuard {
            key,
            locks: self.locks.clone(),
            guard: Some(guard),
        }
    }

    pub fn held_locks_count(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct TrainingDatasetCreationGuard {
    key: LockKey,
    locks: Arc<Mutex<HashMap<LockKey, Arc<tokio::sync::Mutex<()>>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for TrainingDatasetCreationGuard {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        // Release first, then forget the entry unless somebody else waits on it
        drop(self.guard.take());

        if let Some(mutex) = locks.get(&self.key)
            && Arc::strong_count(mutex) == 1
        {
            locks.remove(&self.key);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
