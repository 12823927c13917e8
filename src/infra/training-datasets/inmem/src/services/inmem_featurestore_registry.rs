// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::Arc;

use featurestore_training_datasets::*;
use tokio::sync::RwLock;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryFeaturestoreRegistry {
    featurestores: Arc<RwLock<HashMap<FeaturestoreID, Featurestore>>>,
}

#[dill::component(pub)]
#[dill::interface(dyn FeaturestoreRegistry)]
#[dill::scope(dill::Singleton)]
impl InMemoryFeaturestoreRegistry {
    pub fn new() -> Self {
        Self {
            featurestores: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl InMemoryFeaturestoreRegistry {
    pub async fn add_featurestore(&self, featurestore: Featurestore) {
        self.featurestores
            .write()
            .await
            .insert(featurestore.id, featurestore);
    }
}

#[async_trait::async_trait]
impl FeaturestoreRegistry for InMemoryFeaturestoreRegistry {
    async fn get_featurestore(
        &self,
        featurestore_id: FeaturestoreID,
    ) -> Result<Featurestore, GetFeaturestoreError> {
        self.featurestores
            .read()
            .await
            .get(&featurestore_id)
            .cloned()
            .ok_or_else(|| {
                GetFeaturestoreError::NotFound(FeaturestoreNotFoundError::new(featurestore_id))
            })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
