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
use internal_error::InternalError;
use tokio::sync::RwLock;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    last_id: i32,
    connectors: BTreeMap<StorageConnectorID, StorageConnector>,
}

impl State {
    fn find_by_name(&self, featurestore_id: FeaturestoreID, name: &str) -> Option<&StorageConnector> {
        self.connectors
            .values()
            .find(|c| c.featurestore_id == featurestore_id && c.name == name)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryStorageConnectorRepository {
    state: Arc<RwLock<State>>,
}

#[dill::component(pub)]
#[dill::interface(dyn StorageConnectorRepository)]
#[dill::scope(dill::Singleton)]
impl InMemoryStorageConnectorRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl StorageConnectorRepository for InMemoryStorageConnectorRepository {
    async fn create_storage_connector(
        &self,
        connector: NewStorageConnector,
    ) -> Result<StorageConnector, CreateStorageConnectorError> {
        let mut writable_state = self.state.write().await;

        if writable_state
            .find_by_name(connector.featurestore_id, &connector.name)
            .is_some()
        {
            return Err(CreateStorageConnectorError::NameCollision(
                StorageConnectorNameCollisionError {
                    featurestore_id: connector.featurestore_id,
                    name: connector.name,
                },
            ));
        }

        writable_state.last_id += 1;
        let connector = StorageConnector {
            id: StorageConnectorID::new(writable_state.last_id),
            featurestore_id: connector.featurestore_id,
            name: connector.name,
            description: connector.description,
            kind: connector.kind,
        };

        writable_state
            .connectors
            .insert(connector.id, connector.clone());

        Ok(connector)
    }

    async fn get_storage_connector(
        &self,
        connector_id: StorageConnectorID,
    ) -> Result<StorageConnector, GetStorageConnectorError> {
        let readable_state = self.state.read().await;

        readable_state
            .connectors
            .get(&connector_id)
            .cloned()
            .ok_or_else(|| {
                GetStorageConnectorError::NotFound(StorageConnectorNotFoundError::new(connector_id))
            })
    }

    async fn find_storage_connector_by_name(
        &self,
        featurestore_id: FeaturestoreID,
        name: &str,
    ) -> Result<Option<StorageConnector>, InternalError> {
        let readable_state = self.state.read().await;

        Ok(readable_state.find_by_name(featurestore_id, name).cloned())
    }

    async fn get_storage_connectors_by_featurestore(
        &self,
        featurestore_id: FeaturestoreID,
    ) -> Result<Vec<StorageConnector>, InternalError> {
        let readable_state = self.state.read().await;

        let mut connectors: Vec<_> = readable_state
            .connectors
            .values()
            .filter(|c| c.featurestore_id == featurestore_id)
            .cloned()
            .collect();
        connectors.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(connectors)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
