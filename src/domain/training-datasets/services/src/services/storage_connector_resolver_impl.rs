// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use featurestore_training_datasets::*;
use internal_error::{ErrorIntoInternal, InternalError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn StorageConnectorResolver)]
pub struct StorageConnectorResolverImpl {
    storage_connector_repo: Arc<dyn StorageConnectorRepository>,
    hopsfs_client: Arc<dyn HopsFsClient>,
    config: Arc<TrainingDatasetsConfig>,
}

impl StorageConnectorResolverImpl {
    async fn get_connector_of_featurestore(
        &self,
        featurestore: &Featurestore,
        connector_id: StorageConnectorID,
        training_dataset_type: TrainingDatasetType,
    ) -> Result<StorageConnector, ResolveStorageConnectorError> {
        let connector = match self
            .storage_connector_repo
            .get_storage_connector(connector_id)
            .await
        {
            Ok(connector) => connector,
            Err(GetStorageConnectorError::NotFound(e)) => {
                return Err(ResolveStorageConnectorError::NotFound(e));
            }
            Err(GetStorageConnectorError::Internal(e)) => {
                return Err(ResolveStorageConnectorError::Internal(e));
            }
        };

        // Connectors of other feature stores are not usable here
        if connector.featurestore_id != featurestore.id {
            return Err(Self::type_mismatch(&connector, training_dataset_type));
        }

        Ok(connector)
    }

    fn resolve_for_type(
        &self,
        connector: StorageConnector,
        training_dataset_type: TrainingDatasetType,
    ) -> Result<ResolvedStorageConnector, ResolveStorageConnectorError> {
        match (training_dataset_type, connector.kind.clone()) {
            (TrainingDatasetType::HopsFs, StorageConnectorKind::HopsFs(config)) => {
                Ok(ResolvedStorageConnector::HopsFs {
                    connector,
                    authority: self.hopsfs_client.authority(),
                    dataset_path: config.dataset_path,
                })
            }
            (TrainingDatasetType::External, StorageConnectorKind::S3(config)) => Ok(
                Self::object_store(connector, ObjectStoreScheme::S3, config),
            ),
            (TrainingDatasetType::External, StorageConnectorKind::Gcs(config)) => Ok(
                Self::object_store(connector, ObjectStoreScheme::Gcs, config),
            ),
            _ => Err(Self::type_mismatch(&connector, training_dataset_type)),
        }
    }

    fn object_store(
        connector: StorageConnector,
        scheme: ObjectStoreScheme,
        config: ObjectStoreConnectorConfig,
    ) -> ResolvedStorageConnector {
        ResolvedStorageConnector::ObjectStore {
            connector,
            scheme,
            bucket: config.bucket,
            root_prefix: config.root_prefix,
        }
    }

    fn type_mismatch(
        connector: &StorageConnector,
        training_dataset_type: TrainingDatasetType,
    ) -> ResolveStorageConnectorError {
        ResolveStorageConnectorError::TypeMismatch(StorageConnectorTypeMismatchError {
            connector_id: connector.id,
            connector_type: connector.kind.type_name().to_string(),
            training_dataset_type,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl StorageConnectorResolver for StorageConnectorResolverImpl {
    #[tracing::instrument(
        level = "debug",
        name = "StorageConnectorResolverImpl::resolve_storage_connector",
        skip_all,
        fields(featurestore_id = %featurestore.id, ?connector_id, %training_dataset_type)
    )]
    async fn resolve_storage_connector(
        &self,
        featurestore: &Featurestore,
        connector_id: Option<StorageConnectorID>,
        training_dataset_type: TrainingDatasetType,
    ) -> Result<ResolvedStorageConnector, ResolveStorageConnectorError> {
        let connector = match (training_dataset_type, connector_id) {
            (TrainingDatasetType::HopsFs, None) => {
                self.get_or_create_default_connector(featurestore).await?
            }
            (TrainingDatasetType::External, None) => {
                return Err(ResolveStorageConnectorError::Missing(
                    MissingStorageConnectorError {
                        training_dataset_type,
                    },
                ));
            }
            (_, Some(connector_id)) => {
                self.get_connector_of_featurestore(
                    featurestore,
                    connector_id,
                    training_dataset_type,
                )
                .await?
            }
        };

        self.resolve_for_type(connector, training_dataset_type)
    }

    #[tracing::instrument(
        level = "debug",
        name = "StorageConnectorResolverImpl::get_or_create_default_connector",
        skip_all,
        fields(featurestore_id = %featurestore.id)
    )]
    async fn get_or_create_default_connector(
        &self,
        featurestore: &Featurestore,
    ) -> Result<StorageConnector, InternalError> {
        let connector_name = self
            .config
            .default_connector_name(&featurestore.project_name);

        if let Some(connector) = self
            .storage_connector_repo
            .find_storage_connector_by_name(featurestore.id, &connector_name)
            .await?
        {
            return Ok(connector);
        }

        let new_connector = NewStorageConnector {
            featurestore_id: featurestore.id,
            name: connector_name.clone(),
            description: Some(self.config.default_connector_description(featurestore.id)),
            kind: StorageConnectorKind::HopsFs(HopsFsConnectorConfig {
                dataset_path: self
                    .config
                    .default_connector_dataset_path(&featurestore.project_name),
            }),
        };

        match self
            .storage_connector_repo
            .create_storage_connector(new_connector)
            .await
        {
            Ok(connector) => {
                tracing::info!(
                    connector_id = %connector.id,
                    connector_name = %connector.name,
                    "Created default training datasets connector"
                );
                Ok(connector)
            }
            Err(CreateStorageConnectorError::NameCollision(_)) => {
                tracing::debug!(
                    %connector_name,
                    "Default connector was created concurrently, re-reading it"
                );

                self.storage_connector_repo
                    .find_storage_connector_by_name(featurestore.id, &connector_name)
                    .await?
                    .ok_or_else(|| {
                        format!("Default connector '{connector_name}' vanished after a collision")
                            .int_err()
                    })
            }
            Err(CreateStorageConnectorError::Internal(e)) => Err(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
