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
use time_source::SystemTimeSource;

use crate::TrainingDatasetCreationLocks;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn CreateTrainingDatasetUseCase)]
pub struct CreateTrainingDatasetUseCaseImpl {
    featurestore_registry: Arc<dyn FeaturestoreRegistry>,
    storage_connector_resolver: Arc<dyn StorageConnectorResolver>,
    version_allocator: Arc<dyn TrainingDatasetVersionAllocator>,
    training_dataset_repo: Arc<dyn TrainingDatasetRepository>,
    hopsfs_client: Arc<dyn HopsFsClient>,
    creation_locks: Arc<TrainingDatasetCreationLocks>,
    time_source: Arc<dyn SystemTimeSource>,
    current_user: Arc<CurrentUser>,
    config: Arc<TrainingDatasetsConfig>,
}

struct ValidatedRequest {
    name: TrainingDatasetName,
    data_format: DataFormat,
    splits: Vec<Split>,
}

enum CreateVersionError {
    // Lost the insert race on the unique triple, another version may succeed
    VersionTaken(TrainingDatasetAlreadyExistsError),
    Failed(CreateTrainingDatasetError),
}

impl From<CreateTrainingDatasetError> for CreateVersionError {
    fn from(e: CreateTrainingDatasetError) -> Self {
        Self::Failed(e)
    }
}

impl CreateTrainingDatasetUseCaseImpl {
    // Checks are ordered so the same request always reports the same error
    fn validate(
        request: &CreateTrainingDatasetRequest,
    ) -> Result<ValidatedRequest, CreateTrainingDatasetError> {
        let name = TrainingDatasetName::try_from(request.name.as_str()).map_err(|_| {
            CreateTrainingDatasetError::InvalidName(InvalidTrainingDatasetNameError::new(
                &request.name,
            ))
        })?;

        let data_format = request
            .data_format
            .as_deref()
            .unwrap_or_default()
            .parse::<DataFormat>()
            .map_err(CreateTrainingDatasetError::IllegalDataFormat)?;

        if let Some(version) = request.version {
            validate_requested_version(version)
                .map_err(CreateTrainingDatasetError::InvalidVersion)?;
        }

        let splits =
            validate_splits(&request.splits).map_err(CreateTrainingDatasetError::InvalidSplits)?;

        Ok(ValidatedRequest {
            name,
            data_format,
            splits,
        })
    }

    async fn create_version(
        &self,
        featurestore: &Featurestore,
        connector: &ResolvedStorageConnector,
        request: &CreateTrainingDatasetRequest,
        validated: &ValidatedRequest,
        version: u32,
    ) -> Result<TrainingDataset, CreateVersionError> {
        let location = resolve_training_dataset_location(
            connector,
            &validated.name,
            version,
            request.location.as_deref(),
        );

        let inode_id = match location.hopsfs_path() {
            Some(path) => Some(
                self.create_directory(featurestore, validated, version, path)
                    .await?,
            ),
            None => None,
        };

        let new_training_dataset = NewTrainingDataset {
            featurestore_id: featurestore.id,
            featurestore_name: featurestore.name.clone(),
            name: validated.name.clone(),
            version,
            data_format: validated.data_format,
            training_dataset_type: connector.training_dataset_type(),
            location: location.uri(),
            storage_connector_id: connector.connector().id,
            storage_connector_name: connector.connector().name.clone(),
            description: request.description.clone(),
            creator: self.current_user.username.clone(),
            created: self.time_source.now(),
            seed: request.seed,
            inode_id,
            features: request.features.clone(),
            splits: validated.splits.clone(),
            jobs: dedupe_jobs(request.jobs.iter().cloned()),
        };

        match self
            .training_dataset_repo
            .save_training_dataset(new_training_dataset)
            .await
        {
            Ok(training_dataset) => Ok(training_dataset),
            Err(e) => {
                if let Some(path) = location.hopsfs_path() {
                    self.remove_orphaned_directory(path).await;
                }

                Err(match e {
                    SaveTrainingDatasetError::Duplicate(e) => CreateVersionError::VersionTaken(e),
                    SaveTrainingDatasetError::Internal(e) => {
                        CreateTrainingDatasetError::Internal(e).into()
                    }
                })
            }
        }
    }

    async fn create_directory(
        &self,
        featurestore: &Featurestore,
        validated: &ValidatedRequest,
        version: u32,
        path: &str,
    ) -> Result<InodeID, CreateTrainingDatasetError> {
        let timeout = self.config.fs_operation_timeout();

        match tokio::time::timeout(timeout, self.hopsfs_client.mkdir(path)).await {
            Ok(Ok(inode_id)) => Ok(inode_id),
            Ok(Err(HopsFsMkdirError::AlreadyExists(_))) => Err(
                CreateTrainingDatasetError::AlreadyExists(TrainingDatasetAlreadyExistsError {
                    featurestore_id: featurestore.id,
                    name: validated.name.clone(),
                    version,
                }),
            ),
            Ok(Err(HopsFsMkdirError::Io(e))) => Err(CreateTrainingDatasetError::Io(e)),
            Err(_) => Err(CreateTrainingDatasetError::Io(HopsFsIoError::timeout(
                path, timeout,
            ))),
        }
    }

    async fn remove_orphaned_directory(&self, path: &str) {
        let timeout = self.config.fs_operation_timeout();

        match tokio::time::timeout(timeout, self.hopsfs_client.rmdir(path, true)).await {
            Ok(Ok(())) => {
                tracing::debug!(path, "Removed directory of a training dataset that was not saved");
            }
            Ok(Err(e)) => {
                tracing::warn!(path, error = %e, "Failed to remove orphaned training dataset directory");
            }
            Err(_) => {
                tracing::warn!(
                    path,
                    timeout_ms = self.config.fs_operation_timeout_ms,
                    "Timed out removing orphaned training dataset directory"
                );
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl CreateTrainingDatasetUseCase for CreateTrainingDatasetUseCaseImpl {
    #[tracing::instrument(
        level = "info",
        name = "CreateTrainingDatasetUseCaseImpl::execute",
        skip_all,
        fields(
            %featurestore_id,
            name = %request.name,
            requested_version = ?request.version,
            training_dataset_type = %request.training_dataset_type,
        )
    )]
    async fn execute(
        &self,
        featurestore_id: FeaturestoreID,
        request: CreateTrainingDatasetRequest,
    ) -> Result<TrainingDataset, CreateTrainingDatasetError> {
        let validated = Self::validate(&request)?;

        let featurestore = self
            .featurestore_registry
            .get_featurestore(featurestore_id)
            .await?;

        let connector = self
            .storage_connector_resolver
            .resolve_storage_connector(
                &featurestore,
                request.storage_connector_id,
                request.training_dataset_type,
            )
            .await?;

        let _guard = self
            .creation_locks
            .lock(featurestore.id, &validated.name)
            .await;

        // Explicit versions are never retried, a conflict is final
        let max_attempts = if request.version.is_some() {
            1
        } else {
            self.config.max_version_allocation_attempts.max(1)
        };

        let mut attempt = 1;
        loop {
            let version = self
                .version_allocator
                .allocate_version(featurestore.id, &validated.name, request.version)
                .await?;

            match self
                .create_version(&featurestore, &connector, &request, &validated, version)
                .await
            {
                Ok(training_dataset) => {
                    tracing::info!(
                        training_dataset_id = %training_dataset.id,
                        version,
                        location = %training_dataset.location,
                        "Created training dataset"
                    );
                    return Ok(training_dataset);
                }
                Err(CreateVersionError::VersionTaken(e)) if attempt < max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %e,
                        "Training dataset version was taken concurrently, retrying"
                    );
                    attempt += 1;
                }
                Err(CreateVersionError::VersionTaken(e)) => {
                    return Err(CreateTrainingDatasetError::AlreadyExists(e));
                }
                Err(CreateVersionError::Failed(e)) => return Err(e),
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
