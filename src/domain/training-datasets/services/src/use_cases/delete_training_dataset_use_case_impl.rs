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
use internal_error::ResultIntoInternal;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn DeleteTrainingDatasetUseCase)]
pub struct DeleteTrainingDatasetUseCaseImpl {
    training_dataset_query_service: Arc<dyn TrainingDatasetQueryService>,
    training_dataset_repo: Arc<dyn TrainingDatasetRepository>,
    hopsfs_client: Arc<dyn HopsFsClient>,
    config: Arc<TrainingDatasetsConfig>,
}

impl DeleteTrainingDatasetUseCaseImpl {
    // The record is gone at this point, a leftover directory is only an orphan
    async fn remove_directory(&self, path: &str) {
        let timeout = self.config.fs_operation_timeout();

        match tokio::time::timeout(timeout, self.hopsfs_client.rmdir(path, true)).await {
            Ok(Ok(())) => {
                tracing::debug!(path, "Removed training dataset directory");
            }
            Ok(Err(HopsFsRmdirError::NotFound(_))) => {
                tracing::warn!(path, "Training dataset directory is already gone");
            }
            Ok(Err(HopsFsRmdirError::Io(e))) => {
                tracing::warn!(path, error = %e, "Failed to remove training dataset directory");
            }
            Err(_) => {
                tracing::warn!(
                    path,
                    timeout_ms = self.config.fs_operation_timeout_ms,
                    "Timed out removing training dataset directory"
                );
            }
        }
    }
}

#[async_trait::async_trait]
impl DeleteTrainingDatasetUseCase for DeleteTrainingDatasetUseCaseImpl {
    #[tracing::instrument(
        level = "info",
        name = "DeleteTrainingDatasetUseCaseImpl::execute",
        skip_all,
        fields(%featurestore_id, %training_dataset_id)
    )]
    async fn execute(
        &self,
        featurestore_id: FeaturestoreID,
        training_dataset_id: TrainingDatasetID,
    ) -> Result<(), DeleteTrainingDatasetError> {
        let training_dataset = match self
            .training_dataset_query_service
            .get_training_dataset(featurestore_id, training_dataset_id)
            .await
        {
            Ok(training_dataset) => training_dataset,
            Err(GetScopedTrainingDatasetError::NotFound(e)) => {
                return Err(DeleteTrainingDatasetError::NotFound(e));
            }
            Err(GetScopedTrainingDatasetError::Internal(e)) => {
                return Err(DeleteTrainingDatasetError::Internal(e));
            }
        };

        // Data of external datasets belongs to the owner of the bucket
        let location = if training_dataset.training_dataset_type == TrainingDatasetType::HopsFs {
            Some(TrainingDatasetLocation::from_uri(&training_dataset.location).int_err()?)
        } else {
            None
        };

        match self
            .training_dataset_repo
            .delete_training_dataset(training_dataset_id)
            .await
        {
            Ok(()) => {}
            Err(DeleteTrainingDatasetRecordError::NotFound(e)) => {
                return Err(DeleteTrainingDatasetError::NotFound(e));
            }
            Err(DeleteTrainingDatasetRecordError::Internal(e)) => {
                return Err(DeleteTrainingDatasetError::Internal(e));
            }
        }

        if let Some(location) = &location
            && let Some(path) = location.hopsfs_path()
        {
            self.remove_directory(path).await;
        }

        tracing::info!(
            name = %training_dataset.name,
            version = training_dataset.version,
            "Deleted training dataset"
        );

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
