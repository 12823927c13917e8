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

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn UpdateTrainingDatasetUseCase)]
pub struct UpdateTrainingDatasetUseCaseImpl {
    training_dataset_query_service: Arc<dyn TrainingDatasetQueryService>,
    training_dataset_repo: Arc<dyn TrainingDatasetRepository>,
}

#[async_trait::async_trait]
impl UpdateTrainingDatasetUseCase for UpdateTrainingDatasetUseCaseImpl {
    #[tracing::instrument(
        level = "info",
        name = "UpdateTrainingDatasetUseCaseImpl::execute",
        skip_all,
        fields(%featurestore_id, %training_dataset_id)
    )]
    async fn execute(
        &self,
        featurestore_id: FeaturestoreID,
        training_dataset_id: TrainingDatasetID,
        patch: TrainingDatasetPatch,
    ) -> Result<TrainingDataset, UpdateTrainingDatasetError> {
        let training_dataset = match self
            .training_dataset_query_service
            .get_training_dataset(featurestore_id, training_dataset_id)
            .await
        {
            Ok(training_dataset) => training_dataset,
            Err(GetScopedTrainingDatasetError::NotFound(e)) => {
                return Err(UpdateTrainingDatasetError::NotFound(e));
            }
            Err(GetScopedTrainingDatasetError::Internal(e)) => {
                return Err(UpdateTrainingDatasetError::Internal(e));
            }
        };

        // Splits cannot change, but a malformed set is still rejected
        if let Some(splits) = &patch.splits {
            validate_splits(splits).map_err(UpdateTrainingDatasetError::InvalidSplits)?;
        }

        let ignored_fields = patch.immutable_fields_supplied();
        if !ignored_fields.is_empty() {
            tracing::debug!(
                ?ignored_fields,
                "Ignoring fields that cannot change after creation"
            );
        }

        let update = TrainingDatasetMetadataUpdate {
            description: patch.description,
            jobs: patch.jobs,
        };
        if update.is_empty() {
            return Ok(training_dataset);
        }

        self.training_dataset_repo
            .update_training_dataset_metadata(training_dataset_id, update)
            .await
            .map_err(|e| match e {
                UpdateTrainingDatasetMetadataError::NotFound(e) => {
                    UpdateTrainingDatasetError::NotFound(e)
                }
                UpdateTrainingDatasetMetadataError::Internal(e) => {
                    UpdateTrainingDatasetError::Internal(e)
                }
            })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
