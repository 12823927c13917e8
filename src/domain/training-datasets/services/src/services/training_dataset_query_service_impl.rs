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
#[dill::interface(dyn TrainingDatasetQueryService)]
pub struct TrainingDatasetQueryServiceImpl {
    featurestore_registry: Arc<dyn FeaturestoreRegistry>,
    training_dataset_repo: Arc<dyn TrainingDatasetRepository>,
}

#[async_trait::async_trait]
impl TrainingDatasetQueryService for TrainingDatasetQueryServiceImpl {
    #[tracing::instrument(
        level = "debug",
        name = "TrainingDatasetQueryServiceImpl::get_training_dataset",
        skip_all,
        fields(%featurestore_id, %training_dataset_id)
    )]
    async fn get_training_dataset(
        &self,
        featurestore_id: FeaturestoreID,
        training_dataset_id: TrainingDatasetID,
    ) -> Result<TrainingDataset, GetScopedTrainingDatasetError> {
        match self
            .training_dataset_repo
            .get_training_dataset(training_dataset_id)
            .await
        {
            Ok(training_dataset) if training_dataset.featurestore_id == featurestore_id => {
                Ok(training_dataset)
            }
            Ok(_) => Err(GetScopedTrainingDatasetError::NotFound(
                TrainingDatasetNotFoundError::new(training_dataset_id),
            )),
            Err(GetTrainingDatasetError::NotFound(e)) => {
                Err(GetScopedTrainingDatasetError::NotFound(e))
            }
            Err(GetTrainingDatasetError::Internal(e)) => {
                Err(GetScopedTrainingDatasetError::Internal(e))
            }
        }
    }

    #[tracing::instrument(
        level = "debug",
        name = "TrainingDatasetQueryServiceImpl::list_training_datasets",
        skip_all,
        fields(%featurestore_id)
    )]
    async fn list_training_datasets(
        &self,
        featurestore_id: FeaturestoreID,
    ) -> Result<Vec<TrainingDataset>, ListTrainingDatasetsError> {
        self.featurestore_registry
            .get_featurestore(featurestore_id)
            .await?;

        let training_datasets = self
            .training_dataset_repo
            .get_training_datasets_by_featurestore(featurestore_id)
            .await?;

        Ok(training_datasets)
    }

    #[tracing::instrument(
        level = "debug",
        name = "TrainingDatasetQueryServiceImpl::list_training_dataset_versions",
        skip_all,
        fields(%featurestore_id, %name, ?version)
    )]
    async fn list_training_dataset_versions(
        &self,
        featurestore_id: FeaturestoreID,
        name: &TrainingDatasetName,
        version: Option<u32>,
    ) -> Result<Vec<TrainingDataset>, ListTrainingDatasetVersionsError> {
        self.featurestore_registry
            .get_featurestore(featurestore_id)
            .await?;

        let versions = self
            .training_dataset_repo
            .get_training_dataset_versions(featurestore_id, name)
            .await?;

        if versions.is_empty() {
            return Err(ListTrainingDatasetVersionsError::NotFound(
                TrainingDatasetNameNotFoundError { name: name.clone() },
            ));
        }

        Ok(match version {
            None => versions,
            Some(version) => versions
                .into_iter()
                .filter(|td| td.version == version)
                .collect(),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
