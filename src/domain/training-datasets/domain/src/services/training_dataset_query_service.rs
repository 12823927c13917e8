// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{
    FeaturestoreID,
    FeaturestoreNotFoundError,
    GetFeaturestoreError,
    TrainingDataset,
    TrainingDatasetID,
    TrainingDatasetName,
    TrainingDatasetNotFoundError,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Read side of the registry. Every lookup is scoped to a feature store: a
/// record of another feature store is reported as not found.
#[async_trait::async_trait]
pub trait TrainingDatasetQueryService: Send + Sync {
    async fn get_training_dataset(
        &self,
        featurestore_id: FeaturestoreID,
        training_dataset_id: TrainingDatasetID,
    ) -> Result<TrainingDataset, GetScopedTrainingDatasetError>;

    /// Ordered by name, then by version
    async fn list_training_datasets(
        &self,
        featurestore_id: FeaturestoreID,
    ) -> Result<Vec<TrainingDataset>, ListTrainingDatasetsError>;

    /// All versions in ascending order, or only the requested one. A name
    /// without any versions is an error, a missing requested version is not.
    async fn list_training_dataset_versions(
        &self,
        featurestore_id: FeaturestoreID,
        name: &TrainingDatasetName,
        version: Option<u32>,
    ) -> Result<Vec<TrainingDataset>, ListTrainingDatasetVersionsError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetScopedTrainingDatasetError {
    #[error(transparent)]
    NotFound(TrainingDatasetNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ListTrainingDatasetsError {
    #[error(transparent)]
    FeaturestoreNotFound(FeaturestoreNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<GetFeaturestoreError> for ListTrainingDatasetsError {
    fn from(value: GetFeaturestoreError) -> Self {
        match value {
            GetFeaturestoreError::NotFound(e) => Self::FeaturestoreNotFound(e),
            GetFeaturestoreError::Internal(e) => Self::Internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ListTrainingDatasetVersionsError {
    #[error(transparent)]
    FeaturestoreNotFound(FeaturestoreNotFoundError),

    #[error(transparent)]
    NotFound(TrainingDatasetNameNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<GetFeaturestoreError> for ListTrainingDatasetVersionsError {
    fn from(value: GetFeaturestoreError) -> Self {
        match value {
            GetFeaturestoreError::NotFound(e) => Self::FeaturestoreNotFound(e),
            GetFeaturestoreError::Internal(e) => Self::Internal(e),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Training dataset not found: name='{name}'")]
pub struct TrainingDatasetNameNotFoundError {
    pub name: TrainingDatasetName,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
