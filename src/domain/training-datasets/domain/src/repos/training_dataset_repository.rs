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
    NewTrainingDataset,
    TrainingDataset,
    TrainingDatasetID,
    TrainingDatasetMetadataUpdate,
    TrainingDatasetName,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Persistent store of training dataset records.
///
/// Implementations must guarantee uniqueness of
/// `(featurestore_id, name, version)`: the second of two racing saves of the
/// same triple fails with [`SaveTrainingDatasetError::Duplicate`]. Versions
/// of deleted records stay taken.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait TrainingDatasetRepository: Send + Sync {
    async fn save_training_dataset(
        &self,
        training_dataset: NewTrainingDataset,
    ) -> Result<TrainingDataset, SaveTrainingDatasetError>;

    async fn get_training_dataset(
        &self,
        training_dataset_id: TrainingDatasetID,
    ) -> Result<TrainingDataset, GetTrainingDatasetError>;

    /// Ordered by name, then by version
    async fn get_training_datasets_by_featurestore(
        &self,
        featurestore_id: FeaturestoreID,
    ) -> Result<Vec<TrainingDataset>, InternalError>;

    /// All versions of a name in ascending order
    async fn get_training_dataset_versions(
        &self,
        featurestore_id: FeaturestoreID,
        name: &TrainingDatasetName,
    ) -> Result<Vec<TrainingDataset>, InternalError>;

    /// Highest version ever saved under the name, deleted records included
    async fn get_max_version(
        &self,
        featurestore_id: FeaturestoreID,
        name: &TrainingDatasetName,
    ) -> Result<Option<u32>, InternalError>;

    async fn update_training_dataset_metadata(
        &self,
        training_dataset_id: TrainingDatasetID,
        update: TrainingDatasetMetadataUpdate,
    ) -> Result<TrainingDataset, UpdateTrainingDatasetMetadataError>;

    async fn delete_training_dataset(
        &self,
        training_dataset_id: TrainingDatasetID,
    ) -> Result<(), DeleteTrainingDatasetRecordError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveTrainingDatasetError {
    #[error(transparent)]
    Duplicate(TrainingDatasetAlreadyExistsError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Training dataset '{name}' version {version} already exists in feature store {featurestore_id}"
)]
pub struct TrainingDatasetAlreadyExistsError {
    pub featurestore_id: FeaturestoreID,
    pub name: TrainingDatasetName,
    pub version: u32,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetTrainingDatasetError {
    #[error(transparent)]
    NotFound(TrainingDatasetNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Training dataset not found: id={training_dataset_id}")]
pub struct TrainingDatasetNotFoundError {
    pub training_dataset_id: TrainingDatasetID,
}

impl TrainingDatasetNotFoundError {
    pub fn new(training_dataset_id: TrainingDatasetID) -> Self {
        Self {
            training_dataset_id,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UpdateTrainingDatasetMetadataError {
    #[error(transparent)]
    NotFound(TrainingDatasetNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum DeleteTrainingDatasetRecordError {
    #[error(transparent)]
    NotFound(TrainingDatasetNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
