// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    AllocateTrainingDatasetVersionError,
    Feature,
    FeaturestoreID,
    FeaturestoreNotFoundError,
    GetFeaturestoreError,
    HopsFsIoError,
    IllegalDataFormatError,
    InvalidTrainingDatasetVersionError,
    JobRef,
    MissingStorageConnectorError,
    ResolveStorageConnectorError,
    SplitSpec,
    SplitValidationError,
    StorageConnectorID,
    StorageConnectorNotFoundError,
    StorageConnectorTypeMismatchError,
    TrainingDataset,
    TrainingDatasetAlreadyExistsError,
    TrainingDatasetType,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait CreateTrainingDatasetUseCase: Send + Sync {
    async fn execute(
        &self,
        featurestore_id: FeaturestoreID,
        request: CreateTrainingDatasetRequest,
    ) -> Result<TrainingDataset, CreateTrainingDatasetError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Unvalidated creation request as sent by a client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTrainingDatasetRequest {
    pub name: String,
    /// Assigned automatically when absent
    pub version: Option<i64>,
    pub data_format: Option<String>,
    pub training_dataset_type: TrainingDatasetType,
    pub storage_connector_id: Option<StorageConnectorID>,
    /// Sub-location inside an external connector, ignored for HopsFS
    pub location: Option<String>,
    pub description: Option<String>,
    pub seed: Option<i64>,
    pub features: Vec<Feature>,
    pub splits: Vec<SplitSpec>,
    pub jobs: Vec<JobRef>,
}

impl CreateTrainingDatasetRequest {
    pub fn new(name: impl Into<String>, data_format: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_format: Some(data_format.into()),
            ..Default::default()
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CreateTrainingDatasetError {
    #[error(transparent)]
    InvalidName(InvalidTrainingDatasetNameError),

    #[error(transparent)]
    IllegalDataFormat(IllegalDataFormatError),

    #[error(transparent)]
    InvalidVersion(InvalidTrainingDatasetVersionError),

    #[error(transparent)]
    InvalidSplits(SplitValidationError),

    #[error(transparent)]
    FeaturestoreNotFound(FeaturestoreNotFoundError),

    #[error(transparent)]
    MissingStorageConnector(MissingStorageConnectorError),

    #[error(transparent)]
    StorageConnectorNotFound(StorageConnectorNotFoundError),

    #[error(transparent)]
    StorageConnectorTypeMismatch(StorageConnectorTypeMismatchError),

    #[error(transparent)]
    AlreadyExists(TrainingDatasetAlreadyExistsError),

    #[error(transparent)]
    Io(HopsFsIoError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<ResolveStorageConnectorError> for CreateTrainingDatasetError {
    fn from(value: ResolveStorageConnectorError) -> Self {
        match value {
            ResolveStorageConnectorError::Missing(e) => Self::MissingStorageConnector(e),
            ResolveStorageConnectorError::NotFound(e) => Self::StorageConnectorNotFound(e),
            ResolveStorageConnectorError::TypeMismatch(e) => Self::StorageConnectorTypeMismatch(e),
            ResolveStorageConnectorError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<GetFeaturestoreError> for CreateTrainingDatasetError {
    fn from(value: GetFeaturestoreError) -> Self {
        match value {
            GetFeaturestoreError::NotFound(e) => Self::FeaturestoreNotFound(e),
            GetFeaturestoreError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<AllocateTrainingDatasetVersionError> for CreateTrainingDatasetError {
    fn from(value: AllocateTrainingDatasetVersionError) -> Self {
        match value {
            AllocateTrainingDatasetVersionError::InvalidVersion(e) => Self::InvalidVersion(e),
            AllocateTrainingDatasetVersionError::Internal(e) => Self::Internal(e),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Illegal training dataset name '{name}': only lowercase letters, digits and underscores are \
     allowed"
)]
pub struct InvalidTrainingDatasetNameError {
    pub name: String,
}

impl InvalidTrainingDatasetNameError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
