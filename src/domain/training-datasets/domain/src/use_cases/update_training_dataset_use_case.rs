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
    Feature,
    FeaturestoreID,
    JobRef,
    SplitSpec,
    SplitValidationError,
    StorageConnectorID,
    TrainingDataset,
    TrainingDatasetID,
    TrainingDatasetNotFoundError,
    TrainingDatasetType,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait UpdateTrainingDatasetUseCase: Send + Sync {
    /// Applies the mutable part of the patch and returns the stored record
    async fn execute(
        &self,
        featurestore_id: FeaturestoreID,
        training_dataset_id: TrainingDatasetID,
        patch: TrainingDatasetPatch,
    ) -> Result<TrainingDataset, UpdateTrainingDatasetError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Update as sent by a client. Clients usually send back the whole record, so
/// every field is accepted, but only `description` and `jobs` are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrainingDatasetPatch {
    pub name: Option<String>,
    pub version: Option<i64>,
    pub data_format: Option<String>,
    pub training_dataset_type: Option<TrainingDatasetType>,
    pub storage_connector_id: Option<StorageConnectorID>,
    pub location: Option<String>,
    pub seed: Option<i64>,
    pub features: Option<Vec<Feature>>,
    pub splits: Option<Vec<SplitSpec>>,
    pub description: Option<String>,
    pub jobs: Option<Vec<JobRef>>,
}

impl TrainingDatasetPatch {
    /// Names of supplied fields that cannot be changed after creation
    pub fn immutable_fields_supplied(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("version", self.version.is_some()),
            ("dataFormat", self.data_format.is_some()),
            ("trainingDatasetType", self.training_dataset_type.is_some()),
            ("storageConnectorId", self.storage_connector_id.is_some()),
            ("location", self.location.is_some()),
            ("seed", self.seed.is_some()),
            ("features", self.features.is_some()),
            ("splits", self.splits.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, supplied)| supplied.then_some(field))
        .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum UpdateTrainingDatasetError {
    #[error(transparent)]
    InvalidSplits(SplitValidationError),

    #[error(transparent)]
    NotFound(TrainingDatasetNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
