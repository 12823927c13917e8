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

use crate::{FeaturestoreID, TrainingDatasetID, TrainingDatasetNotFoundError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait DeleteTrainingDatasetUseCase: Send + Sync {
    async fn execute(
        &self,
        featurestore_id: FeaturestoreID,
        training_dataset_id: TrainingDatasetID,
    ) -> Result<(), DeleteTrainingDatasetError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum DeleteTrainingDatasetError {
    #[error(transparent)]
    NotFound(TrainingDatasetNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
