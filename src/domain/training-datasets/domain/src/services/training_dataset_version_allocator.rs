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

use crate::{FeaturestoreID, TrainingDatasetName};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait TrainingDatasetVersionAllocator: Send + Sync {
    /// Validates the requested version, or picks `max(existing) + 1` when none
    /// was requested. Uniqueness of the result is only enforced on save.
    async fn allocate_version(
        &self,
        featurestore_id: FeaturestoreID,
        name: &TrainingDatasetName,
        requested_version: Option<i64>,
    ) -> Result<u32, AllocateTrainingDatasetVersionError>;
}

pub fn validate_requested_version(version: i64) -> Result<u32, InvalidTrainingDatasetVersionError> {
    match u32::try_from(version) {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(InvalidTrainingDatasetVersionError { version }),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum AllocateTrainingDatasetVersionError {
    #[error(transparent)]
    InvalidVersion(#[from] InvalidTrainingDatasetVersionError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Illegal training dataset version {version}, versions start at 1")]
pub struct InvalidTrainingDatasetVersionError {
    pub version: i64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
