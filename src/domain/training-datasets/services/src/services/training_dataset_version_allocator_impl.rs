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
use internal_error::ErrorIntoInternal;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn TrainingDatasetVersionAllocator)]
pub struct TrainingDatasetVersionAllocatorImpl {
    training_dataset_repo: Arc<dyn TrainingDatasetRepository>,
}

#[async_trait::async_trait]
impl TrainingDatasetVersionAllocator for TrainingDatasetVersionAllocatorImpl {
    #[tracing::instrument(
        level = "debug",
        name = "TrainingDatasetVersionAllocatorImpl::allocate_version",
        skip_all,
        fields(%featurestore_id, %name, ?requested_version)
    )]
    async fn allocate_version(
        &self,
        featurestore_id: FeaturestoreID,
        name: &TrainingDatasetName,
        requested_version: Option<i64>,
    ) -> Result<u32, AllocateTrainingDatasetVersionError> {
        if let Some(requested_version) = requested_version {
            return Ok(validate_requested_version(requested_version)?);
        }

        let version = match self
            .training_dataset_repo
            .get_max_version(featurestore_id, name)
            .await?
        {
            None => 1,
            Some(max_version) => max_version
                .checked_add(1)
                .ok_or_else(|| format!("Versions of '{name}' are exhausted").int_err())?,
        };

        tracing::debug!(version, "Allocated training dataset version");

        Ok(version)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
