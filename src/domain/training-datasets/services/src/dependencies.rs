// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dill::CatalogBuilder;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Registers the registry services. Repositories, the filesystem client, the
/// feature store registry, the time source, [`CurrentUser`] and
/// [`TrainingDatasetsConfig`] are expected to be provided by the caller.
///
/// [`CurrentUser`]: featurestore_training_datasets::CurrentUser
/// [`TrainingDatasetsConfig`]: featurestore_training_datasets::TrainingDatasetsConfig
pub fn register_dependencies(b: &mut CatalogBuilder) {
    b.add::<StorageConnectorResolverImpl>();
    b.add::<TrainingDatasetCreationLocks>();
    b.add::<TrainingDatasetQueryServiceImpl>();
    b.add::<TrainingDatasetVersionAllocatorImpl>();

    b.add::<CreateTrainingDatasetUseCaseImpl>();
    b.add::<DeleteTrainingDatasetUseCaseImpl>();
    b.add::<UpdateTrainingDatasetUseCaseImpl>();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
