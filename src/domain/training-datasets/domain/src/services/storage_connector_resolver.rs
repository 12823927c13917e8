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
    Featurestore,
    ResolvedStorageConnector,
    StorageConnector,
    StorageConnectorID,
    StorageConnectorNotFoundError,
    TrainingDatasetType,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait StorageConnectorResolver: Send + Sync {
    /// Picks the connector a new training dataset of the given type is stored
    /// under. Without a connector reference HopsFS datasets fall back to the
    /// default connector of the feature store.
    async fn resolve_storage_connector(
        &self,
        featurestore: &Featurestore,
        connector_id: Option<StorageConnectorID>,
        training_dataset_type: TrainingDatasetType,
    ) -> Result<ResolvedStorageConnector, ResolveStorageConnectorError>;

    /// Returns the `<project>_Training_Datasets` connector, creating it on
    /// first use
    async fn get_or_create_default_connector(
        &self,
        featurestore: &Featurestore,
    ) -> Result<StorageConnector, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ResolveStorageConnectorError {
    #[error(transparent)]
    Missing(MissingStorageConnectorError),

    #[error(transparent)]
    NotFound(StorageConnectorNotFoundError),

    #[error(transparent)]
    TypeMismatch(StorageConnectorTypeMismatchError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("A storage connector is required for {training_dataset_type} training datasets")]
pub struct MissingStorageConnectorError {
    pub training_dataset_type: TrainingDatasetType,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Storage connector {connector_id} of type {connector_type} cannot be used for \
     {training_dataset_type} training datasets of this feature store"
)]
pub struct StorageConnectorTypeMismatchError {
    pub connector_id: StorageConnectorID,
    pub connector_type: String,
    pub training_dataset_type: TrainingDatasetType,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
