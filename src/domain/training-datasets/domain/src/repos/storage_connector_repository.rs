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

use crate::{FeaturestoreID, NewStorageConnector, StorageConnector, StorageConnectorID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Read access to connectors of the connector subsystem, plus creation which
/// is only used for the default HopsFS connector.
///
/// `(featurestore_id, name)` is unique.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait StorageConnectorRepository: Send + Sync {
    async fn create_storage_connector(
        &self,
        connector: NewStorageConnector,
    ) -> Result<StorageConnector, CreateStorageConnectorError>;

    async fn get_storage_connector(
        &self,
        connector_id: StorageConnectorID,
    ) -> Result<StorageConnector, GetStorageConnectorError>;

    async fn find_storage_connector_by_name(
        &self,
        featurestore_id: FeaturestoreID,
        name: &str,
    ) -> Result<Option<StorageConnector>, InternalError>;

    /// Ordered by name
    async fn get_storage_connectors_by_featurestore(
        &self,
        featurestore_id: FeaturestoreID,
    ) -> Result<Vec<StorageConnector>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CreateStorageConnectorError {
    #[error(transparent)]
    NameCollision(StorageConnectorNameCollisionError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Storage connector '{name}' already exists in feature store {featurestore_id}")]
pub struct StorageConnectorNameCollisionError {
    pub featurestore_id: FeaturestoreID,
    pub name: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetStorageConnectorError {
    #[error(transparent)]
    NotFound(StorageConnectorNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Storage connector not found: id={connector_id}")]
pub struct StorageConnectorNotFoundError {
    pub connector_id: StorageConnectorID,
}

impl StorageConnectorNotFoundError {
    pub fn new(connector_id: StorageConnectorID) -> Self {
        Self { connector_id }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
