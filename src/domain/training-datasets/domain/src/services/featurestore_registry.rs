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

use crate::{Featurestore, FeaturestoreID};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Resolves feature store identifiers into feature stores of projects
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait::async_trait]
pub trait FeaturestoreRegistry: Send + Sync {
    async fn get_featurestore(
        &self,
        featurestore_id: FeaturestoreID,
    ) -> Result<Featurestore, GetFeaturestoreError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetFeaturestoreError {
    #[error(transparent)]
    NotFound(FeaturestoreNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Feature store not found: id={featurestore_id}")]
pub struct FeaturestoreNotFoundError {
    pub featurestore_id: FeaturestoreID,
}

impl FeaturestoreNotFoundError {
    pub fn new(featurestore_id: FeaturestoreID) -> Self {
        Self { featurestore_id }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
