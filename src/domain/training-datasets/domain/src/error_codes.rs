// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Stable numeric codes reported to clients of the feature store API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeaturestoreErrorCode {
    Internal,
    FeaturestoreNotFound,
    TrainingDatasetNotFound,
    CouldNotCreateTrainingDatasetDir,
    CouldNotDeleteTrainingDatasetDir,
    StorageConnectorNotFound,
    IllegalDataFormat,
    IllegalVersion,
    StorageConnectorTypeMismatch,
    MissingStorageConnector,
    IllegalTrainingDatasetName,
    IllegalSplitName,
    IllegalSplitPercentage,
    DuplicateSplitNames,
    TrainingDatasetAlreadyExists,
}

impl FeaturestoreErrorCode {
    pub fn code(self) -> u32 {
        match self {
            Self::Internal => 270_000,
            Self::FeaturestoreNotFound => 270_009,
            Self::TrainingDatasetNotFound => 270_012,
            Self::CouldNotCreateTrainingDatasetDir => 270_030,
            Self::CouldNotDeleteTrainingDatasetDir => 270_031,
            Self::StorageConnectorNotFound => 270_042,
            Self::IllegalDataFormat => 270_057,
            Self::IllegalVersion => 270_058,
            Self::StorageConnectorTypeMismatch => 270_060,
            Self::MissingStorageConnector => 270_061,
            Self::IllegalTrainingDatasetName => 270_091,
            Self::IllegalSplitName => 270_098,
            Self::IllegalSplitPercentage => 270_099,
            Self::DuplicateSplitNames => 270_106,
            Self::TrainingDatasetAlreadyExists => 270_108,
        }
    }

    pub fn class(self) -> ErrorClass {
        match self {
            Self::Internal => ErrorClass::Internal,
            Self::FeaturestoreNotFound
            | Self::TrainingDatasetNotFound
            | Self::StorageConnectorNotFound => ErrorClass::NotFound,
            Self::CouldNotCreateTrainingDatasetDir | Self::CouldNotDeleteTrainingDatasetDir => {
                ErrorClass::Io
            }
            Self::TrainingDatasetAlreadyExists => ErrorClass::Conflict,
            Self::IllegalDataFormat
            | Self::IllegalVersion
            | Self::StorageConnectorTypeMismatch
            | Self::MissingStorageConnector
            | Self::IllegalTrainingDatasetName
            | Self::IllegalSplitName
            | Self::IllegalSplitPercentage
            | Self::DuplicateSplitNames => ErrorClass::BadRequest,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Internal => "An internal error occurred",
            Self::FeaturestoreNotFound => "Feature store wasn't found",
            Self::TrainingDatasetNotFound => "Training dataset wasn't found",
            Self::CouldNotCreateTrainingDatasetDir => {
                "Could not create the directory of the training dataset"
            }
            Self::CouldNotDeleteTrainingDatasetDir => {
                "Could not delete the directory of the training dataset"
            }
            Self::StorageConnectorNotFound => "Storage connector wasn't found",
            Self::IllegalDataFormat => "Illegal data format of the training dataset",
            Self::IllegalVersion => "Illegal version of the training dataset",
            Self::StorageConnectorTypeMismatch => {
                "Storage connector can't be used for this type of training dataset"
            }
            Self::MissingStorageConnector => "Storage connector is required",
            Self::IllegalTrainingDatasetName => "Illegal training dataset name",
            Self::IllegalSplitName => "Illegal split name",
            Self::IllegalSplitPercentage => "Illegal split percentage",
            Self::DuplicateSplitNames => "Split names must be unique",
            Self::TrainingDatasetAlreadyExists => "Training dataset already exists",
        }
    }
}

impl std::fmt::Display for FeaturestoreErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    BadRequest,
    /// Reported to REST clients as a bad request
    Conflict,
    NotFound,
    Io,
    Internal,
}

impl ErrorClass {
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorClass::Io)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub trait FeaturestoreApiError: std::error::Error {
    fn error_code(&self) -> FeaturestoreErrorCode;

    fn error_class(&self) -> ErrorClass {
        self.error_code().class()
    }

    /// Message safe to show to end users
    fn user_message(&self) -> String {
        match self.error_class() {
            ErrorClass::Internal => self.error_code().description().to_string(),
            _ => self.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: u32,
    pub error_msg: String,
    pub usr_msg: String,
}

impl ErrorResponse {
    pub fn from_error<E: FeaturestoreApiError + ?Sized>(err: &E) -> Self {
        let code = err.error_code();
        Self {
            error_code: code.code(),
            error_msg: code.description().to_string(),
            usr_msg: err.user_message(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl FeaturestoreApiError for SplitValidationError {
    fn error_code(&self) -> FeaturestoreErrorCode {
        match self {
            SplitValidationError::InvalidName(_) => FeaturestoreErrorCode::IllegalSplitName,
            SplitValidationError::InvalidPercentage(_) => {
                FeaturestoreErrorCode::IllegalSplitPercentage
            }
            SplitValidationError::DuplicateName(_) => FeaturestoreErrorCode::DuplicateSplitNames,
        }
    }
}

impl FeaturestoreApiError for ResolveStorageConnectorError {
    fn error_code(&self) -> FeaturestoreErrorCode {
        match self {
            ResolveStorageConnectorError::Missing(_) => {
                FeaturestoreErrorCode::MissingStorageConnector
            }
            ResolveStorageConnectorError::NotFound(_) => {
                FeaturestoreErrorCode::StorageConnectorNotFound
            }
            ResolveStorageConnectorError::TypeMismatch(_) => {
                FeaturestoreErrorCode::StorageConnectorTypeMismatch
            }
            ResolveStorageConnectorError::Internal(_) => FeaturestoreErrorCode::Internal,
        }
    }
}

impl FeaturestoreApiError for AllocateTrainingDatasetVersionError {
    fn error_code(&self) -> FeaturestoreErrorCode {
        match self {
            AllocateTrainingDatasetVersionError::InvalidVersion(_) => {
                FeaturestoreErrorCode::IllegalVersion
            }
            AllocateTrainingDatasetVersionError::Internal(_) => FeaturestoreErrorCode::Internal,
        }
    }
}

impl FeaturestoreApiError for CreateTrainingDatasetError {
    fn error_code(&self) -> FeaturestoreErrorCode {
        match self {
            Self::InvalidName(_) => FeaturestoreErrorCode::IllegalTrainingDatasetName,
            Self::IllegalDataFormat(_) => FeaturestoreErrorCode::IllegalDataFormat,
            Self::InvalidVersion(_) => FeaturestoreErrorCode::IllegalVersion,
            Self::InvalidSplits(e) => e.error_code(),
            Self::FeaturestoreNotFound(_) => FeaturestoreErrorCode::FeaturestoreNotFound,
            Self::MissingStorageConnector(_) => FeaturestoreErrorCode::MissingStorageConnector,
            Self::StorageConnectorNotFound(_) => FeaturestoreErrorCode::StorageConnectorNotFound,
            Self::StorageConnectorTypeMismatch(_) => {
                FeaturestoreErrorCode::StorageConnectorTypeMismatch
            }
            Self::AlreadyExists(_) => FeaturestoreErrorCode::TrainingDatasetAlreadyExists,
            Self::Io(_) => FeaturestoreErrorCode::CouldNotCreateTrainingDatasetDir,
            Self::Internal(_) => FeaturestoreErrorCode::Internal,
        }
    }
}

impl FeaturestoreApiError for UpdateTrainingDatasetError {
    fn error_code(&self) -> FeaturestoreErrorCode {
        match self {
            Self::InvalidSplits(e) => e.error_code(),
            Self::NotFound(_) => FeaturestoreErrorCode::TrainingDatasetNotFound,
            Self::Internal(_) => FeaturestoreErrorCode::Internal,
        }
    }
}

impl FeaturestoreApiError for DeleteTrainingDatasetError {
    fn error_code(&self) -> FeaturestoreErrorCode {
        match self {
            Self::NotFound(_) => FeaturestoreErrorCode::TrainingDatasetNotFound,
            Self::Internal(_) => FeaturestoreErrorCode::Internal,
        }
    }
}

impl FeaturestoreApiError for GetScopedTrainingDatasetError {
    fn error_code(&self) -> FeaturestoreErrorCode {
        match self {
            Self::NotFound(_) => FeaturestoreErrorCode::TrainingDatasetNotFound,
            Self::Internal(_) => FeaturestoreErrorCode::Internal,
        }
    }
}

impl FeaturestoreApiError for ListTrainingDatasetsError {
    fn error_code(&self) -> FeaturestoreErrorCode {
        match self {
            Self::FeaturestoreNotFound(_) => FeaturestoreErrorCode::FeaturestoreNotFound,
            Self::Internal(_) => FeaturestoreErrorCode::Internal,
        }
    }
}

impl FeaturestoreApiError for ListTrainingDatasetVersionsError {
    fn error_code(&self) -> FeaturestoreErrorCode {
        match self {
            Self::FeaturestoreNotFound(_) => FeaturestoreErrorCode::FeaturestoreNotFound,
            Self::NotFound(_) => FeaturestoreErrorCode::TrainingDatasetNotFound,
            Self::Internal(_) => FeaturestoreErrorCode::Internal,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
