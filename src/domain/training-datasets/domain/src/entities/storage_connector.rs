// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FeaturestoreID, StorageConnectorID, TrainingDatasetType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConnector {
    pub id: StorageConnectorID,
    pub featurestore_id: FeaturestoreID,
    pub name: String,
    pub description: Option<String>,
    pub kind: StorageConnectorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStorageConnector {
    pub featurestore_id: FeaturestoreID,
    pub name: String,
    pub description: Option<String>,
    pub kind: StorageConnectorKind,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "storageConnectorType", rename_all = "UPPERCASE")]
pub enum StorageConnectorKind {
    #[serde(rename = "HOPSFS")]
    HopsFs(HopsFsConnectorConfig),
    S3(ObjectStoreConnectorConfig),
    Gcs(ObjectStoreConnectorConfig),
    Jdbc(JdbcConnectorConfig),
}

impl StorageConnectorKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            StorageConnectorKind::HopsFs(_) => "HOPSFS",
            StorageConnectorKind::S3(_) => "S3",
            StorageConnectorKind::Gcs(_) => "GCS",
            StorageConnectorKind::Jdbc(_) => "JDBC",
        }
    }

    pub fn is_object_store(&self) -> bool {
        matches!(
            self,
            StorageConnectorKind::S3(_) | StorageConnectorKind::Gcs(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HopsFsConnectorConfig {
    /// Absolute directory inside HopsFS
    pub dataset_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStoreConnectorConfig {
    pub bucket: String,
    pub root_prefix: Option<String>,
    #[serde(default)]
    pub credentials: OpaqueCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdbcConnectorConfig {
    pub connection_string: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Credentials of an external store. Never interpreted here, only carried
/// along, and never printed.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpaqueCredentials(BTreeMap<String, String>);

impl OpaqueCredentials {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for OpaqueCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.0.keys().map(|k| format!("{k}=<redacted>")))
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectStoreScheme {
    S3,
    Gcs,
}

impl ObjectStoreScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectStoreScheme::S3 => "s3",
            ObjectStoreScheme::Gcs => "gs",
        }
    }

    pub fn from_uri_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "s3" => Some(ObjectStoreScheme::S3),
            "gs" => Some(ObjectStoreScheme::Gcs),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectStoreScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Storage connector checked against the requested dataset type, together with
/// everything needed to compute a location under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedStorageConnector {
    HopsFs {
        connector: StorageConnector,
        /// `host:port` of the HopsFS namenode
        authority: String,
        dataset_path: String,
    },
    ObjectStore {
        connector: StorageConnector,
        scheme: ObjectStoreScheme,
        bucket: String,
        root_prefix: Option<String>,
    },
}

impl ResolvedStorageConnector {
    pub fn connector(&self) -> &StorageConnector {
        match self {
            ResolvedStorageConnector::HopsFs { connector, .. }
            | ResolvedStorageConnector::ObjectStore { connector, .. } => connector,
        }
    }

    pub fn training_dataset_type(&self) -> TrainingDatasetType {
        match self {
            ResolvedStorageConnector::HopsFs { .. } => TrainingDatasetType::HopsFs,
            ResolvedStorageConnector::ObjectStore { .. } => TrainingDatasetType::External,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
