// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    DataFormat,
    FeaturestoreID,
    InodeID,
    Split,
    StorageConnectorID,
    TrainingDatasetID,
    TrainingDatasetName,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrainingDatasetType {
    /// Data lives in a directory managed by the feature store
    #[default]
    #[serde(rename = "HOPSFS_TRAINING_DATASET")]
    HopsFs,

    /// Data lives in an object store owned by somebody else
    #[serde(rename = "EXTERNAL_TRAINING_DATASET")]
    External,
}

impl TrainingDatasetType {
    pub fn as_str(self) -> &'static str {
        match self {
            TrainingDatasetType::HopsFs => "HOPSFS_TRAINING_DATASET",
            TrainingDatasetType::External => "EXTERNAL_TRAINING_DATASET",
        }
    }
}

impl std::fmt::Display for TrainingDatasetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub name: String,
    #[serde(rename = "type")]
    pub feature_type: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub partition: bool,
}

impl Feature {
    pub fn new(name: impl Into<String>, feature_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feature_type: feature_type.into(),
            primary: false,
            partition: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRef {
    pub job_name: String,
}

impl JobRef {
    pub fn new(job_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
        }
    }
}

/// Keeps the first occurrence of every job name, preserving order
pub fn dedupe_jobs(jobs: impl IntoIterator<Item = JobRef>) -> Vec<JobRef> {
    let mut seen = std::collections::HashSet::new();
    jobs.into_iter()
        .filter(|j| seen.insert(j.job_name.clone()))
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDataset {
    pub id: TrainingDatasetID,
    pub featurestore_id: FeaturestoreID,
    pub featurestore_name: String,
    pub name: TrainingDatasetName,
    pub version: u32,
    pub data_format: DataFormat,
    pub training_dataset_type: TrainingDatasetType,
    pub location: String,
    pub storage_connector_id: StorageConnectorID,
    pub storage_connector_name: String,
    pub description: Option<String>,
    pub creator: String,
    pub created: DateTime<Utc>,
    pub seed: Option<i64>,
    pub inode_id: Option<InodeID>,
    pub features: Vec<Feature>,
    pub splits: Vec<Split>,
    pub jobs: Vec<JobRef>,
}

/// Fully resolved record awaiting an identifier from the repository
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrainingDataset {
    pub featurestore_id: FeaturestoreID,
    pub featurestore_name: String,
    pub name: TrainingDatasetName,
    pub version: u32,
    pub data_format: DataFormat,
    pub training_dataset_type: TrainingDatasetType,
    pub location: String,
    pub storage_connector_id: StorageConnectorID,
    pub storage_connector_name: String,
    pub description: Option<String>,
    pub creator: String,
    pub created: DateTime<Utc>,
    pub seed: Option<i64>,
    pub inode_id: Option<InodeID>,
    pub features: Vec<Feature>,
    pub splits: Vec<Split>,
    pub jobs: Vec<JobRef>,
}

impl NewTrainingDataset {
    pub fn into_training_dataset(self, id: TrainingDatasetID) -> TrainingDataset {
        TrainingDataset {
            id,
            featurestore_id: self.featurestore_id,
            featurestore_name: self.featurestore_name,
            name: self.name,
            version: self.version,
            data_format: self.data_format,
            training_dataset_type: self.training_dataset_type,
            location: self.location,
            storage_connector_id: self.storage_connector_id,
            storage_connector_name: self.storage_connector_name,
            description: self.description,
            creator: self.creator,
            created: self.created,
            seed: self.seed,
            inode_id: self.inode_id,
            features: self.features,
            splits: self.splits,
            jobs: self.jobs,
        }
    }
}

/// The only part of a stored record that may change after creation.
/// `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingDatasetMetadataUpdate {
    pub description: Option<String>,
    pub jobs: Option<Vec<JobRef>>,
}

impl TrainingDatasetMetadataUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.jobs.is_none()
    }

    pub fn apply_to(&self, training_dataset: &mut TrainingDataset) {
        if let Some(description) = &self.description {
            training_dataset.description = Some(description.clone());
        }
        if let Some(jobs) = &self.jobs {
            training_dataset.jobs = dedupe_jobs(jobs.iter().cloned());
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
