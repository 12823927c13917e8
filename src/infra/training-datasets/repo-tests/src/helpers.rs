// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{TimeZone, Utc};
use featurestore_training_datasets::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn new_training_dataset(
    featurestore_id: FeaturestoreID,
    name: &str,
    version: u32,
) -> NewTrainingDataset {
    let name = TrainingDatasetName::new_unchecked(name);
    let location = format!(
        "hopsfs://namenode.service.consul:8020/Projects/demo/demo_Training_Datasets/{}",
        training_dataset_dir_name(&name, version)
    );

    NewTrainingDataset {
        featurestore_id,
        featurestore_name: "demo_featurestore".to_string(),
        name,
        version,
        data_format: DataFormat::Tfrecords,
        training_dataset_type: TrainingDatasetType::HopsFs,
        location,
        storage_connector_id: StorageConnectorID::new(1),
        storage_connector_name: "demo_Training_Datasets".to_string(),
        description: Some("test training dataset".to_string()),
        creator: "meb10000".to_string(),
        created: Utc.with_ymd_and_hms(2050, 1, 1, 12, 0, 0).unwrap(),
        seed: Some(1234),
        inode_id: Some(InodeID::new(100 + i64::from(version))),
        features: vec![Feature::new("age", "int")],
        splits: Vec::new(),
        jobs: Vec::new(),
    }
}

pub fn new_hopsfs_connector(featurestore_id: FeaturestoreID, name: &str) -> NewStorageConnector {
    NewStorageConnector {
        featurestore_id,
        name: name.to_string(),
        description: None,
        kind: StorageConnectorKind::HopsFs(HopsFsConnectorConfig {
            dataset_path: format!("/Projects/demo/{name}"),
        }),
    }
}

pub fn new_s3_connector(
    featurestore_id: FeaturestoreID,
    name: &str,
    bucket: &str,
) -> NewStorageConnector {
    NewStorageConnector {
        featurestore_id,
        name: name.to_string(),
        description: Some("external bucket".to_string()),
        kind: StorageConnectorKind::S3(ObjectStoreConnectorConfig {
            bucket: bucket.to_string(),
            root_prefix: None,
            credentials: OpaqueCredentials::default(),
        }),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
