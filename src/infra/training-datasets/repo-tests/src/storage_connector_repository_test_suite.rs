// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use assert_matches::assert_matches;
use dill::Catalog;
use featurestore_training_datasets::*;
use pretty_assertions::assert_eq;

use crate::{new_hopsfs_connector, new_s3_connector};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const FS_1: FeaturestoreID = FeaturestoreID::new(1);
const FS_2: FeaturestoreID = FeaturestoreID::new(2);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_create_and_get_connector(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn StorageConnectorRepository>().unwrap();

    let created = repo
        .create_storage_connector(new_s3_connector(FS_1, "s3_conn", "testbucket"))
        .await
        .unwrap();
    assert_eq!(created.name, "s3_conn");
    assert_eq!(created.featurestore_id, FS_1);
    assert!(created.kind.is_object_store());

    let loaded = repo.get_storage_connector(created.id).await.unwrap();
    assert_eq!(loaded, created);

    assert_matches!(
        repo.get_storage_connector(StorageConnectorID::new(999)).await,
        Err(GetStorageConnectorError::NotFound(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_connector_name_is_unique_per_featurestore(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn StorageConnectorRepository>().unwrap();

    repo.create_storage_connector(new_hopsfs_connector(FS_1, "demo_Training_Datasets"))
        .await
        .unwrap();

    assert_matches!(
        repo.create_storage_connector(new_hopsfs_connector(FS_1, "demo_Training_Datasets"))
            .await,
        Err(CreateStorageConnectorError::NameCollision(StorageConnectorNameCollisionError {
            featurestore_id,
            ..
        })) if featurestore_id == FS_1
    );

    repo.create_storage_connector(new_hopsfs_connector(FS_2, "demo_Training_Datasets"))
        .await
        .unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_find_connector_by_name(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn StorageConnectorRepository>().unwrap();

    assert_eq!(
        repo.find_storage_connector_by_name(FS_1, "demo_Training_Datasets")
            .await
            .unwrap(),
        None
    );

    let created = repo
        .create_storage_connector(new_hopsfs_connector(FS_1, "demo_Training_Datasets"))
        .await
        .unwrap();

    assert_eq!(
        repo.find_storage_connector_by_name(FS_1, "demo_Training_Datasets")
            .await
            .unwrap(),
        Some(created)
    );
    assert_eq!(
        repo.find_storage_connector_by_name(FS_2, "demo_Training_Datasets")
            .await
            .unwrap(),
        None
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_list_connectors_by_featurestore(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn StorageConnectorRepository>().unwrap();

    repo.create_storage_connector(new_s3_connector(FS_1, "z_bucket", "z"))
        .await
        .unwrap();
    repo.create_storage_connector(new_hopsfs_connector(FS_1, "a_hopsfs"))
        .await
        .unwrap();
    repo.create_storage_connector(new_s3_connector(FS_2, "b_bucket", "b"))
        .await
        .unwrap();

    let names: Vec<_> = repo
        .get_storage_connectors_by_featurestore(FS_1)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["a_hopsfs".to_string(), "z_bucket".to_string()]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
