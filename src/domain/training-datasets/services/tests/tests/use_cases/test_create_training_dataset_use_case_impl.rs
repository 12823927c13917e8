// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use featurestore_training_datasets::*;
use pretty_assertions::assert_eq;

use crate::tests::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_hopsfs_training_dataset() {
    let harness = TrainingDatasetHarness::new().await;

    let td = harness.create_hopsfs_training_dataset("sample_td").await;

    assert_eq!(td.name, td_name("sample_td"));
    assert_eq!(td.version, 1);
    assert_eq!(td.featurestore_id, FEATURESTORE_ID);
    assert_eq!(td.featurestore_name, "demo_featurestore");
    assert_eq!(td.data_format, DataFormat::Tfrecords);
    assert_eq!(td.training_dataset_type, TrainingDatasetType::HopsFs);
    assert_eq!(
        td.location,
        "hopsfs://namenode.service.consul:8020/Projects/demo/demo_Training_Datasets/sample_td_1"
    );
    assert_eq!(td.storage_connector_name, "demo_Training_Datasets");
    assert_eq!(td.creator, USERNAME);
    assert_eq!(td.created, TrainingDatasetHarness::now());
    assert_eq!(td.seed, Some(1234));
    assert_eq!(
        td.description.as_deref(),
        Some("tests training dataset description")
    );
    assert_eq!(td.features.len(), 2);
    assert!(td.features[0].primary);
    assert!(td.splits.is_empty());
    assert!(td.inode_id.is_some());

    assert!(
        harness
            .dir_exists(&format!("{DEFAULT_DATASETS_DIR}/sample_td_1"))
            .await
    );

    let connectors = harness.connectors().await;
    assert_eq!(connectors.len(), 1);
    assert_eq!(connectors[0].id, td.storage_connector_id);
    assert_eq!(
        connectors[0].kind,
        StorageConnectorKind::HopsFs(HopsFsConnectorConfig {
            dataset_path: DEFAULT_DATASETS_DIR.to_string(),
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_auto_versions_increment() {
    let harness = TrainingDatasetHarness::new().await;

    let v1 = harness.create_hopsfs_training_dataset("sample_td").await;
    let v2 = harness.create_hopsfs_training_dataset("sample_td").await;
    assert_eq!((v1.version, v2.version), (1, 2));
    assert!(v2.location.ends_with("/sample_td_2"));

    let v5 = harness
        .create(CreateTrainingDatasetRequest {
            version: Some(5),
            ..hopsfs_request("sample_td")
        })
        .await
        .unwrap();
    assert_eq!(v5.version, 5);

    let v6 = harness.create_hopsfs_training_dataset("sample_td").await;
    assert_eq!(v6.version, 6);

    // Numbering is per name
    let other = harness.create_hopsfs_training_dataset("other_td").await;
    assert_eq!(other.version, 1);

    // A single default connector serves all of them
    assert_eq!(harness.connectors().await.len(), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_uppercase_name_rejected_before_anything_else() {
    let harness = TrainingDatasetHarness::new().await;

    let res = harness
        .create(CreateTrainingDatasetRequest {
            version: Some(0),
            data_format: Some("xlsx".to_string()),
            splits: vec![SplitSpec::new("ILLEGAL!", "wrong")],
            ..hopsfs_request("TestTrainingDataset")
        })
        .await;

    assert_matches!(
        res,
        Err(CreateTrainingDatasetError::InvalidName(InvalidTrainingDatasetNameError { ref name }))
            if name == "TestTrainingDataset"
    );
    assert_eq!(res.unwrap_err().error_code().code(), 270_091);

    // Validation precedes any side effect
    assert!(harness.connectors().await.is_empty());
    assert!(!harness.dir_exists(DEFAULT_DATASETS_DIR).await);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_illegal_names_rejected() {
    let harness = TrainingDatasetHarness::new().await;

    for name in ["", "with space", "dash-name", "name!", "näme", "Upper"] {
        assert_matches!(
            harness.create(hopsfs_request(name)).await,
            Err(CreateTrainingDatasetError::InvalidName(_)),
            "name: {name:?}"
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_data_format_required_and_checked() {
    let harness = TrainingDatasetHarness::new().await;

    for data_format in [None, Some(""), Some("xlsx")] {
        let res = harness
            .create(CreateTrainingDatasetRequest {
                data_format: data_format.map(ToString::to_string),
                version: Some(0),
                ..hopsfs_request("sample_td")
            })
            .await;

        assert_matches!(res, Err(CreateTrainingDatasetError::IllegalDataFormat(_)));
        assert_eq!(res.unwrap_err().error_code().code(), 270_057);
    }

    let td = harness
        .create(CreateTrainingDatasetRequest {
            data_format: Some("CSV".to_string()),
            ..hopsfs_request("sample_td")
        })
        .await
        .unwrap();
    assert_eq!(td.data_format, DataFormat::Csv);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_non_positive_version_rejected() {
    let harness = TrainingDatasetHarness::new().await;

    for version in [0, -1] {
        let res = harness
            .create(CreateTrainingDatasetRequest {
                version: Some(version),
                splits: vec![SplitSpec::new("train", "wrong")],
                ..hopsfs_request("sample_td")
            })
            .await;

        assert_matches!(
            res,
            Err(CreateTrainingDatasetError::InvalidVersion(InvalidTrainingDatasetVersionError {
                version: v
            })) if v == version
        );
        assert_eq!(res.unwrap_err().error_code().code(), 270_058);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_with_splits() {
    let harness = TrainingDatasetHarness::new().await;

    let td = harness
        .create(CreateTrainingDatasetRequest {
            splits: vec![SplitSpec::new("test_split", 0.8), SplitSpec::new("train_split", "0.2")],
            ..hopsfs_request("sample_td")
        })
        .await
        .unwrap();

    assert_eq!(
        td.splits,
        vec![
            Split {
                name: SplitName::new_unchecked("test_split"),
                percentage: 0.8,
            },
            Split {
                name: SplitName::new_unchecked("train_split"),
                percentage: 0.2,
            },
        ]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_split_errors() {
    let harness = TrainingDatasetHarness::new().await;

    let cases = [
        (vec![SplitSpec::new("train_split", "wrong")], 270_099),
        (vec![SplitSpec::new("ILLEGALNAME!!!", 0.8)], 270_098),
        (
            vec![SplitSpec::new("split1", 0.8), SplitSpec::new("split1", 0.2)],
            270_106,
        ),
    ];

    for (splits, expected_code) in cases {
        let res = harness
            .create(CreateTrainingDatasetRequest {
                splits,
                ..hopsfs_request("sample_td")
            })
            .await;

        assert_matches!(res, Err(CreateTrainingDatasetError::InvalidSplits(_)));
        let err = res.unwrap_err();
        assert_eq!(err.error_code().code(), expected_code);
        assert_eq!(err.error_class(), ErrorClass::BadRequest);
    }

    // The split percentages do not need to add up
    harness
        .create(CreateTrainingDatasetRequest {
            splits: vec![SplitSpec::new("a", 0.7), SplitSpec::new("b", 0.7)],
            ..hopsfs_request("sample_td")
        })
        .await
        .unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_explicit_version_conflict() {
    let harness = TrainingDatasetHarness::new().await;

    let request = CreateTrainingDatasetRequest {
        version: Some(1),
        ..hopsfs_request("sample_td")
    };
    harness.create(request.clone()).await.unwrap();

    let res = harness.create(request).await;
    assert_matches!(
        res,
        Err(CreateTrainingDatasetError::AlreadyExists(TrainingDatasetAlreadyExistsError {
            version: 1,
            ..
        }))
    );

    let err = res.unwrap_err();
    assert_eq!(err.error_code().code(), 270_108);
    assert_eq!(err.error_class(), ErrorClass::Conflict);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_failed_insert_removes_created_directory() {
    let harness = TrainingDatasetHarness::new().await;

    let request = CreateTrainingDatasetRequest {
        version: Some(1),
        ..hopsfs_request("sample_td")
    };
    harness.create(request.clone()).await.unwrap();

    // With the directory gone the next attempt gets as far as the insert
    let dir = format!("{DEFAULT_DATASETS_DIR}/sample_td_1");
    harness.hopsfs_client.rmdir(&dir, true).await.unwrap();

    assert_matches!(
        harness.create(request).await,
        Err(CreateTrainingDatasetError::AlreadyExists(_))
    );
    assert!(!harness.dir_exists(&dir).await);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_existing_directory_is_a_conflict() {
    let harness = TrainingDatasetHarness::new().await;

    let orphan = format!("{DEFAULT_DATASETS_DIR}/sample_td_1");
    harness.hopsfs_client.mkdir(&orphan).await.unwrap();

    assert_matches!(
        harness.create(hopsfs_request("sample_td")).await,
        Err(CreateTrainingDatasetError::AlreadyExists(_))
    );
    assert!(harness.dir_exists(&orphan).await);

    let td = harness
        .create(CreateTrainingDatasetRequest {
            version: Some(2),
            ..hopsfs_request("sample_td")
        })
        .await
        .unwrap();
    assert_eq!(td.version, 2);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_existing_directory_is_not_retried() {
    let mut hopsfs_mock = MockHopsFsClient::new();
    hopsfs_mock
        .expect_authority()
        .returning(|| "namenode.service.consul:8020".to_string());
    hopsfs_mock
        .expect_mkdir()
        .withf(|path| path == "/Projects/demo/demo_Training_Datasets/sample_td_1")
        .times(1)
        .returning(|path| {
            Err(HopsFsMkdirError::AlreadyExists(HopsFsPathAlreadyExistsError {
                path: path.to_string(),
            }))
        });
    hopsfs_mock.expect_rmdir().never();

    let harness = TrainingDatasetHarness::with_overrides(TrainingDatasetHarnessOverrides {
        hopsfs_client: Some(Arc::new(hopsfs_mock)),
        ..Default::default()
    })
    .await;

    let res = harness.create(hopsfs_request("sample_td")).await;
    assert_matches!(
        res,
        Err(CreateTrainingDatasetError::AlreadyExists(TrainingDatasetAlreadyExistsError {
            version: 1,
            ..
        }))
    );
    assert_eq!(res.unwrap_err().error_code().code(), 270_108);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_taken_version_is_retried() {
    let harness = TrainingDatasetHarness::with_overrides(TrainingDatasetHarnessOverrides {
        training_dataset_repo: Some(Arc::new(
            FaultyTrainingDatasetRepository::new().with_duplicate_saves(2),
        )),
        ..Default::default()
    })
    .await;

    let td = harness.create_hopsfs_training_dataset("sample_td").await;
    assert_eq!(td.version, 1);
    assert!(
        harness
            .dir_exists(&format!("{DEFAULT_DATASETS_DIR}/sample_td_1"))
            .await
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_taken_version_retries_are_bounded() {
    let harness = TrainingDatasetHarness::with_overrides(TrainingDatasetHarnessOverrides {
        training_dataset_repo: Some(Arc::new(
            FaultyTrainingDatasetRepository::new().with_duplicate_saves(3),
        )),
        config: Some(TrainingDatasetsConfig {
            max_version_allocation_attempts: 3,
            ..Default::default()
        }),
        ..Default::default()
    })
    .await;

    assert_matches!(
        harness.create(hopsfs_request("sample_td")).await,
        Err(CreateTrainingDatasetError::AlreadyExists(_))
    );
    assert!(
        !harness
            .dir_exists(&format!("{DEFAULT_DATASETS_DIR}/sample_td_1"))
            .await
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unknown_featurestore() {
    let harness = TrainingDatasetHarness::new().await;

    let res = harness
        .create_use_case
        .execute(FeaturestoreID::new(999), hopsfs_request("sample_td"))
        .await;

    assert_matches!(res, Err(CreateTrainingDatasetError::FeaturestoreNotFound(_)));
    assert_eq!(res.unwrap_err().error_code().code(), 270_009);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_jobs_deduplicated() {
    let harness = TrainingDatasetHarness::new().await;

    let td = harness
        .create(CreateTrainingDatasetRequest {
            jobs: vec![
                JobRef::new("ingest"),
                JobRef::new("train"),
                JobRef::new("ingest"),
            ],
            ..hopsfs_request("sample_td")
        })
        .await
        .unwrap();

    assert_eq!(td.jobs, vec![JobRef::new("ingest"), JobRef::new("train")]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// External datasets
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_external_training_dataset() {
    let harness = TrainingDatasetHarness::new().await;
    let connector = harness.create_s3_connector("testbucket").await;

    let td = harness
        .create(CreateTrainingDatasetRequest {
            location: Some("inner/location".to_string()),
            ..external_request("foo", connector.id)
        })
        .await
        .unwrap();

    assert_eq!(td.location, "s3://testbucket/inner/location/foo_1");
    assert_eq!(td.training_dataset_type, TrainingDatasetType::External);
    assert_eq!(td.storage_connector_id, connector.id);
    assert_eq!(td.storage_connector_name, "testbucket_conn");
    assert_eq!(td.inode_id, None);

    // Nothing is created on behalf of external datasets
    assert!(!harness.dir_exists(DEFAULT_DATASETS_DIR).await);
    assert_eq!(harness.connectors().await, vec![connector]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_external_location_separators_normalized() {
    let harness = TrainingDatasetHarness::new().await;
    let connector = harness
        .create_connector(
            FEATURESTORE_ID,
            "gcs_conn",
            StorageConnectorKind::Gcs(ObjectStoreConnectorConfig {
                bucket: "bucket".to_string(),
                root_prefix: Some("/root/".to_string()),
                credentials: OpaqueCredentials::default(),
            }),
        )
        .await;

    let td = harness
        .create(CreateTrainingDatasetRequest {
            location: Some("/inner//location/".to_string()),
            ..external_request("foo", connector.id)
        })
        .await
        .unwrap();

    assert_eq!(td.location, "gs://bucket/root/inner/location/foo_1");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_external_requires_connector() {
    let harness = TrainingDatasetHarness::new().await;

    let res = harness
        .create(CreateTrainingDatasetRequest {
            training_dataset_type: TrainingDatasetType::External,
            ..hopsfs_request("sample_td")
        })
        .await;

    assert_matches!(res, Err(CreateTrainingDatasetError::MissingStorageConnector(_)));
    assert_eq!(res.unwrap_err().error_code().code(), 270_061);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_connector_type_mismatch() {
    let harness = TrainingDatasetHarness::new().await;

    let hopsfs_connector = harness
        .create_connector(
            FEATURESTORE_ID,
            "hopsfs_conn",
            StorageConnectorKind::HopsFs(HopsFsConnectorConfig {
                dataset_path: "/Projects/demo/custom".to_string(),
            }),
        )
        .await;
    let jdbc_connector = harness
        .create_connector(
            FEATURESTORE_ID,
            "jdbc_conn",
            StorageConnectorKind::Jdbc(JdbcConnectorConfig {
                connection_string: "jdbc:mysql://localhost:3306".to_string(),
            }),
        )
        .await;
    let s3_connector = harness.create_s3_connector("testbucket").await;
    let foreign_s3_connector = harness
        .create_connector(OTHER_FEATURESTORE_ID, "foreign", s3_kind("foreign", None))
        .await;

    let cases = [
        external_request("sample_td", hopsfs_connector.id),
        external_request("sample_td", jdbc_connector.id),
        external_request("sample_td", foreign_s3_connector.id),
        CreateTrainingDatasetRequest {
            storage_connector_id: Some(s3_connector.id),
            ..hopsfs_request("sample_td")
        },
        CreateTrainingDatasetRequest {
            storage_connector_id: Some(jdbc_connector.id),
            ..hopsfs_request("sample_td")
        },
    ];

    for request in cases {
        let res = harness.create(request).await;
        assert_matches!(
            res,
            Err(CreateTrainingDatasetError::StorageConnectorTypeMismatch(_))
        );
        assert_eq!(res.unwrap_err().error_code().code(), 270_060);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unknown_connector() {
    let harness = TrainingDatasetHarness::new().await;

    let res = harness
        .create(external_request("sample_td", StorageConnectorID::new(999)))
        .await;

    assert_matches!(
        res,
        Err(CreateTrainingDatasetError::StorageConnectorNotFound(StorageConnectorNotFoundError {
            connector_id
        })) if connector_id == StorageConnectorID::new(999)
    );
    assert_eq!(res.unwrap_err().error_code().code(), 270_042);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_hopsfs_with_explicit_connector_ignores_relative_location() {
    let harness = TrainingDatasetHarness::new().await;
    let connector = harness
        .create_connector(
            FEATURESTORE_ID,
            "hopsfs_conn",
            StorageConnectorKind::HopsFs(HopsFsConnectorConfig {
                dataset_path: "/Projects/demo/custom/".to_string(),
            }),
        )
        .await;

    let td = harness
        .create(CreateTrainingDatasetRequest {
            storage_connector_id: Some(connector.id),
            location: Some("ignored".to_string()),
            ..hopsfs_request("sample_td")
        })
        .await
        .unwrap();

    assert_eq!(
        td.location,
        "hopsfs://namenode.service.consul:8020/Projects/demo/custom/sample_td_1"
    );
    assert_eq!(td.storage_connector_name, "hopsfs_conn");
    assert!(harness.dir_exists("/Projects/demo/custom/sample_td_1").await);

    // The default connector was not needed
    assert_eq!(harness.connectors().await, vec![connector]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Filesystem failures
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_mkdir_io_error_is_retryable() {
    let mut hopsfs_mock = MockHopsFsClient::new();
    hopsfs_mock
        .expect_authority()
        .returning(|| "namenode.service.consul:8020".to_string());
    hopsfs_mock
        .expect_mkdir()
        .times(1)
        .returning(|path| Err(HopsFsIoError::new(path, "namenode is in safe mode").into()));
    hopsfs_mock.expect_rmdir().never();

    let harness = TrainingDatasetHarness::with_overrides(TrainingDatasetHarnessOverrides {
        hopsfs_client: Some(Arc::new(hopsfs_mock)),
        ..Default::default()
    })
    .await;

    let res = harness.create(hopsfs_request("sample_td")).await;
    assert_matches!(res, Err(CreateTrainingDatasetError::Io(_)));

    let err = res.unwrap_err();
    assert_eq!(err.error_code().code(), 270_030);
    assert!(err.error_class().is_retryable());

    // No record was left behind
    assert_matches!(
        harness
            .query_service
            .list_training_dataset_versions(FEATURESTORE_ID, &td_name("sample_td"), None)
            .await,
        Err(ListTrainingDatasetVersionsError::NotFound(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct StuckHopsFsClient;

#[async_trait::async_trait]
impl HopsFsClient for StuckHopsFsClient {
    fn authority(&self) -> String {
        "namenode.service.consul:8020".to_string()
    }

    async fn mkdir(&self, _path: &str) -> Result<InodeID, HopsFsMkdirError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(InodeID::new(1))
    }

    async fn rmdir(&self, _path: &str, _recursive: bool) -> Result<(), HopsFsRmdirError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }

    async fn exists(&self, _path: &str) -> Result<bool, HopsFsIoError> {
        Ok(false)
    }
}

#[test_log::test(tokio::test)]
async fn test_filesystem_timeout() {
    let harness = TrainingDatasetHarness::with_overrides(TrainingDatasetHarnessOverrides {
        hopsfs_client: Some(Arc::new(StuckHopsFsClient)),
        config: Some(TrainingDatasetsConfig {
            fs_operation_timeout_ms: 50,
            ..Default::default()
        }),
        ..Default::default()
    })
    .await;

    let res = harness.create(hopsfs_request("sample_td")).await;
    assert_matches!(
        res,
        Err(CreateTrainingDatasetError::Io(HopsFsIoError { ref message, .. }))
            if message.contains("timed out")
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
