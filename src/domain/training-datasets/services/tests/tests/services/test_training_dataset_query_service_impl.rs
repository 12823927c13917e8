// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use assert_matches::assert_matches;
use featurestore_training_datasets::*;
use pretty_assertions::assert_eq;

use crate::tests::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

async fn seed(harness: &TrainingDatasetHarness) {
    for name in ["b_td", "a_td", "b_td", "a_td", "c_td"] {
        harness.create_hopsfs_training_dataset(name).await;
    }
}

fn names_and_versions(training_datasets: &[TrainingDataset]) -> Vec<(&str, u32)> {
    training_datasets
        .iter()
        .map(|td| (td.name.as_str(), td.version))
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_list_ordered_by_name_then_version() {
    let harness = TrainingDatasetHarness::new().await;
    seed(&harness).await;

    let training_datasets = harness
        .query_service
        .list_training_datasets(FEATURESTORE_ID)
        .await
        .unwrap();

    assert_eq!(
        names_and_versions(&training_datasets),
        vec![
            ("a_td", 1),
            ("a_td", 2),
            ("b_td", 1),
            ("b_td", 2),
            ("c_td", 1),
        ]
    );

    assert!(
        harness
            .query_service
            .list_training_datasets(OTHER_FEATURESTORE_ID)
            .await
            .unwrap()
            .is_empty()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_list_versions_by_name() {
    let harness = TrainingDatasetHarness::new().await;
    seed(&harness).await;

    let versions = harness
        .query_service
        .list_training_dataset_versions(FEATURESTORE_ID, &td_name("b_td"), None)
        .await
        .unwrap();
    assert_eq!(
        names_and_versions(&versions),
        vec![("b_td", 1), ("b_td", 2)]
    );

    let versions = harness
        .query_service
        .list_training_dataset_versions(FEATURESTORE_ID, &td_name("b_td"), Some(2))
        .await
        .unwrap();
    assert_eq!(names_and_versions(&versions), vec![("b_td", 2)]);

    // A missing version of an existing name is just an empty result
    let versions = harness
        .query_service
        .list_training_dataset_versions(FEATURESTORE_ID, &td_name("b_td"), Some(9))
        .await
        .unwrap();
    assert!(versions.is_empty());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_list_versions_of_unknown_name() {
    let harness = TrainingDatasetHarness::new().await;
    seed(&harness).await;

    let res = harness
        .query_service
        .list_training_dataset_versions(FEATURESTORE_ID, &td_name("missing_td"), None)
        .await;
    assert_matches!(
        res,
        Err(ListTrainingDatasetVersionsError::NotFound(TrainingDatasetNameNotFoundError {
            ref name
        })) if name.as_str() == "missing_td"
    );
    assert_eq!(res.unwrap_err().error_code().code(), 270_012);

    // Names are scoped to the feature store
    assert_matches!(
        harness
            .query_service
            .list_training_dataset_versions(OTHER_FEATURESTORE_ID, &td_name("a_td"), None)
            .await,
        Err(ListTrainingDatasetVersionsError::NotFound(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unknown_featurestore() {
    let harness = TrainingDatasetHarness::new().await;
    let unknown = FeaturestoreID::new(999);

    let res = harness.query_service.list_training_datasets(unknown).await;
    assert_matches!(res, Err(ListTrainingDatasetsError::FeaturestoreNotFound(_)));
    assert_eq!(res.unwrap_err().error_code().code(), 270_009);

    assert_matches!(
        harness
            .query_service
            .list_training_dataset_versions(unknown, &td_name("a_td"), None)
            .await,
        Err(ListTrainingDatasetVersionsError::FeaturestoreNotFound(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_is_scoped_to_featurestore() {
    let harness = TrainingDatasetHarness::new().await;
    let td = harness.create_hopsfs_training_dataset("sample_td").await;

    assert_eq!(
        harness
            .query_service
            .get_training_dataset(FEATURESTORE_ID, td.id)
            .await
            .unwrap(),
        td
    );

    let res = harness
        .query_service
        .get_training_dataset(OTHER_FEATURESTORE_ID, td.id)
        .await;
    assert_matches!(res, Err(GetScopedTrainingDatasetError::NotFound(_)));
    assert_eq!(res.unwrap_err().error_code().code(), 270_012);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
