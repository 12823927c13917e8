// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use assert_matches::assert_matches;
use dill::CatalogBuilder;
use featurestore_training_datasets::*;
use featurestore_training_datasets_services::TrainingDatasetVersionAllocatorImpl;
use pretty_assertions::assert_eq;

use crate::tests::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn allocator_with(
    repo_mock: MockTrainingDatasetRepository,
) -> Arc<dyn TrainingDatasetVersionAllocator> {
    let mut b = CatalogBuilder::new();
    b.add::<TrainingDatasetVersionAllocatorImpl>()
        .add_value(repo_mock)
        .bind::<dyn TrainingDatasetRepository, MockTrainingDatasetRepository>();

    b.build().get_one().unwrap()
}

fn repo_with_max_version(max_version: Option<u32>) -> MockTrainingDatasetRepository {
    let mut repo_mock = MockTrainingDatasetRepository::new();
    repo_mock
        .expect_get_max_version()
        .withf(|featurestore_id, name| {
            *featurestore_id == FEATURESTORE_ID && name.as_str() == "sample_td"
        })
        .times(1)
        .returning(move |_, _| Ok(max_version));
    repo_mock
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_first_version_is_one() {
    let allocator = allocator_with(repo_with_max_version(None));

    let version = allocator
        .allocate_version(FEATURESTORE_ID, &td_name("sample_td"), None)
        .await
        .unwrap();
    assert_eq!(version, 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_next_version_follows_max() {
    let allocator = allocator_with(repo_with_max_version(Some(4)));

    let version = allocator
        .allocate_version(FEATURESTORE_ID, &td_name("sample_td"), None)
        .await
        .unwrap();
    assert_eq!(version, 5);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_requested_version_skips_repository() {
    let mut repo_mock = MockTrainingDatasetRepository::new();
    repo_mock.expect_get_max_version().never();

    let allocator = allocator_with(repo_mock);

    assert_eq!(
        allocator
            .allocate_version(FEATURESTORE_ID, &td_name("sample_td"), Some(7))
            .await
            .unwrap(),
        7
    );

    for version in [0, -1, i64::from(u32::MAX) + 1] {
        assert_matches!(
            allocator
                .allocate_version(FEATURESTORE_ID, &td_name("sample_td"), Some(version))
                .await,
            Err(AllocateTrainingDatasetVersionError::InvalidVersion(
                InvalidTrainingDatasetVersionError { version: v }
            )) if v == version
        );
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_exhausted_versions() {
    let allocator = allocator_with(repo_with_max_version(Some(u32::MAX)));

    assert_matches!(
        allocator
            .allocate_version(FEATURESTORE_ID, &td_name("sample_td"), None)
            .await,
        Err(AllocateTrainingDatasetVersionError::Internal(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
