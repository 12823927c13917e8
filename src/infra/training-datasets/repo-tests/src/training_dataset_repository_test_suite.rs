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

use crate::new_training_dataset;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const FS_1: FeaturestoreID = FeaturestoreID::new(1);
const FS_2: FeaturestoreID = FeaturestoreID::new(2);

fn name(s: &str) -> TrainingDatasetName {
    TrainingDatasetName::new_unchecked(s)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_missing_training_dataset_not_found(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn TrainingDatasetRepository>().unwrap();

    assert_matches!(
        repo.get_training_dataset(TrainingDatasetID::new(42)).await,
        Err(GetTrainingDatasetError::NotFound(TrainingDatasetNotFoundError {
            training_dataset_id
        })) if training_dataset_id == TrainingDatasetID::new(42)
    );
    assert_eq!(repo.get_max_version(FS_1, &name("missing")).await.unwrap(), None);
    assert!(
        repo.get_training_dataset_versions(FS_1, &name("missing"))
            .await
            .unwrap()
            .is_empty()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_save_and_get_training_dataset(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn TrainingDatasetRepository>().unwrap();

    let new_td = new_training_dataset(FS_1, "sample_td", 1);
    let saved = repo.save_training_dataset(new_td.clone()).await.unwrap();

    assert_eq!(saved.name, new_td.name);
    assert_eq!(saved.version, 1);
    assert_eq!(saved.location, new_td.location);
    assert_eq!(saved.seed, Some(1234));

    let loaded = repo.get_training_dataset(saved.id).await.unwrap();
    assert_eq!(loaded, saved);

    let other = repo
        .save_training_dataset(new_training_dataset(FS_1, "sample_td", 2))
        .await
        .unwrap();
    assert_ne!(other.id, saved.id);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_duplicate_version_rejected(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn TrainingDatasetRepository>().unwrap();

    repo.save_training_dataset(new_training_dataset(FS_1, "sample_td", 1))
        .await
        .unwrap();

    assert_matches!(
        repo.save_training_dataset(new_training_dataset(FS_1, "sample_td", 1)).await,
        Err(SaveTrainingDatasetError::Duplicate(TrainingDatasetAlreadyExistsError {
            version: 1,
            ..
        }))
    );

    // Same name and version in another feature store is a different dataset
    repo.save_training_dataset(new_training_dataset(FS_2, "sample_td", 1))
        .await
        .unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_versions_are_ordered(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn TrainingDatasetRepository>().unwrap();

    for version in [3, 1, 2] {
        repo.save_training_dataset(new_training_dataset(FS_1, "sample_td", version))
            .await
            .unwrap();
    }
    repo.save_training_dataset(new_training_dataset(FS_1, "other_td", 7))
        .await
        .unwrap();

    let versions: Vec<_> = repo
        .get_training_dataset_versions(FS_1, &name("sample_td"))
        .await
        .unwrap()
        .into_iter()
        .map(|td| td.version)
        .collect();
    assert_eq!(versions, vec![1, 2, 3]);

    assert_eq!(
        repo.get_max_version(FS_1, &name("sample_td")).await.unwrap(),
        Some(3)
    );
    assert_eq!(
        repo.get_max_version(FS_2, &name("sample_td")).await.unwrap(),
        None
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_list_by_featurestore(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn TrainingDatasetRepository>().unwrap();

    for (fs, td_name, version) in [
        (FS_1, "b_td", 1),
        (FS_1, "a_td", 2),
        (FS_2, "c_td", 1),
        (FS_1, "a_td", 1),
    ] {
        repo.save_training_dataset(new_training_dataset(fs, td_name, version))
            .await
            .unwrap();
    }

    let listed: Vec<_> = repo
        .get_training_datasets_by_featurestore(FS_1)
        .await
        .unwrap()
        .into_iter()
        .map(|td| (td.name.to_string(), td.version))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("a_td".to_string(), 1),
            ("a_td".to_string(), 2),
            ("b_td".to_string(), 1),
        ]
    );

    assert!(
        repo.get_training_datasets_by_featurestore(FeaturestoreID::new(3))
            .await
            .unwrap()
            .is_empty()
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_update_metadata(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn TrainingDatasetRepository>().unwrap();

    let saved = repo
        .save_training_dataset(new_training_dataset(FS_1, "sample_td", 1))
        .await
        .unwrap();

    let updated = repo
        .update_training_dataset_metadata(
            saved.id,
            TrainingDatasetMetadataUpdate {
                description: Some("new description".to_string()),
                jobs: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("new description"));
    assert_eq!(updated.jobs, Vec::<JobRef>::new());

    let updated = repo
        .update_training_dataset_metadata(
            saved.id,
            TrainingDatasetMetadataUpdate {
                description: None,
                jobs: Some(vec![JobRef::new("ingest"), JobRef::new("ingest")]),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description.as_deref(), Some("new description"));
    assert_eq!(updated.jobs, vec![JobRef::new("ingest")]);

    // Everything else stays as saved
    assert_eq!(updated.location, saved.location);
    assert_eq!(updated.version, saved.version);
    assert_eq!(updated.created, saved.created);

    assert_eq!(repo.get_training_dataset(saved.id).await.unwrap(), updated);

    assert_matches!(
        repo.update_training_dataset_metadata(
            TrainingDatasetID::new(999),
            TrainingDatasetMetadataUpdate::default()
        )
        .await,
        Err(UpdateTrainingDatasetMetadataError::NotFound(_))
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_delete_training_dataset(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn TrainingDatasetRepository>().unwrap();

    let v1 = repo
        .save_training_dataset(new_training_dataset(FS_1, "sample_td", 1))
        .await
        .unwrap();
    repo.save_training_dataset(new_training_dataset(FS_1, "sample_td", 2))
        .await
        .unwrap();

    repo.delete_training_dataset(v1.id).await.unwrap();

    assert_matches!(
        repo.get_training_dataset(v1.id).await,
        Err(GetTrainingDatasetError::NotFound(_))
    );
    assert_matches!(
        repo.delete_training_dataset(v1.id).await,
        Err(DeleteTrainingDatasetRecordError::NotFound(_))
    );

    // Deleting an older version does not free up the numbering
    assert_eq!(
        repo.get_max_version(FS_1, &name("sample_td")).await.unwrap(),
        Some(2)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub async fn test_deleted_versions_stay_taken(catalog: &Catalog) {
    let repo = catalog.get_one::<dyn TrainingDatasetRepository>().unwrap();

    repo.save_training_dataset(new_training_dataset(FS_1, "sample_td", 1))
        .await
        .unwrap();
    let v2 = repo
        .save_training_dataset(new_training_dataset(FS_1, "sample_td", 2))
        .await
        .unwrap();

    repo.delete_training_dataset(v2.id).await.unwrap();

    assert_eq!(
        repo.get_max_version(FS_1, &name("sample_td")).await.unwrap(),
        Some(2)
    );
    assert_matches!(
        repo.save_training_dataset(new_training_dataset(FS_1, "sample_td", 2))
            .await,
        Err(SaveTrainingDatasetError::Duplicate(TrainingDatasetAlreadyExistsError {
            version: 2,
            ..
        }))
    );

    // Other feature stores keep their own numbering
    assert_eq!(
        repo.get_max_version(FS_2, &name("sample_td")).await.unwrap(),
        None
    );
    repo.save_training_dataset(new_training_dataset(FS_2, "sample_td", 2))
        .await
        .unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
