// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use featurestore_training_datasets::*;
use internal_error::InternalError;
use tokio::sync::RwLock;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    last_id: i32,
    training_datasets: BTreeMap<TrainingDatasetID, TrainingDataset>,
    retired_versions: HashSet<(FeaturestoreID, TrainingDatasetName, u32)>,
}

impl State {
    fn versions_of<'a>(
        &'a self,
        featurestore_id: FeaturestoreID,
        name: &'a TrainingDatasetName,
    ) -> impl Iterator<Item = &'a TrainingDataset> + 'a {
        self.training_datasets
            .values()
            .filter(move |td| td.featurestore_id == featurestore_id && td.name == *name)
    }

    fn retired_versions_of<'a>(
        &'a self,
        featurestore_id: FeaturestoreID,
        name: &'a TrainingDatasetName,
    ) -> impl Iterator<Item = u32> + 'a {
        self.retired_versions
            .iter()
            .filter(move |(fs_id, td_name, _)| *fs_id == featurestore_id && td_name == name)
            .map(|(_, _, version)| *version)
    }

    fn is_version_taken(
        &self,
        featurestore_id: FeaturestoreID,
        name: &TrainingDatasetName,
        version: u32,
    ) -> bool {
        self.versions_of(featurestore_id, name)
            .any(|td| td.version == version)
            || self
                .retired_versions
                .contains(&(featurestore_id, name.clone(), version))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryTrainingDatasetRepository {
    state: Arc<RwLock<State>>,
}

#[dill::component(pub)]
#[dill::interface(dyn TrainingDatasetRepository)]
#[dill::scope(dill::Singleton)]
impl InMemoryTrainingDatasetRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl TrainingDatasetRepository for InMemoryTrainingDatasetRepository {
    async fn save_training_dataset(
        &self,
        training_dataset: NewTrainingDataset,
    ) -> Result<TrainingDataset, SaveTrainingDatasetError> {
        let mut writable_state = self.state.write().await;

        if writable_state.is_version_taken(
            training_dataset.featurestore_id,
            &training_dataset.name,
            training_dataset.version,
        ) {
            return Err(SaveTrainingDatasetError::Duplicate(
                TrainingDatasetAlreadyExistsError {
                    featurestore_id: training_dataset.featurestore_id,
                    name: training_dataset.name,
                    version: training_dataset.version,
                },
            ));
        }

        writable_state.last_id += 1;
        let training_dataset =
            training_dataset.into_training_dataset(TrainingDatasetID::new(writable_state.last_id));

        writable_state
            .training_datasets
            .insert(training_dataset.id, training_dataset.clone());

        Ok(training_dataset)
    }

    async fn get_training_dataset(
        &self,
        training_dataset_id: TrainingDatasetID,
    ) -> Result<TrainingDataset, GetTrainingDatasetError> {
        let readable_state = self.state.read().await;

        readable_state
            .training_datasets
            .get(&training_dataset_id)
            .cloned()
            .ok_or_else(|| {
                GetTrainingDatasetError::NotFound(TrainingDatasetNotFoundError::new(
                    training_dataset_id,
                ))
            })
    }

    async fn get_training_datasets_by_featurestore(
        &self,
        featurestore_id: FeaturestoreID,
    ) -> Result<Vec<TrainingDataset>, InternalError> {
        let readable_state = self.state.read().await;

        let mut training_datasets: Vec<_> = readable_state
            .training_datasets
            .values()
            .filter(|td| td.featurestore_id == featurestore_id)
            .cloned()
            .collect();
        training_datasets.sort_by(|a, b| (&a.name, a.version).cmp(&(&b.name, b.version)));

        Ok(training_datasets)
    }

    async fn get_training_dataset_versions(
        &self,
        featurestore_id: FeaturestoreID,
        name: &TrainingDatasetName,
    ) -> Result<Vec<TrainingDataset>, InternalError> {
        let readable_state = self.state.read().await;

        let mut versions: Vec<_> = readable_state
            .versions_of(featurestore_id, name)
            .cloned()
            .collect();
        versions.sort_by_key(|td| td.version);

        Ok(versions)
    }

    async fn get_max_version(
        &self,
        featurestore_id: FeaturestoreID,
        name: &TrainingDatasetName,
    ) -> Result<Option<u32>, InternalError> {
        let readable_state = self.state.read().await;

        Ok(readable_state
            .versions_of(featurestore_id, name)
            .map(|td| td.version)
            .chain(readable_state.retired_versions_of(featurestore_id, name))
            .max())
    }

    async fn update_training_dataset_metadata(
        &self,
        training_dataset_id: TrainingDatasetID,
        update: TrainingDatasetMetadataUpdate,
    ) -> Result<TrainingDataset, UpdateTrainingDatasetMetadataError> {
        let mut writable_state = self.state.write().await;

        let Some(training_dataset) = writable_state.training_datasets.get_mut(&training_dataset_id)
        else {
            return Err(UpdateTrainingDatasetMetadataError::NotFound(
                TrainingDatasetNotFoundError::new(training_dataset_id),
            ));
        };

        update.apply_to(training_dataset);

        Ok(training_dataset.clone())
    }

    async fn delete_training_dataset(
        &self,
        training_dataset_id: TrainingDatasetID,
    ) -> Result<(), DeleteTrainingDatasetRecordError> {
        let mut writable_state = self.state.write().await;

        let Some(training_dataset) = writable_state.training_datasets.remove(&training_dataset_id)
        else {
            return Err(DeleteTrainingDatasetRecordError::NotFound(
                TrainingDatasetNotFoundError::new(training_dataset_id),
            ));
        };

        writable_state.retired_versions.insert((
            training_dataset.featurestore_id,
            training_dataset.name,
            training_dataset.version,
        ));

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
