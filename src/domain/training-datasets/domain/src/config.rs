// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{FeaturestoreID, join_path_segments};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TrainingDatasetsConfig {
    /// Root directory under which every project has its own directory
    pub projects_root: String,

    /// Appended to the project name to get the name of the default connector
    /// and of the directory it points to
    pub default_connector_suffix: String,

    /// Upper bound for a single filesystem call
    pub fs_operation_timeout_ms: u64,

    /// How many times creation with an automatically assigned version is
    /// attempted when racing with concurrent creations
    pub max_version_allocation_attempts: u32,
}

impl TrainingDatasetsConfig {
    pub fn fs_operation_timeout(&self) -> Duration {
        Duration::from_millis(self.fs_operation_timeout_ms)
    }

    pub fn default_connector_name(&self, project_name: &str) -> String {
        format!("{project_name}{}", self.default_connector_suffix)
    }

    /// `<projectsRoot>/<project>/<project><suffix>`
    pub fn default_connector_dataset_path(&self, project_name: &str) -> String {
        let connector_name = self.default_connector_name(project_name);
        format!(
            "/{}",
            join_path_segments([
                self.projects_root.as_str(),
                project_name,
                connector_name.as_str()
            ])
        )
    }

    pub fn default_connector_description(&self, featurestore_id: FeaturestoreID) -> String {
        format!("HOPSFS connector for training datasets of feature store {featurestore_id}")
    }
}

impl Default for TrainingDatasetsConfig {
    fn default() -> Self {
        Self {
            projects_root: "/Projects".to_string(),
            default_connector_suffix: "_Training_Datasets".to_string(),
            fs_operation_timeout_ms: 30_000,
            max_version_allocation_attempts: 5,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
