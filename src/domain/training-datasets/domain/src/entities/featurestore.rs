// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use super::FeaturestoreID;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Featurestore {
    pub id: FeaturestoreID,
    pub name: String,
    pub project_name: String,
}

impl Featurestore {
    /// Feature store of a project following the `<project>_featurestore`
    /// naming convention
    pub fn for_project(id: FeaturestoreID, project_name: impl Into<String>) -> Self {
        let project_name = project_name.into();

        Self {
            id,
            name: format!("{}_featurestore", project_name.to_lowercase()),
            project_name,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Authenticated caller, recorded as the creator of new training datasets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
}

impl CurrentUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
