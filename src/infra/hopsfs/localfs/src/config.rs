// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LocalFsHopsFsConfig {
    /// Local directory playing the role of the HopsFS root
    pub root: PathBuf,

    /// Authority reported in `hopsfs://` locations
    #[serde(default = "LocalFsHopsFsConfig::default_authority")]
    pub authority: String,
}

impl LocalFsHopsFsConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            authority: Self::default_authority(),
        }
    }

    fn default_authority() -> String {
        "localhost:8020".to_string()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
