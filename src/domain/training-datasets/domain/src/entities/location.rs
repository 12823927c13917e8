// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use thiserror::Error;

use super::{ObjectStoreScheme, ResolvedStorageConnector, TrainingDatasetName};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const HOPSFS_SCHEME: &str = "hopsfs";

/// Where the data of a single training dataset version is expected to reside
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingDatasetLocation {
    HopsFs {
        authority: String,
        /// Absolute path inside HopsFS, always starting with `/`
        path: String,
    },
    ObjectStore {
        scheme: ObjectStoreScheme,
        bucket: String,
        /// Object key prefix, never starting or ending with `/`
        key: String,
    },
}

impl TrainingDatasetLocation {
    pub fn uri(&self) -> String {
        self.to_string()
    }

    /// Path handed to the filesystem, only present for HopsFS locations
    pub fn hopsfs_path(&self) -> Option<&str> {
        match self {
            TrainingDatasetLocation::HopsFs { path, .. } => Some(path),
            TrainingDatasetLocation::ObjectStore { .. } => None,
        }
    }

    pub fn from_uri(uri: &str) -> Result<Self, InvalidLocationError> {
        let (scheme, rest) = uri
            .split_once("://")
            .ok_or_else(|| InvalidLocationError::new(uri))?;

        let (host, path) = match rest.split_once('/') {
            Some((host, path)) => (host, path),
            None => (rest, ""),
        };
        if host.is_empty() {
            return Err(InvalidLocationError::new(uri));
        }

        if scheme == HOPSFS_SCHEME {
            let path = join_path_segments([path]);
            if path.is_empty() {
                return Err(InvalidLocationError::new(uri));
            }
            return Ok(TrainingDatasetLocation::HopsFs {
                authority: host.to_string(),
                path: format!("/{path}"),
            });
        }

        let scheme =
            ObjectStoreScheme::from_uri_scheme(scheme).ok_or_else(|| InvalidLocationError::new(uri))?;

        Ok(TrainingDatasetLocation::ObjectStore {
            scheme,
            bucket: host.to_string(),
            key: join_path_segments([path]),
        })
    }
}

impl fmt::Display for TrainingDatasetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingDatasetLocation::HopsFs { authority, path } => {
                write!(f, "{HOPSFS_SCHEME}://{authority}{path}")
            }
            TrainingDatasetLocation::ObjectStore {
                scheme,
                bucket,
                key,
            } => {
                if key.is_empty() {
                    write!(f, "{scheme}://{bucket}")
                } else {
                    write!(f, "{scheme}://{bucket}/{key}")
                }
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid training dataset location '{location}'")]
pub struct InvalidLocationError {
    pub location: String,
}

impl InvalidLocationError {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Directory name of a dataset version: `<name>_<version>`
pub fn training_dataset_dir_name(name: &TrainingDatasetName, version: u32) -> String {
    format!("{name}_{version}")
}

/// Computes the location of a dataset version under the resolved connector.
/// The relative location only applies to object store connectors.
pub fn resolve_training_dataset_location(
    connector: &ResolvedStorageConnector,
    name: &TrainingDatasetName,
    version: u32,
    relative_location: Option<&str>,
) -> TrainingDatasetLocation {
    let dir_name = training_dataset_dir_name(name, version);

    match connector {
        ResolvedStorageConnector::HopsFs {
            authority,
            dataset_path,
            ..
        } => TrainingDatasetLocation::HopsFs {
            authority: authority.clone(),
            path: format!(
                "/{}",
                join_path_segments([dataset_path.as_str(), dir_name.as_str()])
            ),
        },
        ResolvedStorageConnector::ObjectStore {
            scheme,
            bucket,
            root_prefix,
            ..
        } => TrainingDatasetLocation::ObjectStore {
            scheme: *scheme,
            bucket: join_path_segments([bucket.as_str()]),
            key: join_path_segments([
                root_prefix.as_deref().unwrap_or_default(),
                relative_location.unwrap_or_default(),
                dir_name.as_str(),
            ]),
        },
    }
}

/// Joins path fragments with exactly one `/` between non-empty segments,
/// without leading or trailing separators
pub fn join_path_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .flat_map(|s| s.split('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
