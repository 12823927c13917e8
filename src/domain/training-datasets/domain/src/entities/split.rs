// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SplitName;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Validated named partition of a training dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub name: SplitName,
    pub percentage: f64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Percentage as received from a caller: either a proper number or an
/// arbitrary string that may or may not hold one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SplitPercentageInput {
    Number(f64),
    Text(String),
}

impl SplitPercentageInput {
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            SplitPercentageInput::Number(value) => *value,
            SplitPercentageInput::Text(text) => text.trim().parse::<f64>().ok()?,
        };

        value.is_finite().then_some(value)
    }
}

impl From<f64> for SplitPercentageInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SplitPercentageInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for SplitPercentageInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitPercentageInput::Number(value) => write!(f, "{value}"),
            SplitPercentageInput::Text(text) => f.write_str(text),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSpec {
    pub name: String,
    pub percentage: SplitPercentageInput,
}

impl SplitSpec {
    pub fn new(name: impl Into<String>, percentage: impl Into<SplitPercentageInput>) -> Self {
        Self {
            name: name.into(),
            percentage: percentage.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Validates the split set as a unit. Checks run in passes: names first, then
/// percentages, then uniqueness, so the reported error does not depend on the
/// position of the offending split.
pub fn validate_splits(splits: &[SplitSpec]) -> Result<Vec<Split>, SplitValidationError> {
    if splits.is_empty() {
        return Ok(Vec::new());
    }

    let names = splits
        .iter()
        .map(|s| {
            SplitName::try_from(s.name.as_str()).map_err(|_| InvalidSplitNameError::new(&s.name))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let percentages = splits
        .iter()
        .map(|s| {
            s.percentage
                .parse()
                .ok_or_else(|| InvalidSplitPercentageError::new(&s.name, &s.percentage))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::with_capacity(names.len());
    for name in &names {
        if !seen.insert(name) {
            return Err(DuplicateSplitNameError::new(name.clone()).into());
        }
    }

    Ok(names
        .into_iter()
        .zip(percentages)
        .map(|(name, percentage)| Split { name, percentage })
        .collect())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitValidationError {
    #[error(transparent)]
    InvalidName(#[from] InvalidSplitNameError),

    #[error(transparent)]
    InvalidPercentage(#[from] InvalidSplitPercentageError),

    #[error(transparent)]
    DuplicateName(#[from] DuplicateSplitNameError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Illegal split name '{split_name}': only lowercase letters, digits and underscores are allowed"
)]
pub struct InvalidSplitNameError {
    pub split_name: String,
}

impl InvalidSplitNameError {
    pub fn new(split_name: impl Into<String>) -> Self {
        Self {
            split_name: split_name.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Split '{split_name}' has a non-numeric percentage '{percentage}'")]
pub struct InvalidSplitPercentageError {
    pub split_name: String,
    pub percentage: String,
}

impl InvalidSplitPercentageError {
    pub fn new(split_name: impl Into<String>, percentage: &SplitPercentageInput) -> Self {
        Self {
            split_name: split_name.into(),
            percentage: percentage.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Split name '{split_name}' is used more than once")]
pub struct DuplicateSplitNameError {
    pub split_name: SplitName,
}

impl DuplicateSplitNameError {
    pub fn new(split_name: SplitName) -> Self {
        Self { split_name }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
