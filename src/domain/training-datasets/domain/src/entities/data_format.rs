// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Physical format the training data is materialized in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Tfrecords,
    Tfrecord,
    Csv,
    Tsv,
    Parquet,
    Avro,
    Orc,
    Petastorm,
    Npy,
    Hdf5,
    Image,
}

impl DataFormat {
    pub const ALL: [DataFormat; 11] = [
        DataFormat::Tfrecords,
        DataFormat::Tfrecord,
        DataFormat::Csv,
        DataFormat::Tsv,
        DataFormat::Parquet,
        DataFormat::Avro,
        DataFormat::Orc,
        DataFormat::Petastorm,
        DataFormat::Npy,
        DataFormat::Hdf5,
        DataFormat::Image,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DataFormat::Tfrecords => "tfrecords",
            DataFormat::Tfrecord => "tfrecord",
            DataFormat::Csv => "csv",
            DataFormat::Tsv => "tsv",
            DataFormat::Parquet => "parquet",
            DataFormat::Avro => "avro",
            DataFormat::Orc => "orc",
            DataFormat::Petastorm => "petastorm",
            DataFormat::Npy => "npy",
            DataFormat::Hdf5 => "hdf5",
            DataFormat::Image => "image",
        }
    }
}

impl FromStr for DataFormat {
    type Err = IllegalDataFormatError;

    // Formats are matched case-insensitively, an empty value means "not specified"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();

        DataFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| IllegalDataFormatError::new(s))
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct IllegalDataFormatError {
    pub data_format: String,
}

impl IllegalDataFormatError {
    pub fn new(data_format: impl Into<String>) -> Self {
        Self {
            data_format: data_format.into(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.data_format.trim().is_empty()
    }
}

impl fmt::Display for IllegalDataFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            write!(f, "Data format of the training dataset is not specified")
        } else {
            write!(
                f,
                "Data format '{}' is not supported, expected one of: {}",
                self.data_format,
                DataFormat::ALL.map(DataFormat::as_str).join(", ")
            )
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
