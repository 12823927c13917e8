// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

macro_rules! numeric_id {
    ($(#[$meta:meta])* $typ:ident, $inner:ty) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $typ($inner);

        impl $typ {
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $typ {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $typ {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

numeric_id!(FeaturestoreID, i32);
numeric_id!(TrainingDatasetID, i32);
numeric_id!(StorageConnectorID, i32);

numeric_id!(
    /// Identifier of a directory inside HopsFS, handed out by the filesystem
    InodeID,
    i64
);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
