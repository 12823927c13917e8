// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::{cmp, fmt, ops};

use thiserror::Error;

use super::IdentifierGrammar;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Invalid identifier '{value}': only lowercase letters, digits and underscores are allowed"
)]
pub struct InvalidIdentifierError {
    pub value: String,
}

impl InvalidIdentifierError {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

pub fn validate_identifier(s: &str) -> Result<(), InvalidIdentifierError> {
    if IdentifierGrammar::is_identifier(s) {
        Ok(())
    } else {
        Err(InvalidIdentifierError::new(s))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

macro_rules! identifier_newtype {
    ($typ:ident, $visitor:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $typ(Arc<str>);

        impl $typ {
            pub fn new_unchecked<S: AsRef<str> + ?Sized>(s: &S) -> Self {
                Self(Arc::from(s.as_ref()))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_ref()
            }
        }

        impl std::str::FromStr for $typ {
            type Err = InvalidIdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                validate_identifier(s)?;
                Ok(Self::new_unchecked(s))
            }
        }

        impl TryFrom<&str> for $typ {
            type Error = InvalidIdentifierError;

            fn try_from(s: &str) -> Result<Self, Self::Error> {
                <Self as std::str::FromStr>::from_str(s)
            }
        }

        impl TryFrom<String> for $typ {
            type Error = InvalidIdentifierError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                <Self as std::str::FromStr>::from_str(s.as_str())
            }
        }

        impl From<$typ> for String {
            fn from(v: $typ) -> String {
                (*v.0).into()
            }
        }

        impl ops::Deref for $typ {
            type Target = str;

            fn deref(&self) -> &str {
                self.0.as_ref()
            }
        }

        impl AsRef<str> for $typ {
            fn as_ref(&self) -> &str {
                self.0.as_ref()
            }
        }

        impl cmp::PartialEq<&str> for $typ {
            fn eq(&self, other: &&str) -> bool {
                *self.0 == **other
            }
        }

        impl fmt::Display for $typ {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", &self.0)
            }
        }

        impl serde::Serialize for $typ {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $typ {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_str($visitor)
            }
        }

        struct $visitor;

        impl serde::de::Visitor<'_> for $visitor {
            type Value = $typ;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a {} string", stringify!($typ))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                $typ::try_from(v).map_err(serde::de::Error::custom)
            }
        }
    };
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

identifier_newtype!(TrainingDatasetName, TrainingDatasetNameSerdeVisitor);
identifier_newtype!(SplitName, SplitNameSerdeVisitor);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
