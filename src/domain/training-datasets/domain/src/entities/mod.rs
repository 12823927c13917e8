// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod data_format;
mod featurestore;
mod grammar;
mod identifiers;
mod location;
mod names;
mod split;
mod storage_connector;
mod training_dataset;

pub use data_format::*;
pub use featurestore::*;
pub use grammar::*;
pub use identifiers::*;
pub use location::*;
pub use names::*;
pub use split::*;
pub use storage_connector::*;
pub use training_dataset::*;
