// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod featurestore_registry;
mod hopsfs_client;
mod storage_connector_resolver;
mod training_dataset_query_service;
mod training_dataset_version_allocator;

pub use featurestore_registry::*;
pub use hopsfs_client::*;
pub use storage_connector_resolver::*;
pub use training_dataset_query_service::*;
pub use training_dataset_version_allocator::*;
