// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod storage_connector_resolver_impl;
mod training_dataset_creation_locks;
mod training_dataset_query_service_impl;
mod training_dataset_version_allocator_impl;

pub use storage_connector_resolver_impl::*;
pub use training_dataset_creation_locks::*;
pub use training_dataset_query_service_impl::*;
pub use training_dataset_version_allocator_impl::*;
