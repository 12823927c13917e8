// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod create_training_dataset_use_case;
mod delete_training_dataset_use_case;
mod update_training_dataset_use_case;

pub use create_training_dataset_use_case::*;
pub use delete_training_dataset_use_case::*;
pub use update_training_dataset_use_case::*;
