// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod config;
mod entities;
mod error_codes;
mod repos;
mod services;
mod use_cases;

pub use config::*;
pub use entities::*;
pub use error_codes::*;
pub use repos::*;
pub use services::*;
pub use use_cases::*;
