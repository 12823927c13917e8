// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Abstracts the system time source
pub trait SystemTimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn SystemTimeSource)]
pub struct SystemTimeSourceDefault;

impl SystemTimeSource for SystemTimeSourceDefault {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Frozen clock for tests, moves only when told to
#[derive(Debug, Clone)]
pub struct SystemTimeSourceStub {
    t: Arc<Mutex<DateTime<Utc>>>,
}

impl SystemTimeSourceStub {
    pub fn new() -> Self {
        Self::new_set(Utc::now())
    }

    pub fn new_set(t: DateTime<Utc>) -> Self {
        Self {
            t: Arc::new(Mutex::new(t)),
        }
    }

    pub fn set(&self, t: DateTime<Utc>) {
        let mut state = self.t.lock().unwrap();

        assert!(
            *state <= t,
            "The previous time [{}] is more than new time [{t}]",
            *state
        );

        *state = t;
    }

    pub fn advance(&self, time_quantum: Duration) {
        let mut state = self.t.lock().unwrap();
        *state += time_quantum;
    }
}

impl SystemTimeSource for SystemTimeSourceStub {
    fn now(&self) -> DateTime<Utc> {
        *self.t.lock().unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
