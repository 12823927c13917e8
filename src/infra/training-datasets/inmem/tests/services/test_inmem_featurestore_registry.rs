// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use assert_matches::assert_matches;
use featurestore_training_datasets::*;
use featurestore_training_datasets_inmem::InMemoryFeaturestoreRegistry;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_registered_featurestore() {
    let registry = InMemoryFeaturestoreRegistry::new();

    let featurestore = Featurestore::for_project(FeaturestoreID::new(67), "Demo");
    assert_eq!(featurestore.name, "demo_featurestore");

    registry.add_featurestore(featurestore.clone()).await;

    assert_eq!(
        registry
            .get_featurestore(FeaturestoreID::new(67))
            .await
            .unwrap(),
        featurestore
    );

    assert_matches!(
        registry.get_featurestore(FeaturestoreID::new(68)).await,
        Err(GetFeaturestoreError::NotFound(FeaturestoreNotFoundError { featurestore_id }))
            if featurestore_id == FeaturestoreID::new(68)
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
