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
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_empty_split_set_is_valid() {
    assert!(validate_splits(&[]).unwrap().is_empty());
}

#[test]
fn test_valid_splits_keep_their_order() {
    let splits = validate_splits(&[
        SplitSpec::new("train", 0.7),
        SplitSpec::new("test", " 0.2 "),
        SplitSpec::new("validation", "0.1"),
    ])
    .unwrap();

    assert_eq!(
        splits,
        vec![
            Split {
                name: SplitName::new_unchecked("train"),
                percentage: 0.7,
            },
            Split {
                name: SplitName::new_unchecked("test"),
                percentage: 0.2,
            },
            Split {
                name: SplitName::new_unchecked("validation"),
                percentage: 0.1,
            },
        ]
    );
}

#[test]
fn test_percentages_are_not_required_to_add_up() {
    let splits = validate_splits(&[SplitSpec::new("a", 0.9), SplitSpec::new("b", 0.9)]).unwrap();
    assert_eq!(splits.len(), 2);
}

#[test]
fn test_illegal_split_name() {
    assert_matches!(
        validate_splits(&[SplitSpec::new("train", 0.8), SplitSpec::new("ILLEGALNAME!!!", 0.2)]),
        Err(SplitValidationError::InvalidName(InvalidSplitNameError { ref split_name }))
            if split_name == "ILLEGALNAME!!!"
    );
}

#[test]
fn test_non_numeric_percentage() {
    for percentage in ["wrong_type", "", "NaN", "inf"] {
        assert_matches!(
            validate_splits(&[SplitSpec::new("test_split", percentage)]),
            Err(SplitValidationError::InvalidPercentage(InvalidSplitPercentageError {
                ref split_name,
                ..
            })) if split_name == "test_split",
            "percentage: {percentage:?}"
        );
    }
}

#[test]
fn test_duplicate_split_name() {
    assert_matches!(
        validate_splits(&[SplitSpec::new("split1", 0.8), SplitSpec::new("split1", 0.2)]),
        Err(SplitValidationError::DuplicateName(DuplicateSplitNameError { ref split_name }))
            if split_name.as_str() == "split1"
    );
}

#[test]
fn test_error_priority_does_not_depend_on_position() {
    // A bad name is reported even when a bad percentage comes first
    assert_matches!(
        validate_splits(&[
            SplitSpec::new("first", "wrong"),
            SplitSpec::new("first", 0.1),
            SplitSpec::new("Second", 0.1),
        ]),
        Err(SplitValidationError::InvalidName(_))
    );

    // Bad percentages win over duplicates
    assert_matches!(
        validate_splits(&[
            SplitSpec::new("dup", 0.5),
            SplitSpec::new("dup", 0.5),
            SplitSpec::new("other", "wrong"),
        ]),
        Err(SplitValidationError::InvalidPercentage(_))
    );
}

#[test]
fn test_split_spec_accepts_numbers_and_strings() {
    let specs: Vec<SplitSpec> = serde_json::from_str(
        r#"[{"name": "train", "percentage": 0.8}, {"name": "test", "percentage": "0.2"}]"#,
    )
    .unwrap();

    assert_eq!(
        specs,
        vec![SplitSpec::new("train", 0.8), SplitSpec::new("test", "0.2")]
    );
    assert_eq!(validate_splits(&specs).unwrap().len(), 2);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
