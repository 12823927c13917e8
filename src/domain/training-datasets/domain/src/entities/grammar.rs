// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Identifier grammar shared by training dataset names and split names:
///
/// ```text
/// Identifier = (LowerAlpha | Digit | "_")+
/// ```
pub struct IdentifierGrammar;

impl IdentifierGrammar {
    fn is_identifier_byte(b: u8) -> bool {
        b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_'
    }

    /// Matches the longest identifier prefix, returning `(head, tail)`
    pub fn match_identifier(s: &str) -> Option<(&str, &str)> {
        let len = s
            .bytes()
            .take_while(|b| Self::is_identifier_byte(*b))
            .count();

        if len == 0 {
            None
        } else {
            Some((&s[0..len], &s[len..]))
        }
    }

    pub fn is_identifier(s: &str) -> bool {
        matches!(Self::match_identifier(s), Some((_, "")))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
