/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::model::LimitOffset;
use grammar::ast::{ParseTree, Projection};

/// Projected variable names in declaration order. Updates have no
/// projection, and `SELECT *` yields an empty list: expanding the star
/// would need visibility analysis over the pattern group, which this
/// toolkit does not do.
pub fn extract_projection(tree: &ParseTree) -> Vec<String> {
    match tree {
        ParseTree::Query(query) => match &query.projection {
            Projection::Vars(vars) => vars.clone(),
            Projection::Star => Vec::new(),
        },
        ParseTree::Update(_) => Vec::new(),
    }
}

/// Pagination clause, if the query carried one. `None` means the clause
/// was absent altogether; inside the record, each field is present only if
/// the corresponding keyword appeared.
pub fn extract_limit_offset(tree: &ParseTree) -> Option<LimitOffset> {
    match tree {
        ParseTree::Query(query) => query.limit_offset.map(|clause| LimitOffset {
            limit: clause.limit,
            offset: clause.offset,
        }),
        ParseTree::Update(_) => None,
    }
}
