/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::custom_error::NormalizeError;
use crate::model::{PrefixTable, ValuesRow};
use crate::normalize::primary_group;
use crate::term::classify_term;
use grammar::ast::{ParseTree, PatternPart, Value};

/// Extract the VALUES block of the primary pattern group as one row per
/// tuple. Each tuple is zipped positionally against the header variables;
/// UNDEF entries and tuples shorter than the header leave keys out of the
/// row. A missing block is a normal empty result.
pub fn extract_values(
    tree: &ParseTree,
    prefixes: &PrefixTable,
) -> Result<Vec<ValuesRow>, NormalizeError> {
    let Some(group) = primary_group(tree) else {
        return Ok(Vec::new());
    };
    let Some(block) = group.parts.iter().find_map(|part| match part {
        PatternPart::Values(block) => Some(block),
        _ => None,
    }) else {
        log::debug!("no VALUES block in the primary pattern group");
        return Ok(Vec::new());
    };

    let mut rows = Vec::new();
    for tuple in &block.rows {
        let mut row = ValuesRow::new();
        for (value, variable) in tuple.iter().zip(&block.variables) {
            match value {
                Value::Term(node) => {
                    row.insert(variable.clone(), classify_term(node, prefixes)?);
                }
                Value::Undef => {}
            }
        }
        rows.push(row);
    }
    Ok(rows)
}
