/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::clause;
use crate::custom_error::{format_parse_error, format_trailing_input, NormalizeError};
use crate::flatten;
use crate::model::{ParsedQuery, ParsedUpdate};
use crate::term;
use crate::values;
use grammar::ast::{GroupGraphPattern, ParseTree};
use nom::IResult;

/// Parse and normalize a SPARQL SELECT query.
///
/// The grammar runs first; any grammar-level failure surfaces as a
/// GrammarParse error echoing the input. On success the prefix table is
/// built once and handed to every extractor, so prefixed names resolve
/// consistently across the whole call.
pub fn parse_query(query: &str) -> Result<ParsedQuery, NormalizeError> {
    let tree = run_grammar(query, grammar::parser::parse_query)?;
    let prefixes = term::resolve_prefixes(&tree);
    let where_triples = flatten::flatten_triples(&tree, &prefixes)?;
    let values = values::extract_values(&tree, &prefixes)?;
    Ok(ParsedQuery {
        select: clause::extract_projection(&tree),
        limit_offset: clause::extract_limit_offset(&tree),
        where_triples,
        values,
        prefixes,
    })
}

/// Parse and normalize a SPARQL update. The result carries no projection
/// or pagination; triples and VALUES come from the WHERE clause of the
/// request's primary operation.
pub fn parse_update(update: &str) -> Result<ParsedUpdate, NormalizeError> {
    let tree = run_grammar(update, grammar::parser::parse_update)?;
    let prefixes = term::resolve_prefixes(&tree);
    let where_triples = flatten::flatten_triples(&tree, &prefixes)?;
    let values = values::extract_values(&tree, &prefixes)?;
    Ok(ParsedUpdate {
        where_triples,
        values,
        prefixes,
    })
}

// The primary pattern group: the WHERE clause of a query, or of the first
// operation of an update request
pub(crate) fn primary_group(tree: &ParseTree) -> Option<&GroupGraphPattern> {
    match tree {
        ParseTree::Query(query) => Some(&query.where_clause),
        ParseTree::Update(update) => update.request.first().map(|op| &op.where_clause),
    }
}

fn run_grammar(
    input: &str,
    entry: fn(&str) -> IResult<&str, ParseTree>,
) -> Result<ParseTree, NormalizeError> {
    match entry(input) {
        Ok((rest, tree)) if rest.is_empty() => Ok(tree),
        Ok((rest, _)) => Err(NormalizeError::GrammarParse {
            message: format_trailing_input(input, rest),
            text: input.to_string(),
        }),
        Err(err) => Err(NormalizeError::GrammarParse {
            message: format_parse_error(input, err),
            text: input.to_string(),
        }),
    }
}
