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
use crate::model::{PrefixTable, Term};
use grammar::ast::{ParseTree, TermNode};

/// Build the prefix table from the tree's prologue. Both tree variants
/// carry one; a query or update without declarations yields an empty
/// table. Duplicate labels keep the last declaration.
pub fn resolve_prefixes(tree: &ParseTree) -> PrefixTable {
    let prologue = match tree {
        ParseTree::Query(query) => &query.prologue,
        ParseTree::Update(update) => &update.prologue,
    };
    prologue
        .iter()
        .map(|decl| (decl.label.clone(), decl.iri.clone()))
        .collect()
}

/// Classify a grammar term node into its normalized Term. Variables keep
/// their bare name, literals their lexical string; everything else is an
/// identifier, resolved through the prefix table when prefixed. Path
/// wrappers unwrap transparently.
pub fn classify_term(node: &TermNode, prefixes: &PrefixTable) -> Result<Term, NormalizeError> {
    match node {
        TermNode::Variable(name) => Ok(Term::Variable(name.clone())),
        TermNode::Literal { lexical, .. } => Ok(Term::Literal(lexical.clone())),
        TermNode::Path(inner) => classify_term(inner, prefixes),
        TermNode::Iri(iri) => Ok(Term::Identifier(iri.clone())),
        TermNode::PrefixedName { prefix, localname } => {
            let namespace = prefixes
                .get(prefix)
                .ok_or_else(|| NormalizeError::MissingPrefix {
                    label: prefix.clone(),
                })?;
            Ok(Term::Identifier(format!("{}{}", namespace, localname)))
        }
    }
}
