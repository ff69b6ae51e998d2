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
use crate::model::{PrefixTable, Term, Triple};
use crate::normalize::primary_group;
use grammar::ast::{ParseTree, PatternPart, TermNode};

// Which triple position the next token lands in
enum Slot {
    Subject,
    Predicate,
    Object,
}

/// Regroup the primary pattern group's flat triple paths into discrete
/// triples. Paths are walked with a subject/predicate/object slot machine:
/// a completed cycle emits a triple, and continuation tokens after the
/// first cycle of a path start at the predicate slot, inheriting the
/// subject of the previously emitted triple of that same path. Shards
/// still missing a predicate or object at the end of a path are dropped.
pub fn flatten_triples(
    tree: &ParseTree,
    prefixes: &PrefixTable,
) -> Result<Vec<Triple>, NormalizeError> {
    let mut triples = Vec::new();
    let Some(group) = primary_group(tree) else {
        return Ok(triples);
    };
    for part in &group.parts {
        if let PatternPart::Triples(paths) = part {
            for path in paths {
                flatten_path(path, prefixes, &mut triples)?;
            }
        }
    }
    Ok(triples)
}

fn flatten_path(
    path: &[TermNode],
    prefixes: &PrefixTable,
    out: &mut Vec<Triple>,
) -> Result<(), NormalizeError> {
    let mut slot = Slot::Subject;
    // Last-known-subject register, scoped to this path
    let mut subject: Option<Term> = None;
    let mut predicate: Option<Term> = None;

    for node in path {
        let term = crate::term::classify_term(node, prefixes)?;
        match slot {
            Slot::Subject => {
                subject = Some(term);
                slot = Slot::Predicate;
            }
            Slot::Predicate => {
                predicate = Some(term);
                slot = Slot::Object;
            }
            Slot::Object => {
                if let (Some(s), Some(p)) = (subject.clone(), predicate.take()) {
                    out.push(Triple { s, p, o: term });
                }
                // Continuations do not repeat the subject
                slot = Slot::Predicate;
            }
        }
    }

    if predicate.is_some() {
        log::debug!(
            "dropping incomplete triple shard at end of a {}-position path",
            path.len()
        );
    }
    Ok(())
}
