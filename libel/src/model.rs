/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A classified term. Variable payloads carry the bare name without the
/// '?' sigil, Identifier payloads a fully resolved absolute identifier,
/// Literal payloads the lexical string with quotes stripped.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Term {
    Variable(String),
    Identifier(String),
    Literal(String),
}

/// Mapping from prefix label to namespace. The default prefix lives under
/// the empty label.
pub type PrefixTable = HashMap<String, String>;

#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct Triple {
    pub s: Term,
    pub p: Term,
    pub o: Term,
}

/// One VALUES tuple keyed by variable name, keys in header order.
pub type ValuesRow = IndexMap<String, Term>;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LimitOffset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

/// Normalized form of a SELECT query.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub prefixes: PrefixTable,
    pub select: Vec<String>,
    #[serde(rename = "where")]
    pub where_triples: Vec<Triple>,
    pub values: Vec<ValuesRow>,
    #[serde(rename = "limitOffset", default)]
    pub limit_offset: Option<LimitOffset>,
}

/// Normalized form of an update. Projection and pagination have no
/// meaning here.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ParsedUpdate {
    pub prefixes: PrefixTable,
    #[serde(rename = "where")]
    pub where_triples: Vec<Triple>,
    pub values: Vec<ValuesRow>,
}
