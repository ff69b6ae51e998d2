/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// A single term position in the parse tree. Predicates that went through
/// the property-path production arrive wrapped in `Path`; consumers unwrap
/// by pattern matching.
#[derive(Debug, Clone, PartialEq)]
pub enum TermNode {
    Variable(String),
    Iri(String),
    PrefixedName { prefix: String, localname: String },
    Literal { lexical: String, lang: Option<String> },
    Path(Box<TermNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixDecl {
    pub label: String,
    pub iri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Star,
    Vars(Vec<String>),
}

/// A flat run of term positions encoding one or more triples:
/// subject, predicate, object, then zero or more predicate-object
/// continuations that do not repeat the subject.
pub type TriplePath = Vec<TermNode>;

// A term or UNDEF inside a VALUES tuple
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Term(TermNode),
    Undef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValuesBlock {
    pub variables: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternPart {
    Triples(Vec<TriplePath>),
    Values(ValuesBlock),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupGraphPattern {
    pub parts: Vec<PatternPart>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitOffsetClause {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryTree {
    pub prologue: Vec<PrefixDecl>,
    pub projection: Projection,
    pub where_clause: GroupGraphPattern,
    pub limit_offset: Option<LimitOffsetClause>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Insert,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOperation {
    pub kind: UpdateKind,
    pub template: Vec<TriplePath>,
    pub where_clause: GroupGraphPattern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTree {
    pub prologue: Vec<PrefixDecl>,
    pub request: Vec<UpdateOperation>,
}

/// Top-level parse tree. Queries and updates come out of different grammar
/// entry points and carry different sections; everything downstream
/// branches on this discriminant exactly once per extraction point.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseTree {
    Query(QueryTree),
    Update(UpdateTree),
}
