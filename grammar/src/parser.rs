/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::ast::*;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, multispace1, space0, space1},
    combinator::{map, map_res, opt, peek, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

// Helper function to recognize identifiers
pub fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

// Parser for variables (e.g., ?person); yields the bare name
pub fn variable(input: &str) -> IResult<&str, &str> {
    preceded(char('?'), identifier)(input)
}

// Parser for an IRI within angle brackets
pub fn iri_ref(input: &str) -> IResult<&str, &str> {
    delimited(char('<'), take_while1(|c| c != '>'), char('>'))(input)
}

// Parser for a prefixed name like crm:E21_Person, or :label for the
// default prefix
pub fn prefixed_name(input: &str) -> IResult<&str, TermNode> {
    let (input, prefix) = opt(identifier)(input)?;
    let (input, _) = char(':')(input)?;
    let (input, localname) = identifier(input)?;
    Ok((
        input,
        TermNode::PrefixedName {
            prefix: prefix.unwrap_or("").to_string(),
            localname: localname.to_string(),
        },
    ))
}

// Parser for a string literal in double quotes with an optional language tag
pub fn string_literal(input: &str) -> IResult<&str, TermNode> {
    let (input, lexical) = delimited(char('"'), take_while(|c| c != '"'), char('"'))(input)?;
    let (input, lang) = opt(preceded(
        char('@'),
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '-'),
    ))(input)?;
    Ok((
        input,
        TermNode::Literal {
            lexical: lexical.to_string(),
            lang: lang.map(str::to_string),
        },
    ))
}

// Parser for bare numeric literals like 25 or -3.14
pub fn numeric_literal(input: &str) -> IResult<&str, TermNode> {
    let (input, lexical) = recognize(tuple((
        opt(char('-')),
        take_while1(|c: char| c.is_ascii_digit()),
        opt(preceded(char('.'), take_while1(|c: char| c.is_ascii_digit()))),
    )))(input)?;
    Ok((
        input,
        TermNode::Literal {
            lexical: lexical.to_string(),
            lang: None,
        },
    ))
}

// Parser for a subject or object position
pub fn term_node(input: &str) -> IResult<&str, TermNode> {
    alt((
        map(variable, |v| TermNode::Variable(v.to_string())),
        map(iri_ref, |i| TermNode::Iri(i.to_string())),
        string_literal,
        numeric_literal,
        prefixed_name,
    ))(input)
}

// A single step of a predicate path; 'a' expands to rdf:type here
fn path_primary(input: &str) -> IResult<&str, TermNode> {
    alt((
        map(terminated(tag("a"), peek(multispace1)), |_| {
            TermNode::Iri(RDF_TYPE.to_string())
        }),
        map(variable, |v| TermNode::Variable(v.to_string())),
        map(iri_ref, |i| TermNode::Iri(i.to_string())),
        prefixed_name,
    ))(input)
}

// Parser for a predicate path: one or more steps chained with '/'. Every
// step comes out wrapped in TermNode::Path.
pub fn path_sequence(input: &str) -> IResult<&str, Vec<TermNode>> {
    separated_list1(
        tuple((space0, char('/'), space0)),
        map(path_primary, |p| TermNode::Path(Box::new(p))),
    )(input)
}

// A single predicate-object pair within a statement
fn predicate_object(input: &str) -> IResult<&str, (Vec<TermNode>, TermNode)> {
    let (input, steps) = path_sequence(input)?;
    let (input, _) = multispace1(input)?;
    let (input, object) = term_node(input)?;
    Ok((input, (steps, object)))
}

/// Parses one triples statement: a subject, a first predicate-object pair
/// and zero or more ';'-chained continuations. The statement flattens into
/// paths: continuations append to the subject's path without repeating the
/// subject, while each extra hop of a sequence path becomes its own path
/// joined through a generated intermediate variable. `stmt` keeps those
/// generated names unique across the statements of one pattern group.
pub fn triple_path(input: &str, stmt: usize) -> IResult<&str, Vec<TriplePath>> {
    let (input, subject) = term_node(input)?;
    let (input, _) = multispace1(input)?;
    let (input, first) = predicate_object(input)?;
    let (input, rest) = many0(preceded(
        tuple((multispace0, char(';'), multispace0)),
        predicate_object,
    ))(input)?;

    let mut pairs = vec![first];
    pairs.extend(rest);

    let mut head: TriplePath = vec![subject];
    let mut tail_paths: Vec<TriplePath> = Vec::new();
    let mut fresh = 0usize;
    for (steps, object) in pairs {
        if steps.len() == 1 {
            head.extend(steps);
            head.push(object);
        } else {
            // s p1/p2/../pn o  =>  s p1 ?m0 . ?m0 p2 ?m1 . ... ?mk pn o
            let last = steps.len() - 1;
            let mut link: Option<String> = None;
            for (k, step) in steps.into_iter().enumerate() {
                let start = link.take();
                let end = if k == last {
                    None
                } else {
                    let name = format!("__path_{}_{}", stmt, fresh);
                    fresh += 1;
                    Some(name)
                };
                let target = match &end {
                    Some(name) => TermNode::Variable(name.clone()),
                    None => object.clone(),
                };
                match start {
                    None => {
                        head.push(step);
                        head.push(target);
                    }
                    Some(name) => {
                        tail_paths.push(vec![TermNode::Variable(name), step, target]);
                    }
                }
                link = end;
            }
        }
    }

    let mut paths = vec![head];
    paths.extend(tail_paths);
    Ok((input, paths))
}

// Parser for a term inside a VALUES tuple
fn values_term(input: &str) -> IResult<&str, Value> {
    alt((
        map(tag("UNDEF"), |_| Value::Undef),
        map(iri_ref, |i| Value::Term(TermNode::Iri(i.to_string()))),
        map(string_literal, Value::Term),
        map(numeric_literal, Value::Term),
        map(prefixed_name, Value::Term),
    ))(input)
}

// Parser for the VALUES clause, in both the single-variable and the
// parenthesized multi-variable form
pub fn parse_values(input: &str) -> IResult<&str, ValuesBlock> {
    let (input, _) = tag("VALUES")(input)?;
    let (input, _) = multispace1(input)?;

    let (input, variables) = alt((
        map(variable, |v| vec![v.to_string()]),
        delimited(
            tuple((char('('), space0)),
            separated_list1(multispace1, map(variable, str::to_string)),
            tuple((space0, char(')'))),
        ),
    ))(input)?;

    let (input, _) = multispace0(input)?;
    let (input, _) = char('{')(input)?;

    let (input, rows) = many0(preceded(
        multispace0,
        alt((
            delimited(
                tuple((char('('), space0)),
                separated_list1(multispace1, values_term),
                tuple((space0, char(')'))),
            ),
            map(values_term, |v| vec![v]),
        )),
    ))(input)?;

    let (input, _) = multispace0(input)?;
    let (input, _) = char('}')(input)?;

    Ok((input, ValuesBlock { variables, rows }))
}

// Parser for PREFIX declarations; a missing label binds the default prefix
pub fn parse_prefix(input: &str) -> IResult<&str, PrefixDecl> {
    let (input, _) = multispace0(input)?;
    let (input, _) = tag("PREFIX")(input)?;
    let (input, _) = space1(input)?;
    let (input, label) = opt(identifier)(input)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = space0(input)?;
    let (input, iri) = iri_ref(input)?;
    Ok((
        input,
        PrefixDecl {
            label: label.unwrap_or("").to_string(),
            iri: iri.to_string(),
        },
    ))
}

pub fn parse_select(input: &str) -> IResult<&str, Projection> {
    let (input, _) = tag("SELECT")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = opt(terminated(
        alt((tag("DISTINCT"), tag("REDUCED"))),
        multispace1,
    ))(input)?;

    // Check if the next token is '*'
    if let Ok((input, _)) = tag::<_, _, nom::error::Error<_>>("*")(input) {
        return Ok((input, Projection::Star));
    }

    let (input, vars) = separated_list1(multispace1, map(variable, str::to_string))(input)?;
    Ok((input, Projection::Vars(vars)))
}

// Parser for a braced pattern group: triples statements separated by dots,
// with at most one VALUES block between them
pub fn parse_group_pattern(input: &str) -> IResult<&str, GroupGraphPattern> {
    let (input, _) = multispace0(input)?;
    let (input, _) = char('{')(input)?;

    let mut parts: Vec<PatternPart> = Vec::new();
    let mut stmt = 0usize;
    let mut current_input = input;

    loop {
        let (new_input, _) = multispace0(current_input)?;
        current_input = new_input;

        // Try to match the closing brace
        if let Ok((new_input, _)) = char::<_, nom::error::Error<_>>('}')(current_input) {
            current_input = new_input;
            break;
        }

        current_input = if let Ok((new_input, block)) = parse_values(current_input) {
            parts.push(PatternPart::Values(block));
            new_input
        } else if let Ok((new_input, paths)) = triple_path(current_input, stmt) {
            stmt += 1;
            match parts.last_mut() {
                Some(PatternPart::Triples(existing)) => existing.extend(paths),
                _ => parts.push(PatternPart::Triples(paths)),
            }
            new_input
        } else {
            return Err(nom::Err::Error(nom::error::Error::new(
                current_input,
                nom::error::ErrorKind::Alt,
            )));
        };

        // Consume any trailing dot
        if let Ok((new_input, _)) = tuple((
            multispace0::<&str, nom::error::Error<&str>>,
            char('.'),
            multispace0,
        ))(current_input)
        {
            current_input = new_input;
        }
    }

    Ok((current_input, GroupGraphPattern { parts }))
}

fn parse_where_clause(input: &str) -> IResult<&str, GroupGraphPattern> {
    let (input, _) = multispace0(input)?;
    let (input, _) = tag("WHERE")(input)?;
    parse_group_pattern(input)
}

fn integer(input: &str) -> IResult<&str, u64> {
    map_res(take_while1(|c: char| c.is_ascii_digit()), str::parse)(input)
}

// LIMIT and OFFSET may appear in either order, each at most once
pub fn parse_limit_offset(input: &str) -> IResult<&str, LimitOffsetClause> {
    alt((
        map(
            tuple((
                preceded(tuple((multispace0, tag("LIMIT"), multispace1)), integer),
                opt(preceded(
                    tuple((multispace0, tag("OFFSET"), multispace1)),
                    integer,
                )),
            )),
            |(limit, offset)| LimitOffsetClause {
                limit: Some(limit),
                offset,
            },
        ),
        map(
            tuple((
                preceded(tuple((multispace0, tag("OFFSET"), multispace1)), integer),
                opt(preceded(
                    tuple((multispace0, tag("LIMIT"), multispace1)),
                    integer,
                )),
            )),
            |(offset, limit)| LimitOffsetClause {
                limit,
                offset: Some(offset),
            },
        ),
    ))(input)
}

/// Entry point for SPARQL queries
pub fn parse_query(input: &str) -> IResult<&str, ParseTree> {
    let (input, prologue) = many0(parse_prefix)(input)?;
    let (input, _) = multispace0(input)?;
    let (input, projection) = parse_select(input)?;
    let (input, where_clause) = parse_where_clause(input)?;
    let (input, limit_offset) = opt(parse_limit_offset)(input)?;
    let (input, _) = multispace0(input)?;
    Ok((
        input,
        ParseTree::Query(QueryTree {
            prologue,
            projection,
            where_clause,
            limit_offset,
        }),
    ))
}

// INSERT/DELETE template: triples statements only, no VALUES
fn parse_template(input: &str) -> IResult<&str, Vec<TriplePath>> {
    let (input, _) = char('{')(input)?;

    let mut paths: Vec<TriplePath> = Vec::new();
    let mut stmt = 0usize;
    let mut current_input = input;

    loop {
        let (new_input, _) = multispace0(current_input)?;
        current_input = new_input;

        if let Ok((new_input, _)) = char::<_, nom::error::Error<_>>('}')(current_input) {
            current_input = new_input;
            break;
        }

        let (new_input, mut block) = triple_path(current_input, stmt)?;
        stmt += 1;
        paths.append(&mut block);
        current_input = new_input;

        if let Ok((new_input, _)) = tuple((
            multispace0::<&str, nom::error::Error<&str>>,
            char('.'),
            multispace0,
        ))(current_input)
        {
            current_input = new_input;
        }
    }

    Ok((current_input, paths))
}

// Parser for one INSERT/DELETE operation
fn parse_update_operation(input: &str) -> IResult<&str, UpdateOperation> {
    let (input, _) = multispace0(input)?;
    let (input, kind) = alt((
        map(tag("INSERT"), |_| UpdateKind::Insert),
        map(tag("DELETE"), |_| UpdateKind::Delete),
    ))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, template) = parse_template(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = tag("WHERE")(input)?;
    let (input, where_clause) = parse_group_pattern(input)?;
    Ok((
        input,
        UpdateOperation {
            kind,
            template,
            where_clause,
        },
    ))
}

/// Entry point for SPARQL updates; multiple operations may be chained
/// with ';' and land in the request list in source order
pub fn parse_update(input: &str) -> IResult<&str, ParseTree> {
    let (input, prologue) = many0(parse_prefix)(input)?;
    let (input, _) = multispace0(input)?;
    let (input, request) = separated_list1(
        tuple((multispace0, char(';'), multispace0)),
        parse_update_operation,
    )(input)?;
    let (input, _) = opt(tuple((multispace0, char(';'))))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, ParseTree::Update(UpdateTree { prologue, request })))
}
