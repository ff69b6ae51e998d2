/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use nom::error::Error as NomError;
use std::fmt;

/// Errors surfaced by normalization. Absent sections (prologue, VALUES,
/// LIMIT/OFFSET) are not errors and never reach this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The grammar rejected the input. Carries a rendered diagnostic and
    /// the original text so callers can echo it back.
    GrammarParse { message: String, text: String },
    /// A prefixed name references a label with no PREFIX declaration.
    MissingPrefix { label: String },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeError::GrammarParse { message, text } => {
                write!(f, "could not parse input: {}\nin:\n{}", message, text)
            }
            NormalizeError::MissingPrefix { label } => {
                if label.is_empty() {
                    write!(f, "the default prefix ':' is used but never declared")
                } else {
                    write!(f, "prefix '{}' is used but never declared", label)
                }
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

// Locate the line and column of a byte offset, along with the line's text
fn line_col(input: &str, offset: usize) -> (usize, usize, &str) {
    let mut line_no = 1;
    let mut col_no = 1;
    for (i, c) in input.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_no += 1;
            col_no = 1;
        } else {
            col_no += 1;
        }
    }
    let line = input.lines().nth(line_no - 1).unwrap_or("[end of input]");
    (line_no, col_no, line)
}

fn render_caret(line_no: usize, col_no: usize, line: &str, description: &str) -> String {
    format!(
        "\nSyntax error at line {}, column {}{}:\n{}\n{}^ Here\n",
        line_no,
        col_no,
        description,
        line,
        " ".repeat(col_no - 1)
    )
}

pub fn format_parse_error(input: &str, err: nom::Err<NomError<&str>>) -> String {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            if let Some(msg) = scan_for_specific_errors(input) {
                return msg;
            }

            let description = match e.code {
                nom::error::ErrorKind::Tag => ". Expected a specific keyword or token",
                nom::error::ErrorKind::Char => ". Expected a specific character",
                nom::error::ErrorKind::Alt => ". Expected one of several alternatives",
                _ => "",
            };

            let offset = input.len() - e.input.len();
            let (line_no, col_no, line) = line_col(input, offset);
            render_caret(line_no, col_no, line, description)
        }
        nom::Err::Incomplete(_) => {
            "Incomplete input: the parser needs more input to complete parsing".to_string()
        }
    }
}

// Diagnostic for input that parsed but left unconsumed text behind
pub fn format_trailing_input(input: &str, rest: &str) -> String {
    let offset = input.len() - rest.len();
    let (line_no, col_no, line) = line_col(input, offset);
    render_caret(line_no, col_no, line, ". Unexpected trailing input")
}

// Checks for frequent mistakes that produce unhelpful nom positions
fn scan_for_specific_errors(input: &str) -> Option<String> {
    let lower = input.to_lowercase();
    let is_update = lower.contains("insert") || lower.contains("delete");
    if lower.contains("select") && !lower.contains("where") {
        return Some("\nFound 'SELECT' but no corresponding 'WHERE' clause.\n".to_string());
    }
    if is_update && !lower.contains("where") {
        return Some("\nFound an update operation but no 'WHERE' clause.\n".to_string());
    }

    let open_braces = input.matches('{').count();
    let close_braces = input.matches('}').count();
    if open_braces != close_braces {
        return Some(format!(
            "\nMismatched braces in input: found {} '{{' vs. {} '}}'.\n",
            open_braces, close_braces
        ));
    }

    for (line_idx, line) in input.lines().enumerate() {
        let quote_count = line.matches('"').count();
        if quote_count % 2 != 0 {
            return Some(format!(
                "\nUnterminated string literal at line {}:\n{}\n",
                line_idx + 1,
                line
            ));
        }
    }

    None
}
