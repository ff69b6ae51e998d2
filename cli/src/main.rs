/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::Parser;
use libel::normalize::{parse_query, parse_update};

#[derive(Parser)]
#[command(
    name = "libel-cli",
    version = "0.1.0",
    author = "Volodymyr Kadzhaia <vkadzhaia@gmail.com>, Pieter Bonte <pieter.bonte@kuleuven.be>",
    about = "A CLI tool for Libel",
    long_about = "Libel CLI - A command-line interface for normalizing SPARQL queries and updates into a flat JSON model: resolved prefixes, projected variables, triple patterns, VALUES bindings and LIMIT/OFFSET clauses."
)]
struct Args {
    #[arg(short, long, help = "SPARQL query string", value_name = "QUERY")]
    query: Option<String>,

    #[arg(short, long, help = "SPARQL update string", value_name = "UPDATE")]
    update: Option<String>,

    #[arg(short, long, help = "File containing the query text", value_name = "FILE")]
    file: Option<String>,

    #[arg(long, help = "Treat the file contents as an update")]
    as_update: bool,

    #[arg(long, help = "Pretty-print the JSON output")]
    pretty: bool,
}

fn main() {
    let args = Args::parse();

    let (text, is_update) = match (args.query, args.update, args.file) {
        (Some(query), None, None) => (query, false),
        (None, Some(update), None) => (update, true),
        (None, None, Some(path)) => match std::fs::read_to_string(&path) {
            Ok(text) => (text, args.as_update),
            Err(err) => {
                eprintln!("could not read {}: {}", path, err);
                std::process::exit(1);
            }
        },
        _ => {
            eprintln!("pass exactly one of --query, --update or --file");
            std::process::exit(2);
        }
    };

    let json = if is_update {
        parse_update(&text).map(|parsed| to_json(&parsed, args.pretty))
    } else {
        parse_query(&text).map(|parsed| to_json(&parsed, args.pretty))
    };

    match json {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}

fn to_json<T: serde::Serialize>(parsed: &T, pretty: bool) -> String {
    let encoded = if pretty {
        serde_json::to_string_pretty(parsed)
    } else {
        serde_json::to_string(parsed)
    };
    // The result model holds only strings, integers and maps
    encoded.unwrap_or_else(|err| format!("{{\"error\": \"{}\"}}", err))
}
