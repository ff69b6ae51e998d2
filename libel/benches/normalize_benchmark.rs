/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

extern crate criterion;
extern crate libel;

use criterion::*;
use libel::normalize::{parse_query, parse_update};

fn normalize_select_query() {
    let sparql = r#"
    PREFIX crm: <http://www.cidoc-crm.org/cidoc-crm/>
    PREFIX foaf: <http://xmlns.com/foaf/0.1/>
    SELECT ?s ?o ?name
    WHERE {
        ?s crm:P1_is_identified_by ?o ; foaf:name ?name .
        ?o a ?type .
        VALUES (?type) { (crm:E41_Appellation) (crm:E42_Identifier) }
    }
    LIMIT 100 OFFSET 200"#;
    parse_query(sparql).unwrap();
}

fn normalize_update() {
    let sparql = r#"
    PREFIX crm: <http://www.cidoc-crm.org/cidoc-crm/>
    INSERT { ?s crm:P1_is_identified_by ?o }
    WHERE {
        ?s crm:P1_is_identified_by ?o .
        VALUES (?op ?id) { ("updateImageRegion" "1234") }
    }"#;
    parse_update(sparql).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("normalize_select_query", |b| {
        b.iter(|| normalize_select_query())
    });
    c.bench_function("normalize_update", |b| b.iter(|| normalize_update()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
