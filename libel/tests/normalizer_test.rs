/*
 * Copyright © 2025 Volodymyr Kadzhaia
 * Copyright © 2025 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

#[cfg(test)]
mod tests {
    use libel::custom_error::NormalizeError;
    use libel::model::{Term, Triple};
    use libel::normalize::{parse_query, parse_update};

    const CRM: &str = "http://www.cidoc-crm.org/cidoc-crm/";

    fn var(name: &str) -> Term {
        Term::Variable(name.to_string())
    }

    fn iri(value: &str) -> Term {
        Term::Identifier(value.to_string())
    }

    #[test]
    fn test_simple_select_query() {
        let query = "PREFIX crm: <http://www.cidoc-crm.org/cidoc-crm/> \
                     SELECT ?s WHERE { ?s crm:P1_is_identified_by ?o }";
        let result = parse_query(query).unwrap();

        assert_eq!(result.prefixes.len(), 1);
        assert_eq!(result.prefixes.get("crm"), Some(&CRM.to_string()));
        assert_eq!(result.select, vec!["s".to_string()]);
        assert_eq!(
            result.where_triples,
            vec![Triple {
                s: var("s"),
                p: iri("http://www.cidoc-crm.org/cidoc-crm/P1_is_identified_by"),
                o: var("o"),
            }]
        );
        assert!(result.values.is_empty());
        assert!(result.limit_offset.is_none());
    }

    #[test]
    fn test_select_query_with_values() {
        let query = "PREFIX crm: <http://www.cidoc-crm.org/cidoc-crm/> \
                     SELECT ?s ?o WHERE { \
                       ?s crm:P1_is_identified_by ?o . \
                       ?o a ?type . \
                       VALUES (?type) { (crm:E41_Appellation) (crm:E42_Identifier) } \
                     }";
        let result = parse_query(query).unwrap();

        assert_eq!(result.select, vec!["s".to_string(), "o".to_string()]);
        assert_eq!(result.where_triples.len(), 2);
        assert_eq!(
            result.where_triples[1],
            Triple {
                s: var("o"),
                p: iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"),
                o: var("type"),
            }
        );

        assert_eq!(result.values.len(), 2);
        assert_eq!(
            result.values[0].get("type"),
            Some(&iri("http://www.cidoc-crm.org/cidoc-crm/E41_Appellation"))
        );
        assert_eq!(
            result.values[1].get("type"),
            Some(&iri("http://www.cidoc-crm.org/cidoc-crm/E42_Identifier"))
        );
    }

    #[test]
    fn test_limit_offset() {
        let query = "SELECT ?s WHERE { ?s ?p ?o } LIMIT 10 OFFSET 100";
        let result = parse_query(query).unwrap();

        let clause = result.limit_offset.expect("pagination clause expected");
        assert_eq!(clause.limit, Some(10));
        assert_eq!(clause.offset, Some(100));
    }

    #[test]
    fn test_limit_offset_order_independent() {
        let forward = parse_query("SELECT ?s WHERE { ?s ?p ?o } LIMIT 2 OFFSET 5").unwrap();
        let reverse = parse_query("SELECT ?s WHERE { ?s ?p ?o } OFFSET 5 LIMIT 2").unwrap();
        assert_eq!(forward.limit_offset, reverse.limit_offset);
    }

    #[test]
    fn test_limit_without_offset() {
        let result = parse_query("SELECT ?s WHERE { ?s ?p ?o } LIMIT 25").unwrap();
        let clause = result.limit_offset.expect("pagination clause expected");
        assert_eq!(clause.limit, Some(25));
        assert_eq!(clause.offset, None);
    }

    #[test]
    fn test_update_with_values_only() {
        let update = "INSERT { ?s ?p ?o } WHERE { \
                        VALUES (?type ?imageId ?region_by_px) { \
                          (\"updateImageRegion\" \"1234\" \"[1,2,3,4]\") \
                        } \
                      }";
        let result = parse_update(update).unwrap();

        assert!(result.where_triples.is_empty());
        assert_eq!(result.values.len(), 1);
        let row = &result.values[0];
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("type"), Some(&Term::Literal("updateImageRegion".to_string())));
        assert_eq!(row.get("imageId"), Some(&Term::Literal("1234".to_string())));
        assert_eq!(row.get("region_by_px"), Some(&Term::Literal("[1,2,3,4]".to_string())));
    }

    #[test]
    fn test_update_where_triples() {
        let update = "PREFIX crm: <http://www.cidoc-crm.org/cidoc-crm/> \
                      INSERT { ?s crm:P1_is_identified_by ?o } \
                      WHERE { ?s crm:P1_is_identified_by ?o }";
        let result = parse_update(update).unwrap();

        assert_eq!(result.prefixes.get("crm"), Some(&CRM.to_string()));
        assert_eq!(
            result.where_triples,
            vec![Triple {
                s: var("s"),
                p: iri("http://www.cidoc-crm.org/cidoc-crm/P1_is_identified_by"),
                o: var("o"),
            }]
        );
        assert!(result.values.is_empty());
    }

    #[test]
    fn test_absolute_identifiers_pass_through() {
        let query = "SELECT ?s WHERE { ?s <http://example.org/p> <http://example.org/o> }";
        let result = parse_query(query).unwrap();

        assert!(result.prefixes.is_empty());
        assert_eq!(
            result.where_triples,
            vec![Triple {
                s: var("s"),
                p: iri("http://example.org/p"),
                o: iri("http://example.org/o"),
            }]
        );
    }

    #[test]
    fn test_semicolon_chain_shares_subject() {
        let query = "PREFIX ex: <http://example.org/> \
                     SELECT ?s WHERE { ?s ex:a ?x ; ex:b ?y ; ex:c ?z }";
        let result = parse_query(query).unwrap();

        assert_eq!(result.where_triples.len(), 3);
        for triple in &result.where_triples {
            assert_eq!(triple.s, var("s"));
        }
        assert_eq!(result.where_triples[0].o, var("x"));
        assert_eq!(result.where_triples[1].o, var("y"));
        assert_eq!(result.where_triples[2].o, var("z"));
    }

    #[test]
    fn test_sequence_path_expansion() {
        let query = "PREFIX ex: <http://example.org/> \
                     SELECT ?s WHERE { ?s ex:a/ex:b ?o }";
        let result = parse_query(query).unwrap();

        assert_eq!(result.where_triples.len(), 2);
        assert_eq!(result.where_triples[0].s, var("s"));
        assert_eq!(result.where_triples[0].p, iri("http://example.org/a"));
        // The hops join through a generated intermediate variable
        assert_eq!(result.where_triples[0].o, result.where_triples[1].s);
        match &result.where_triples[0].o {
            Term::Variable(name) => assert!(name.starts_with("__path_")),
            other => panic!("expected an intermediate variable, got {:?}", other),
        }
        assert_eq!(result.where_triples[1].p, iri("http://example.org/b"));
        assert_eq!(result.where_triples[1].o, var("o"));
    }

    #[test]
    fn test_default_prefix() {
        let query = "PREFIX : <http://example.org/> \
                     SELECT ?s WHERE { ?s :p ?o }";
        let result = parse_query(query).unwrap();

        assert_eq!(result.prefixes.get(""), Some(&"http://example.org/".to_string()));
        assert_eq!(result.where_triples[0].p, iri("http://example.org/p"));
    }

    #[test]
    fn test_prefix_resolution_idempotent() {
        let query = "PREFIX crm: <http://www.cidoc-crm.org/cidoc-crm/> \
                     SELECT ?a ?b WHERE { ?a crm:P2_has_type ?t . ?b crm:P2_has_type ?t }";
        let result = parse_query(query).unwrap();

        assert_eq!(result.where_triples.len(), 2);
        assert_eq!(result.where_triples[0].p, result.where_triples[1].p);
    }

    #[test]
    fn test_select_star_projects_nothing() {
        let result = parse_query("SELECT * WHERE { ?s ?p ?o }").unwrap();
        assert!(result.select.is_empty());
        assert_eq!(result.where_triples[0].p, var("p"));
    }

    #[test]
    fn test_undef_leaves_key_out() {
        let query = "PREFIX ex: <http://example.org/> \
                     SELECT ?a WHERE { VALUES (?a ?b) { (UNDEF \"x\") (ex:y \"z\") } }";
        let result = parse_query(query).unwrap();

        assert_eq!(result.values.len(), 2);
        assert!(result.values[0].get("a").is_none());
        assert_eq!(result.values[0].get("b"), Some(&Term::Literal("x".to_string())));
        assert_eq!(result.values[1].len(), 2);
    }

    #[test]
    fn test_short_tuple_yields_fewer_keys() {
        let query = "SELECT ?a WHERE { VALUES (?a ?b) { (\"only\") } }";
        let result = parse_query(query).unwrap();

        assert_eq!(result.values.len(), 1);
        assert_eq!(result.values[0].len(), 1);
        assert_eq!(result.values[0].get("a"), Some(&Term::Literal("only".to_string())));
    }

    #[test]
    fn test_values_keys_follow_header_order() {
        let query = "SELECT ?a WHERE { VALUES (?b ?a) { (\"1\" \"2\") } }";
        let result = parse_query(query).unwrap();

        let keys: Vec<&String> = result.values[0].keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_missing_prefix_is_an_error() {
        let query = "SELECT ?s WHERE { ?s crm:P1_is_identified_by ?o }";
        match parse_query(query) {
            Err(NormalizeError::MissingPrefix { label }) => assert_eq!(label, "crm"),
            other => panic!("expected a missing-prefix error, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_query_reports_input() {
        let text = "this is not sparql";
        match parse_query(text) {
            Err(NormalizeError::GrammarParse { text: echoed, .. }) => {
                assert_eq!(echoed, text);
            }
            other => panic!("expected a grammar error, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_garbage_is_an_error() {
        let text = "SELECT ?s WHERE { ?s ?p ?o } garbage";
        match parse_query(text) {
            Err(NormalizeError::GrammarParse { message, .. }) => {
                assert!(message.contains("trailing"));
            }
            other => panic!("expected a grammar error, got {:?}", other),
        }
    }

    #[test]
    fn test_update_rejects_query_form() {
        assert!(parse_update("SELECT ?s WHERE { ?s ?p ?o }").is_err());
    }

    #[test]
    fn test_every_emitted_triple_is_complete() {
        // Chains and sequence paths must never leak partial triples
        let query = "PREFIX ex: <http://example.org/> \
                     SELECT ?s WHERE { \
                       ?s ex:a ?x ; ex:b/ex:c ?y . \
                       ?x ex:d \"lit\" \
                     }";
        let result = parse_query(query).unwrap();

        assert_eq!(result.where_triples.len(), 4);
        for triple in &result.where_triples {
            // Structural: all three positions exist by construction; the
            // payloads must be non-empty too
            let values = [&triple.s, &triple.p, &triple.o];
            for term in values {
                match term {
                    Term::Variable(v) => assert!(!v.is_empty()),
                    Term::Identifier(i) => assert!(!i.is_empty()),
                    Term::Literal(_) => {}
                }
            }
        }
    }
}
