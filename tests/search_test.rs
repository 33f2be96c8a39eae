mod helpers;

use helpers::{spike_embedding, test_db};
use mnemo::knowledge::facts::{upsert_fact, upsert_fact_with_embedding};
use mnemo::knowledge::search::search_by_embedding;

#[test]
fn duplicate_directions_rank_first_orthogonal_excluded() {
    let conn = test_db();
    upsert_fact_with_embedding(&conn, "points right", &[1.0, 0.0], None, 1.0).unwrap();
    upsert_fact_with_embedding(&conn, "points up", &[0.0, 1.0], None, 1.0).unwrap();
    upsert_fact_with_embedding(&conn, "also points right", &[1.0, 0.0], None, 1.0).unwrap();

    let results = search_by_embedding(&conn, &[1.0, 0.0], 10).unwrap();
    assert_eq!(results.len(), 2);
    for r in &results {
        assert!((r.similarity - 1.0).abs() < 1e-6);
        assert!(r.fact.text.contains("right"));
    }
}

#[test]
fn twenty_qualifying_facts_truncate_to_five_best() {
    let conn = test_db();
    for i in 0..20 {
        // All similar to the query, with strictly decreasing similarity as i grows
        let drift = i as f32 * 0.02;
        upsert_fact_with_embedding(&conn, &format!("fact {i}"), &[1.0, drift], None, 1.0).unwrap();
    }

    let results = search_by_embedding(&conn, &[1.0, 0.0], 5).unwrap();
    assert_eq!(results.len(), 5);
    let texts: Vec<&str> = results.iter().map(|r| r.fact.text.as_str()).collect();
    assert_eq!(texts, vec!["fact 0", "fact 1", "fact 2", "fact 3", "fact 4"]);
}

#[test]
fn mismatched_dimensions_never_error() {
    let conn = test_db();
    upsert_fact_with_embedding(&conn, "three dims", &[1.0, 0.0, 0.0], None, 1.0).unwrap();
    upsert_fact_with_embedding(&conn, "two dims", &[1.0, 0.0], None, 1.0).unwrap();

    let results = search_by_embedding(&conn, &[1.0, 0.0], 10).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].fact.text, "two dims");
}

#[test]
fn zero_magnitude_stored_vector_is_excluded() {
    let conn = test_db();
    upsert_fact_with_embedding(&conn, "zero vector", &[0.0, 0.0], None, 1.0).unwrap();

    let results = search_by_embedding(&conn, &[1.0, 0.0], 10).unwrap();
    assert!(results.is_empty());
}

#[test]
fn zero_magnitude_query_matches_nothing() {
    let conn = test_db();
    upsert_fact_with_embedding(&conn, "a fact", &[1.0, 0.0], None, 1.0).unwrap();

    let results = search_by_embedding(&conn, &[0.0, 0.0], 10).unwrap();
    assert!(results.is_empty());
}

#[test]
fn unembedded_facts_are_invisible_to_search() {
    let conn = test_db();
    upsert_fact(&conn, "text only", None, 1.0).unwrap();
    for seed in 0..3 {
        upsert_fact_with_embedding(
            &conn,
            &format!("embedded {seed}"),
            &spike_embedding(seed),
            None,
            1.0,
        )
        .unwrap();
    }

    let results = search_by_embedding(&conn, &spike_embedding(0), 10).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].fact.text, "embedded 0");
}

#[test]
fn negative_similarity_is_filtered() {
    let conn = test_db();
    upsert_fact_with_embedding(&conn, "opposite", &[-1.0, 0.0], None, 1.0).unwrap();

    let results = search_by_embedding(&conn, &[1.0, 0.0], 10).unwrap();
    assert!(results.is_empty());
}

#[test]
fn results_carry_the_decoded_embedding() {
    let conn = test_db();
    upsert_fact_with_embedding(&conn, "roundtrip", &[0.6, 0.8], None, 1.0).unwrap();

    let results = search_by_embedding(&conn, &[0.6, 0.8], 10).unwrap();
    assert_eq!(results[0].fact.embedding, Some(vec![0.6, 0.8]));
}
