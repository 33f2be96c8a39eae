mod helpers;

use helpers::{similar_embedding, spike_embedding, test_store};
use mnemo::knowledge::{KnowledgeError, KnowledgeStore};

#[tokio::test]
async fn store_and_get_round_trip() {
    let store = test_store();
    let id = store
        .store_fact("The user's cat is named Milo", Some("chat"), Some(0.95))
        .await
        .unwrap();

    let fact = store.get_fact(id).await.unwrap();
    assert_eq!(fact.text, "The user's cat is named Milo");
    assert_eq!(fact.source.as_deref(), Some("chat"));
    assert!((fact.confidence - 0.95).abs() < f64::EPSILON);
    assert!(fact.embedding.is_none());
}

#[tokio::test]
async fn upsert_through_facade_keeps_id_stable() {
    let store = test_store();
    let id1 = store.store_fact("stable", None, None).await.unwrap();
    let id2 = store
        .store_fact("stable", Some("second pass"), Some(0.3))
        .await
        .unwrap();
    assert_eq!(id1, id2);
    assert_eq!(store.get_all_facts(false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn store_with_embedding_then_search() {
    let store = test_store();
    let base = spike_embedding(0);
    store
        .store_fact_with_embedding("findable fact", base.clone(), None, None)
        .await
        .unwrap();
    store
        .store_fact_with_embedding("unrelated fact", spike_embedding(3), None, None)
        .await
        .unwrap();

    let results = store
        .search_by_embedding(similar_embedding(&base), 10)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].fact.text, "findable fact");
    assert!(results[0].similarity > 0.5);
}

#[tokio::test]
async fn get_fact_not_found() {
    let store = test_store();
    match store.get_fact(9999).await {
        Err(KnowledgeError::NotFound { id }) => assert_eq!(id, 9999),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn update_embedding_not_found() {
    let store = test_store();
    let err = store.update_embedding(9999, vec![1.0]).await.unwrap_err();
    assert!(matches!(err, KnowledgeError::NotFound { id: 9999 }));
}

#[tokio::test]
async fn delete_missing_fact_not_found() {
    let store = test_store();
    let err = store.delete_fact(123).await.unwrap_err();
    assert!(matches!(err, KnowledgeError::NotFound { id: 123 }));
}

#[tokio::test]
async fn delete_removes_fact() {
    let store = test_store();
    let id = store.store_fact("delete me", None, None).await.unwrap();
    store.delete_fact(id).await.unwrap();
    assert!(matches!(
        store.get_fact(id).await,
        Err(KnowledgeError::NotFound { .. })
    ));
}

#[tokio::test]
async fn update_embedding_makes_fact_searchable() {
    let store = test_store();
    let id = store.store_fact("vectorize me", None, None).await.unwrap();

    let results = store
        .search_by_embedding(spike_embedding(1), 10)
        .await
        .unwrap();
    assert!(results.is_empty());

    store
        .update_embedding(id, spike_embedding(1))
        .await
        .unwrap();
    let results = store
        .search_by_embedding(spike_embedding(1), 10)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].fact.id, id);
}

#[tokio::test]
async fn categories_are_visible_through_the_facade() {
    let store = test_store();
    let id = store.store_fact("labeled", None, None).await.unwrap();
    store.add_category(id, "preferences").await.unwrap();

    let fact = store.get_fact(id).await.unwrap();
    assert_eq!(fact.categories, vec!["preferences"]);
}

#[tokio::test]
async fn concurrent_upserts_of_same_text_yield_one_row() {
    let store = test_store();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .store_fact("contended text", Some(&format!("writer-{i}")), None)
                .await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(store.get_all_facts(false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn open_creates_database_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("knowledge.db");

    let store = KnowledgeStore::open(&path).unwrap();
    let id = store.store_fact("persisted", None, None).await.unwrap();
    drop(store);

    // Reopen and read back
    let store = KnowledgeStore::open(&path).unwrap();
    assert_eq!(store.get_fact(id).await.unwrap().text, "persisted");
}
