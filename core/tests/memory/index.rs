use noema::memory::{FixedMemoryIndex, MemoryHit, MemoryIndexPort, NoopMemoryIndex};

fn hit(text: &str, score: f64) -> MemoryHit {
    MemoryHit {
        text: text.to_string(),
        score,
        source: "episodic".to_string(),
    }
}

#[tokio::test]
async fn given_a_top_k_smaller_than_the_index_when_querying_then_hits_are_truncated_in_order() {
    let index = FixedMemoryIndex::new(vec![
        hit("first recollection", 0.9),
        hit("second recollection", 0.7),
        hit("third recollection", 0.4),
    ]);

    let hits = index
        .query("anything", 2)
        .await
        .expect("fixed index never fails");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].text, "first recollection");
    assert_eq!(hits[1].text, "second recollection");
    assert_eq!(index.calls(), 1);
}

#[tokio::test]
async fn given_repeated_queries_when_counting_then_every_call_is_recorded() {
    let index = FixedMemoryIndex::new(vec![hit("only entry", 0.5)]);

    for _ in 0..3 {
        index
            .query("probe", 10)
            .await
            .expect("fixed index never fails");
    }

    assert_eq!(index.calls(), 3);
}

#[tokio::test]
async fn given_the_noop_index_when_querying_then_no_hits_come_back() {
    let index = NoopMemoryIndex;

    let hits = index
        .query("was there ever a corridor", 5)
        .await
        .expect("noop index never fails");

    assert!(hits.is_empty());
}
