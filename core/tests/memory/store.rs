use std::fs;

use uuid::Uuid;

use noema::{
    kernel::ReasoningChain,
    memory::{ChainStorePort, FsChainStore, NoopChainStore},
};

fn temp_dir(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("noema-{tag}-{}", Uuid::now_v7()))
}

#[tokio::test]
async fn given_a_missing_directory_when_saving_then_the_store_creates_it() {
    let root = temp_dir("store");
    let dir = root.join("nested").join("chains");
    let store = FsChainStore::new(dir.clone());
    let chain = ReasoningChain::begin(1, "first impression".to_string());

    let path = store.save(&chain).await.expect("save should succeed");

    assert!(path.starts_with(&dir));
    assert!(path.exists());

    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn given_two_distinct_chains_when_saved_then_each_loads_back_by_its_own_id() {
    let dir = temp_dir("store");
    let store = FsChainStore::new(dir.clone());
    let first = ReasoningChain::begin(1, "a knock at the airlock".to_string());
    let second = ReasoningChain::begin(3, "the lights flicker twice".to_string());

    store.save(&first).await.expect("first save should succeed");
    store.save(&second).await.expect("second save should succeed");

    let loaded_first = store
        .load(first.id)
        .await
        .expect("first load should succeed")
        .expect("first chain should exist");
    let loaded_second = store
        .load(second.id)
        .await
        .expect("second load should succeed")
        .expect("second chain should exist");

    assert_eq!(loaded_first.id, first.id);
    assert_eq!(loaded_second.id, second.id);
    assert_ne!(loaded_first.id, loaded_second.id);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn given_a_saved_chain_when_listing_the_directory_then_the_file_name_carries_the_id() {
    let dir = temp_dir("store");
    let store = FsChainStore::new(dir.clone());
    let chain = ReasoningChain::begin(1, "naming check".to_string());

    let path = store.save(&chain).await.expect("save should succeed");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .expect("saved path should have a printable file name");
    assert_eq!(file_name, format!("reasoning_chain_{}.json", chain.id));

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn given_the_noop_store_when_saving_and_loading_then_nothing_is_persisted() {
    let store = NoopChainStore;
    let chain = ReasoningChain::begin(1, "ephemeral".to_string());

    let path = store.save(&chain).await.expect("noop save never fails");
    assert_eq!(path, std::path::PathBuf::new());

    let loaded = store
        .load(chain.id)
        .await
        .expect("noop load never fails");
    assert!(loaded.is_none());
}
