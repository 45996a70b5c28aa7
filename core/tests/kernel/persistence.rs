use std::fs;

use uuid::Uuid;

use noema::{
    kernel::ReasoningChain,
    memory::{ChainStorePort, FsChainStore},
};

fn temp_dir(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("noema-{tag}-{}", Uuid::now_v7()))
}

#[tokio::test]
async fn given_save_failure_when_dir_is_a_file_then_no_temp_file_remains() {
    let parent = temp_dir("persist");
    fs::create_dir_all(&parent).expect("parent dir should be created");
    let blocked_dir = parent.join("chains");
    fs::write(&blocked_dir, "not a directory").expect("blocker file should be written");

    let store = FsChainStore::new(blocked_dir.clone());
    let chain = ReasoningChain::begin(1, "will not persist".to_string());

    store
        .save(&chain)
        .await
        .expect_err("saving under a file path must fail");

    let leftovers: Vec<_> = fs::read_dir(&parent)
        .expect("parent dir should be listable")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "leftover temp files: {leftovers:?}");

    let _ = fs::remove_file(&blocked_dir);
    let _ = fs::remove_dir(&parent);
}

#[tokio::test]
async fn given_corrupted_chain_file_when_loading_then_typed_error_is_surfaced() {
    let dir = temp_dir("persist");
    fs::create_dir_all(&dir).expect("dir should be created");
    let id = Uuid::new_v4();
    let path = dir.join(format!("reasoning_chain_{id}.json"));
    fs::write(&path, "{ truncated").expect("fixture should be written");

    let store = FsChainStore::new(dir.clone());
    let err = store
        .load(id)
        .await
        .expect_err("corrupted JSON must surface as an error");
    assert!(err.message.contains("failed to parse chain"));

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir(&dir);
}

#[tokio::test]
async fn given_two_saves_of_one_chain_when_loading_then_latest_write_wins() {
    let dir = temp_dir("persist");
    let store = FsChainStore::new(dir.clone());

    let mut chain = ReasoningChain::begin(1, "first".to_string());
    store.save(&chain).await.expect("first save should succeed");
    chain.end_tick = 2;
    let path = store.save(&chain).await.expect("second save should succeed");

    let loaded = store
        .load(chain.id)
        .await
        .expect("load should succeed")
        .expect("chain should be present");
    assert_eq!(loaded.end_tick, 2);

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir(&dir);
}
