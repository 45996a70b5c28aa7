use std::{
    fs,
    io::{BufWriter, Write},
    path::PathBuf,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    kernel::ReasoningChain,
    memory::{
        error::{MemoryError, io_error, serialization_error, version_error},
        ports::ChainStorePort,
    },
};

const CHAIN_STORE_VERSION: u64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedChain {
    version: u64,
    chain: ReasoningChain,
}

/// One JSON file per chain under a flat directory. Writes go through a temp
/// file and an atomic rename so a reader never sees a half-written record.
#[derive(Debug, Clone)]
pub struct FsChainStore {
    dir: PathBuf,
}

impl FsChainStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn chain_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("reasoning_chain_{id}.json"))
    }

    fn write_atomic(&self, path: &PathBuf, persisted: &PersistedChain) -> Result<(), MemoryError> {
        let tmp_path = path.with_extension("json.tmp");
        let result = Self::write_tmp_and_rename(&tmp_path, path, persisted);
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn write_tmp_and_rename(
        tmp_path: &PathBuf,
        path: &PathBuf,
        persisted: &PersistedChain,
    ) -> Result<(), MemoryError> {
        let file = fs::File::create(tmp_path).map_err(|err| {
            io_error(format!(
                "failed to create chain temp file '{}': {err}",
                tmp_path.display()
            ))
        })?;
        {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, persisted).map_err(|err| {
                serialization_error(format!(
                    "failed to serialize chain '{}': {err}",
                    tmp_path.display()
                ))
            })?;
            writer.write_all(b"\n").map_err(|err| {
                io_error(format!(
                    "failed to finalize chain '{}': {err}",
                    tmp_path.display()
                ))
            })?;
            writer.flush().map_err(|err| {
                io_error(format!(
                    "failed to flush chain '{}': {err}",
                    tmp_path.display()
                ))
            })?;
        }

        let tmp_file = fs::OpenOptions::new().read(true).open(tmp_path).map_err(|err| {
            io_error(format!(
                "failed to reopen chain temp file '{}': {err}",
                tmp_path.display()
            ))
        })?;
        tmp_file.sync_all().map_err(|err| {
            io_error(format!(
                "failed to sync chain temp file '{}': {err}",
                tmp_path.display()
            ))
        })?;

        fs::rename(tmp_path, path).map_err(|err| {
            io_error(format!(
                "failed to replace chain '{}' from '{}': {err}",
                path.display(),
                tmp_path.display()
            ))
        })
    }
}

#[async_trait]
impl ChainStorePort for FsChainStore {
    async fn save(&self, chain: &ReasoningChain) -> Result<PathBuf, MemoryError> {
        fs::create_dir_all(&self.dir).map_err(|err| {
            io_error(format!(
                "failed to create chain directory '{}': {err}",
                self.dir.display()
            ))
        })?;

        let path = self.chain_path(chain.id);
        let persisted = PersistedChain {
            version: CHAIN_STORE_VERSION,
            chain: chain.clone(),
        };
        self.write_atomic(&path, &persisted)?;

        if let Ok(dir_file) = fs::File::open(&self.dir) {
            let _ = dir_file.sync_all();
        }

        Ok(path)
    }

    async fn load(&self, id: Uuid) -> Result<Option<ReasoningChain>, MemoryError> {
        let path = self.chain_path(id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(io_error(format!(
                    "failed to read chain '{}': {err}",
                    path.display()
                )));
            }
        };

        let parsed: PersistedChain = serde_json::from_str(&content).map_err(|err| {
            serialization_error(format!("failed to parse chain '{}': {err}", path.display()))
        })?;
        if parsed.version != CHAIN_STORE_VERSION {
            return Err(version_error(format!(
                "unsupported chain version {} at '{}'",
                parsed.version,
                path.display()
            )));
        }

        Ok(Some(parsed.chain))
    }
}
