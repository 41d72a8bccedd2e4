//! 设置存储抽象
//! 外部键值存储协作方：规则集序列化后保存在单一逻辑键下。
//! 引擎只在变更提交与外部变更通知时读写，匹配路径不触碰存储。

use rustc_hash::FxHashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{RouterError, RouterResult};

/// 键值设置存储接口
/// 读写失败以StoreError上报，调用方保持最后已知良好状态
pub trait SettingsStore {
    /// 读取逻辑键下的文档（键不存在返回None）
    fn load(&self, key: &str) -> RouterResult<Option<String>>;
    /// 写入逻辑键下的文档（整体覆盖）
    fn save(&self, key: &str, value: &str) -> RouterResult<()>;
}

/// 内存存储（测试与宿主自带持久化的内嵌场景）
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    entries: RwLock<FxHashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self, key: &str) -> RouterResult<Option<String>> {
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> RouterResult<()> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON文件存储（独立运行场景）
/// 每个逻辑键对应目录下的一个`<key>.json`文件
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    dir: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self, key: &str) -> RouterResult<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RouterError::StoreError(format!(
                "read {}: {}",
                self.key_path(key).display(),
                e
            ))),
        }
    }

    fn save(&self, key: &str, value: &str) -> RouterResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            RouterError::StoreError(format!("create {}: {}", self.dir.display(), e))
        })?;
        fs::write(self.key_path(key), value).map_err(|e| {
            RouterError::StoreError(format!("write {}: {}", self.key_path(key).display(), e))
        })
    }
}
