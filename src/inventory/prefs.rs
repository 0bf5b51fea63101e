//! 扁平的 key → 整数 存档，相当于 PlayerPrefs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("写入存档失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("存档序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait PrefsStore: Send + Sync {
    fn get_int(&self, key: &str, default: i32) -> i32;
    fn set_int(&mut self, key: &str, value: i32);
    /// 把改动落盘
    fn flush(&mut self) -> Result<(), PrefsError>;
}

/// 纯内存存档（测试用）
#[derive(Debug, Default, Clone)]
pub struct MemoryPrefs {
    pub values: BTreeMap<String, i32>,
}

impl PrefsStore for MemoryPrefs {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), PrefsError> {
        Ok(())
    }
}

/// 存成一个扁平 JSON 对象的文件存档
#[derive(Debug)]
pub struct JsonFilePrefs {
    path: PathBuf,
    values: BTreeMap<String, i32>,
}

impl JsonFilePrefs {
    /// 打开存档；文件不存在或损坏时从空存档开始
    ///
    /// 损坏的文件会先挪到 `<path>.corrupt`，下次落盘不会覆盖它。
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                let backup = corrupt_backup_path(&path);
                match std::fs::rename(&path, &backup) {
                    Ok(()) => warn!(
                        "存档 {} 已损坏（{err}），已备份到 {}，重新开始",
                        path.display(),
                        backup.display()
                    ),
                    Err(io) => warn!(
                        "存档 {} 已损坏（{err}），备份失败（{io}），重新开始",
                        path.display()
                    ),
                }
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                warn!("无法读取存档 {}: {err}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, values }
    }
}

fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

impl PrefsStore for JsonFilePrefs {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), PrefsError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// 全局存档资源
#[derive(Resource)]
pub struct Prefs(pub Box<dyn PrefsStore>);

impl Prefs {
    pub fn memory() -> Self {
        Self(Box::new(MemoryPrefs::default()))
    }

    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self(Box::new(JsonFilePrefs::open(path)))
    }

    /// 落盘；失败只记日志，不重试
    pub fn flush_or_log(&mut self) {
        if let Err(err) = self.0.flush() {
            error!("{err}");
        }
    }
}

impl Default for Prefs {
    fn default() -> Self {
        Self::memory()
    }
}

impl std::ops::Deref for Prefs {
    type Target = dyn PrefsStore;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl std::ops::DerefMut for Prefs {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}
