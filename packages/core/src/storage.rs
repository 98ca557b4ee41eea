//! 存储端口
//!
//! 列表集合以单个键的整体快照形式保存。端口只负责读写序列化后的负载，
//! 编解码与容错由 [`ListStore`](crate::store::ListStore) 处理。

use std::cell::Cell;

use crate::error::StorageResult;

/// 列表集合在键值存储中的键名
pub const WORD_LISTS_KEY: &str = "wordLists";

/// 存储端口
///
/// `load` 在从未写入时返回 `None`；`store` 整体覆盖之前的负载。
pub trait StoragePort {
    fn load(&self) -> StorageResult<Option<String>>;

    fn store(&mut self, payload: &str) -> StorageResult<()>;
}

impl<S: StoragePort + ?Sized> StoragePort for &mut S {
    fn load(&self) -> StorageResult<Option<String>> {
        (**self).load()
    }

    fn store(&mut self, payload: &str) -> StorageResult<()> {
        (**self).store(payload)
    }
}

impl<S: StoragePort + ?Sized> StoragePort for Box<S> {
    fn load(&self) -> StorageResult<Option<String>> {
        (**self).load()
    }

    fn store(&mut self, payload: &str) -> StorageResult<()> {
        (**self).store(payload)
    }
}

// ============================================================
// MemoryStorage - 内存实现（用于测试）
// ============================================================

/// 内存存储
#[derive(Debug, Default)]
pub struct MemoryStorage {
    payload: Option<String>,
    writes: usize,
    reads: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以原始负载初始化（可以是格式错误的数据）
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }

    /// 当前保存的原始负载
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// 写入次数
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// 读取次数
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self) -> StorageResult<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.payload.clone())
    }

    fn store(&mut self, payload: &str) -> StorageResult<()> {
        self.payload = Some(payload.to_string());
        self.writes += 1;
        Ok(())
    }
}
