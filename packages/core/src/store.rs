//! ListStore - 单词列表仓库
//!
//! 所有列表记录的唯一数据源。每个变更操作都是一次完整的
//! 读取 → 修改 → 整体写回，不存在部分写入。

use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{WordList, MAX_WORDS_PER_LIST};
use crate::storage::StoragePort;

/// 单词列表仓库
pub struct ListStore<S> {
    storage: S,
}

impl<S: StoragePort> ListStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 获取底层存储的引用
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// 获取全部列表
    ///
    /// 从未写入时返回空集合。存储内容格式错误时同样视为空集合，只记录警告；
    /// 只有存储后端本身的故障才会返回错误。
    pub fn get_all(&self) -> StoreResult<Vec<WordList>> {
        let Some(payload) = self.storage.load()? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<WordList>>(&payload) {
            Ok(lists) => Ok(lists),
            Err(e) => {
                tracing::warn!(error = %e, "stored word lists are malformed, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// 根据 id 查找列表
    pub fn get(&self, id: &str) -> StoreResult<Option<WordList>> {
        Ok(self.get_all()?.into_iter().find(|list| list.id == id))
    }

    /// 保存列表（新建或更新）
    ///
    /// - 名称去除空白后为空：拒绝，存储不变
    /// - 超过 [`MAX_WORDS_PER_LIST`] 个单词：拒绝，存储不变
    /// - `id` 为空：分配新 id 并追加到末尾
    /// - `id` 非空：替换同 id 记录的名称与单词，保留 `played` / `words_learned`
    pub fn save(&mut self, list: WordList) -> StoreResult<WordList> {
        if list.name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
        if list.words.len() > MAX_WORDS_PER_LIST {
            tracing::warn!(
                name = %list.name,
                count = list.words.len(),
                "refusing to save word list over the word cap"
            );
            return Err(StoreError::too_many_words(list.words.len()));
        }

        let mut lists = self.get_all()?;

        let saved = if list.is_new() {
            let created = WordList {
                id: allocate_id(&lists),
                name: list.name,
                words: list.words,
                played: false,
                words_learned: 0,
            };
            lists.push(created.clone());
            tracing::info!(id = %created.id, name = %created.name, "word list created");
            created
        } else {
            let existing = lists
                .iter_mut()
                .find(|existing| existing.id == list.id)
                .ok_or_else(|| StoreError::NotFound(list.id.clone()))?;
            existing.name = list.name;
            existing.words = list.words;
            tracing::info!(id = %existing.id, name = %existing.name, "word list updated");
            existing.clone()
        };

        self.persist(&lists)?;
        Ok(saved)
    }

    /// 删除列表
    ///
    /// 幂等：id 不存在时不写入，返回 `false`。
    pub fn delete(&mut self, id: &str) -> StoreResult<bool> {
        let mut lists = self.get_all()?;
        let before = lists.len();
        lists.retain(|list| list.id != id);

        if lists.len() == before {
            tracing::debug!(id, "delete of unknown word list ignored");
            return Ok(false);
        }

        self.persist(&lists)?;
        tracing::info!(id, "word list deleted");
        Ok(true)
    }

    /// 记录一局游戏的结果
    ///
    /// 找到列表时设置 `played = true` 并覆盖 `words_learned`，返回 `true`；
    /// 找不到时什么也不做，返回 `false`。
    pub fn mark_played(&mut self, id: &str, words_learned: u32) -> StoreResult<bool> {
        let mut lists = self.get_all()?;
        let Some(list) = lists.iter_mut().find(|list| list.id == id) else {
            return Ok(false);
        };

        list.played = true;
        list.words_learned = words_learned;

        self.persist(&lists)?;
        tracing::info!(id, words_learned, "word list marked as played");
        Ok(true)
    }

    fn persist(&mut self, lists: &[WordList]) -> StoreResult<()> {
        let payload = serde_json::to_string(lists).map_err(crate::error::StorageError::from)?;
        self.storage.store(&payload)?;
        Ok(())
    }
}

fn allocate_id(lists: &[WordList]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !lists.iter().any(|list| list.id == id) {
            return id;
        }
    }
}
