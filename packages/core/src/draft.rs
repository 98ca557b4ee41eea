//! 列表草稿
//!
//! 列表管理界面中正在编辑、尚未保存的列表。单词数的软上限在这里执行，
//! 保存前由 [`ListDraft::validate`] 给出提示。

use crate::error::{DraftError, DraftResult};
use crate::models::{WordList, MAX_WORDS_PER_LIST};

/// 添加单词的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddWord {
    /// 已添加（去除首尾空白后的单词）
    Added(String),
    /// 输入为空白，忽略
    Ignored,
}

/// 列表草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDraft {
    id: String,
    name: String,
    words: Vec<String>,
}

impl ListDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// 载入已有列表进行编辑（保留其 id）
    pub fn edit(list: &WordList) -> Self {
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            words: list.words.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// 是否在编辑已保存的列表
    pub fn is_editing(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// 添加单词
    pub fn add_word(&mut self, word: &str) -> DraftResult<AddWord> {
        let word = word.trim();
        if word.is_empty() {
            return Ok(AddWord::Ignored);
        }
        if self.words.len() >= MAX_WORDS_PER_LIST {
            return Err(DraftError::WordLimitReached {
                max: MAX_WORDS_PER_LIST,
            });
        }

        self.words.push(word.to_string());
        Ok(AddWord::Added(word.to_string()))
    }

    /// 按位置删除单词
    pub fn remove_word(&mut self, index: usize) -> DraftResult<String> {
        if index >= self.words.len() {
            return Err(DraftError::NoSuchWord(index));
        }
        Ok(self.words.remove(index))
    }

    /// 保存前校验
    pub fn validate(&self) -> DraftResult<()> {
        if self.name.trim().is_empty() {
            return Err(DraftError::EmptyName);
        }
        if self.words.is_empty() {
            return Err(DraftError::NoWords);
        }
        if self.words.len() > MAX_WORDS_PER_LIST {
            return Err(DraftError::WordLimitReached {
                max: MAX_WORDS_PER_LIST,
            });
        }
        Ok(())
    }

    pub fn to_word_list(&self) -> WordList {
        WordList {
            id: self.id.clone(),
            name: self.name.clone(),
            words: self.words.clone(),
            played: false,
            words_learned: 0,
        }
    }

    /// 保存成功后清空
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
