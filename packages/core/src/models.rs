//! 数据模型定义
//!
//! 持久化布局：键 `wordLists` 下的一个 JSON 数组，字段使用 camelCase。

use serde::{Deserialize, Serialize};

/// 每个列表允许的最大单词数
pub const MAX_WORDS_PER_LIST: usize = 10;

// ============================================================
// WordList - 单词列表
// ============================================================

/// 单词列表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordList {
    /// 列表唯一标识，创建时分配，之后不再改变；空字符串表示尚未保存
    pub id: String,
    /// 显示名称
    pub name: String,
    /// 单词（保持顺序，允许重复）
    pub words: Vec<String>,
    /// 是否已完成过一局游戏
    #[serde(default)]
    pub played: bool,
    /// 最近一局的得分（覆盖写入，不累加）
    #[serde(default)]
    pub words_learned: u32,
}

impl WordList {
    /// 创建尚未保存的列表（空 id）
    pub fn draft(name: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            words,
            played: false,
            words_learned: 0,
        }
    }

    /// 是否尚未分配 id
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}
