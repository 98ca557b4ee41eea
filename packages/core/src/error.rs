//! 错误类型定义
//!
//! 每一层一个错误枚举：存储端口、列表仓库、草稿编辑、游戏会话。

use thiserror::Error;

use crate::models::MAX_WORDS_PER_LIST;

// ============================================================
// 存储端口错误
// ============================================================

/// 存储后端错误
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

// ============================================================
// ListStore 错误
// ============================================================

/// 列表仓库错误
///
/// `EmptyName` / `TooManyWords` 属于校验失败：调用方应以非阻塞的提示展示，
/// 存储内容保持调用前的状态。
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("list name must not be empty")]
    EmptyName,

    #[error("a list can hold at most {max} words (got {count})")]
    TooManyWords { count: usize, max: usize },

    #[error("word list not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// 是否为校验失败（而非存储故障）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::EmptyName | StoreError::TooManyWords { .. }
        )
    }

    pub(crate) fn too_many_words(count: usize) -> Self {
        StoreError::TooManyWords {
            count,
            max: MAX_WORDS_PER_LIST,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================
// 草稿编辑错误
// ============================================================

/// 草稿校验警告
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("please give the list a name")]
    EmptyName,

    #[error("add at least one word")]
    NoWords,

    #[error("a list can hold at most {max} words")]
    WordLimitReached { max: usize },

    #[error("no word at position {0}")]
    NoSuchWord(usize),
}

pub type DraftResult<T> = Result<T, DraftError>;

// ============================================================
// 游戏会话错误
// ============================================================

/// 游戏会话错误
#[derive(Error, Debug)]
pub enum GameError {
    #[error("word list not found: {0}")]
    ListNotFound(String),

    #[error("word list {0} has no words to play")]
    EmptyList(String),

    #[error("the session is already complete")]
    SessionComplete,

    #[error("the session is still in progress")]
    SessionInProgress,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type GameResult<T> = Result<T, GameError>;
