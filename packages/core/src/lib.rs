//! # word-wizard-core - 单词列表与拼词游戏核心
//!
//! 本 crate 提供 Word Wizard 的纯 Rust 核心逻辑:
//!
//! - **ListStore** - 单词列表的持久化与增删改查，每次变更整体写回存储
//! - **ListDraft** - 列表管理界面中正在编辑的草稿
//! - **GameSession** - 打乱字母、猜词、计分与连胜的回合状态机
//!
//! ## 模块结构
//!
//! - [`models`] - 数据模型 (`WordList`)
//! - [`storage`] - 存储端口 (`StoragePort`) 与内存实现
//! - [`store`] - 列表仓库 (`ListStore`)
//! - [`draft`] - 列表草稿编辑
//! - [`random`] - 可注入的随机源
//! - [`scramble`] - 字母打乱与提示
//! - [`game`] - 游戏会话状态机
//! - [`sinks`] - 音效 / 朗读输出端口
//! - [`error`] - 错误类型
//!
//! ## 使用示例
//!
//! ```rust
//! use word_wizard_core::{GameSession, ListStore, MemoryStorage, SequenceRandom, WordList};
//!
//! let mut store = ListStore::new(MemoryStorage::new());
//! let saved = store
//!     .save(WordList::draft("Animals", vec!["cat".into()]))
//!     .unwrap();
//!
//! let mut session = GameSession::start(&store, &saved.id, SequenceRandom::zeros()).unwrap();
//! let outcome = session.submit_guess("CAT", &mut store).unwrap();
//! assert!(outcome.is_correct());
//! assert!(session.is_complete());
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod draft;
pub mod error;
pub mod game;
pub mod models;
pub mod random;
pub mod scramble;
pub mod sinks;
pub mod storage;
pub mod store;

// ============================================================================
// 重新导出
// ============================================================================

pub use draft::{AddWord, ListDraft};
pub use error::{
    DraftError, DraftResult, GameError, GameResult, StorageError, StorageResult, StoreError,
    StoreResult,
};
pub use game::{
    star_rating, GameSession, GuessFeedback, GuessOutcome, NextStep, RoundView, SessionPhase,
    SessionSummary, StreakBonus,
};
pub use models::{WordList, MAX_WORDS_PER_LIST};
pub use random::{RandomSource, RngSource, SequenceRandom};
pub use scramble::{hint_for, scramble};
pub use sinks::{AudioSink, NullSink, SoundCue, SpeechSink};
pub use storage::{MemoryStorage, StoragePort, WORD_LISTS_KEY};
pub use store::ListStore;
