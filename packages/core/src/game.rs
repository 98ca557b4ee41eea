//! GameSession - 拼词游戏会话
//!
//! 针对一个单词列表运行的内存状态机：
//!
//! ```text
//! start ──► RoundActive ──submit_guess──► RoundActive ... ──► Complete
//! ```
//!
//! 每回合从剩余词池中等概率抽取一个单词并打乱字母；无论猜对猜错，
//! 该单词都会移出词池。词池耗尽后把最终得分写回 [`ListStore`]。

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::models::WordList;
use crate::random::RandomSource;
use crate::scramble::{hint_for, scramble};
use crate::sinks::{AudioSink, NullSink, SoundCue, SpeechSink};
use crate::storage::StoragePort;
use crate::store::ListStore;

/// 达到该连胜数时触发第一档奖励
pub const ON_FIRE_STREAK: u32 = 3;
/// 达到该连胜数时触发第二档奖励
pub const WIZARD_STREAK: u32 = 6;
/// 结算界面最多显示的星星数
pub const MAX_STARS: u32 = 5;

// ============================================================
// 事件与视图类型
// ============================================================

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    RoundActive,
    Complete,
}

/// 连胜奖励
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakBonus {
    /// 连胜 3 次
    OnFire,
    /// 连胜 6 次
    Wizard,
}

impl StreakBonus {
    pub fn message(self) -> &'static str {
        match self {
            StreakBonus::OnFire => "Wow! You're on fire!",
            StreakBonus::Wizard => "Amazing! You're a Word Wizard!",
        }
    }
}

/// 单次猜测的判定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GuessFeedback {
    Correct,
    /// 猜错时揭示正确答案
    Incorrect { expected: String },
}

impl GuessFeedback {
    pub fn message(&self) -> String {
        match self {
            GuessFeedback::Correct => "Correct! Great job!".to_string(),
            GuessFeedback::Incorrect { expected } => {
                format!("Oops! The correct word was \"{expected}\". Try again!")
            }
        }
    }
}

/// 当前回合对玩家可见的信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    /// 打乱后的单词
    pub scrambled: String,
    /// 回合序号（从 1 开始）
    pub round: usize,
    /// 总回合数（列表的单词数）
    pub total: usize,
}

/// 会话结算
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub list_id: String,
    pub list_name: String,
    /// 最终得分（猜对的回合数）
    pub score: u32,
    /// 单词总数
    pub total: usize,
    /// 星级 `min(5, ceil(score / 2))`
    pub stars: u32,
    /// 结果是否写回存储；列表在游戏中被删除时为 `false`
    pub persisted: bool,
}

/// 提交猜测后的下一步
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    Round(RoundView),
    Complete(SessionSummary),
}

/// 提交猜测的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub feedback: GuessFeedback,
    pub bonus: Option<StreakBonus>,
    pub score: u32,
    pub streak: u32,
    pub next: NextStep,
}

impl GuessOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self.feedback, GuessFeedback::Correct)
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        match &self.next {
            NextStep::Complete(summary) => Some(summary),
            NextStep::Round(_) => None,
        }
    }
}

// ============================================================
// GameSession
// ============================================================

struct Round {
    word: String,
    scrambled: String,
    hint_used: bool,
}

/// 拼词游戏会话
pub struct GameSession<R> {
    list_id: String,
    list_name: String,
    total: usize,
    /// 尚未抽取的单词（不含当前回合）
    pool: Vec<String>,
    current: Option<Round>,
    score: u32,
    streak: u32,
    rounds_played: usize,
    on_fire_fired: bool,
    wizard_fired: bool,
    summary: Option<SessionSummary>,
    rng: R,
    audio: Box<dyn AudioSink>,
    speech: Box<dyn SpeechSink>,
}

impl<R: RandomSource> GameSession<R> {
    /// 根据列表 id 开始一局游戏
    ///
    /// id 无法解析时立即失败，而不是停留在加载状态。
    pub fn start<S: StoragePort>(store: &ListStore<S>, id: &str, rng: R) -> GameResult<Self> {
        let list = store
            .get(id)?
            .ok_or_else(|| GameError::ListNotFound(id.to_string()))?;
        Self::new(&list, rng)
    }

    /// 使用已加载的列表开始一局游戏
    pub fn new(list: &WordList, rng: R) -> GameResult<Self> {
        if list.words.is_empty() {
            return Err(GameError::EmptyList(list.id.clone()));
        }

        let mut session = Self {
            list_id: list.id.clone(),
            list_name: list.name.clone(),
            total: list.words.len(),
            pool: list.words.clone(),
            current: None,
            score: 0,
            streak: 0,
            rounds_played: 0,
            on_fire_fired: false,
            wizard_fired: false,
            summary: None,
            rng,
            audio: Box::new(NullSink),
            speech: Box::new(NullSink),
        };
        session.draw_round();

        tracing::info!(
            list_id = %session.list_id,
            words = session.total,
            "game session started"
        );
        Ok(session)
    }

    pub fn with_audio_sink(mut self, sink: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(sink);
        self
    }

    pub fn with_speech_sink(mut self, sink: impl SpeechSink + 'static) -> Self {
        self.speech = Box::new(sink);
        self
    }

    // ==================== 回合操作 ====================

    /// 提交猜测
    ///
    /// 忽略大小写的完全匹配。词池耗尽时调用 [`ListStore::mark_played`] 写回得分。
    pub fn submit_guess<S: StoragePort>(
        &mut self,
        guess: &str,
        store: &mut ListStore<S>,
    ) -> GameResult<GuessOutcome> {
        let round = self.current.take().ok_or(GameError::SessionComplete)?;
        self.rounds_played += 1;

        let (feedback, bonus) = if guess.to_lowercase() == round.word.to_lowercase() {
            self.score += 1;
            self.streak += 1;
            self.audio.play(SoundCue::Success);
            (GuessFeedback::Correct, self.streak_bonus())
        } else {
            self.streak = 0;
            self.audio.play(SoundCue::Error);
            (
                GuessFeedback::Incorrect {
                    expected: round.word,
                },
                None,
            )
        };

        tracing::debug!(
            list_id = %self.list_id,
            round = self.rounds_played,
            correct = matches!(feedback, GuessFeedback::Correct),
            score = self.score,
            streak = self.streak,
            "guess scored"
        );

        let next = if self.pool.is_empty() {
            NextStep::Complete(self.complete(store)?)
        } else {
            self.draw_round();
            match self.current_round() {
                Some(view) => NextStep::Round(view),
                None => NextStep::Complete(self.complete(store)?),
            }
        };

        Ok(GuessOutcome {
            feedback,
            bonus,
            score: self.score,
            streak: self.streak,
            next,
        })
    }

    /// 请求提示
    ///
    /// 每回合只生效一次：返回首尾字母可见、中间遮盖的单词，用于预填输入框。
    pub fn request_hint(&mut self) -> Option<String> {
        let round = self.current.as_mut()?;
        if round.hint_used {
            return None;
        }
        round.hint_used = true;
        Some(hint_for(&round.word))
    }

    /// 朗读当前单词
    pub fn speak_current(&mut self) -> bool {
        match &self.current {
            Some(round) => {
                self.speech.speak(&round.word);
                true
            }
            None => false,
        }
    }

    // ==================== 状态查询 ====================

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn list_name(&self) -> &str {
        &self.list_name
    }

    pub fn phase(&self) -> SessionPhase {
        if self.current.is_some() {
            SessionPhase::RoundActive
        } else {
            SessionPhase::Complete
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == SessionPhase::Complete
    }

    pub fn current_round(&self) -> Option<RoundView> {
        self.current.as_ref().map(|round| RoundView {
            scrambled: round.scrambled.clone(),
            round: self.rounds_played + 1,
            total: self.total,
        })
    }

    pub fn scrambled(&self) -> Option<&str> {
        self.current.as_ref().map(|round| round.scrambled.as_str())
    }

    /// 当前回合的答案（界面不应直接显示）
    pub fn current_word(&self) -> Option<&str> {
        self.current.as_ref().map(|round| round.word.as_str())
    }

    pub fn hint_used(&self) -> bool {
        self.current.as_ref().is_some_and(|round| round.hint_used)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// 剩余词池大小（含当前回合）
    pub fn remaining(&self) -> usize {
        self.pool.len() + usize::from(self.current.is_some())
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    // ==================== 内部实现 ====================

    fn draw_round(&mut self) {
        if self.pool.is_empty() {
            return;
        }
        let index = self.rng.next_index(self.pool.len());
        let word = self.pool.remove(index);
        let scrambled = scramble(&word, &mut self.rng);

        self.current = Some(Round {
            word,
            scrambled,
            hint_used: false,
        });
    }

    fn streak_bonus(&mut self) -> Option<StreakBonus> {
        if self.streak == ON_FIRE_STREAK && !self.on_fire_fired {
            self.on_fire_fired = true;
            return Some(StreakBonus::OnFire);
        }
        if self.streak == WIZARD_STREAK && !self.wizard_fired {
            self.wizard_fired = true;
            return Some(StreakBonus::Wizard);
        }
        None
    }

    /// 结算：先记录结果，再写回存储
    fn complete<S: StoragePort>(&mut self, store: &mut ListStore<S>) -> GameResult<SessionSummary> {
        if self.summary.is_none() {
            self.summary = Some(SessionSummary {
                list_id: self.list_id.clone(),
                list_name: self.list_name.clone(),
                score: self.score,
                total: self.total,
                stars: star_rating(self.score),
                persisted: false,
            });

            tracing::info!(
                list_id = %self.list_id,
                score = self.score,
                total = self.total,
                "game session complete"
            );
        }
        self.commit_result(store)
    }
}

impl<R> GameSession<R> {
    /// 把结算结果写回存储
    ///
    /// 结算时的写入失败后可以再次调用；已写回的结果不会重复写入。
    pub fn commit_result<S: StoragePort>(
        &mut self,
        store: &mut ListStore<S>,
    ) -> GameResult<SessionSummary> {
        let summary = self.summary.as_mut().ok_or(GameError::SessionInProgress)?;
        if !summary.persisted {
            summary.persisted = store.mark_played(&summary.list_id, summary.score)?;
            if !summary.persisted {
                tracing::warn!(
                    list_id = %summary.list_id,
                    score = summary.score,
                    "word list no longer exists, session result dropped"
                );
            }
        }
        Ok(summary.clone())
    }
}

/// 星级：每两个正确答案一颗星，最多 5 颗
pub fn star_rating(score: u32) -> u32 {
    score.div_ceil(2).min(MAX_STARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use crate::storage::MemoryStorage;
    use crate::error::{StorageError, StoreError};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const ANIMALS: &str = r#"[{"id":"1","name":"Animals","words":["cat","dog","lion"],"played":false,"wordsLearned":0}]"#;

    fn animals_store() -> ListStore<MemoryStorage> {
        ListStore::new(MemoryStorage::with_payload(ANIMALS))
    }

    fn list_of(id: &str, words: &[&str]) -> WordList {
        WordList {
            id: id.to_string(),
            name: "Test".to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
            played: false,
            words_learned: 0,
        }
    }

    #[derive(Clone, Default)]
    struct Recorder {
        cues: Rc<RefCell<Vec<SoundCue>>>,
        spoken: Rc<RefCell<Vec<String>>>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.cues.borrow_mut().push(cue);
        }
    }

    impl SpeechSink for Recorder {
        fn speak(&mut self, word: &str) {
            self.spoken.borrow_mut().push(word.to_string());
        }
    }

    #[test]
    fn test_animals_scenario() {
        let mut store = animals_store();
        let mut session = GameSession::start(&store, "1", SequenceRandom::zeros()).unwrap();

        let first = session.submit_guess("cat", &mut store).unwrap();
        assert!(first.is_correct());

        let second = session.submit_guess("god", &mut store).unwrap();
        assert_eq!(
            second.feedback,
            GuessFeedback::Incorrect {
                expected: "dog".to_string()
            }
        );
        assert_eq!(second.streak, 0);

        let third = session.submit_guess("lion", &mut store).unwrap();
        assert!(third.is_correct());
        assert_eq!(third.score, 2);
        assert_eq!(third.streak, 1);

        let summary = third.summary().unwrap();
        assert_eq!(summary.score, 2);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.stars, 1);
        assert!(summary.persisted);

        let stored = store.get("1").unwrap().unwrap();
        assert!(stored.played);
        assert_eq!(stored.words_learned, 2);
    }

    #[test]
    fn test_guess_is_case_insensitive_exact() {
        let mut store = ListStore::new(MemoryStorage::new());
        let list = list_of("x", &["Paris", "rome"]);
        let mut session = GameSession::new(&list, SequenceRandom::zeros()).unwrap();

        assert!(session.submit_guess("pARIS", &mut store).unwrap().is_correct());
        assert!(!session.submit_guess("rom", &mut store).unwrap().is_correct());
    }

    #[test]
    fn test_round_view_progress() {
        let mut store = ListStore::new(MemoryStorage::new());
        let list = list_of("x", &["one", "two"]);
        let mut session = GameSession::new(&list, SequenceRandom::zeros()).unwrap();

        let view = session.current_round().unwrap();
        assert_eq!(view.round, 1);
        assert_eq!(view.total, 2);
        assert_ne!(view.scrambled, "one");
        assert_eq!(session.remaining(), 2);

        let outcome = session.submit_guess("one", &mut store).unwrap();
        match outcome.next {
            NextStep::Round(view) => assert_eq!(view.round, 2),
            NextStep::Complete(_) => panic!("session ended early"),
        }
        assert_eq!(session.remaining(), 1);
    }

    #[test]
    fn test_streak_bonuses_fire_once() {
        let mut store = ListStore::new(MemoryStorage::new());
        let words: Vec<String> = (0..10).map(|i| format!("word{i}")).collect();
        let list = WordList {
            words,
            ..list_of("x", &[])
        };
        let mut session = GameSession::new(&list, SequenceRandom::zeros()).unwrap();

        let mut bonuses = Vec::new();
        // 对 3 次、错 1 次、再连对 6 次
        for i in 0..10 {
            let answer = session.current_word().unwrap().to_string();
            let guess = if i == 3 { "wrong".to_string() } else { answer };
            let outcome = session.submit_guess(&guess, &mut store).unwrap();
            bonuses.push(outcome.bonus);
        }

        assert_eq!(bonuses[2], Some(StreakBonus::OnFire));
        // 第二次达到 3 连胜不再触发
        assert_eq!(bonuses[6], None);
        assert_eq!(bonuses[9], Some(StreakBonus::Wizard));
        assert_eq!(bonuses.iter().flatten().count(), 2);
        assert_eq!(session.score(), 9);
        assert_eq!(session.summary().unwrap().stars, 5);
    }

    #[test]
    fn test_incorrect_resets_long_streak() {
        let mut store = ListStore::new(MemoryStorage::new());
        let list = list_of("x", &["a1", "b2", "c3", "d4", "e5"]);
        let mut session = GameSession::new(&list, SequenceRandom::zeros()).unwrap();

        for _ in 0..4 {
            let answer = session.current_word().unwrap().to_string();
            session.submit_guess(&answer, &mut store).unwrap();
        }
        assert_eq!(session.streak(), 4);

        let outcome = session.submit_guess("nope", &mut store).unwrap();
        assert_eq!(outcome.streak, 0);
        assert_eq!(outcome.bonus, None);
    }

    #[test]
    fn test_hint_once_per_round() {
        let mut store = ListStore::new(MemoryStorage::new());
        let list = list_of("x", &["elephant", "tiger"]);
        let mut session = GameSession::new(&list, SequenceRandom::zeros()).unwrap();

        assert!(!session.hint_used());
        assert_eq!(session.request_hint().as_deref(), Some("e______t"));
        assert!(session.hint_used());
        assert_eq!(session.request_hint(), None);

        session.submit_guess("elephant", &mut store).unwrap();
        assert!(!session.hint_used());
        assert_eq!(session.request_hint().as_deref(), Some("t___r"));
    }

    #[test]
    fn test_duplicates_each_played() {
        let mut store = ListStore::new(MemoryStorage::new());
        let list = list_of("x", &["echo", "echo"]);
        let mut session = GameSession::new(&list, SequenceRandom::zeros()).unwrap();

        session.submit_guess("echo", &mut store).unwrap();
        assert!(!session.is_complete());
        let last = session.submit_guess("ECHO", &mut store).unwrap();
        assert_eq!(last.summary().unwrap().score, 2);
    }

    #[test]
    fn test_submit_after_complete() {
        let mut store = ListStore::new(MemoryStorage::new());
        let list = list_of("x", &["solo"]);
        let mut session = GameSession::new(&list, SequenceRandom::zeros()).unwrap();

        session.submit_guess("solo", &mut store).unwrap();
        assert_eq!(session.phase(), SessionPhase::Complete);
        assert!(matches!(
            session.submit_guess("solo", &mut store),
            Err(GameError::SessionComplete)
        ));
        assert_eq!(session.request_hint(), None);
        assert!(!session.speak_current());
    }

    #[test]
    fn test_start_unknown_id_fails_fast() {
        let store = animals_store();
        let result = GameSession::start(&store, "404", SequenceRandom::zeros());
        assert!(matches!(result, Err(GameError::ListNotFound(id)) if id == "404"));
    }

    #[test]
    fn test_empty_list_is_not_playable() {
        let list = list_of("empty", &[]);
        let result = GameSession::new(&list, SequenceRandom::zeros());
        assert!(matches!(result, Err(GameError::EmptyList(_))));
    }

    #[test]
    fn test_deleted_list_result_dropped() {
        let mut store = animals_store();
        let mut session = GameSession::start(&store, "1", SequenceRandom::zeros()).unwrap();
        store.delete("1").unwrap();

        session.submit_guess("cat", &mut store).unwrap();
        session.submit_guess("dog", &mut store).unwrap();
        let outcome = session.submit_guess("lion", &mut store).unwrap();

        let summary = outcome.summary().unwrap();
        assert_eq!(summary.score, 3);
        assert!(!summary.persisted);
        assert!(store.get_all().unwrap().is_empty());
    }

    /// 写入可切换失败的存储
    struct FlakyStorage {
        inner: MemoryStorage,
        failing: Rc<Cell<bool>>,
    }

    impl StoragePort for FlakyStorage {
        fn load(&self) -> crate::error::StorageResult<Option<String>> {
            self.inner.load()
        }

        fn store(&mut self, payload: &str) -> crate::error::StorageResult<()> {
            if self.failing.get() {
                return Err(StorageError::Backend("disk full".to_string()));
            }
            self.inner.store(payload)
        }
    }

    #[test]
    fn test_failed_commit_can_be_retried() {
        let failing = Rc::new(Cell::new(true));
        let mut store = ListStore::new(FlakyStorage {
            inner: MemoryStorage::with_payload(ANIMALS),
            failing: Rc::clone(&failing),
        });
        let list = list_of("1", &["cat"]);
        let mut session = GameSession::new(&list, SequenceRandom::zeros()).unwrap();

        assert!(matches!(
            session.submit_guess("cat", &mut store),
            Err(GameError::Store(StoreError::Storage(_)))
        ));
        assert!(session.is_complete());
        let pending = session.summary().unwrap();
        assert_eq!(pending.score, 1);
        assert!(!pending.persisted);

        failing.set(false);
        let summary = session.commit_result(&mut store).unwrap();
        assert!(summary.persisted);
        assert_eq!(session.summary(), Some(&summary));

        let stored = store.get("1").unwrap().unwrap();
        assert!(stored.played);
        assert_eq!(stored.words_learned, 1);
    }

    #[test]
    fn test_commit_before_complete() {
        let mut store = animals_store();
        let mut session = GameSession::start(&store, "1", SequenceRandom::zeros()).unwrap();
        assert!(matches!(
            session.commit_result(&mut store),
            Err(GameError::SessionInProgress)
        ));
    }

    #[test]
    fn test_sinks_receive_events() {
        let recorder = Recorder::default();
        let mut store = animals_store();
        let mut session = GameSession::start(&store, "1", SequenceRandom::zeros())
            .unwrap()
            .with_audio_sink(recorder.clone())
            .with_speech_sink(recorder.clone());

        assert!(session.speak_current());
        session.submit_guess("cat", &mut store).unwrap();
        session.submit_guess("cow", &mut store).unwrap();

        assert_eq!(*recorder.spoken.borrow(), vec!["cat".to_string()]);
        assert_eq!(
            *recorder.cues.borrow(),
            vec![SoundCue::Success, SoundCue::Error]
        );
    }

    #[test]
    fn test_star_rating() {
        assert_eq!(star_rating(0), 0);
        assert_eq!(star_rating(1), 1);
        assert_eq!(star_rating(2), 1);
        assert_eq!(star_rating(3), 2);
        assert_eq!(star_rating(10), 5);
    }
}
