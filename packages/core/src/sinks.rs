//! 音效与朗读输出端口
//!
//! 核心只向这两个端口写入事件，不消费任何返回值。

use serde::{Deserialize, Serialize};

/// 音效类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Success,
    Error,
}

impl SoundCue {
    pub fn as_str(self) -> &'static str {
        match self {
            SoundCue::Success => "success",
            SoundCue::Error => "error",
        }
    }
}

/// 音效输出
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// 朗读输出
pub trait SpeechSink {
    fn speak(&mut self, word: &str);
}

/// 丢弃所有输出
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _cue: SoundCue) {}
}

impl SpeechSink for NullSink {
    fn speak(&mut self, _word: &str) {}
}
