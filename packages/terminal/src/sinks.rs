//! 终端音效与朗读
//!
//! 终端没有音频播放和语音合成：音效用响铃字符代替，朗读只记录日志。

use std::io::Write;

use word_wizard_core::{AudioSink, SoundCue, SpeechSink};

/// 终端响铃
///
/// 响铃写到 stderr，避免混入游戏输出。
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: SoundCue) {
        tracing::debug!(cue = cue.as_str(), "sound cue");
        if self.enabled && cue == SoundCue::Error {
            let mut stderr = std::io::stderr();
            let _ = stderr.write_all(b"\x07");
            let _ = stderr.flush();
        }
    }
}

/// 语音合成不可用，记录要朗读的单词
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSpeech;

impl SpeechSink for LoggingSpeech {
    fn speak(&mut self, word: &str) {
        tracing::info!(word, "speech synthesis unavailable on the terminal");
    }
}
