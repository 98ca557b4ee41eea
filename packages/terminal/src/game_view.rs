//! 游戏界面
//!
//! 输入解析与输出渲染，回合逻辑全部在 [`GameSession`](word_wizard_core::GameSession) 中。

use std::io::{self, Write};

use word_wizard_core::{GuessOutcome, RoundView, SessionSummary};

/// 游戏界面输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameInput {
    Guess(String),
    Hint,
    Speak,
    Quit,
}

/// 以 `:` 开头的是界面命令，其余作为猜测
///
/// 终端输入的首尾空白不属于猜测本身，统一去掉后再交给核心做精确比较。
pub fn parse_input(line: &str) -> GameInput {
    let line = line.trim();
    match line {
        ":hint" | ":h" => GameInput::Hint,
        ":speak" | ":s" => GameInput::Speak,
        ":quit" | ":q" => GameInput::Quit,
        _ => GameInput::Guess(line.to_string()),
    }
}

pub fn render_header<W: Write>(out: &mut W, list_name: &str) -> io::Result<()> {
    writeln!(out, "Word Wizard: {list_name}")?;
    writeln!(out, "(:hint for a hint, :speak to hear the word, :quit to go back)")
}

pub fn render_round<W: Write>(out: &mut W, round: &RoundView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Round {}/{}", round.round, round.total)?;
    writeln!(out, "Unscramble this word: {}", round.scrambled)?;
    write!(out, "> ")?;
    out.flush()
}

pub fn render_hint<W: Write>(out: &mut W, hint: Option<&str>) -> io::Result<()> {
    match hint {
        Some(hint) => {
            writeln!(out, "Hint: {hint}  (press Enter to submit it as your guess)")?;
        }
        None => writeln!(out, "You already used the hint for this word.")?,
    }
    write!(out, "> ")?;
    out.flush()
}

pub fn render_outcome<W: Write>(out: &mut W, outcome: &GuessOutcome, total: usize) -> io::Result<()> {
    writeln!(out, "{}", outcome.feedback.message())?;
    if let Some(bonus) = outcome.bonus {
        writeln!(out, "*** {} ***", bonus.message())?;
    }
    writeln!(
        out,
        "Score: {}/{}  Streak: {}",
        outcome.score, total, outcome.streak
    )
}

pub fn render_summary<W: Write>(out: &mut W, summary: &SessionSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Game Over!")?;
    writeln!(out, "Congratulations! You've completed the game.")?;
    writeln!(out, "Final Score: {}/{}", summary.score, summary.total)?;
    writeln!(out, "{}", "*".repeat(summary.stars as usize))
}
