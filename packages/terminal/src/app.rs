//! 终端应用主循环
//!
//! 管理界面与游戏界面共用一个输入流。游戏通过显式的 `play <id>` 进入，
//! id 无法解析时立即给出提示并留在管理界面。

use std::io::{BufRead, Write};

use word_wizard_core::{
    AddWord, GameError, GameSession, ListDraft, ListStore, NextStep, RandomSource, RngSource,
    StoragePort, StoreError,
};

use crate::config::Config;
use crate::error::AppResult;
use crate::game_view::{self, GameInput};
use crate::manager::{self, ManagerCommand};
use crate::sinks::{LoggingSpeech, TerminalBell};

/// 每局游戏创建一个随机源
pub type RandomFactory = Box<dyn FnMut() -> Box<dyn RandomSource>>;

enum Flow {
    Continue,
    Quit,
}

pub struct App<S, R, W> {
    store: ListStore<S>,
    draft: ListDraft,
    input: R,
    output: W,
    random: RandomFactory,
    bell: TerminalBell,
}

impl<S: StoragePort, R: BufRead, W: Write> App<S, R, W> {
    pub fn new(store: ListStore<S>, input: R, output: W) -> Self {
        Self {
            store,
            draft: ListDraft::new(),
            input,
            output,
            random: Box::new(|| -> Box<dyn RandomSource> { Box::new(RngSource::from_time()) }),
            bell: TerminalBell::default(),
        }
    }

    /// 按配置设置随机源与响铃
    pub fn configured(mut self, config: &Config) -> Self {
        if let Some(seed) = config.seed {
            let mut games = 0u64;
            self.random = Box::new(move || -> Box<dyn RandomSource> {
                let rng = RngSource::seeded(seed.wrapping_add(games));
                games += 1;
                Box::new(rng)
            });
        }
        self.bell = TerminalBell::new(config.bell);
        self
    }

    pub fn with_random(mut self, random: RandomFactory) -> Self {
        self.random = random;
        self
    }

    pub fn store(&self) -> &ListStore<S> {
        &self.store
    }

    pub fn into_store(self) -> ListStore<S> {
        self.store
    }

    pub fn run(&mut self) -> AppResult<()> {
        manager::render_banner(&mut self.output)?;
        manager::render_lists(&mut self.output, &self.store.get_all()?)?;

        loop {
            write!(self.output, "wordwizard> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            let command = match manager::parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    manager::render_warning(&mut self.output, message)?;
                    continue;
                }
            };

            if let Flow::Quit = self.handle_command(command)? {
                break;
            }
        }

        writeln!(self.output, "Bye!")?;
        Ok(())
    }

    fn handle_command(&mut self, command: ManagerCommand) -> AppResult<Flow> {
        match command {
            ManagerCommand::Lists => {
                manager::render_lists(&mut self.output, &self.store.get_all()?)?;
            }
            ManagerCommand::New(name) => {
                self.draft.clear();
                self.draft.set_name(name);
                manager::render_draft(&mut self.output, &self.draft)?;
            }
            ManagerCommand::Rename(name) => {
                self.draft.set_name(name);
                manager::render_draft(&mut self.output, &self.draft)?;
            }
            ManagerCommand::Add(word) => match self.draft.add_word(&word) {
                Ok(AddWord::Added(_)) => manager::render_draft(&mut self.output, &self.draft)?,
                Ok(AddWord::Ignored) => {}
                Err(warning) => manager::render_warning(&mut self.output, warning)?,
            },
            ManagerCommand::Remove(position) => match self.draft.remove_word(position - 1) {
                Ok(_) => manager::render_draft(&mut self.output, &self.draft)?,
                Err(warning) => manager::render_warning(&mut self.output, warning)?,
            },
            ManagerCommand::Show => manager::render_draft(&mut self.output, &self.draft)?,
            ManagerCommand::Save => self.save_draft()?,
            ManagerCommand::Edit(id) => match self.store.get(&id)? {
                Some(list) => {
                    self.draft = ListDraft::edit(&list);
                    manager::render_draft(&mut self.output, &self.draft)?;
                }
                None => manager::render_warning(&mut self.output, format!("no word list with id {id}"))?,
            },
            ManagerCommand::Delete(id) => {
                self.store.delete(&id)?;
                if self.draft.id() == id {
                    self.draft.clear();
                }
                manager::render_lists(&mut self.output, &self.store.get_all()?)?;
            }
            ManagerCommand::Play(id) => {
                self.play(&id)?;
                manager::render_lists(&mut self.output, &self.store.get_all()?)?;
            }
            ManagerCommand::Help => manager::render_help(&mut self.output)?,
            ManagerCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn save_draft(&mut self) -> AppResult<()> {
        if let Err(warning) = self.draft.validate() {
            return Ok(manager::render_warning(&mut self.output, warning)?);
        }

        match self.store.save(self.draft.to_word_list()) {
            Ok(saved) => {
                writeln!(
                    self.output,
                    "Saved \"{}\" [{}] ({} words)",
                    saved.name,
                    saved.id,
                    saved.word_count()
                )?;
                self.draft.clear();
            }
            Err(e @ (StoreError::EmptyName | StoreError::TooManyWords { .. } | StoreError::NotFound(_))) => {
                manager::render_warning(&mut self.output, e)?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn play(&mut self, id: &str) -> AppResult<()> {
        let rng = (self.random)();
        let mut session = match GameSession::start(&self.store, id, rng) {
            Ok(session) => session
                .with_audio_sink(self.bell)
                .with_speech_sink(LoggingSpeech),
            Err(e @ (GameError::ListNotFound(_) | GameError::EmptyList(_))) => {
                return Ok(manager::render_warning(&mut self.output, e)?);
            }
            Err(e) => return Err(e.into()),
        };

        game_view::render_header(&mut self.output, session.list_name())?;
        if let Some(round) = session.current_round() {
            game_view::render_round(&mut self.output, &round)?;
        }

        let mut prefill: Option<String> = None;

        while let Some(line) = self.read_line()? {
            match game_view::parse_input(&line) {
                GameInput::Quit => {
                    tracing::info!(list_id = %session.list_id(), "game abandoned");
                    writeln!(self.output, "Game abandoned, nothing was saved.")?;
                    return Ok(());
                }
                GameInput::Hint => {
                    let hint = session.request_hint();
                    if let Some(hint) = &hint {
                        prefill = Some(hint.clone());
                    }
                    game_view::render_hint(&mut self.output, hint.as_deref())?;
                }
                GameInput::Speak => {
                    session.speak_current();
                    write!(self.output, "> ")?;
                    self.output.flush()?;
                }
                GameInput::Guess(guess) => {
                    let guess = match prefill.take() {
                        Some(hint) if guess.is_empty() => hint,
                        _ => guess,
                    };

                    let outcome = session.submit_guess(&guess, &mut self.store)?;
                    game_view::render_outcome(&mut self.output, &outcome, session.total())?;

                    match &outcome.next {
                        NextStep::Round(round) => game_view::render_round(&mut self.output, round)?,
                        NextStep::Complete(summary) => {
                            game_view::render_summary(&mut self.output, summary)?;
                            return Ok(());
                        }
                    }
                }
            }
        }

        tracing::info!(list_id = %session.list_id(), "input closed during game");
        Ok(())
    }

    fn read_line(&mut self) -> AppResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
