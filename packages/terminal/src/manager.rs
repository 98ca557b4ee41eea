//! 列表管理界面
//!
//! 命令解析与输出渲染；状态变更由 [`App`](crate::app::App) 调用 `ListStore` 完成。

use std::io::{self, Write};

use word_wizard_core::{ListDraft, WordList, MAX_WORDS_PER_LIST};

/// 管理界面命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerCommand {
    Lists,
    New(String),
    Rename(String),
    Add(String),
    /// 1 开始的位置
    Remove(usize),
    Show,
    Save,
    Edit(String),
    Delete(String),
    Play(String),
    Help,
    Quit,
}

/// 解析一行输入；空行返回 `Ok(None)`
pub fn parse_command(line: &str) -> Result<Option<ManagerCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let require = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("usage: {verb} <{what}>"))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match verb.to_lowercase().as_str() {
        "lists" | "ls" => ManagerCommand::Lists,
        "new" => ManagerCommand::New(rest.to_string()),
        "rename" => ManagerCommand::Rename(require("name")?),
        "add" => ManagerCommand::Add(require("word")?),
        "remove" | "rm" => {
            let position = require("n")?
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("not a word position: {rest}"))?;
            ManagerCommand::Remove(position)
        }
        "show" => ManagerCommand::Show,
        "save" => ManagerCommand::Save,
        "edit" => ManagerCommand::Edit(require("id")?),
        "delete" | "del" => ManagerCommand::Delete(require("id")?),
        "play" => ManagerCommand::Play(require("id")?),
        "help" | "?" => ManagerCommand::Help,
        "quit" | "exit" | "q" => ManagerCommand::Quit,
        other => return Err(format!("unknown command: {other} (type `help`)")),
    };

    Ok(Some(command))
}

// ============================================================
// 渲染
// ============================================================

pub fn render_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Word Wizard Manager")?;
    writeln!(out, "Type `help` for commands.")
}

pub fn render_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  lists              show saved word lists")?;
    writeln!(out, "  new [name]         start a new list")?;
    writeln!(out, "  rename <name>      set the name of the list being edited")?;
    writeln!(out, "  add <word>         add a word (max {MAX_WORDS_PER_LIST})")?;
    writeln!(out, "  remove <n>         remove the n-th word")?;
    writeln!(out, "  show               show the list being edited")?;
    writeln!(out, "  save               save the list being edited")?;
    writeln!(out, "  edit <id>          load a saved list for editing")?;
    writeln!(out, "  delete <id>        delete a saved list")?;
    writeln!(out, "  play <id>          play a saved list")?;
    writeln!(out, "  quit               leave Word Wizard")
}

pub fn render_lists<W: Write>(out: &mut W, lists: &[WordList]) -> io::Result<()> {
    writeln!(out, "Saved Word Lists")?;
    if lists.is_empty() {
        return writeln!(out, "  (none yet - create one with `new <name>`)");
    }

    for list in lists {
        let status = if list.played {
            format!(" - played, {} learned", list.words_learned)
        } else {
            String::new()
        };
        writeln!(
            out,
            "  [{}] {} ({} words){}",
            list.id,
            list.name,
            list.word_count(),
            status
        )?;
    }
    Ok(())
}

pub fn render_draft<W: Write>(out: &mut W, draft: &ListDraft) -> io::Result<()> {
    let title = if draft.is_editing() {
        format!("Editing [{}]", draft.id())
    } else {
        "New Word List".to_string()
    };
    let name = if draft.name().is_empty() {
        "(unnamed)"
    } else {
        draft.name()
    };

    writeln!(out, "{title}: {name}")?;
    for (index, word) in draft.words().iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, word)?;
    }
    writeln!(out, "  {}/{} words", draft.words().len(), MAX_WORDS_PER_LIST)
}

pub fn render_warning<W: Write>(out: &mut W, message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "! {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(parse_command("lists"), Ok(Some(ManagerCommand::Lists)));
        assert_eq!(
            parse_command("new  Big Cats "),
            Ok(Some(ManagerCommand::New("Big Cats".to_string())))
        );
        assert_eq!(parse_command("new"), Ok(Some(ManagerCommand::New(String::new()))));
        assert_eq!(parse_command("RM 2"), Ok(Some(ManagerCommand::Remove(2))));
        assert_eq!(
            parse_command("play 1700000000000"),
            Ok(Some(ManagerCommand::Play("1700000000000".to_string())))
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("add").is_err());
        assert!(parse_command("remove 0").is_err());
        assert!(parse_command("remove x").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn renders_list_status() {
        let lists = vec![
            WordList {
                id: "1".to_string(),
                name: "Animals".to_string(),
                words: vec!["cat".to_string(), "dog".to_string()],
                played: true,
                words_learned: 2,
            },
            WordList {
                id: "2".to_string(),
                ..WordList::draft("Fruit", vec!["apple".to_string()])
            },
        ];

        let mut out = Vec::new();
        render_lists(&mut out, &lists).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("[1] Animals (2 words) - played, 2 learned"));
        assert!(text.contains("[2] Fruit (1 words)\n"));
    }
}
