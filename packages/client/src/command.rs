//! Parsing of terminal input lines.

use std::path::PathBuf;

/// What an input line asks the client to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Send the line as a chat message
    Chat(String),
    /// `/upload <path>`
    Upload(PathBuf),
    /// `/quit`
    Quit,
    /// `/help`
    Help,
    /// A `/command` the client does not know, or one missing its argument
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  /upload <path>  upload a file and share it with the room
  /quit           leave the chat
  /help           show this help
Anything else is sent as a chat message.";

impl InputCommand {
    /// Parse one line of input. Blank lines yield `None`.
    ///
    /// Chat text is kept verbatim, including surrounding whitespace.
    pub fn parse(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return None;
        }

        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Some(Self::Chat(line.to_string()));
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest.trim_end(), ""),
        };

        let command = match name {
            "upload" if argument.is_empty() => Self::Invalid("usage: /upload <path>".to_string()),
            "upload" => Self::Upload(PathBuf::from(argument)),
            "quit" | "exit" => Self::Quit,
            "help" => Self::Help,
            other => Self::Invalid(format!("unknown command '/{}', try /help", other)),
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_chat_verbatim() {
        // テスト項目: コマンドでない行はそのままチャットになる
        // when (操作):
        let command = InputCommand::parse("  hello  world ");

        // then (期待する結果):
        assert_eq!(
            command,
            Some(InputCommand::Chat("  hello  world ".to_string()))
        );
    }

    #[test]
    fn test_blank_line_is_ignored() {
        // テスト項目: 空行は何も送らない
        // when (操作) / then (期待する結果):
        assert_eq!(InputCommand::parse(""), None);
        assert_eq!(InputCommand::parse(" \t "), None);
    }

    #[test]
    fn test_upload_command() {
        // テスト項目: /upload はパス付きでパースされ、パスがない場合は使い方を返す
        // when (操作) / then (期待する結果):
        assert_eq!(
            InputCommand::parse("/upload ./photos/cat 1.png "),
            Some(InputCommand::Upload(PathBuf::from("./photos/cat 1.png")))
        );
        assert_eq!(
            InputCommand::parse("/upload"),
            Some(InputCommand::Invalid("usage: /upload <path>".to_string()))
        );
    }

    #[test]
    fn test_quit_and_help() {
        // テスト項目: /quit, /exit, /help がパースされる
        // when (操作) / then (期待する結果):
        assert_eq!(InputCommand::parse("/quit"), Some(InputCommand::Quit));
        assert_eq!(InputCommand::parse("/exit"), Some(InputCommand::Quit));
        assert_eq!(InputCommand::parse("/help"), Some(InputCommand::Help));
    }

    #[test]
    fn test_unknown_command() {
        // テスト項目: 未知のコマンドは送信されずエラーになる
        // when (操作):
        let command = InputCommand::parse("/dance now");

        // then (期待する結果):
        assert!(matches!(command, Some(InputCommand::Invalid(msg)) if msg.contains("/dance")));
    }
}
