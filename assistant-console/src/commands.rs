//! Prompt line parsing.
//!
//! A plain line is a question: it replaces the pending question and asks it
//! (the "Enter" action). Lines starting with `:name` are console commands.
//! A question that itself starts with `:` is typed as `::...`, or as
//! `:ask <text>`; a lone `:` followed by whitespace is also taken as text.

use crate::error_handler::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Edit the question to this text, then ask.
    Question(String),
    /// Ask the current question again.
    Ask,
    Clear,
    Copy,
    Docs,
    Doc(String),
    Health,
    Feedback {
        helpful: bool,
        comment: Option<String>,
    },
    Help,
    Quit,
}

pub const HELP: &str = "\
Type a question and press Enter to ask it.

  :ask                        ask the current question again
  :ask <text>                 ask <text> (also ::<text> for text starting with ':')
  :clear                      reset the question and the answer
  :copy                       copy the answer to the clipboard
  :docs                       list indexed policy documents
  :doc <id>                   show one document
  :health                     probe the answering service
  :feedback up|down [comment] rate the shown answer
  :help                       show this help
  :quit                       exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let Some(rest) = line.trim_start().strip_prefix(':') else {
            return Ok(Command::Question(line.to_string()));
        };
        if rest.starts_with(':') {
            return Ok(Command::Question(rest.to_string()));
        }
        if rest.trim().is_empty() || rest.starts_with(char::is_whitespace) {
            return Ok(Command::Question(line.to_string()));
        }

        let rest = rest.trim();
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "ask" if arg.is_empty() => Ok(Command::Ask),
            "ask" => Ok(Command::Question(arg.to_string())),
            "clear" => Ok(Command::Clear),
            "copy" => Ok(Command::Copy),
            "docs" => Ok(Command::Docs),
            "doc" if arg.is_empty() => Err(CommandError::Usage(":doc <id>")),
            "doc" => Ok(Command::Doc(arg.to_string())),
            "health" => Ok(Command::Health),
            "feedback" => parse_feedback(arg),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_feedback(arg: &str) -> Result<Command, CommandError> {
    const USAGE: &str = ":feedback up|down [comment]";
    let (vote, comment) = match arg.split_once(char::is_whitespace) {
        Some((vote, comment)) => (vote, comment.trim()),
        None => (arg, ""),
    };
    let helpful = match vote {
        "up" | "+" | "yes" => true,
        "down" | "-" | "no" => false,
        _ => return Err(CommandError::Usage(USAGE)),
    };
    Ok(Command::Feedback {
        helpful,
        comment: (!comment.is_empty()).then(|| comment.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_questions_kept_verbatim() {
        assert_eq!(
            Command::parse("  How many casual leaves? ").unwrap(),
            Command::Question("  How many casual leaves? ".into())
        );
        assert_eq!(Command::parse("").unwrap(), Command::Question(String::new()));
    }

    #[test]
    fn commands_and_arguments() {
        assert_eq!(Command::parse(":ask").unwrap(), Command::Ask);
        assert_eq!(Command::parse(" :clear ").unwrap(), Command::Clear);
        assert_eq!(Command::parse(":q").unwrap(), Command::Quit);
        assert_eq!(
            Command::parse(":doc  HR-04 ").unwrap(),
            Command::Doc("HR-04".into())
        );
        assert_eq!(
            Command::parse(":feedback down  wrong year ").unwrap(),
            Command::Feedback {
                helpful: false,
                comment: Some("wrong year".into())
            }
        );
        assert_eq!(
            Command::parse(":feedback up").unwrap(),
            Command::Feedback {
                helpful: true,
                comment: None
            }
        );
    }

    #[test]
    fn questions_starting_with_a_colon_can_be_asked() {
        assert_eq!(
            Command::parse(": is WFH allowed?").unwrap(),
            Command::Question(": is WFH allowed?".into())
        );
        assert_eq!(
            Command::parse("::docs policy?").unwrap(),
            Command::Question(":docs policy?".into())
        );
        assert_eq!(
            Command::parse(":ask :docs are they public?").unwrap(),
            Command::Question(":docs are they public?".into())
        );
        assert_eq!(Command::parse(":ask").unwrap(), Command::Ask);
    }

    #[test]
    fn bad_commands_are_reported() {
        assert_eq!(
            Command::parse(":doc"),
            Err(CommandError::Usage(":doc <id>"))
        );
        assert!(matches!(
            Command::parse(":feedback maybe"),
            Err(CommandError::Usage(_))
        ));
        assert_eq!(
            Command::parse(":nope"),
            Err(CommandError::Unknown("nope".into()))
        );
    }
}
