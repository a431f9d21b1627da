//! Interactive command parsing.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scroll(usize),
    Pixels(u32),
    Resize(usize),
    Toggle(String),
    Expand(String),
    Collapse(String),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a number")]
    NotANumber(String),
}

pub const HELP: &str = "\
commands:
  scroll <row>     first visible row
  pixels <px>      scroll position in pixels
  resize <rows>    visible row count
  toggle <id>      expand or collapse a visible row
  expand <id>      expand a visible row
  collapse <id>    collapse a visible row
  show             print the current page again
  help             this text
  quit             exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let arg = words.next();

        match name {
            "scroll" | "s" => number(arg, "scroll", "a row index").map(Command::Scroll),
            "pixels" | "px" => number(arg, "pixels", "a pixel offset").map(Command::Pixels),
            "resize" | "r" => number(arg, "resize", "a row count").map(Command::Resize),
            "toggle" | "t" => id(arg, "toggle").map(Command::Toggle),
            "expand" | "e" => id(arg, "expand").map(Command::Expand),
            "collapse" | "c" => id(arg, "collapse").map(Command::Collapse),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn number<T: FromStr>(
    arg: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument { command, expected })?;
    arg.parse()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))
}

fn id(arg: Option<&str>, command: &'static str) -> Result<String, CommandError> {
    arg.map(str::to_string).ok_or(CommandError::MissingArgument {
        command,
        expected: "an item id",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("scroll 40".parse::<Command>(), Ok(Command::Scroll(40)));
        assert_eq!("px 96".parse::<Command>(), Ok(Command::Pixels(96)));
        assert_eq!("  resize   12 ".parse::<Command>(), Ok(Command::Resize(12)));
        assert_eq!("t 3.1".parse::<Command>(), Ok(Command::Toggle("3.1".to_string())));
        assert_eq!("collapse 0".parse::<Command>(), Ok(Command::Collapse("0".to_string())));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "jump 3".parse::<Command>(),
            Err(CommandError::Unknown("jump".to_string()))
        );
        assert_eq!(
            "scroll x".parse::<Command>(),
            Err(CommandError::NotANumber("x".to_string()))
        );
        assert!(matches!(
            "expand".parse::<Command>(),
            Err(CommandError::MissingArgument { command: "expand", .. })
        ));
    }
}
