//! Commands understood by the interactive comparison prompt

use crate::types::Choice;

/// One line of user input at the comparison prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    /// Judge the pair currently shown
    Choose(Choice),
    /// Put the named item into the first slot
    ReplaceFirst(String),
    /// Put the named item into the second slot
    ReplaceSecond(String),
    /// Print the top of the leaderboard (everything if no limit)
    Top(Option<usize>),
    /// Save without quitting
    Save,
    /// Show the command summary
    Help,
    /// Save and quit
    Quit,
}

pub const HELP: &str = "\
  1, l    first item is better
  2, r    second item is better
  d, s    draw / skip
  a NAME  show NAME in the first slot
  b NAME  show NAME in the second slot
  t [N]   show the top N items (all if omitted)
  w       save ratings
  h, ?    this help
  q       save and quit";

/// Parse a prompt line; the error is a message to show the user
pub fn parse_command(line: &str) -> Result<PromptCommand, String> {
    let line = line.trim();
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_lowercase().as_str() {
        "1" | "l" | "left" => PromptCommand::Choose(Choice::First),
        "2" | "r" | "right" => PromptCommand::Choose(Choice::Second),
        "d" | "s" | "draw" | "skip" => PromptCommand::Choose(Choice::Draw),
        "a" | "b" if rest.is_empty() => {
            return Err(format!("'{}' needs an item name", keyword));
        }
        "a" => PromptCommand::ReplaceFirst(rest.to_string()),
        "b" => PromptCommand::ReplaceSecond(rest.to_string()),
        "t" | "top" if rest.is_empty() => PromptCommand::Top(None),
        "t" | "top" => {
            let limit = rest
                .parse()
                .map_err(|_| format!("Not a number: {}", rest))?;
            PromptCommand::Top(Some(limit))
        }
        "w" | "save" => PromptCommand::Save,
        "h" | "?" | "help" => PromptCommand::Help,
        "q" | "quit" => PromptCommand::Quit,
        "" => return Err("Empty command, type h for help".to_string()),
        other => return Err(format!("Unknown command '{}', type h for help", other)),
    };

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices() {
        assert_eq!(parse_command("1"), Ok(PromptCommand::Choose(Choice::First)));
        assert_eq!(parse_command(" L "), Ok(PromptCommand::Choose(Choice::First)));
        assert_eq!(parse_command("r"), Ok(PromptCommand::Choose(Choice::Second)));
        assert_eq!(parse_command("skip"), Ok(PromptCommand::Choose(Choice::Draw)));
    }

    #[test]
    fn test_slot_replacement_keeps_spaces_in_names() {
        assert_eq!(
            parse_command("a holiday - beach.jpg"),
            Ok(PromptCommand::ReplaceFirst("holiday - beach.jpg".to_string()))
        );
        assert_eq!(
            parse_command("b  x.png"),
            Ok(PromptCommand::ReplaceSecond("x.png".to_string()))
        );
        assert!(parse_command("a").is_err());
    }

    #[test]
    fn test_top() {
        assert_eq!(parse_command("t"), Ok(PromptCommand::Top(None)));
        assert_eq!(parse_command("top 5"), Ok(PromptCommand::Top(Some(5))));
        assert!(parse_command("t five").is_err());
    }

    #[test]
    fn test_misc_commands() {
        assert_eq!(parse_command("w"), Ok(PromptCommand::Save));
        assert_eq!(parse_command("?"), Ok(PromptCommand::Help));
        assert_eq!(parse_command("q"), Ok(PromptCommand::Quit));
        assert!(parse_command("").is_err());
        assert!(parse_command("xyz").is_err());
    }
}
