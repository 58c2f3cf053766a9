//! Chat command grammar.
//!
//! Incoming chat text can steer the map through exactly three fixed,
//! case-insensitive patterns. The first matching pattern wins and anything
//! else is plain conversation, silently ignored by the interpreter.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::FilterTag;

/// A recognized map command extracted from chat text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// "center the map on X" - treat X as a location search query.
    CenterOn(String),
    /// "add TAG filter" - enable a filter tag and refresh.
    AddFilter(FilterTag),
    /// "remove TAG filter" - disable a filter tag and refresh.
    RemoveFilter(FilterTag),
}

/// One line of chat history, either side of the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
}

static CENTER_ON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)center the map on (.+)").unwrap());
static ADD_FILTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)add (historical|natural|cultural) filter").unwrap());
static REMOVE_FILTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)remove (historical|natural|cultural) filter").unwrap());

/// Match chat text against the command grammar. Returns None for anything
/// outside the three patterns.
pub fn parse(text: &str) -> Option<Command> {
    if let Some(captures) = CENTER_ON.captures(text) {
        return Some(Command::CenterOn(captures[1].trim().to_string()));
    }

    if let Some(captures) = ADD_FILTER.captures(text) {
        let tag = FilterTag::from_str(&captures[1].to_lowercase())?;
        return Some(Command::AddFilter(tag));
    }

    if let Some(captures) = REMOVE_FILTER.captures(text) {
        let tag = FilterTag::from_str(&captures[1].to_lowercase())?;
        return Some(Command::RemoveFilter(tag));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_command() {
        assert_eq!(
            parse("center the map on Rome"),
            Some(Command::CenterOn("Rome".to_string()))
        );
    }

    #[test]
    fn test_center_command_case_insensitive() {
        assert_eq!(
            parse("Center the Map on New York City"),
            Some(Command::CenterOn("New York City".to_string()))
        );
    }

    #[test]
    fn test_add_filter_command() {
        assert_eq!(
            parse("add historical filter"),
            Some(Command::AddFilter(FilterTag::Historical))
        );
        assert_eq!(
            parse("please ADD NATURAL FILTER now"),
            Some(Command::AddFilter(FilterTag::Natural))
        );
    }

    #[test]
    fn test_remove_filter_command() {
        assert_eq!(
            parse("remove natural filter"),
            Some(Command::RemoveFilter(FilterTag::Natural))
        );
        assert_eq!(
            parse("remove cultural filter"),
            Some(Command::RemoveFilter(FilterTag::Cultural))
        );
    }

    #[test]
    fn test_unknown_tag_is_not_a_command() {
        assert_eq!(parse("add modern filter"), None);
        assert_eq!(parse("remove ancient filter"), None);
    }

    #[test]
    fn test_plain_conversation_ignored() {
        assert_eq!(parse("hello there"), None);
        assert_eq!(parse("what landmarks are nearby?"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_first_match_wins() {
        // A message matching the center pattern is a center command even if
        // it also mentions filters.
        assert_eq!(
            parse("center the map on add natural filter"),
            Some(Command::CenterOn("add natural filter".to_string()))
        );
    }
}
