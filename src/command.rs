//! Parsing of command-log lines.
//!
//! A line is a keyword optionally followed by `:` and a comma separated
//! argument list. Arguments may be quoted with `"` or `'`; quoted text keeps
//! its commas and inner whitespace.

use std::{mem, str::FromStr};

use thiserror::Error;

use crate::records::{BookId, PatronId};

/// A parsed command, ready to run against a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `addBook: id, "title", "author", "isbn"`
    AddBook {
        /// Book id
        book_id: BookId,
        /// Title
        title: String,
        /// Author
        author: String,
        /// ISBN
        isbn: String,
    },
    /// `addPatron: id, "name"`
    AddPatron {
        /// Patron id
        patron_id: PatronId,
        /// Name
        name: String,
    },
    /// `borrowBook: book_id, patron_id`
    BorrowBook {
        /// Book to lend
        book_id: BookId,
        /// Borrowing patron
        patron_id: PatronId,
    },
    /// `returnBook: book_id, patron_id`
    ReturnBook {
        /// Book to take back
        book_id: BookId,
        /// Returning patron
        patron_id: PatronId,
    },
    /// `checkBook: book_id`
    CheckBook {
        /// Book to describe
        book_id: BookId,
    },
    /// `listAvailableBooks`
    ListAvailableBooks,
    /// `listBooksByAuthor: "author"`
    ListBooksByAuthor {
        /// Author to search for
        author: String,
    },
    /// `listPatronsBooks: patron_id`
    ListPatronsBooks {
        /// Patron whose loans are listed
        patron_id: PatronId,
    },
}

impl Command {
    /// Keyword introducing this command in a log
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::AddBook { .. } => "addBook",
            Self::AddPatron { .. } => "addPatron",
            Self::BorrowBook { .. } => "borrowBook",
            Self::ReturnBook { .. } => "returnBook",
            Self::CheckBook { .. } => "checkBook",
            Self::ListAvailableBooks => "listAvailableBooks",
            Self::ListBooksByAuthor { .. } => "listBooksByAuthor",
            Self::ListPatronsBooks { .. } => "listPatronsBooks",
        }
    }
}

/// Reason a log line could not be turned into a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing but whitespace
    #[error("empty command")]
    Empty,
    /// Keyword not recognized
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// Wrong number of arguments for the keyword
    #[error("`{command}` expects {expected} argument(s), got {found}")]
    ArgumentCount {
        /// Keyword of the line
        command: String,
        /// Arguments the keyword takes
        expected: usize,
        /// Arguments on the line
        found: usize,
    },
    /// An id argument is not an integer
    #[error("invalid id `{value}` for `{command}`")]
    InvalidId {
        /// Keyword of the line
        command: String,
        /// Offending argument
        value: String,
    },
    /// A quoted argument runs to the end of the line
    #[error("unterminated quote in `{0}`")]
    UnterminatedQuote(String),
    /// Text follows the closing quote of an argument
    #[error("unexpected text after closing quote in `{0}`")]
    TextAfterQuote(String),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }
        let (keyword, rest) = line.split_once(':').unwrap_or((line, ""));
        let keyword = keyword.trim();
        let args = split_args(rest)?;

        match keyword {
            "addBook" => {
                let [book_id, title, author, isbn] = arguments::<4>(keyword, args)?;
                Ok(Self::AddBook { book_id: parse_id(keyword, &book_id)?, title, author, isbn })
            }
            "addPatron" => {
                let [patron_id, name] = arguments::<2>(keyword, args)?;
                Ok(Self::AddPatron { patron_id: parse_id(keyword, &patron_id)?, name })
            }
            "borrowBook" => {
                let [book_id, patron_id] = arguments::<2>(keyword, args)?;
                Ok(Self::BorrowBook {
                    book_id: parse_id(keyword, &book_id)?,
                    patron_id: parse_id(keyword, &patron_id)?,
                })
            }
            "returnBook" => {
                let [book_id, patron_id] = arguments::<2>(keyword, args)?;
                Ok(Self::ReturnBook {
                    book_id: parse_id(keyword, &book_id)?,
                    patron_id: parse_id(keyword, &patron_id)?,
                })
            }
            "checkBook" => {
                let [book_id] = arguments::<1>(keyword, args)?;
                Ok(Self::CheckBook { book_id: parse_id(keyword, &book_id)? })
            }
            "listAvailableBooks" => {
                arguments::<0>(keyword, args)?;
                Ok(Self::ListAvailableBooks)
            }
            "listBooksByAuthor" => {
                let [author] = arguments::<1>(keyword, args)?;
                Ok(Self::ListBooksByAuthor { author })
            }
            "listPatronsBooks" => {
                let [patron_id] = arguments::<1>(keyword, args)?;
                Ok(Self::ListPatronsBooks { patron_id: parse_id(keyword, &patron_id)? })
            }
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// Split an argument list on commas outside quotes.
///
/// Unquoted arguments are trimmed; a quote only opens at the start of an
/// argument, so apostrophes inside bare words are kept. Only whitespace may
/// follow a closing quote before the next comma.
fn split_args(input: &str) -> Result<Vec<String>, ParseError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut open_quote: Option<char> = None;

    for ch in input.chars() {
        match open_quote {
            Some(quote) if ch == quote => open_quote = None,
            None if ch == ',' => {
                args.push(finish_arg(mem::take(&mut current), quoted));
                quoted = false;
            }
            None if quoted && ch.is_whitespace() => {}
            None if quoted => return Err(ParseError::TextAfterQuote(input.trim().to_string())),
            None if matches!(ch, '"' | '\'') && current.trim().is_empty() => {
                current.clear();
                quoted = true;
                open_quote = Some(ch);
            }
            Some(_) | None => current.push(ch),
        }
    }

    if open_quote.is_some() {
        return Err(ParseError::UnterminatedQuote(input.trim().to_string()));
    }
    args.push(finish_arg(current, quoted));
    Ok(args)
}

/// Final text of an argument
fn finish_arg(text: String, quoted: bool) -> String {
    if quoted { text } else { text.trim().to_string() }
}

/// Check the argument count of `command`
fn arguments<const N: usize>(command: &str, args: Vec<String>) -> Result<[String; N], ParseError> {
    <[String; N]>::try_from(args).map_err(|args| ParseError::ArgumentCount {
        command: command.to_string(),
        expected: N,
        found: args.len(),
    })
}

/// Parse an integer id argument of `command`
fn parse_id(command: &str, value: &str) -> Result<i64, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidId {
        command: command.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_book_with_quoted_commas() {
        let command: Result<Command, _> = r#"addBook: 7, "War, and Peace", 'Leo Tolstoy', "978-0""#.parse();
        assert_eq!(
            command,
            Ok(Command::AddBook {
                book_id: 7,
                title: "War, and Peace".to_string(),
                author: "Leo Tolstoy".to_string(),
                isbn: "978-0".to_string(),
            })
        );
    }

    #[test]
    fn test_quoted_argument_keeps_inner_whitespace() {
        let command = r#"listBooksByAuthor: " Jane Doe ""#.parse::<Command>();
        assert_eq!(command, Ok(Command::ListBooksByAuthor { author: " Jane Doe ".to_string() }));
    }

    #[test]
    fn test_bare_arguments_and_spacing() {
        assert_eq!(
            "borrowBook:1,10".parse::<Command>(),
            Ok(Command::BorrowBook { book_id: 1, patron_id: 10 })
        );
        assert_eq!(
            "  returnBook :  1 ,  10 ".parse::<Command>(),
            Ok(Command::ReturnBook { book_id: 1, patron_id: 10 })
        );
        assert_eq!(
            "addPatron: 3, O'Brien".parse::<Command>(),
            Ok(Command::AddPatron { patron_id: 3, name: "O'Brien".to_string() })
        );
    }

    #[test]
    fn test_keyword_only_commands() {
        assert_eq!("listAvailableBooks".parse::<Command>(), Ok(Command::ListAvailableBooks));
        assert_eq!("listAvailableBooks:".parse::<Command>(), Ok(Command::ListAvailableBooks));
    }

    #[test]
    fn test_rejected_lines() {
        assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!(
            "deleteBook: 1".parse::<Command>(),
            Err(ParseError::UnknownCommand("deleteBook".to_string()))
        );
        assert_eq!(
            "borrowBook: 1".parse::<Command>(),
            Err(ParseError::ArgumentCount {
                command: "borrowBook".to_string(),
                expected: 2,
                found: 1,
            })
        );
        assert_eq!(
            "checkBook: one".parse::<Command>(),
            Err(ParseError::InvalidId { command: "checkBook".to_string(), value: "one".to_string() })
        );
        assert!(matches!(
            r#"addPatron: 1, "Ann"#.parse::<Command>(),
            Err(ParseError::UnterminatedQuote(_))
        ));
    }

    #[test]
    fn test_text_after_closing_quote_is_rejected() {
        assert_eq!(
            r#"addBook: 1, "Du"ne, "A", "I""#.parse::<Command>(),
            Err(ParseError::TextAfterQuote(r#"1, "Du"ne, "A", "I""#.to_string()))
        );
        assert!(matches!(
            r#"listBooksByAuthor: "Jane" "Doe""#.parse::<Command>(),
            Err(ParseError::TextAfterQuote(_))
        ));
        assert_eq!(
            r#"addPatron: 2, "Ann"  "#.parse::<Command>(),
            Ok(Command::AddPatron { patron_id: 2, name: "Ann".to_string() })
        );
    }

    #[test]
    fn test_keyword_round_trip() {
        let command = "listPatronsBooks: 4".parse::<Command>();
        assert_eq!(command.map(|c| c.keyword()), Ok("listPatronsBooks"));
    }
}
