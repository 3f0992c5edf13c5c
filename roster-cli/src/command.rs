//! Line commands typed into the table view

use roster_client::{Bucket, EmployeeField};
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  show                              redraw the table
  edit <row> <field> <value>        edit a row on this page
  edit-new <row> <field> <value>    edit a new (unsaved) row
  add                               add a blank row
  rm <row> | rm-new <row>           remove a row / a new row
  page <n> | size <5|10|25>         pagination
  save | reload                     save now / fetch again
  help | quit
fields: firstName, lastName, branch";

/// One parsed input line. Rows and pages are 1-based here and 0-based
/// once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Edit {
        bucket: Bucket,
        row: usize,
        field: EmployeeField,
        value: String,
    },
    Add,
    Remove {
        bucket: Bucket,
        row: usize,
    },
    Page(usize),
    Size(usize),
    Save,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("`{0}` is not a row/page number (they start at 1)")]
    BadNumber(String),

    #[error("unknown field `{0}`, expected firstName, lastName or branch")]
    BadField(String),
}

fn one_based(token: Option<&str>, usage: &'static str) -> Result<usize, ParseError> {
    let token = token.ok_or(ParseError::Usage(usage))?;
    match token.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ParseError::BadNumber(token.to_string())),
    }
}

fn number(token: Option<&str>, usage: &'static str) -> Result<usize, ParseError> {
    let token = token.ok_or(ParseError::Usage(usage))?;
    token
        .parse()
        .map_err(|_| ParseError::BadNumber(token.to_string()))
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let mut args = rest.split_whitespace();

        match name {
            "" | "show" | "ls" => Ok(Command::Show),
            "add" => Ok(Command::Add),
            "save" => Ok(Command::Save),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "edit" | "edit-new" => {
                let usage = "edit[-new] <row> <field> <value>";
                let bucket = if name == "edit" {
                    Bucket::Current
                } else {
                    Bucket::PendingCreates
                };
                let row_token = args.next();
                let row = one_based(row_token, usage)?;
                let field_name = args.next().ok_or(ParseError::Usage(usage))?;
                let field = field_name
                    .parse()
                    .map_err(|_| ParseError::BadField(field_name.to_string()))?;
                // value is the remainder of the line, inner spaces included
                let after_row = rest.trim_start()[row_token.map_or(0, str::len)..].trim_start();
                let value = after_row[field_name.len()..].trim().to_string();
                Ok(Command::Edit {
                    bucket,
                    row,
                    field,
                    value,
                })
            }
            "rm" | "rm-new" => {
                let bucket = if name == "rm" {
                    Bucket::Current
                } else {
                    Bucket::PendingCreates
                };
                let row = one_based(args.next(), "rm[-new] <row>")?;
                Ok(Command::Remove { bucket, row })
            }
            "page" => Ok(Command::Page(one_based(args.next(), "page <n>")?)),
            "size" => Ok(Command::Size(number(args.next(), "size <5|10|25>")?)),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_keeps_spaces_in_value() {
        let cmd: Command = "edit 2  branch  New York ".parse().unwrap();
        assert_eq!(
            cmd,
            Command::Edit {
                bucket: Bucket::Current,
                row: 1,
                field: EmployeeField::Branch,
                value: "New York".to_string(),
            }
        );
    }

    #[test]
    fn test_edit_new_with_empty_value() {
        let cmd: Command = "edit-new 1 firstName".parse().unwrap();
        assert_eq!(
            cmd,
            Command::Edit {
                bucket: Bucket::PendingCreates,
                row: 0,
                field: EmployeeField::FirstName,
                value: String::new(),
            }
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!("".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("add".parse::<Command>().unwrap(), Command::Add);
        assert_eq!("  save ".parse::<Command>().unwrap(), Command::Save);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("page 3".parse::<Command>().unwrap(), Command::Page(2));
        assert_eq!("size 10".parse::<Command>().unwrap(), Command::Size(10));
        assert_eq!(
            "rm-new 2".parse::<Command>().unwrap(),
            Command::Remove {
                bucket: Bucket::PendingCreates,
                row: 1
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "frobnicate".parse::<Command>(),
            Err(ParseError::Unknown("frobnicate".into()))
        );
        assert_eq!("rm 0".parse::<Command>(), Err(ParseError::BadNumber("0".into())));
        assert_eq!("rm".parse::<Command>(), Err(ParseError::Usage("rm[-new] <row>")));
        assert_eq!(
            "edit 1 salary 10".parse::<Command>(),
            Err(ParseError::BadField("salary".into()))
        );
    }
}
