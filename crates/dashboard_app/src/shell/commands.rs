use std::str::FromStr;

use dashboard_core::{RecordId, SortKey};

pub const HELP: &str = "\
commands:
  add <url>       submit a URL for analysis (http/https only)
  search [term]   filter by URL or title; empty term clears the filter
  sort <key>      url|title|status|html|internal|external|created|updated
                  (repeating the active key flips the direction)
  next / prev     page navigation
  select <id>     toggle one row's selection
  select-page     select every row on the visible page
  clear           clear the whole selection
  delete          delete the selected records (asks for confirmation)
  rerun           re-run analysis for the selected records
  open <id>       open a record's detail view
  close           dismiss the detail view
  refresh         fetch the dataset now
  show            print the current table
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Search(String),
    Sort(SortKey),
    Next,
    Prev,
    Select(RecordId),
    SelectPage,
    Clear,
    Delete,
    Rerun,
    Open(RecordId),
    Close,
    Refresh,
    Show,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match head {
        "add" => {
            if rest.is_empty() {
                Err("usage: add <url>".to_string())
            } else {
                Ok(Command::Add(rest.to_string()))
            }
        }
        "search" => Ok(Command::Search(rest.to_string())),
        "sort" => SortKey::from_str(rest).map(Command::Sort),
        "next" | "n" => Ok(Command::Next),
        "prev" | "p" => Ok(Command::Prev),
        "select" => parse_id(rest).map(Command::Select),
        "select-page" => Ok(Command::SelectPage),
        "clear" => Ok(Command::Clear),
        "delete" => Ok(Command::Delete),
        "rerun" => Ok(Command::Rerun),
        "open" => parse_id(rest).map(Command::Open),
        "close" => Ok(Command::Close),
        "refresh" | "r" => Ok(Command::Refresh),
        "show" | "ls" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}'; try 'help'")),
    }
}

fn parse_id(raw: &str) -> Result<RecordId, String> {
    raw.parse::<RecordId>()
        .map_err(|_| format!("expected a record id, got '{raw}'"))
}
