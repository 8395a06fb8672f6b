/*!
 * Session Commands
 * Line-oriented command parsing for the simulator driver
 */

use crate::core::types::Size;
use crate::memory::FitStrategy;
use miette::Diagnostic;
use thiserror::Error;

/// Command parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    #[diagnostic(code(command::unknown), help("Type `help` for the list of commands."))]
    Unknown(String),

    #[error("`{command}` expects {argument}")]
    #[diagnostic(code(command::missing_argument))]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("`{command}` takes no more than {max} arguments")]
    #[diagnostic(code(command::too_many_arguments))]
    TooManyArguments { command: &'static str, max: usize },

    #[error("Invalid number for {argument}: {value:?}")]
    #[diagnostic(
        code(command::invalid_number),
        help("Sizes are non-negative whole numbers.")
    )]
    InvalidNumber { argument: &'static str, value: String },

    #[error("Unknown fit type: {0}")]
    #[diagnostic(code(command::unknown_strategy), help("Use one of: first, next, best, worst."))]
    UnknownStrategy(String),
}

/// One user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init { total_size: Size },
    Alloc { owner: String, size: Size, strategy: FitStrategy },
    Free { owner: String },
    Check,
    Compact,
    Threshold { size: Size },
    Stats,
    Show,
    Log,
    Json,
    Help,
}

pub const HELP_TEXT: &str = "\
Commands:
  init <size>                          reset the region to one free block
  alloc <owner> <size> [first|next|best|worst]
                                       place an allocation (default: first fit)
  free <owner>                         release an owner's allocation
  check                                look for fragments below the threshold
  compact                              defragment when small fragments exist
  threshold <size>                     set the fragment threshold
  stats | show | log | json | help";

impl Command {
    /// Parse one input line; blank lines and `#` comments yield `None`
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = match line.split_once('#') {
            Some((before, _)) => before,
            None => line,
        };
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match keyword.to_ascii_lowercase().as_str() {
            "init" => {
                expect_at_most("init", &args, 1)?;
                Command::Init {
                    total_size: parse_size(args.first(), "init", "a total size", "size")?,
                }
            }
            "alloc" | "allocate" => {
                expect_at_most("alloc", &args, 3)?;
                let owner = args
                    .first()
                    .ok_or(CommandError::MissingArgument {
                        command: "alloc",
                        argument: "an owner and a size",
                    })?
                    .to_string();
                let size = parse_size(args.get(1), "alloc", "a size", "size")?;
                let strategy = match args.get(2) {
                    Some(raw) => raw
                        .parse::<FitStrategy>()
                        .map_err(|_| CommandError::UnknownStrategy(raw.to_string()))?,
                    None => FitStrategy::First,
                };
                Command::Alloc {
                    owner,
                    size,
                    strategy,
                }
            }
            "free" | "dealloc" => {
                expect_at_most("free", &args, 1)?;
                let owner = args.first().ok_or(CommandError::MissingArgument {
                    command: "free",
                    argument: "an owner",
                })?;
                Command::Free {
                    owner: owner.to_string(),
                }
            }
            "threshold" => {
                expect_at_most("threshold", &args, 1)?;
                Command::Threshold {
                    size: parse_size(args.first(), "threshold", "a fragment size", "threshold")?,
                }
            }
            "check" => no_args("check", &args, Command::Check)?,
            "compact" => no_args("compact", &args, Command::Compact)?,
            "stats" => no_args("stats", &args, Command::Stats)?,
            "show" => no_args("show", &args, Command::Show)?,
            "log" => no_args("log", &args, Command::Log)?,
            "json" => no_args("json", &args, Command::Json)?,
            "help" | "?" => Command::Help,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }

    /// Keyword used for tracing spans
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init { .. } => "init",
            Command::Alloc { .. } => "alloc",
            Command::Free { .. } => "free",
            Command::Check => "check",
            Command::Compact => "compact",
            Command::Threshold { .. } => "threshold",
            Command::Stats => "stats",
            Command::Show => "show",
            Command::Log => "log",
            Command::Json => "json",
            Command::Help => "help",
        }
    }
}

fn expect_at_most(command: &'static str, args: &[&str], max: usize) -> Result<(), CommandError> {
    if args.len() > max {
        return Err(CommandError::TooManyArguments { command, max });
    }
    Ok(())
}

fn no_args(command: &'static str, args: &[&str], parsed: Command) -> Result<Command, CommandError> {
    expect_at_most(command, args, 0)?;
    Ok(parsed)
}

fn parse_size(
    raw: Option<&&str>,
    command: &'static str,
    missing: &'static str,
    argument: &'static str,
) -> Result<Size, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument {
        command,
        argument: missing,
    })?;
    raw.parse::<Size>().map_err(|_| CommandError::InvalidNumber {
        argument,
        value: raw.to_string(),
    })
}
