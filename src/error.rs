use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The `-s/--long` pair identifying an option in diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionName {
    pub short: char,
    pub long: String,
}

impl OptionName {
    pub fn new(short: char, long: &str) -> OptionName {
        OptionName { short, long: long.to_owned() }
    }
}

impl Display for OptionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "-{}/--{}", self.short, self.long)
    }
}

/// Argument parsing error.
#[derive(Debug, Error)]
pub enum ParseErr {
    /// A `--long` token names no registered option.
    #[error("unknown option {0}")]
    UnknownOption(String),

    /// A character of a short option cluster names no registered option.
    #[error("unknown short option -{0}")]
    UnknownShortOption(char),

    /// A non repeatable option was given more than once.
    #[error("option {0} shouldn't be specified more than once")]
    DuplicateOption(OptionName),

    /// A value taking short option sits in the middle of a cluster like `-vSv`.
    #[error("short option -{0} cannot be used in the middle of a flag list, it requires a value")]
    MisplacedValueOption(char),

    /// A value taking option is the last token.
    #[error("option {0} requires a parameter")]
    MissingValue(OptionName),

    #[error("invalid integer value \"{value}\" specified for option {option}")]
    InvalidInteger { value: String, option: OptionName },

    #[error("invalid float value \"{value}\" specified for option {option}")]
    InvalidFloat { value: String, option: OptionName },

    /// Required options that never showed up, in registration order.
    #[error("{}", describe_missing(.0))]
    MissingRequiredOption(Vec<OptionName>),

    /// An argument isn't valid unicode.
    #[error("invalid unicode in argument {0:?}")]
    InvalidUnicode(OsString),

    /// The parser has already consumed an argument vector.
    #[error("arguments have already been parsed by this parser")]
    AlreadyParsed,
}

fn describe_missing(options: &[OptionName]) -> String {
    match options {
        [single] => format!("option {} is required", single),
        _ => {
            let names = options.iter()
                .map(|o| o.to_string())
                .collect::<Vec<String>>();
            format!("options {} are required", names.join(", "))
        }
    }
}

/// Invalid option configuration, raised when a [`crate::Parser`] is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionErr {
    #[error("illegal short option name '{0}'")]
    InvalidShortName(char),

    #[error("illegal long option name '{0}'")]
    InvalidLongName(String),

    #[error("short option -{0} is defined more than once")]
    DuplicateShortName(char),

    #[error("long option --{0} is defined more than once")]
    DuplicateLongName(String),
}

/// A path option whose file can't be opened for reading.
#[derive(Debug, Error)]
#[error("option {option} requires a readable file, got \"{}\"", .path.display())]
pub struct PathErr {
    pub option: OptionName,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Every unreadable path found by [`crate::Parser::validate_path_options`].
#[derive(Debug, Error)]
#[error("{}", describe_paths(.0))]
pub struct ValidationErr(pub Vec<PathErr>);

impl ValidationErr {
    pub fn errors(&self) -> &[PathErr] {
        &self.0
    }
}

fn describe_paths(errors: &[PathErr]) -> String {
    errors.iter()
        .map(|e| e.to_string())
        .collect::<Vec<String>>()
        .join("; ")
}
