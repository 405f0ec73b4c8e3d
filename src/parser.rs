use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::fmt::{Debug, Formatter};
use std::process::exit;

use tracing::{debug, trace};

use crate::error::{OptionErr, ParseErr, PathErr, ValidationErr};
use crate::format::{render_options, UsageFormatter};
use crate::option::CliOption;
use crate::util::{check_readable, OptionValidator};

/// An output function receiving error or usage text.
pub type Sink<'a> = Box<dyn FnMut(&str) + 'a>;

fn stderr_sink<'a>() -> Sink<'a> {
    Box::new(|msg: &str| eprint!("{}", msg))
}

/// A builder struct to create [`Parser`].
pub struct ParserBuilder<'a> {
    options: Vec<CliOption<'a>>,
    error_sink: Sink<'a>,
    usage_sink: Sink<'a>,
}

impl<'a> ParserBuilder<'a> {
    /// Build the [`Parser`].
    ///
    /// # Error
    ///
    /// Returns an error if an option name is invalid, or if two options share
    /// a short or a long name.
    pub fn build(self) -> Result<Parser<'a>, OptionErr> {
        let mut shorts = HashSet::new();
        let mut longs = HashSet::new();
        for option in self.options.iter() {
            OptionValidator::validate_short(option.short_name())?;
            OptionValidator::validate_long(option.long_name())?;

            if !shorts.insert(option.short_name()) {
                return Err(OptionErr::DuplicateShortName(option.short_name()));
            }
            if !longs.insert(option.long_name()) {
                return Err(OptionErr::DuplicateLongName(option.long_name().to_owned()));
            }
        }

        Ok(Parser {
            options: self.options,
            remaining: Vec::new(),
            program_name: None,
            parsed: false,
            error_sink: self.error_sink,
            usage_sink: self.usage_sink,
        })
    }

    /// Set where error diagnostics go, standard error by default.
    pub fn error_sink(mut self, sink: impl FnMut(&str) + 'a) -> Self {
        self.error_sink = Box::new(sink);
        self
    }

    /// Set where usage listings go, standard error by default.
    pub fn usage_sink(mut self, sink: impl FnMut(&str) + 'a) -> Self {
        self.usage_sink = Box::new(sink);
        self
    }
}

/// The parser writing command line options into their bound variables.
///
/// A parser consumes a single argument vector. The bound variables are
/// borrowed for as long as the parser lives, drop it (or call
/// [`Parser::into_remaining`]) to read them.
pub struct Parser<'a> {
    options: Vec<CliOption<'a>>,
    remaining: Vec<String>,
    program_name: Option<String>,
    parsed: bool,
    error_sink: Sink<'a>,
    usage_sink: Sink<'a>,
}

impl<'a> Parser<'a> {
    /// Create a parser reporting to standard error.
    ///
    /// Also see [`Parser::builder`].
    pub fn new(options: Vec<CliOption<'a>>) -> Result<Parser<'a>, OptionErr> {
        Self::builder(options).build()
    }

    /// Get the builder to config parser.
    pub fn builder(options: Vec<CliOption<'a>>) -> ParserBuilder<'a> {
        ParserBuilder {
            options,
            error_sink: stderr_sink(),
            usage_sink: stderr_sink(),
        }
    }

    /// The registered options, in registration order.
    pub fn options(&self) -> &[CliOption<'a>] {
        &self.options
    }

    /// Arguments not related to any option, in the order they were given.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    /// Consume the parser, releasing the bound variables.
    pub fn into_remaining(self) -> Vec<String> {
        self.remaining
    }

    /// The first argument, typically the executable path.
    pub fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }

    /// Parse arguments from `env::args_os()`.
    ///
    /// Also see [`Self::parse_args_os`], [`Self::parse_or_exit`].
    pub fn parse(&mut self) -> Result<(), ParseErr> {
        self.parse_args_os(env::args_os())
    }

    /// Parse arguments from `env::args_os()`, printing the error and help message
    /// then exiting with status 1 on failure.
    pub fn parse_or_exit(&mut self, formatter: &UsageFormatter) {
        if self.parse().is_err() {
            self.print_help(formatter);
            exit(1);
        }
    }

    /// Parse `arguments`, the first of which is the program name.
    ///
    /// # Error
    ///
    /// Parsing stops at the first malformed token. Required options are
    /// checked once every token is consumed and all missing ones are
    /// reported together. The error is also written to the error sink.
    pub fn parse_args<I, S>(&mut self, arguments: I) -> Result<(), ParseErr>
        where I: IntoIterator<Item = S>, S: AsRef<str> {
        let result = self.parse_inner(arguments);
        if let Err(err) = &result {
            self.report_error(&err.to_string());
        }
        result
    }

    /// Parse OS strings, the first of which is the program name.
    ///
    /// # Error
    ///
    /// Fails with [`ParseErr::InvalidUnicode`] before any token is handled if
    /// an argument isn't valid unicode, otherwise behaves like [`Self::parse_args`].
    pub fn parse_args_os<I, S>(&mut self, arguments: I) -> Result<(), ParseErr>
        where I: IntoIterator<Item = S>, S: Into<OsString> {
        let arguments = arguments.into_iter()
            .map(|arg| arg.into().into_string().map_err(ParseErr::InvalidUnicode))
            .collect::<Result<Vec<String>, ParseErr>>();

        match arguments {
            Ok(arguments) => self.parse_args(arguments),
            Err(err) => {
                let err = if self.parsed { ParseErr::AlreadyParsed } else { err };
                self.parsed = true;
                self.report_error(&err.to_string());
                Err(err)
            }
        }
    }

    fn parse_inner<I, S>(&mut self, arguments: I) -> Result<(), ParseErr>
        where I: IntoIterator<Item = S>, S: AsRef<str> {
        if self.parsed {
            return Err(ParseErr::AlreadyParsed);
        }
        self.parsed = true;

        let mut arguments = arguments.into_iter();
        self.program_name = arguments.next().map(|name| name.as_ref().to_owned());
        let tokens = arguments.collect::<Vec<S>>();
        let tokens = tokens.iter().map(|t| t.as_ref()).collect::<Vec<&str>>();
        debug!(program = ?self.program_name, tokens = tokens.len(), "parsing arguments");

        let mut i = 0;
        while i < tokens.len() {
            i += 1 + self.handle_token(tokens[i], tokens.get(i + 1).copied())?;
        }

        self.check_required_options()
    }

    /// Handle one token, returning how many of the following tokens it consumed.
    fn handle_token(&mut self, token: &str, next: Option<&str>) -> Result<usize, ParseErr> {
        if let Some(long) = token.strip_prefix("--") {
            let option = self.options.iter_mut()
                .find(|o| o.long_name() == long)
                .ok_or_else(|| ParseErr::UnknownOption(token.to_owned()))?;
            trace!(option = %option.name(), "long option");
            option.apply(next)
        } else if token.len() > 1 && token.starts_with('-') {
            self.handle_concatenated_options(&token[1..], next)
        } else {
            trace!(token, "positional argument");
            self.remaining.push(token.to_owned());
            Ok(0)
        }
    }

    /// Handle `-xyz`, only the last option of the cluster may take a value.
    fn handle_concatenated_options(&mut self, cluster: &str, next: Option<&str>) -> Result<usize, ParseErr> {
        let mut chars = cluster.chars().peekable();
        while let Some(ch) = chars.next() {
            let last = chars.peek().is_none();
            let option = self.options.iter_mut()
                .find(|o| o.short_name() == ch)
                .ok_or(ParseErr::UnknownShortOption(ch))?;

            if option.takes_value() && !last {
                return Err(ParseErr::MisplacedValueOption(ch));
            }
            trace!(option = %option.name(), "short option");

            let consumed = option.apply(next)?;
            if consumed > 0 {
                return Ok(consumed);
            }
        }
        Ok(0)
    }

    fn check_required_options(&self) -> Result<(), ParseErr> {
        let missing = self.options.iter()
            .filter(|o| o.is_required() && !o.is_seen())
            .map(|o| o.name())
            .collect::<Vec<_>>();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ParseErr::MissingRequiredOption(missing))
        }
    }

    /// Check that every path-existing option holding a path names a readable file.
    ///
    /// Every failing option is reported, not just the first one. Options
    /// without a path are skipped.
    pub fn validate_path_options(&mut self) -> Result<(), ValidationErr> {
        let errors = self.options.iter()
            .filter_map(|o| o.existing_path().map(|path| (o, path)))
            .filter_map(|(option, path)| {
                debug!(option = %option.name(), path = %path.display(), "checking path");
                check_readable(path).err().map(|source| PathErr {
                    option: option.name(),
                    path: path.clone(),
                    source,
                })
            })
            .collect::<Vec<PathErr>>();

        if errors.is_empty() {
            return Ok(());
        }
        for err in errors.iter() {
            self.report_error(&err.to_string());
        }
        Err(ValidationErr(errors))
    }

    /// Render the auto-generated options listing.
    pub fn render_options_usage(&self) -> String {
        let mut buff = String::new();
        render_options(&mut buff, &self.options);
        buff
    }

    /// Print the auto-generated options listing to the usage sink.
    pub fn print_options_usage(&mut self) {
        let usage = self.render_options_usage();
        (self.usage_sink)(&usage);
    }

    /// Print a full help message to the usage sink.
    pub fn print_help(&mut self, formatter: &UsageFormatter) {
        let help = formatter.render_help(&self.options);
        (self.usage_sink)(&help);
    }

    fn report_error(&mut self, msg: &str) {
        (self.error_sink)(&format!("error: {}\n", msg));
    }
}

impl Debug for Parser<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("options", &self.options)
            .field("remaining", &self.remaining)
            .field("program_name", &self.program_name)
            .field("parsed", &self.parsed)
            .finish_non_exhaustive()
    }
}
