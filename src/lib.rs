//! # The bindopt Library
//!
//! The bindopt library parses command line options straight into plain
//! variables you own. Each option is bound to a variable of its type, the
//! value the variable holds before parsing is its default.
//!
//! bindopt supports the following kinds of options:
//!
//! - boolean flags, for example `-D` or `--debug`
//! - counted flags, for example `-vvv` or `-v --verbose -v`
//! - integers, floats and strings, for example `-I 23` or `--ratio 2.5e-1`
//! - file paths, optionally checked for readability after parsing
//!
//! Short options can be concatenated as in `tar -zxvf foo.tar.gz`, as long as
//! the only option taking a value comes last. Tokens that are not options are
//! kept as remaining arguments.
//!
//! The auto-generated options listing looks like this:
//!
//! ```txt
//! Options:
//!   -i, --input-file <path>	input file (required)
//!   -v, --verbose	verbose logging
//! ```
//!
//! # Examples
//!
//! ```
//! use bindopt::{CliOption, Parser};
//!
//! let mut input = None;
//! let mut verbosity = 0;
//! let mut threshold = 0.5;
//!
//! let remaining = {
//!     let mut parser = Parser::new(vec![
//!         CliOption::string('i', "input-file", "input file", true, &mut input),
//!         CliOption::flag_count('v', "verbose", "verbose logging", &mut verbosity),
//!         CliOption::float('t', "threshold", "detection threshold", false, &mut threshold),
//!     ]).unwrap();
//!
//!     parser.parse_args(&["demo", "-vv", "-i", "in.txt", "extra"]).unwrap();
//!     parser.into_remaining()
//! };
//!
//! assert_eq!(Some("in.txt"), input.as_deref());
//! assert_eq!(2, verbosity);
//! assert_eq!(0.5, threshold);
//! assert_eq!(vec!["extra"], remaining);
//! ```
//!
//! Errors and usage listings go to standard error unless other sinks are
//! configured.
//!
//! ```
//! use bindopt::{CliOption, ParseErr, Parser, UsageFormatter};
//!
//! let mut level = 0;
//! let mut usage = String::new();
//! let mut errors = String::new();
//! {
//!     let mut parser = Parser::builder(vec![
//!         CliOption::int('l', "level", "compression level", true, &mut level),
//!     ])
//!     .error_sink(|msg| errors.push_str(msg))
//!     .usage_sink(|msg| usage.push_str(msg))
//!     .build()
//!     .unwrap();
//!
//!     let result = parser.parse_args(&["zip", "--level", "high"]);
//!     assert!(matches!(result, Err(ParseErr::InvalidInteger { .. })));
//!
//!     let mut formatter = UsageFormatter::new("zip");
//!     formatter.set_auto_usage(true);
//!     parser.print_help(&formatter);
//! }
//!
//! assert_eq!("error: invalid integer value \"high\" specified for option -l/--level\n", errors);
//! assert!(usage.starts_with("usage: zip -l <integer>\n"));
//! ```

pub use error::{OptionErr, OptionName, ParseErr, PathErr, ValidationErr};
pub use format::UsageFormatter;
pub use option::{Binding, CliOption, OptionKind};
pub use parser::{Parser, ParserBuilder, Sink};

mod format;
mod util;
mod option;
mod parser;
mod error;
