use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use crate::error::{OptionName, ParseErr};
use crate::util::NumericGrammar;

/// The kind of an option, which decides how many tokens it consumes and
/// how its value is converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionKind {
    Flag,
    FlagCount,
    Int,
    Float,
    String,
    Path,
    PathExisting,
}

impl OptionKind {
    /// Number of value tokens following the option token.
    pub fn arity(self) -> usize {
        match self {
            OptionKind::Flag | OptionKind::FlagCount => 0,
            _ => 1,
        }
    }

    /// The label shown in usage listings.
    pub fn display_name(self) -> &'static str {
        match self {
            OptionKind::Flag | OptionKind::FlagCount => "flag",
            OptionKind::Int => "integer",
            OptionKind::Float => "float",
            OptionKind::String => "string",
            OptionKind::Path | OptionKind::PathExisting => "path",
        }
    }
}

impl Display for OptionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Caller owned storage an option writes into.
///
/// Whatever the variable holds before parsing is its default, it is only
/// overwritten when the option shows up on the command line.
#[derive(Debug)]
pub enum Binding<'a> {
    Flag(&'a mut bool),
    FlagCount(&'a mut u32),
    Int(&'a mut i32),
    Float(&'a mut f32),
    String(&'a mut Option<String>),
    Path(&'a mut Option<PathBuf>),
    PathExisting(&'a mut Option<PathBuf>),
}

impl Binding<'_> {
    pub fn kind(&self) -> OptionKind {
        match self {
            Binding::Flag(_) => OptionKind::Flag,
            Binding::FlagCount(_) => OptionKind::FlagCount,
            Binding::Int(_) => OptionKind::Int,
            Binding::Float(_) => OptionKind::Float,
            Binding::String(_) => OptionKind::String,
            Binding::Path(_) => OptionKind::Path,
            Binding::PathExisting(_) => OptionKind::PathExisting,
        }
    }
}

/// The `CliOption` represents a single option bound to a variable.
///
/// # Examples
///
/// A counted flag `-v,--verbose` and a required string `-i,--input-file <string>`:
/// ```
/// use bindopt::{CliOption, OptionKind};
///
/// let mut verbosity = 0;
/// let mut input = None;
/// let verbose = CliOption::flag_count('v', "verbose", "verbose logging", &mut verbosity);
/// let file = CliOption::string('i', "input-file", "input file", true, &mut input);
///
/// assert_eq!(OptionKind::FlagCount, verbose.kind());
/// assert!(!verbose.takes_value());
/// assert!(file.is_required());
/// ```
#[derive(Debug)]
pub struct CliOption<'a> {
    short: char,
    long: String,
    description: String,
    required: bool,
    seen: bool,
    binding: Binding<'a>,
}

impl<'a> CliOption<'a> {
    fn new(short: char, long: &str, description: &str, required: bool, binding: Binding<'a>) -> CliOption<'a> {
        CliOption {
            short,
            long: long.to_owned(),
            description: description.to_owned(),
            required,
            seen: false,
            binding,
        }
    }

    /// A boolean switch, set to `true` when present. Never required.
    pub fn flag(short: char, long: &str, description: &str, value: &'a mut bool) -> CliOption<'a> {
        Self::new(short, long, description, false, Binding::Flag(value))
    }

    /// A switch counting its occurrences, `-vvv` or `-v --verbose -v` both count 3.
    /// Never required.
    pub fn flag_count(short: char, long: &str, description: &str, value: &'a mut u32) -> CliOption<'a> {
        Self::new(short, long, description, false, Binding::FlagCount(value))
    }

    pub fn int(short: char, long: &str, description: &str, required: bool, value: &'a mut i32) -> CliOption<'a> {
        Self::new(short, long, description, required, Binding::Int(value))
    }

    /// A decimal float, scientific notation such as `2.5e-3` is accepted.
    pub fn float(short: char, long: &str, description: &str, required: bool, value: &'a mut f32) -> CliOption<'a> {
        Self::new(short, long, description, required, Binding::Float(value))
    }

    pub fn string(
        short: char,
        long: &str,
        description: &str,
        required: bool,
        value: &'a mut Option<String>,
    ) -> CliOption<'a> {
        Self::new(short, long, description, required, Binding::String(value))
    }

    /// A file path stored as given, nothing is checked.
    pub fn path(
        short: char,
        long: &str,
        description: &str,
        required: bool,
        value: &'a mut Option<PathBuf>,
    ) -> CliOption<'a> {
        Self::new(short, long, description, required, Binding::Path(value))
    }

    /// A file path that must be readable.
    ///
    /// Parsing stores it as given, the check happens in
    /// [`Parser::validate_path_options`](crate::Parser::validate_path_options).
    pub fn path_existing(
        short: char,
        long: &str,
        description: &str,
        required: bool,
        value: &'a mut Option<PathBuf>,
    ) -> CliOption<'a> {
        Self::new(short, long, description, required, Binding::PathExisting(value))
    }

    pub fn kind(&self) -> OptionKind {
        self.binding.kind()
    }

    pub fn short_name(&self) -> char {
        self.short
    }

    pub fn long_name(&self) -> &str {
        &self.long
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the option was matched during parsing.
    pub fn is_seen(&self) -> bool {
        self.seen
    }

    pub fn takes_value(&self) -> bool {
        self.kind().arity() > 0
    }

    pub fn name(&self) -> OptionName {
        OptionName::new(self.short, &self.long)
    }

    /// The stored path of a [`OptionKind::PathExisting`] option, if any.
    pub(crate) fn existing_path(&self) -> Option<&PathBuf> {
        match &self.binding {
            Binding::PathExisting(path) => Option::as_ref(path),
            _ => None,
        }
    }

    /// Applies one occurrence of the option, `value` being the token following it.
    ///
    /// Returns the number of tokens consumed besides the option token itself.
    pub(crate) fn apply(&mut self, value: Option<&str>) -> Result<usize, ParseErr> {
        if self.kind() != OptionKind::FlagCount && self.seen {
            return Err(ParseErr::DuplicateOption(self.name()));
        }
        self.seen = true;

        let value = match (self.takes_value(), value) {
            (false, _) => "",
            (true, Some(value)) => value,
            (true, None) => return Err(ParseErr::MissingValue(self.name())),
        };

        let (short, long) = (self.short, self.long.as_str());
        match &mut self.binding {
            Binding::Flag(flag) => **flag = true,
            Binding::FlagCount(count) => **count = count.saturating_add(1),
            Binding::Int(int) => {
                **int = NumericGrammar::Integer.matches(value)
                    .then(|| value.parse::<i32>().ok())
                    .flatten()
                    .ok_or_else(|| ParseErr::InvalidInteger { value: value.to_owned(), option: OptionName::new(short, long) })?;
            }
            Binding::Float(float) => {
                **float = NumericGrammar::Float.matches(value)
                    .then(|| value.parse::<f32>().ok())
                    .flatten()
                    .filter(|f| f.is_finite())
                    .ok_or_else(|| ParseErr::InvalidFloat { value: value.to_owned(), option: OptionName::new(short, long) })?;
            }
            Binding::String(string) => **string = Some(value.to_owned()),
            Binding::Path(path) | Binding::PathExisting(path) => **path = Some(PathBuf::from(value)),
        }

        Ok(self.kind().arity())
    }
}

impl Display for CliOption<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ option: {} {} :: {} :: {} ]", self.short, self.long, self.kind(), self.description)
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use crate::error::ParseErr;
    use crate::option::{CliOption, OptionKind};

    #[test]
    fn test_factories_fix_kind_and_arity() {
        let (mut b, mut c, mut i, mut f) = (false, 0, 0, 0.0);
        let (mut s, mut p, mut e) = (None, None, None);

        let options = [
            (CliOption::flag('D', "debug", "", &mut b), OptionKind::Flag, 0),
            (CliOption::flag_count('V', "verbose", "", &mut c), OptionKind::FlagCount, 0),
            (CliOption::int('I', "int", "", false, &mut i), OptionKind::Int, 1),
            (CliOption::float('F', "float", "", false, &mut f), OptionKind::Float, 1),
            (CliOption::string('S', "string", "", false, &mut s), OptionKind::String, 1),
            (CliOption::path('f', "output-file", "", false, &mut p), OptionKind::Path, 1),
            (CliOption::path_existing('x', "existing", "", true, &mut e), OptionKind::PathExisting, 1),
        ];
        for (option, kind, arity) in options.iter() {
            assert_eq!(*kind, option.kind());
            assert_eq!(*arity, option.kind().arity());
            assert!(!option.is_seen());
        }
        assert!(!options[0].0.is_required());
        assert!(!options[1].0.is_required());
        assert!(options[6].0.is_required());
    }

    #[test]
    fn test_display_names() {
        assert_eq!("flag", OptionKind::FlagCount.display_name());
        assert_eq!("integer", OptionKind::Int.display_name());
        assert_eq!("float", OptionKind::Float.display_name());
        assert_eq!("string", OptionKind::String.display_name());
        assert_eq!("path", OptionKind::PathExisting.to_string());

        let mut level = 0;
        let option = CliOption::int('l', "level", "compression level", false, &mut level);
        assert_eq!("[ option: l level :: integer :: compression level ]", option.to_string());
    }

    #[test]
    fn test_apply_flag_rejects_second_use() {
        let mut debug = false;
        let mut option = CliOption::flag('D', "debug", "debug mode", &mut debug);

        assert_eq!(0, option.apply(None).unwrap());
        assert!(option.is_seen());
        assert!(matches!(option.apply(None), Err(ParseErr::DuplicateOption(_))));
        drop(option);
        assert!(debug);
    }

    #[test]
    fn test_apply_flag_count_repeats() {
        let mut count = 2;
        let mut option = CliOption::flag_count('v', "verbose", "", &mut count);
        for _ in 0..3 {
            assert_eq!(0, option.apply(Some("ignored")).unwrap());
        }
        drop(option);
        assert_eq!(5, count);
    }

    #[test]
    fn test_apply_conversions() {
        let mut int = 0;
        let mut option = CliOption::int('I', "int", "", false, &mut int);
        assert_eq!(1, option.apply(Some("-23")).unwrap());
        drop(option);
        assert_eq!(-23, int);

        let mut float = 0.0;
        let mut option = CliOption::float('F', "float", "", false, &mut float);
        assert_eq!(1, option.apply(Some("2.5e-1")).unwrap());
        drop(option);
        assert!((float - 0.25).abs() < 1e-6);

        let mut path = None;
        let mut option = CliOption::path('f', "output-file", "", false, &mut path);
        assert_eq!(1, option.apply(Some("out dir/file.txt")).unwrap());
        drop(option);
        assert_eq!(Some(PathBuf::from("out dir/file.txt")), path);
    }

    #[test]
    fn test_apply_invalid_values() {
        let mut int = 7;
        let mut option = CliOption::int('I', "int", "", false, &mut int);
        assert!(matches!(option.apply(Some("1.5")), Err(ParseErr::InvalidInteger { .. })));
        drop(option);
        assert_eq!(7, int);

        let mut int = 0;
        let mut option = CliOption::int('I', "int", "", false, &mut int);
        assert!(matches!(option.apply(Some("99999999999")), Err(ParseErr::InvalidInteger { .. })));

        let mut float = 0.0;
        let mut option = CliOption::float('F', "float", "", false, &mut float);
        assert!(matches!(option.apply(Some("0.5x")), Err(ParseErr::InvalidFloat { .. })));

        let mut float = 0.0;
        let mut option = CliOption::float('F', "float", "", false, &mut float);
        assert!(matches!(option.apply(Some("1e99")), Err(ParseErr::InvalidFloat { .. })));
    }

    #[test]
    fn test_apply_missing_value() {
        let mut string = None;
        let mut option = CliOption::string('S', "string", "", false, &mut string);
        match option.apply(None) {
            Err(ParseErr::MissingValue(name)) => assert_eq!("-S/--string", name.to_string()),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(option.is_seen());
    }
}
