use crate::option::CliOption;

const DEFAULT_SYNTAX_PREFIX: &str = "usage: ";
const OPTIONS_HEADING: &str = "Options:";
const LEFT_PAD: &str = "  ";
const REQUIRED_MARKER: &str = " (required)";

/// Render the options listing, one line per option in registration order:
///
/// ```txt
/// Options:
///   -<opt>, --<long_opt> <type>	<description> (required)
///   -<opt>, --<long_opt>	<description>
/// ```
pub fn render_options(buff: &mut String, options: &[CliOption<'_>]) {
    buff.push_str(OPTIONS_HEADING);
    buff.push('\n');

    for option in options {
        buff.push_str(LEFT_PAD);
        buff.push('-');
        buff.push(option.short_name());
        buff.push_str(", --");
        buff.push_str(option.long_name());

        if option.takes_value() {
            buff.push_str(" <");
            buff.push_str(option.kind().display_name());
            buff.push('>');
        }

        buff.push('\t');
        buff.push_str(option.description());

        if option.is_required() {
            buff.push_str(REQUIRED_MARKER);
        }
        buff.push('\n');
    }
}

/// `UsageFormatter` renders a full help message around the options listing.
///
/// The output format is like:
/// ```txt
/// usage: <cmd_syntax> [opt_usage]
/// [header]
///
/// Options:
///   -<opt>, --<long_opt> <type>	<description>
/// [footer]
/// ```
#[derive(Clone, Debug)]
pub struct UsageFormatter {
    syntax_prefix: String,
    cmd_syntax: String,
    auto_usage: bool,
    header: Option<String>,
    footer: Option<String>,
}

impl UsageFormatter {
    /// Create a `UsageFormatter` with default configuration.
    ///
    /// The `cmd_syntax` is typically the name of the executable, possibly
    /// followed by its positional arguments, e.g. `"cli_example <file>..."`.
    pub fn new(cmd_syntax: &str) -> UsageFormatter {
        UsageFormatter {
            syntax_prefix: DEFAULT_SYNTAX_PREFIX.to_string(),
            cmd_syntax: cmd_syntax.to_string(),
            auto_usage: false,
            header: None,
            footer: None,
        }
    }

    pub fn get_syntax_prefix(&self) -> &str {
        &self.syntax_prefix
    }

    pub fn set_syntax_prefix(&mut self, prefix: &str) {
        self.syntax_prefix = prefix.to_string();
    }

    pub fn set_cmd_syntax(&mut self, syntax: &str) {
        self.cmd_syntax = syntax.to_string();
    }

    /// Set if the option synopsis is appended after `cmd_syntax`.
    pub fn set_auto_usage(&mut self, auto_usage: bool) {
        self.auto_usage = auto_usage;
    }

    pub fn set_header(&mut self, header: &str) {
        self.header = Some(header.to_string());
    }

    pub fn set_footer(&mut self, footer: &str) {
        self.footer = Some(footer.to_string());
    }

    fn append_option(&self, buff: &mut String, option: &CliOption<'_>) {
        if !option.is_required() {
            buff.push('[');
        }

        buff.push('-');
        buff.push(option.short_name());

        if option.takes_value() {
            buff.push_str(" <");
            buff.push_str(option.kind().display_name());
            buff.push('>');
        }

        if !option.is_required() {
            buff.push(']');
        }
    }

    /// Render the `usage:` line, with the option synopsis when auto usage is on.
    pub fn render_usage(&self, buff: &mut String, options: &[CliOption<'_>]) {
        buff.push_str(&self.syntax_prefix);
        buff.push_str(&self.cmd_syntax);

        if self.auto_usage {
            for option in options {
                buff.push(' ');
                self.append_option(buff, option);
            }
        }
        buff.push('\n');
    }

    /// Render the whole help message.
    pub fn render_help(&self, options: &[CliOption<'_>]) -> String {
        let mut buff = String::new();
        self.render_usage(&mut buff, options);

        if let Some(header) = self.header.as_ref().filter(|h| !h.is_empty()) {
            buff.push_str(header);
            buff.push('\n');
        }

        buff.push('\n');
        render_options(&mut buff, options);

        if let Some(footer) = self.footer.as_ref().filter(|f| !f.is_empty()) {
            buff.push('\n');
            buff.push_str(footer);
            buff.push('\n');
        }
        buff
    }
}

#[cfg(test)]
mod test {
    use crate::format::{render_options, UsageFormatter};
    use crate::option::CliOption;

    #[test]
    fn test_render_options() {
        let (mut input, mut verbosity, mut ratio) = (None, 0, 1.0);
        let options = vec![
            CliOption::string('i', "input-file", "input file", true, &mut input),
            CliOption::flag_count('v', "verbose", "verbose logging", &mut verbosity),
            CliOption::float('r', "ratio", "compression ratio", false, &mut ratio),
        ];

        let mut buff = String::new();
        render_options(&mut buff, &options);
        assert_eq!(
            "Options:\n\
             \x20 -i, --input-file <string>\tinput file (required)\n\
             \x20 -v, --verbose\tverbose logging\n\
             \x20 -r, --ratio <float>\tcompression ratio\n",
            buff
        );
    }

    #[test]
    fn test_render_empty_options() {
        let mut buff = String::new();
        render_options(&mut buff, &[]);
        assert_eq!("Options:\n", buff);
    }

    #[test]
    fn test_render_help() {
        let (mut input, mut verbosity) = (None, 0);
        let options = vec![
            CliOption::flag_count('v', "verbose", "verbose logging", &mut verbosity),
            CliOption::path_existing('i', "input-file", "input file", true, &mut input),
        ];

        let mut formatter = UsageFormatter::new("cli_example");
        formatter.set_auto_usage(true);
        formatter.set_header("Reads a file.");
        formatter.set_footer("Report bugs upstream.");

        assert_eq!(
            "usage: cli_example [-v] -i <path>\n\
             Reads a file.\n\
             \n\
             Options:\n\
             \x20 -v, --verbose\tverbose logging\n\
             \x20 -i, --input-file <path>\tinput file (required)\n\
             \n\
             Report bugs upstream.\n",
            formatter.render_help(&options)
        );
    }

    #[test]
    fn test_render_usage_without_synopsis() {
        let mut debug = false;
        let options = vec![CliOption::flag('D', "debug", "debug mode", &mut debug)];

        let mut formatter = UsageFormatter::new("tool");
        assert_eq!("usage: ", formatter.get_syntax_prefix());
        formatter.set_syntax_prefix("Usage: ");
        formatter.set_cmd_syntax("tool <file>...");
        assert_eq!("Usage: ", formatter.get_syntax_prefix());

        let mut buff = String::new();
        formatter.render_usage(&mut buff, &options);
        assert_eq!("Usage: tool <file>...\n", buff);
    }
}
