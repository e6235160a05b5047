//! Terminal-dependent table settings, decided once at startup.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};
use crate::output::table::TableOptions;

/// Narrower terminals get unwrapped rows rather than unreadable columns.
const MIN_WRAP_WIDTH: usize = 40;

static TABLE_OPTIONS: OnceLock<TableOptions> = OnceLock::new();

/// What the process knows about where stdout goes.
#[derive(Clone, Debug, Default)]
struct Terminal {
    stdout_is_tty: bool,
    no_color: bool,
    columns: Option<String>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            stdout_is_tty: std::io::stdout().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS").ok(),
        }
    }
}

pub fn init(flags: &GlobalFlags) {
    let _ = TABLE_OPTIONS.set(resolve(flags, &Terminal::detect()));
}

/// Options for table rendering; plain and unbounded before [`init`].
pub fn table_options() -> TableOptions {
    TABLE_OPTIONS.get().copied().unwrap_or_default()
}

fn resolve(flags: &GlobalFlags, terminal: &Terminal) -> TableOptions {
    let table = flags.format == OutputFormat::Table;
    let color = table
        && match flags.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => terminal.stdout_is_tty && !terminal.no_color,
        };
    let max_width = terminal
        .columns
        .as_deref()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|width| *width >= MIN_WRAP_WIDTH);
    TableOptions { max_width, color }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn flags(format: OutputFormat, color: ColorMode) -> GlobalFlags {
        GlobalFlags {
            format,
            color,
            quiet: false,
        }
    }

    fn tty() -> Terminal {
        Terminal {
            stdout_is_tty: true,
            ..Terminal::default()
        }
    }

    #[rstest]
    #[case::auto_on_tty(ColorMode::Auto, tty(), true)]
    #[case::auto_piped(ColorMode::Auto, Terminal::default(), false)]
    #[case::auto_no_color(ColorMode::Auto, Terminal { no_color: true, ..tty() }, false)]
    #[case::always_piped(ColorMode::Always, Terminal::default(), true)]
    #[case::never_on_tty(ColorMode::Never, tty(), false)]
    fn color_follows_mode_and_terminal(
        #[case] mode: ColorMode,
        #[case] terminal: Terminal,
        #[case] expected: bool,
    ) {
        let options = resolve(&flags(OutputFormat::Table, mode), &terminal);
        assert_eq!(options.color, expected);
    }

    #[test]
    fn json_output_is_never_colored() {
        let options = resolve(&flags(OutputFormat::Json, ColorMode::Always), &tty());
        assert!(!options.color);
    }

    #[rstest]
    #[case(Some("120"), Some(120))]
    #[case(Some("39"), None)]
    #[case(Some("wide"), None)]
    #[case(None, None)]
    fn width_comes_from_columns(#[case] columns: Option<&str>, #[case] expected: Option<usize>) {
        let terminal = Terminal {
            columns: columns.map(str::to_string),
            ..tty()
        };
        let options = resolve(&flags(OutputFormat::Table, ColorMode::Never), &terminal);
        assert_eq!(options.max_width, expected);
    }
}
