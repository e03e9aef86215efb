//! Command-line interface definitions.

use clap::Parser;
use i3bar::{DEFAULT_COLOR, Placement, TitleOptions};
use logging::LogArgs;
use sampler::{DEFAULT_INTERVAL_MS, DEFAULT_QUEUE_CAPACITY};

/// Usage examples shown after `--help`.
const EXAMPLES: &str = "\
Examples:
  i3status | i3status-title-on-bar --color '#00EE00'
  i3status | i3status-title-on-bar --append-end --fixed-width 64
  i3status-title-on-bar < i3status-output-example.json";

/// Command-line interface arguments for the `i3status-title-on-bar` binary.
#[derive(Parser, Debug)]
#[command(
    name = "i3status-title-on-bar",
    version,
    about = "Put the active X11 window title on the i3status bar",
    long_about = "Reads i3status JSON output on stdin, adds the currently active X11 \
                  window title to every status line as a new block, and writes the \
                  result to stdout. Title changes nudge i3status to redraw at once.",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Text color of the title block (i3bar color code)
    #[arg(long, default_value = DEFAULT_COLOR, value_name = "COLOR")]
    pub color: String,

    /// Append the title block to the end instead of the beginning
    #[arg(long)]
    pub append_end: bool,

    /// Truncate and pad the title to this many characters (0 disables)
    #[arg(long, default_value_t = 0, value_name = "WIDTH")]
    pub fixed_width: usize,

    /// Exact name of the status process to nudge when the title changes
    #[arg(long, default_value = "i3status", value_name = "NAME")]
    pub process_name: String,

    /// Minimum time between nudges, in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS, value_name = "MS")]
    pub sample_ms: u64,

    /// Title change events buffered between nudges
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY, value_name = "N")]
    pub queue_capacity: usize,

    /// X display to connect to (defaults to $DISPLAY)
    #[arg(long, value_name = "DISPLAY")]
    pub display: Option<String>,

    /// Logging controls
    #[command(flatten)]
    pub log: LogArgs,
}

impl Cli {
    /// How the title block should be rendered.
    pub fn title_options(&self) -> TitleOptions {
        TitleOptions {
            color: self.color.clone(),
            placement: if self.append_end {
                Placement::End
            } else {
                Placement::Start
            },
            fixed_width: (self.fixed_width > 0).then_some(self.fixed_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.color, "#00FF00");
        assert!(!cli.append_end);
        assert_eq!(cli.fixed_width, 0);
        assert_eq!(cli.process_name, "i3status");
        assert_eq!(cli.sample_ms, 100);
        assert_eq!(cli.queue_capacity, 1000);
        assert_eq!(cli.title_options(), TitleOptions::default());
    }

    #[test]
    fn append_end_with_fixed_width() {
        let cli = Cli::try_parse_from([
            "test",
            "--append-end",
            "--fixed-width",
            "64",
            "--color",
            "#00EE00",
        ])
        .unwrap();
        let opts = cli.title_options();
        assert_eq!(opts.placement, Placement::End);
        assert_eq!(opts.fixed_width, Some(64));
        assert_eq!(opts.color, "#00EE00");
    }

    #[test]
    fn version_and_help_are_handled_by_clap() {
        let err = Cli::try_parse_from(["test", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        let err = Cli::try_parse_from(["test", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = Cli::try_parse_from(["test", "--fixed-width", "wide"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        let err = Cli::try_parse_from(["test", "--potato"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn log_flags_conflict() {
        let err = Cli::try_parse_from(["test", "--trace", "--debug"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }
}
