//! Colored terminal output.

// `cyrup_termcolor` ships its library target as `termcolor`.
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{IsTerminal, Write};

/// Writes user-facing messages to stderr, colored when stderr is a terminal.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    choice: ColorChoice,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let choice = if std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            verbose,
            quiet,
            choice,
        }
    }

    /// Debug detail, only with `--verbose`.
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            self.write(None, false, "", message);
        }
    }

    pub fn progress(&self, message: &str) {
        if !self.quiet {
            self.write(Some(Color::Cyan), false, "", message);
        }
    }

    pub fn indent(&self, message: &str) {
        if !self.quiet {
            self.write(None, false, "   ", message);
        }
    }

    pub fn success(&self, message: &str) {
        self.write(Some(Color::Green), true, "✓ ", message);
    }

    pub fn warn(&self, message: &str) {
        self.write(Some(Color::Yellow), true, "⚠ ", message);
    }

    /// Errors are printed even in quiet mode.
    pub fn error(&self, message: &str) {
        self.write(Some(Color::Red), true, "✗ ", message);
    }

    fn write(&self, color: Option<Color>, bold: bool, prefix: &str, message: &str) {
        let mut stream = StandardStream::stderr(self.choice);
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        // Terminal write failures are not worth aborting a bind over.
        let _ = stream.set_color(&spec);
        let _ = write!(stream, "{prefix}{message}");
        let _ = stream.reset();
        let _ = writeln!(stream);
    }
}
