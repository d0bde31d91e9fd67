//! Rendering targets for command reports.

use eyre::{Context, Result};
use serde::Serialize;

/// Where a report is rendered.
///
/// Reports call these semantic methods; the target picks the formatting.
pub trait Output {
    /// Heading for a group of lines.
    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    /// Key-value pair nested under a section.
    fn key_value_indented(&mut self, key: &str, value: &str);

    fn list_item(&mut self, text: &str);

    /// A file written by this run.
    fn added_item(&mut self, text: &str);

    /// A file deleted by this run.
    fn removed_item(&mut self, text: &str);

    fn warning(&mut self, msg: &str);

    fn error(&mut self, msg: &str);

    /// Labelled separator, used between previewed files.
    fn divider(&mut self, label: &str);

    /// Text printed as-is.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// Data collected by an operation, renderable to any [`Output`].
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain stdout rendering. Warnings and errors go to stderr.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        println!("  {}: {}", key, value);
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {}", text);
    }

    fn removed_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {}", msg);
    }

    fn divider(&mut self, label: &str) {
        println!("── {} ──", label);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Print `report` as pretty JSON, or render it to the terminal.
pub fn emit<R: Report + Serialize>(report: &R, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).wrap_err("Failed to serialize report")?;
        println!("{text}");
    } else {
        report.render(&mut TerminalOutput::new());
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Output;

    /// Records rendered lines for assertions.
    #[derive(Default)]
    pub struct RecordingOutput {
        pub lines: Vec<String>,
    }

    impl Output for RecordingOutput {
        fn section(&mut self, name: &str) {
            self.lines.push(format!("{name}:"));
        }

        fn key_value(&mut self, key: &str, value: &str) {
            self.lines.push(format!("{key}: {value}"));
        }

        fn key_value_indented(&mut self, key: &str, value: &str) {
            self.lines.push(format!("  {key}: {value}"));
        }

        fn list_item(&mut self, text: &str) {
            self.lines.push(format!("  - {text}"));
        }

        fn added_item(&mut self, text: &str) {
            self.lines.push(format!("  + {text}"));
        }

        fn removed_item(&mut self, text: &str) {
            self.lines.push(format!("  - {text}"));
        }

        fn warning(&mut self, msg: &str) {
            self.lines.push(format!("warning: {msg}"));
        }

        fn error(&mut self, msg: &str) {
            self.lines.push(format!("error: {msg}"));
        }

        fn divider(&mut self, label: &str) {
            self.lines.push(format!("── {label} ──"));
        }

        fn preformatted(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }

        fn newline(&mut self) {
            self.lines.push(String::new());
        }
    }
}
