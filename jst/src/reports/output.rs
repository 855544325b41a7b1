//! Output trait for rendering reports to different formats.

use std::fmt;

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods;
/// implementations only decide where each [`Line`] goes.
pub trait Output {
    /// Emit one formatted line.
    fn emit(&mut self, line: Line<'_>);

    /// Start a new section with a heading.
    fn section(&mut self, name: &str) {
        self.emit(Line::Section(name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.emit(Line::KeyValue { key, value, indent: false });
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        self.emit(Line::KeyValue { key, value, indent: true });
    }

    fn list_item(&mut self, text: &str) {
        self.emit(Line::Item('-', text));
    }

    /// A written file.
    fn added_item(&mut self, text: &str) {
        self.emit(Line::Item('+', text));
    }

    /// A template that could not be transpiled.
    fn failed_item(&mut self, text: &str) {
        self.emit(Line::Item('!', text));
    }

    fn warning(&mut self, msg: &str) {
        self.emit(Line::Warning(msg));
    }

    /// Separator with a label, used around previewed SQL.
    fn divider(&mut self, label: &str) {
        self.emit(Line::Divider(label));
    }

    /// Text printed as is.
    fn preformatted(&mut self, text: &str) {
        self.emit(Line::Text(text));
    }

    fn newline(&mut self) {
        self.emit(Line::Text(""));
    }
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// One line of report output.
#[derive(Debug, Clone, Copy)]
pub enum Line<'a> {
    Section(&'a str),
    KeyValue {
        key: &'a str,
        value: &'a str,
        indent: bool,
    },
    Item(char, &'a str),
    Warning(&'a str),
    Divider(&'a str),
    Text(&'a str),
}

impl Line<'_> {
    /// Whether the line belongs on stderr.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Line::Warning(_) | Line::Item('!', _))
    }
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Section(name) => write!(f, "{name}:"),
            Line::KeyValue { key, value, indent } => {
                let pad = if *indent { "  " } else { "" };
                write!(f, "{pad}{key}: {value}")
            }
            Line::Item(marker, text) => write!(f, "  {marker} {text}"),
            Line::Warning(msg) => write!(f, "warning: {msg}"),
            Line::Divider(label) => write!(f, "── {label} ──"),
            Line::Text(text) => f.write_str(text),
        }
    }
}

/// Terminal output implementation.
///
/// Transpiled SQL and summaries go to stdout, warnings and failures to stderr.
#[derive(Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn emit(&mut self, line: Line<'_>) {
        if line.is_diagnostic() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}
