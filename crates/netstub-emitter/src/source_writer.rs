//! Line-oriented output buffer with Python indentation.

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    indent_level: u32,
}

impl SourceWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            indent_level: 0,
        }
    }

    /// Write `text` on its own line at the current indentation.
    pub fn line(&mut self, text: &str) {
        self.write_indent();
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Write an empty line (no indentation).
    pub fn blank_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
    }

    pub const fn indent_level(&self) -> u32 {
        self.indent_level
    }

    pub const fn set_indent_level(&mut self, level: u32) {
        self.indent_level = level;
    }

    pub const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn into_string(self) -> String {
        self.output
    }
}
