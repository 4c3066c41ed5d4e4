//! Line writer with indentation tracking.

/// Accumulates lines of OCaml source at a current indentation level.
pub(crate) struct Writer {
    output: String,
    indent: usize,
}

pub(crate) const INDENT: &str = "  ";

impl Writer {
    pub(crate) fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Write one line at the current indentation.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str(INDENT);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Run `f` one indentation level deeper.
    pub(crate) fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    /// Append an already-rendered block, separated by a blank line.
    pub(crate) fn block(&mut self, text: &str) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output.push_str(text);
    }

    /// Finish with exactly one trailing newline.
    pub(crate) fn finish(mut self) -> String {
        self.output.truncate(self.output.trim_end().len());
        self.output.push('\n');
        self.output
    }
}
