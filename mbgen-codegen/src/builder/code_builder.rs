//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// # Example
///
/// ```
/// use mbgen_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::java()
///     .line("public class Foo {")
///     .indent()
///     .line("private Long id;")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "public class Foo {\n    private Long id;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    pub fn java() -> Self {
        Self::new(Indent::JAVA)
    }

    pub fn xml() -> Self {
        Self::new(Indent::XML)
    }

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn blank(mut self) -> Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a block with a closing line.
    ///
    /// # Example
    ///
    /// ```
    /// use mbgen_codegen::builder::CodeBuilder;
    ///
    /// let code = CodeBuilder::xml()
    ///     .block_with_close("<set>", "</set>", |b: CodeBuilder| {
    ///         b.line("name = #{name}")
    ///     })
    ///     .build();
    /// assert_eq!(code, "<set>\n    name = #{name}\n</set>\n");
    /// ```
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Add a single-line Javadoc comment (`/** text */`).
    pub fn javadoc(self, text: &str) -> Self {
        self.line(&format!("/** {} */", escape_comment(text)))
    }

    /// Add a multi-line Javadoc comment block.
    pub fn javadoc_block<'a>(self, lines: impl IntoIterator<Item = &'a str>) -> Self {
        self.line("/**")
            .each(lines, |b, text| {
                b.line(format!(" * {}", escape_comment(text)).trim_end())
            })
            .line(" */")
    }

    /// Append already-rendered text, re-indenting each non-empty line.
    pub fn fragment(mut self, text: &str) -> Self {
        for line in text.lines() {
            if line.is_empty() {
                self.buffer.push('\n');
            } else {
                self = self.line(line);
            }
        }
        self
    }

    /// Conditionally add content.
    pub fn when<F>(self, condition: bool, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if condition { f(self) } else { self }
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

/// Neutralize `*/` so comment text cannot close the surrounding comment.
fn escape_comment(text: &str) -> String {
    text.replace("*/", "*&#47;")
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::java()
    }
}
