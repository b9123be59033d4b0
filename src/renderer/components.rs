/// Indentation applied to directive options and content lines.
pub const DIRECTIVE_INDENT: &str = "   ";

/// Section adornment characters by heading level, outermost first.
const SECTION_CHARS: [char; 3] = ['=', '-', '~'];

/// Helper for escaping text that lands in reST markup
pub struct RstEscaper;

impl RstEscaper {
    /// Backslash-escape ASCII punctuation, except `.`, and a leading `.`.
    pub fn escape(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len() + text.len() / 4);

        for (i, c) in text.chars().enumerate() {
            let escaped = match c {
                '.' => i == 0,
                '!'..='-' | '/' | ':'..='@' | '['..='`' | '{'..='~' => true,
                _ => false,
            };
            if escaped {
                output.push('\\');
            }
            output.push(c);
        }

        output
    }
}

/// Helper for rendering section titles
pub struct HeadingRenderer;

impl HeadingRenderer {
    /// Render `text` with an underline for the given level (1-based).
    /// Levels past the last known adornment reuse the deepest one.
    pub fn render_heading(&self, text: &str, level: usize) -> String {
        let index = level.clamp(1, SECTION_CHARS.len()) - 1;
        let underline: String = std::iter::repeat(SECTION_CHARS[index])
            .take(text.chars().count())
            .collect();
        format!("{}\n{}\n", text, underline)
    }
}

/// Helper for directive blocks
pub struct DirectiveRenderer;

impl DirectiveRenderer {
    pub fn render_directive(&self, name: &str, argument: Option<&str>) -> String {
        match argument {
            Some(argument) => format!(".. {}:: {}\n", name, argument),
            None => format!(".. {}::\n", name),
        }
    }

    pub fn render_flag(&self, flag: &str) -> String {
        format!("{}:{}:\n", DIRECTIVE_INDENT, flag)
    }

    pub fn render_option(&self, option: &str, value: &str) -> String {
        format!("{}:{}: {}\n", DIRECTIVE_INDENT, option, value)
    }

    pub fn render_content_line(&self, line: &str) -> String {
        format!("{}{}\n", DIRECTIVE_INDENT, line)
    }
}
