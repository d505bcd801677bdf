//! Slash commands - markdown snippets inserted by typing a trigger.

/// A trigger and the text it expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashCommand {
    pub trigger: &'static str,
    pub expansion: &'static str,
    pub label: &'static str,
}

impl SlashCommand {
    /// Number of chars removed from the buffer when the trigger fires.
    pub fn consumed_len(&self) -> usize {
        self.trigger.chars().count()
    }

    /// Trigger without its leading slash.
    pub fn name(&self) -> &'static str {
        &self.trigger[1..]
    }
}

/// Picker order. Matching does not depend on this order.
#[rustfmt::skip]
pub const SLASH_COMMANDS: &[SlashCommand] = &[
    SlashCommand { trigger: "/h1", expansion: "# ", label: "Heading 1" },
    SlashCommand { trigger: "/h2", expansion: "## ", label: "Heading 2" },
    SlashCommand { trigger: "/h3", expansion: "### ", label: "Heading 3" },
    SlashCommand { trigger: "/bold", expansion: "**bold**", label: "Bold" },
    SlashCommand { trigger: "/italic", expansion: "*italic*", label: "Italic" },
    SlashCommand { trigger: "/quote", expansion: "> ", label: "Quote" },
    SlashCommand { trigger: "/code", expansion: "```\n\n```", label: "Code block" },
    SlashCommand { trigger: "/ul", expansion: "- ", label: "Bulleted list" },
    SlashCommand { trigger: "/ol", expansion: "1. ", label: "Numbered list" },
    SlashCommand { trigger: "/todo", expansion: "- [ ] ", label: "Task" },
    SlashCommand { trigger: "/link", expansion: "[text](url)", label: "Link" },
    SlashCommand { trigger: "/img", expansion: "![]()", label: "Image" },
    SlashCommand {
        trigger: "/table",
        expansion: "| Column 1 | Column 2 |\n| -------- | -------- |\n| Cell 1   | Cell 2   |\n",
        label: "Table",
    },
    SlashCommand { trigger: "/hr", expansion: "\n---\n", label: "Divider" },
];

/// Result of applying a command to a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub command: &'static SlashCommand,
    pub text: String,
    /// Char offset right after the inserted text.
    pub caret: usize,
}

/// Longest trigger that `before_caret` ends with.
pub fn match_suffix(before_caret: &str) -> Option<&'static SlashCommand> {
    SLASH_COMMANDS
        .iter()
        .filter(|cmd| before_caret.ends_with(cmd.trigger))
        .max_by_key(|cmd| cmd.trigger.len())
}

/// Commands whose name starts with `query` (the text typed after `/`).
pub fn filter_commands(query: &str) -> Vec<&'static SlashCommand> {
    SLASH_COMMANDS
        .iter()
        .filter(|cmd| cmd.name().starts_with(query))
        .collect()
}

/// Byte offset of the `chars`-th char, clamped to the end of `text`.
pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Expand a trigger that ends at `caret` (a char offset).
pub fn expand_at_caret(text: &str, caret: usize) -> Option<Expansion> {
    let caret_byte = byte_offset(text, caret);
    let command = match_suffix(&text[..caret_byte])?;
    let start = caret_byte - command.trigger.len();
    let start_chars = text[..start].chars().count();
    Some(replace_range(text, start_chars, caret, command))
}

/// Replace the chars in `start..end` with the command's expansion.
pub fn replace_range(
    text: &str,
    start: usize,
    end: usize,
    command: &'static SlashCommand,
) -> Expansion {
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end.max(start));

    let mut out = String::with_capacity(text.len() + command.expansion.len());
    out.push_str(&text[..start_byte]);
    out.push_str(command.expansion);
    out.push_str(&text[end_byte..]);

    Expansion {
        command,
        text: out,
        caret: text[..start_byte].chars().count() + command.expansion.chars().count(),
    }
}
