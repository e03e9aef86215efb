//! The title block and how it is placed.

use serde::Serialize;

/// Text color used when none is configured.
pub const DEFAULT_COLOR: &str = "#00FF00";

/// `name` of the injected block, so bar configs can address it.
pub const TITLE_BLOCK_NAME: &str = "window_title";

/// Where the title block goes in each status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    /// Before every other block (leftmost on the bar).
    #[default]
    Start,
    /// After every other block (rightmost on the bar).
    End,
}

/// How the title block is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleOptions {
    /// i3bar color code for the block text.
    pub color: String,
    /// Position of the block within each line.
    pub placement: Placement,
    /// Truncate and pad the title to exactly this many characters.
    pub fixed_width: Option<usize>,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            placement: Placement::Start,
            fixed_width: None,
        }
    }
}

impl TitleOptions {
    /// Build the block for `title` under these options.
    pub fn block(&self, title: &str) -> TitleBlock<'_> {
        let full_text = match self.fixed_width {
            Some(width) => truncate_and_pad(title, width),
            None => title.to_string(),
        };
        TitleBlock {
            color: &self.color,
            full_text,
            name: TITLE_BLOCK_NAME,
        }
    }
}

/// A single i3bar block holding the window title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleBlock<'a> {
    /// Text color.
    pub color: &'a str,
    /// The (possibly fixed-width) title.
    pub full_text: String,
    /// Always [`TITLE_BLOCK_NAME`].
    pub name: &'static str,
}

/// Cut `value` to at most `width` characters, then left-align it in a field
/// of exactly `width` characters.
pub fn truncate_and_pad(value: &str, width: usize) -> String {
    let cut: String = value.chars().take(width).collect();
    format!("{cut:<width$}")
}
