//! Terminal rendering for markdown output.
//!
//! Display impls in the core produce markdown. With color enabled it is
//! styled with termimad; otherwise it is printed as-is.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders markdown either styled or as plain text
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Prints `markdown`. Header lines keep their hashes so nesting stays
    /// visible.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[36m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# Journey\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }
}
