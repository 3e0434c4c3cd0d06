//! Interactive journey session over stdin.

use anyhow::Result;
use log::{debug, warn};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use waypoint_core::{
    display::OperationStatus,
    params::{AddStep, StartJourney, Suggest},
};

use crate::cli::Cli;

const HELP: &str = "## Session commands

- `<number>` add that suggestion as a step
- `<text>` add a step (or start a journey when none exists)
- `suggest` regenerate suggestions
- `select <step id>` suggest from an earlier step
- `click <node id>` suggest from a diagram node, e.g. `node_2`
- `undo` / `redo`
- `complete` generate a complete journey
- `show` / `diagram`
- `palette` cycle the diagram palette
- `zoom in` / `zoom out` / `zoom reset`
- `quit`
";

/// One parsed line of session input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Pick(usize),
    Select(&'a str),
    Click(&'a str),
    Zoom(&'a str),
    Word(&'a str),
    Text(&'a str),
    Quit,
}

fn parse(line: &str) -> Option<Input<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Ok(number) = line.parse::<usize>() {
        return Some(Input::Pick(number));
    }

    let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    Some(match (head, rest.is_empty()) {
        ("quit" | "exit" | "q", true) => Input::Quit,
        ("select", false) => Input::Select(rest),
        ("click", false) => Input::Click(rest),
        ("zoom", false) => Input::Zoom(rest),
        (
            "suggest" | "undo" | "redo" | "complete" | "show" | "diagram" | "palette" | "help",
            true,
        ) => Input::Word(head),
        _ => Input::Text(line),
    })
}

impl Cli {
    /// Reads commands until `quit` or end of input.
    ///
    /// Errors from individual commands are reported and the session keeps
    /// going.
    pub async fn session(&mut self) -> Result<()> {
        self.show_journey()?;
        self.renderer.render(HELP)?;

        let mut lines = BufReader::new(io::stdin()).lines();
        let mut stdout = io::stdout();
        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let Some(input) = parse(&line) else {
                continue;
            };
            if input == Input::Quit {
                break;
            }
            debug!("Session input: {input:?}");

            if let Err(e) = self.dispatch(input).await {
                warn!("Session command failed: {e:#}");
                self.renderer
                    .render(&OperationStatus::failure(format!("{e:#}")).to_string())?;
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, input: Input<'_>) -> Result<()> {
        match input {
            Input::Pick(number) => self.pick_from_current(number).await,
            Input::Select(step_id) => {
                self.suggest(Suggest {
                    step_id: Some(step_id.to_string()),
                })
                .await
            }
            Input::Click(node_id) => {
                let generation = self.mapper.click_node(node_id).await?;
                self.renderer.render(&generation.to_string())
            }
            Input::Zoom(direction) => self.zoom(direction),
            Input::Word("suggest") => self.suggest(Suggest::default()).await,
            Input::Word("undo") => self.undo().await,
            Input::Word("redo") => self.redo().await,
            Input::Word("complete") => self.complete().await,
            Input::Word("show") => self.show_journey(),
            Input::Word("diagram") => self.diagram(None),
            Input::Word("palette") => {
                let context = self.mapper.journey().context().to_string();
                let palette = self.mapper.diagram_adapter_mut().cycle_palette(&context);
                self.renderer.render(
                    &OperationStatus::success(format!("Palette: {}", palette.name)).to_string(),
                )
            }
            Input::Word(_) => self.renderer.render(HELP),
            Input::Text(text) if self.mapper.journey().is_empty() => {
                self.start(StartJourney {
                    context: text.to_string(),
                })
                .await
            }
            Input::Text(text) => {
                self.add(AddStep {
                    text: text.to_string(),
                })
                .await
            }
            Input::Quit => Ok(()),
        }
    }

    fn zoom(&mut self, direction: &str) -> Result<()> {
        let viewport = self.mapper.diagram_adapter_mut().viewport_mut();
        match direction {
            "in" => viewport.zoom_in(),
            "out" => viewport.zoom_out(),
            "reset" => viewport.reset(),
            other => {
                return self.renderer.render(
                    &OperationStatus::failure(format!("Unknown zoom '{other}'")).to_string(),
                )
            }
        }
        let percent = (viewport.zoom() * 100.0).round();
        self.renderer
            .render(&OperationStatus::success(format!("Zoom: {percent}%")).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers_and_words() {
        assert_eq!(parse(" 2 "), Some(Input::Pick(2)));
        assert_eq!(parse("undo"), Some(Input::Word("undo")));
        assert_eq!(parse("quit"), Some(Input::Quit));
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(parse("select 1712"), Some(Input::Select("1712")));
        assert_eq!(parse("click node_3"), Some(Input::Click("node_3")));
        assert_eq!(parse("zoom in"), Some(Input::Zoom("in")));
    }

    #[test]
    fn test_parse_free_text() {
        assert_eq!(parse("Add to cart"), Some(Input::Text("Add to cart")));
        // A command word followed by text is a step, not a command
        assert_eq!(parse("undo the order"), Some(Input::Text("undo the order")));
        assert_eq!(parse("select"), Some(Input::Text("select")));
    }
}
