//! Line-oriented shell for driving the palette from a terminal.
//!
//! Each input line is either query text or a `:command`:
//!
//! ```text
//! acme            set the query (opens the palette if needed)
//! :up :down       move the cursor (also :home, :end)
//! :enter :esc     activate / dismiss
//! :key cmd+k      send an arbitrary keystroke through the keymap
//! :pick 2         click row 2
//! :open :close    show / hide
//! :quit           exit
//! ```
//!
//! A printer task re-renders the palette whenever its snapshot changes.

use hearth_palette::{Keystroke, KeystrokeError};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt};

use crate::controller::PaletteController;
use crate::views::render_snapshot;

// =============================================================================
// Commands
// =============================================================================

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Query(String),
    Key(Keystroke),
    Pick(usize),
    Open,
    Close,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("Unknown command ':{0}'")]
    UnknownCommand(String),

    #[error("Invalid keystroke: {0}")]
    Keystroke(#[from] KeystrokeError),

    #[error("Expected a row number, got '{0}'")]
    InvalidRow(String),
}

impl ShellCommand {
    /// Parse one input line. Lines not starting with `:` are queries.
    pub fn parse(line: &str) -> Result<Self, ShellError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            return Ok(ShellCommand::Query(line.to_string()));
        };

        let (name, arg) = match command.split_once(' ') {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "up" | "down" | "home" | "end" | "enter" | "esc" | "escape" => {
                Ok(ShellCommand::Key(Keystroke::plain(name)))
            }
            "key" => Ok(ShellCommand::Key(Keystroke::parse(arg)?)),
            "pick" => arg
                .parse()
                .map(ShellCommand::Pick)
                .map_err(|_| ShellError::InvalidRow(arg.to_string())),
            "open" => Ok(ShellCommand::Open),
            "close" => Ok(ShellCommand::Close),
            "quit" | "q" => Ok(ShellCommand::Quit),
            other => Err(ShellError::UnknownCommand(other.to_string())),
        }
    }
}

// =============================================================================
// Shell Loop
// =============================================================================

/// Drive `controller` from `input` until `:quit` or end of input.
///
/// Must be called from within a tokio runtime.
pub async fn run_palette<R>(controller: PaletteController, input: R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let printer = tokio::spawn(print_snapshots(controller.clone()));
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        match ShellCommand::parse(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => dispatch(&controller, command),
            Err(e) => tracing::warn!("{}", e),
        }
    }

    printer.abort();
    tracing::info!("Shell input closed");
    Ok(())
}

fn dispatch(controller: &PaletteController, command: ShellCommand) {
    match command {
        ShellCommand::Query(query) => {
            controller.open();
            controller.set_query(query);
        }
        ShellCommand::Key(key) => {
            if !controller.handle_key(&key) {
                tracing::debug!("Unbound key: {}", key);
            }
        }
        ShellCommand::Pick(index) => {
            controller.activate_index(index);
        }
        ShellCommand::Open => controller.open(),
        ShellCommand::Close => controller.close(),
        ShellCommand::Quit => {}
    }
}

async fn print_snapshots(controller: PaletteController) {
    let mut rx = controller.subscribe();
    let mut stdout = tokio::io::stdout();

    while rx.changed().await.is_ok() {
        let text = render_snapshot(&rx.borrow_and_update());
        let frame = if text.is_empty() {
            "(palette closed)\n\n".to_string()
        } else {
            format!("{}\n\n", text)
        };
        if let Err(e) = stdout.write_all(frame.as_bytes()).await {
            tracing::warn!("Failed to write palette: {}", e);
            break;
        }
        let _ = stdout.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::navigation::MockNavigator;
    use hearth_core::PaletteConfig;
    use hearth_palette::{CapabilitySet, MemoryStore, PaletteRegistry, RecentItems};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_parse_query() {
        assert_eq!(
            ShellCommand::parse("harbor hotel\n"),
            Ok(ShellCommand::Query("harbor hotel".to_string()))
        );
        assert_eq!(ShellCommand::parse(""), Ok(ShellCommand::Query(String::new())));
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            ShellCommand::parse(":esc"),
            Ok(ShellCommand::Key(Keystroke::plain("escape")))
        );
        assert_eq!(
            ShellCommand::parse(":key cmd+k"),
            Ok(ShellCommand::Key(Keystroke::parse("cmd+k").unwrap()))
        );
        assert_eq!(
            ShellCommand::parse(":key hyper+k"),
            Err(ShellError::Keystroke(KeystrokeError::UnknownModifier(
                "hyper".to_string()
            )))
        );
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(ShellCommand::parse(":pick 3"), Ok(ShellCommand::Pick(3)));
        assert_eq!(
            ShellCommand::parse(":pick x"),
            Err(ShellError::InvalidRow("x".to_string()))
        );
        assert_eq!(ShellCommand::parse(":q"), Ok(ShellCommand::Quit));
        assert_eq!(
            ShellCommand::parse(":frobnicate"),
            Err(ShellError::UnknownCommand("frobnicate".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_palette_drives_controller() {
        let controller = PaletteController::new(
            Arc::new(MockBackend::new()),
            Arc::new(RecentItems::new(Arc::new(MemoryStore::new()))),
            Arc::new(PaletteRegistry::default()),
            Arc::new(CapabilitySet::new()),
            Arc::new(MockNavigator::new()),
            PaletteConfig::default(),
        );

        let input: &[u8] = b":open\n:bogus\nharbor\n:quit\nignored\n";
        run_palette(controller.clone(), input).await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.query, "harbor");
        assert_eq!(snapshot.titles(), vec!["harbor"]);
    }
}
