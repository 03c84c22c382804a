use crate::events::EventHandler;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

const FALLBACK_EDITORS: [&str; 4] = ["nvim", "vim", "nano", "vi"];

fn which_editor() -> String {
    FALLBACK_EDITORS
        .iter()
        .find(|editor| {
            Command::new("which")
                .arg(editor)
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        })
        .unwrap_or(&"vi")
        .to_string()
}

/// Hand the terminal to `$EDITOR` on a temp file seeded with `initial`.
///
/// Returns the edited text, or `None` if the editor exited unsuccessfully.
/// The caller must recreate its [`EventHandler`] afterwards.
pub fn edit_in_external_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    event_handler: &EventHandler,
    temp_file: &Path,
    initial: &str,
) -> io::Result<Option<String>> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| which_editor());
    std::fs::write(temp_file, initial)?;

    event_handler.stop();
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    io::stdout().flush()?;

    let status = Command::new(&editor).arg(temp_file).status();

    // Drop keys typed into the editor so they do not leak into the board
    while crossterm::event::poll(std::time::Duration::ZERO)? {
        let _ = crossterm::event::read()?;
    }
    execute!(io::stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    terminal.clear()?;

    let status = match status {
        Ok(status) => status,
        Err(e) => {
            tracing::error!("Failed to launch editor '{}': {}", editor, e);
            let _ = std::fs::remove_file(temp_file);
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Editor '{}' not found. Set $EDITOR.", editor),
            ));
        }
    };

    let edited = if status.success() {
        Some(std::fs::read_to_string(temp_file)?)
    } else {
        None
    };
    let _ = std::fs::remove_file(temp_file);
    Ok(edited)
}
