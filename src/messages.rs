// User-facing status lines. The orchestrator and UI describe what happened
// with a `Notice`; a `MessageFormatter` decides how it looks.

use crossterm::style::Stylize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyToken,
    InvalidToken,
    ClientUnavailable(String),
    CatalogUnavailable,
    BreedNotFound(String),
    FolderCreateFailed(String),
    SaveFailed(String),
    Saved(PathBuf),
    Finished { uploaded: usize, failed: usize },
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Saved(_) | Notice::Finished { .. })
    }
}

pub trait MessageFormatter {
    fn format(&self, notice: &Notice) -> String;
}

/// Glyph-prefixed English lines, optionally coloured.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter {
    pub color: bool,
}

impl ConsoleFormatter {
    pub fn new(color: bool) -> Self {
        ConsoleFormatter { color }
    }
}

impl MessageFormatter for ConsoleFormatter {
    fn format(&self, notice: &Notice) -> String {
        let text = match notice {
            Notice::EmptyToken => "Token must not be empty.".to_string(),
            Notice::InvalidToken => "Token contains characters that cannot be sent.".to_string(),
            Notice::ClientUnavailable(err) => format!("Could not set up the HTTP client: {}", err),
            Notice::CatalogUnavailable => "Could not fetch the list of breeds.".to_string(),
            Notice::BreedNotFound(breed) => format!("Breed '{}' not found.", breed),
            Notice::FolderCreateFailed(folder) => {
                format!("Could not create folder {} on the disk.", folder)
            }
            Notice::SaveFailed(err) => format!("Failed to save results: {}", err),
            Notice::Saved(path) => format!("Results saved to {}", path.display()),
            Notice::Finished { uploaded, failed } => {
                format!("Done! {} uploaded, {} failed.", uploaded, failed)
            }
        };
        let glyph = match notice {
            Notice::Saved(_) => "•",
            Notice::Finished { .. } => "✔",
            _ => "✘",
        };
        let line = format!("{} {}", glyph, text);
        if !self.color {
            return line;
        }
        match notice {
            Notice::Saved(_) => line.dim().to_string(),
            Notice::Finished { failed: 0, .. } => line.green().to_string(),
            Notice::Finished { .. } => line.yellow().to_string(),
            _ => line.red().to_string(),
        }
    }
}
