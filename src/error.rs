use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no usable font found; set `font: (path: \"...\")` in hueguess.ron")]
    FontNotFound,

    #[error("failed to read font {}: {source}", .path.display())]
    FontRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not a parseable font file", .path.display())]
    FontParse { path: PathBuf },

    #[error("failed to create the window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Render(#[from] pixels::Error),
}
