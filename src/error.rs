//! Errors raised while building the mini panel

/// Why the mini panel could not be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiniPanelError {
    /// A sprite reported a zero-sized frame
    InvalidFrame { sprite: String, width: u32, height: u32 },
    /// A sprite sheet has fewer frames than a button needs
    MissingFrame { sprite: String, frame: usize, frames: usize },
    /// An asset failed to load
    AssetLoad { path: String, reason: String },
}

impl std::fmt::Display for MiniPanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MiniPanelError::InvalidFrame { sprite, width, height } => {
                write!(f, "sprite {} has an invalid frame size {}x{}", sprite, width, height)
            }
            MiniPanelError::MissingFrame { sprite, frame, frames } => {
                write!(f, "sprite {} has no frame {} (only {} frames)", sprite, frame, frames)
            }
            MiniPanelError::AssetLoad { path, reason } => {
                write!(f, "failed to load {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for MiniPanelError {}
