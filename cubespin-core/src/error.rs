//! Error type for scene and camera validation

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid solid #{index}: {reason}")]
    InvalidSolid { index: usize, reason: String },

    #[error(
        "camera distance {distance} does not clear solid #{index} (extent {extent}); \
         samples would reach the viewer plane"
    )]
    CameraTooClose {
        index: usize,
        extent: f64,
        distance: f64,
    },
}

impl CoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
