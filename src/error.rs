use crate::config::ConfigError;
use crate::estimate::EstimateError;
use crate::layout::LayoutError;

/// Any error raised while preparing a figure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Estimate(#[from] EstimateError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
