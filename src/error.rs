use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The user declined to overwrite or interrupted a prompt.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("No bundled template named \"{0}\"")]
    UnknownTemplate(String),

    #[error("Templates directory {} does not exist", .0.display())]
    MissingTemplateDir(PathBuf),
}

impl ScaffoldError {
    /// Whether `err` is a cancellation somewhere in its chain.
    #[must_use]
    pub fn is_cancelled(err: &anyhow::Error) -> bool {
        err.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<ScaffoldError>(),
                Some(ScaffoldError::Cancelled)
            )
        })
    }
}
