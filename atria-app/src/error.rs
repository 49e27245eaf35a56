use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtriaAppError {
    #[error("Feature source error: `{0}`")]
    SourceError(String),

    #[error("Internal error: `{0}`")]
    InternalError(String),
}
