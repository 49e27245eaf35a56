#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AtriaScaleError {
    #[error("Requested bin count must be at least 1")]
    InvalidBinCount,
}
