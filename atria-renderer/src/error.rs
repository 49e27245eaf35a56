#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AtriaRendererError {
    #[error("Value count ({value_len}) does not match color count ({color_len})")]
    ValueColorMismatch { value_len: usize, color_len: usize },
}
