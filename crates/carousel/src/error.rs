//! Carousel error types

use contracts::RootId;
use thiserror::Error;

/// Carousel construction errors
#[derive(Debug, Error)]
pub enum CarouselError {
    /// A carousel needs at least one image
    #[error("carousel '{root_id}' has no images")]
    EmptyImageList { root_id: RootId },

    /// Initial index outside the image list
    #[error("carousel '{root_id}' initial index {index} out of range for {len} images")]
    InitialIndexOutOfRange {
        root_id: RootId,
        index: usize,
        len: usize,
    },

    /// Rotation interval must be positive
    #[error("carousel '{root_id}' rotation interval must be > 0")]
    ZeroInterval { root_id: RootId },
}
