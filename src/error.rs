use crate::archive::error::ArchiveError;
use crate::stations::error::StationDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SailDataError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    StationData(#[from] StationDataError),
}
