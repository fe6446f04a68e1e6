mod analysis;
mod archive;
mod error;
mod sail_archive;
mod stations;

pub use error::SailDataError;
pub use sail_archive::*;

pub use archive::date_format::{parse_date, reformat_date, DEFAULT_OUTPUT_FORMAT};
pub use archive::error::ArchiveError;
pub use archive::listing::FileListing;
pub use archive::opener::{DatasetOpener, DelimitedOpener};
pub use archive::query::{Credentials, QueryWindow};

pub use stations::error::StationDataError;
pub use stations::loader::{load_station_csv, StationObservations};
pub use stations::metadata::StationMetadata;
pub use stations::registry::{SiteRecord, SiteRegistry};

pub use analysis::windrose::{windrose_table, DIRECTION_LABELS, SPEED_BIN_LABELS};
