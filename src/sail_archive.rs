//! Main entry point for querying the SAIL campaign archive through the ARM
//! Live data webservice.

use crate::archive::fetch::ArchiveFetcher;
use crate::archive::opener::DatasetOpener;
use crate::archive::query::{Credentials, QueryWindow};
use crate::error::SailDataError;
use bon::bon;
use polars::frame::DataFrame;
use std::sync::Arc;

/// Client for the ARM Live data webservice.
///
/// Holds the account credentials and retrieves datastream files matching a
/// date window, concatenated into one time-ordered [`DataFrame`]. The client
/// keeps no state between calls and performs no caching or retries; a
/// failed request surfaces immediately.
///
/// # Examples
///
/// ```no_run
/// # use sail_data::{SailArchive, SailDataError};
/// # async fn run() -> Result<(), SailDataError> {
/// let archive = SailArchive::new("userName", "XXXXXXXXXXXXXXXX");
///
/// // All gucmetM1.b1 files between 14 and 20 Jan 2022.
/// let data = archive
///     .fetch()
///     .datastream("gucmetM1.b1")
///     .start("2022-01-14")
///     .end("2022-01-20")
///     .call()
///     .await?;
///
/// match data {
///     Some(frame) => println!("{frame}"),
///     None => println!("archive had nothing for that window"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct SailArchive {
    credentials: Credentials,
    fetcher: ArchiveFetcher,
}

#[bon]
impl SailArchive {
    /// Creates a client using the built-in delimited-text dataset opener.
    ///
    /// Register for a username and access token at the ARM Live landing
    /// page; the pair is passed with every request and never stored
    /// anywhere else.
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, token),
            fetcher: ArchiveFetcher::new(),
        }
    }

    /// Creates a client that opens retrieved files with `opener` instead of
    /// the built-in delimited-text reader. Use this to plug in a NetCDF
    /// reader for datastreams published in that format.
    pub fn with_opener(
        username: impl Into<String>,
        token: impl Into<String>,
        opener: Arc<dyn DatasetOpener>,
    ) -> Self {
        Self {
            credentials: Credentials::new(username, token),
            fetcher: ArchiveFetcher::with_opener(opener),
        }
    }

    /// Queries the archive for one datastream and retrieves every matching
    /// file, concatenated along the time column.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.datastream(&str)`: **Required.** The datastream name, e.g.
    ///   `"gucsondewnpnM1.b1"`.
    /// * `.start(&str)` / `.end(&str)`: Optional date bounds. Accepted
    ///   layouts are `YYYY-MM-DD`, `DD.MM.YYYY`, `DD/MM/YYYY`, `YYYYMMDD`
    ///   and `YYYY/MM/DD`, each optionally with a `THH:MM:SS` suffix. When
    ///   both bounds name the same day the query covers that entire day.
    /// * `.time(&str)`: Optional `HHMMSS` filter; listed files whose names
    ///   do not contain it are skipped.
    ///
    /// # Returns
    ///
    /// `Ok(Some(frame))` with the concatenated, time-sorted data, or
    /// `Ok(None)` when the webservice is down, reports a non-success
    /// status, or lists no matching files. "Nothing to retrieve" is a
    /// normal result here, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SailDataError`] wrapping
    /// [`ArchiveError`](crate::ArchiveError) variants for unparseable date
    /// bounds, rejected credentials (the webservice answers those with an
    /// HTML page), transport failures, and files that cannot be opened as
    /// datasets.
    #[builder]
    pub async fn fetch(
        &self,
        datastream: &str,
        start: Option<&str>,
        end: Option<&str>,
        time: Option<&str>,
    ) -> Result<Option<DataFrame>, SailDataError> {
        let window = QueryWindow::from_bounds(start, end)?;
        self.fetcher
            .fetch(&self.credentials, datastream, window, time)
            .await
            .map_err(SailDataError::from)
    }
}
