//! Walks an archive file listing and assembles the retrieved files into one
//! time-ordered frame.

use log::{info, warn};
use polars::frame::DataFrame;
use polars::prelude::SortMultipleOptions;
use std::sync::Arc;

use crate::archive::error::ArchiveError;
use crate::archive::listing::interpret_body;
use crate::archive::opener::{DatasetOpener, DelimitedOpener};
use crate::archive::query::{query_url, save_data_url, Credentials, QueryWindow};

/// Column the archive's datasets are ordered along.
pub(crate) const TIME_COLUMN: &str = "time";

pub struct ArchiveFetcher {
    http: reqwest::Client,
    opener: Arc<dyn DatasetOpener>,
}

impl ArchiveFetcher {
    pub fn new() -> Self {
        Self::with_opener(Arc::new(DelimitedOpener::new()))
    }

    pub fn with_opener(opener: Arc<dyn DatasetOpener>) -> Self {
        Self {
            http: reqwest::Client::new(),
            opener,
        }
    }

    /// Queries the archive and retrieves every matching file, concatenated
    /// along the time column and sorted ascending.
    ///
    /// `Ok(None)` means the archive had nothing for the request (service
    /// down, non-success status, or an empty match set); credential and
    /// transport problems are errors. Files are retrieved in listing order;
    /// when `time_filter` is set, filenames not containing it are skipped.
    pub async fn fetch(
        &self,
        credentials: &Credentials,
        datastream: &str,
        window: QueryWindow,
        time_filter: Option<&str>,
    ) -> Result<Option<DataFrame>, ArchiveError> {
        let url = query_url(credentials, datastream, window);
        let body = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.clone(), e))?
            .text()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.clone(), e))?;

        let Some(listing) = interpret_body(&body)? else {
            warn!("Live data webservice does not appear to be functioning");
            return Ok(None);
        };

        if !listing.is_success() || listing.files.is_empty() {
            warn!(
                "No files returned or url status error for {datastream}. \
                 Check datastream name, start, and end date."
            );
            return Ok(None);
        }

        let mut combined: Option<DataFrame> = None;
        for filename in &listing.files {
            if let Some(filter) = time_filter {
                if !filename.contains(filter) {
                    continue;
                }
            }
            info!("[DOWNLOADING] {filename}");
            let frame = self.opener.open(&save_data_url(credentials, filename)).await?;
            combined = Some(accumulate(combined, frame)?);
        }

        if combined.is_none() {
            warn!("No files for {datastream} matched the requested time filter");
        }
        Ok(combined)
    }
}

impl Default for ArchiveFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Stacks `frame` onto the running result and re-sorts by the time column.
/// Listings are short enough that the repeated sort does not matter.
fn accumulate(acc: Option<DataFrame>, frame: DataFrame) -> Result<DataFrame, ArchiveError> {
    Ok(match acc {
        None => frame,
        Some(mut acc) => {
            acc.vstack_mut(&frame)?;
            acc.sort([TIME_COLUMN], SortMultipleOptions::default())?
        }
    })
}
