//! The seam between the archive client and whatever engine turns a
//! retrieved file into tabular data.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use polars::frame::DataFrame;
use polars::prelude::*;
use reqwest::Client;
use std::io::Write;
use tempfile::NamedTempFile;
use tokio::io::AsyncReadExt;
use tokio::task;
use tokio_util::io::StreamReader;

use crate::archive::error::ArchiveError;

/// Opens one remote file reference as a [`DataFrame`].
///
/// The archive serves instrument files in whatever format the datastream was
/// published in; deployments with a NetCDF reader wrap it in this trait. The
/// built-in [`DelimitedOpener`] covers datastreams exported as delimited
/// text. Frames are expected to carry a `time` column so retrieved files can
/// be concatenated and ordered.
#[async_trait]
pub trait DatasetOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<DataFrame, ArchiveError>;
}

/// Opener for datastreams served as delimited text with a header row.
pub struct DelimitedOpener {
    client: Client,
}

impl DelimitedOpener {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ArchiveError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ArchiveError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    ArchiveError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ArchiveError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let mut reader = StreamReader::new(stream);
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .await
            .map_err(ArchiveError::DownloadIo)?;
        Ok(bytes)
    }
}

impl Default for DelimitedOpener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetOpener for DelimitedOpener {
    async fn open(&self, url: &str) -> Result<DataFrame, ArchiveError> {
        let bytes = self.download(url).await?;
        let url = url.to_string();
        task::spawn_blocking(move || read_delimited(bytes, &url)).await?
    }
}

/// Parses delimited bytes into a DataFrame through a temp file, since the
/// polars reader wants a path.
fn read_delimited(bytes: Vec<u8>, url: &str) -> Result<DataFrame, ArchiveError> {
    let io_err = |source| ArchiveError::DatasetIo {
        url: url.to_string(),
        source,
    };

    let mut temp_file = NamedTempFile::new().map_err(io_err)?;
    temp_file.write_all(&bytes).map_err(io_err)?;
    temp_file.flush().map_err(io_err)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(temp_file.path().to_path_buf()))
        .map_err(|source| ArchiveError::DatasetParse {
            url: url.to_string(),
            source,
        })?
        .finish()
        .map_err(|source| ArchiveError::DatasetParse {
            url: url.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_bytes_become_a_frame() {
        let bytes = b"time,tdry\n1,10.5\n0,9.0\n".to_vec();
        let frame = read_delimited(bytes, "test://fixture").unwrap();
        assert_eq!(frame.shape(), (2, 2));
        assert_eq!(frame.get_column_names(), ["time", "tdry"]);
    }

    #[test]
    fn empty_body_reports_a_parse_error() {
        let err = read_delimited(Vec::new(), "test://fixture").unwrap_err();
        assert!(matches!(err, ArchiveError::DatasetParse { .. }));
    }
}
