//! Query-URL construction for the ARM Live data webservice.

use chrono::{Duration, NaiveDateTime};

use crate::archive::date_format::parse_date;
use crate::archive::error::ArchiveError;

pub(crate) const ARCHIVE_BASE_URL: &str = "https://adc.arm.gov/armlive/livedata";

/// The webservice expects ISO-8601 instants at millisecond precision with a
/// trailing `Z`.
const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// ARM Live account credentials: a username and the access token issued by
/// the archive. Transmitted as `user=username:token`; never validated or
/// stored beyond the call.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    pub(crate) fn user_field(&self) -> String {
        format!("{}:{}", self.username, self.token)
    }
}

/// The time span of an archive query. Either bound may be absent, in which
/// case the archive applies no constraint on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryWindow {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl QueryWindow {
    /// Builds a window from raw user-supplied date strings, accepting any of
    /// the layouts recognized by [`parse_date`].
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self, ArchiveError> {
        Ok(Self {
            start: start.map(parse_date).transpose()?,
            end: end.map(parse_date).transpose()?,
        })
    }

    /// A window whose bounds name the same instant covers that entire day:
    /// the end is pushed to 23:59:59.999 so a single-day query does not
    /// degenerate to a zero-length span.
    pub fn widened(self) -> Self {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start == end => Self {
                start: Some(start),
                end: Some(
                    end + Duration::hours(23)
                        + Duration::minutes(59)
                        + Duration::seconds(59)
                        + Duration::milliseconds(999),
                ),
            },
            _ => self,
        }
    }
}

/// Builds the file-listing query URL.
///
/// Parameter values are concatenated as-is; callers must supply a
/// datastream name and credentials free of control characters.
pub(crate) fn query_url(credentials: &Credentials, datastream: &str, window: QueryWindow) -> String {
    let window = window.widened();
    let mut url = format!(
        "{ARCHIVE_BASE_URL}/query?user={}&ds={}",
        credentials.user_field(),
        datastream
    );
    if let Some(start) = window.start {
        url.push_str(&format!("&start={}Z", start.format(INSTANT_FORMAT)));
    }
    if let Some(end) = window.end {
        url.push_str(&format!("&end={}Z", end.format(INSTANT_FORMAT)));
    }
    url.push_str("&wt=json");
    url
}

/// Builds the per-file retrieval URL for one name out of a listing.
pub(crate) fn save_data_url(credentials: &Credentials, filename: &str) -> String {
    format!(
        "{ARCHIVE_BASE_URL}/saveData?user={}&file={}",
        credentials.user_field(),
        filename
    )
}
