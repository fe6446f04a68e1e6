pub mod date_format;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod opener;
pub mod query;
