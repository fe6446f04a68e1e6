//! Accumulates per-site metadata (location plus column units) across
//! repeated station loads.
//!
//! The registry is an explicit value the caller owns and threads through its
//! loads, so two sites absorbed from different files never alias each other.

use polars::frame::DataFrame;
use polars::prelude::Column;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::stations::error::StationDataError;
use crate::stations::loader::StationObservations;

#[derive(Debug, Clone, Default)]
pub struct SiteRecord {
    pub location: HashMap<String, String>,
    pub units: HashMap<String, String>,
}

/// Site name → location attributes and per-column units.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: BTreeMap<String, SiteRecord>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one load's site identity into the registry. Absorbing the
    /// same site twice overlays its entries rather than duplicating them.
    pub fn absorb(&mut self, observations: &StationObservations) {
        let record = self
            .sites
            .entry(observations.site_name.clone())
            .or_default();
        record
            .location
            .extend(observations.location.iter().map(|(k, v)| (k.clone(), v.clone())));
        record
            .units
            .extend(observations.units.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    pub fn get(&self, site_name: &str) -> Option<&SiteRecord> {
        self.sites.get(site_name)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn site_names(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    /// Renders the registry as a table with one row per site: a `site`
    /// column followed by the union of the location attributes, sites in
    /// name order. Attributes a site lacks come out empty.
    pub fn to_frame(&self) -> Result<DataFrame, StationDataError> {
        let attribute_keys: BTreeSet<&str> = self
            .sites
            .values()
            .flat_map(|record| record.location.keys().map(String::as_str))
            .collect();

        let names: Vec<&str> = self.sites.keys().map(String::as_str).collect();
        let mut columns = vec![Column::new("site".into(), names)];
        for key in attribute_keys {
            let values: Vec<String> = self
                .sites
                .values()
                .map(|record| record.location.get(key).cloned().unwrap_or_default())
                .collect();
            columns.push(Column::new(key.into(), values));
        }
        Ok(DataFrame::new(columns)?)
    }
}
