//! Session-scoped briquette identifier registry.
//!
//! Identifiers are human-readable labels of the form
//! `<prefix><YYYYMMDD><zero-padded counter>`, e.g. `DWC20250701007`.
//! Each segment index receives its identifier lazily, on the first
//! annotation that touches the segment; repeat lookups return the
//! same identifier for the life of the session. The counter is
//! monotonic and never reused, even for segments that later leave
//! the filtered view.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Identifier synthesis settings.
#[derive(Debug, Clone)]
pub struct IdentifierConfig {
    /// Fixed prefix, e.g. `DWC`.
    pub prefix: String,
    /// Zero-padding width of the counter, e.g. 3 → `007`.
    pub pad: usize,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            prefix: "DWC".to_string(),
            pad: 3,
        }
    }
}

/// Lazily assigns one identifier per segment index.
#[derive(Debug, Clone)]
pub struct IdentifierRegistry {
    config: IdentifierConfig,
    /// `YYYYMMDD` stamp fixed at registry construction.
    date_stamp: String,
    seq: u64,
    map: BTreeMap<usize, String>,
}

impl IdentifierRegistry {
    /// Create a registry stamping identifiers with the given date.
    ///
    /// The date is injected rather than read from the clock so that
    /// identifier synthesis is deterministic under test.
    pub fn new(config: IdentifierConfig, date: NaiveDate) -> Self {
        Self {
            config,
            date_stamp: date.format("%Y%m%d").to_string(),
            seq: 0,
            map: BTreeMap::new(),
        }
    }

    /// Create a registry stamped with today's UTC date.
    pub fn for_today(config: IdentifierConfig) -> Self {
        Self::new(config, chrono::Utc::now().date_naive())
    }

    /// Return the identifier for `briq_idx`, creating it on first use.
    ///
    /// Idempotent: repeat calls with the same index return the same
    /// identifier without advancing the counter.
    pub fn get_or_create(&mut self, briq_idx: usize) -> &str {
        if !self.map.contains_key(&briq_idx) {
            self.seq += 1;
            let id = format!(
                "{}{}{:0width$}",
                self.config.prefix,
                self.date_stamp,
                self.seq,
                width = self.config.pad
            );
            self.map.insert(briq_idx, id);
        }
        &self.map[&briq_idx]
    }

    /// Look up an already-assigned identifier.
    pub fn get(&self, briq_idx: usize) -> Option<&str> {
        self.map.get(&briq_idx).map(String::as_str)
    }

    /// Number of identifiers assigned so far.
    pub fn assigned_count(&self) -> usize {
        self.map.len()
    }
}
