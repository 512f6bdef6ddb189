//! Observability metrics for the registry view.
//!
//! Exposed through the `metrics` crate facade; install an exporter in the
//! binary to publish them.
//!
//! | Metric | Type | Description |
//! |--------|------|-------------|
//! | `sema_registry_updates_total` | Counter | Updates applied, labelled by topic |
//! | `sema_registry_records_skipped_total` | Counter | Records dropped (malformed or invalid spec) |
//! | `sema_registry_schemata` | Gauge | Schemata currently in the view |

use ::metrics::{counter, gauge};

/// Metric names as constants for consistency.
pub mod names {
    /// Counter: updates applied to the view.
    pub const UPDATES_TOTAL: &str = "sema_registry_updates_total";
    /// Counter: records dropped without being applied.
    pub const RECORDS_SKIPPED_TOTAL: &str = "sema_registry_records_skipped_total";
    /// Gauge: schemata currently in the view.
    pub const SCHEMATA: &str = "sema_registry_schemata";
}

/// Records one applied update for the given topic.
pub fn record_update(topic: &'static str) {
    counter!(names::UPDATES_TOTAL, "topic" => topic).increment(1);
}

/// Records one dropped record for the given topic.
pub fn record_skip(topic: &'static str) {
    counter!(names::RECORDS_SKIPPED_TOTAL, "topic" => topic).increment(1);
}

/// Updates the schemata gauge.
pub fn set_schema_count(count: usize) {
    #[allow(clippy::cast_precision_loss)]
    gauge!(names::SCHEMATA).set(count as f64);
}
