//! Daylight-saving transition policies for resolving local clock readings.

use serde::{Deserialize, Serialize};

/// Which candidate to choose when a local reading is ambiguous or missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Use the offset in force before the transition.
    #[default]
    Former,
    /// Use the offset in force after the transition.
    Latter,
}

/// Policy pair applied when turning a local wall-clock reading into an instant.
///
/// - `repeated` applies to a fold, where the reading occurs twice (fall back).
///   `Former` picks the earlier occurrence.
/// - `skipped` applies to a gap, where the reading never occurs (spring forward).
///   `Former` interprets the reading with the pre-transition offset, which lands
///   after the gap; `Latter` uses the post-transition offset and lands before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DstPolicy {
    pub repeated: TransitionPolicy,
    pub skipped: TransitionPolicy,
}

impl DstPolicy {
    /// Both ambiguities resolved with the pre-transition offset.
    pub const FORMER: DstPolicy = DstPolicy {
        repeated: TransitionPolicy::Former,
        skipped: TransitionPolicy::Former,
    };

    /// Both ambiguities resolved with the post-transition offset.
    pub const LATTER: DstPolicy = DstPolicy {
        repeated: TransitionPolicy::Latter,
        skipped: TransitionPolicy::Latter,
    };
}
