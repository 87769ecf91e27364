//! Timezone lookup result

use serde::{Deserialize, Serialize};

/// IANA zone for a location plus its local wall-clock time
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneInfo {
    /// IANA identifier, e.g. `Europe/Berlin`
    pub timezone_id: String,
    /// Local time as RFC 3339 with the zone offset
    pub local_time: String,
}
