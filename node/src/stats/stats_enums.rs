use serde::Serialize;
use serde_variant::to_variant_name;

/// Primary statistics type
#[derive(Serialize, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    ElectionScheduler,
    ActiveElections,
    Ledger,
}

impl StatType {
    pub fn as_str(&self) -> &'static str {
        to_variant_name(self).unwrap_or_default()
    }
}

/// Optional detail type
#[derive(Serialize, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DetailType {
    // common
    Loop,
    Dropped,

    // election scheduler
    Activated,
    ActivateSkip,
    ActivateFailed,
    Insert,
    InsertActivated,
    Promoted,

    // active elections
    ElectionStarted,
    ElectionJoined,
    Confirmed,

    // ledger
    Processed,
    Rejected,
    Cemented,
}

impl DetailType {
    pub fn as_str(&self) -> &'static str {
        to_variant_name(self).unwrap_or_default()
    }
}

/// Direction of the stat. If the direction is irrelevant, use In
#[derive(Serialize, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        to_variant_name(self).unwrap_or_default()
    }
}
