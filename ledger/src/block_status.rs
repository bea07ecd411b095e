/// Reasons why the ledger rejected a block
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BlockStatus {
    /// Already seen and was valid
    Old,
    /// Block's previous does not exist
    GapPrevious,
    /// Block's source does not exist
    GapSource,
    /// Malicious fork based on previous
    Fork,
    /// Source block doesn't exist, has already been received, or requires an account upgrade
    Unreceivable,
    /// Balance and amount delta don't match
    BalanceMismatch,
    /// Receive or open without a source link
    MissingLink,
}

impl BlockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockStatus::Old => "old",
            BlockStatus::GapPrevious => "gap_previous",
            BlockStatus::GapSource => "gap_source",
            BlockStatus::Fork => "fork",
            BlockStatus::Unreceivable => "unreceivable",
            BlockStatus::BalanceMismatch => "balance_mismatch",
            BlockStatus::MissingLink => "missing_link",
        }
    }
}
