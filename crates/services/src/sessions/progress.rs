/// Aggregated view of level progress, useful for UI headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub level: u8,
    pub round_number: u8,
    pub total_rounds: u8,
    pub score: u8,
    pub is_finished: bool,
}
