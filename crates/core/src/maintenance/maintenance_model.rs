/// Result of a single compaction pass that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactionOutcome {
    /// The store was rewritten and free space handed back.
    Reclaimed,
    /// Not enough free space to be worth a rewrite.
    NothingToReclaim,
}

/// What the user sees after asking for garbage collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompactionStatus {
    NoGcNeeded,
    Completed,
    Failed(String),
}

impl CompactionStatus {
    pub fn message(&self) -> String {
        match self {
            CompactionStatus::NoGcNeeded => "no GC needed".to_string(),
            CompactionStatus::Completed => "completed successfully".to_string(),
            CompactionStatus::Failed(err) => err.clone(),
        }
    }
}

impl From<CompactionOutcome> for CompactionStatus {
    fn from(outcome: CompactionOutcome) -> Self {
        match outcome {
            CompactionOutcome::Reclaimed => CompactionStatus::Completed,
            CompactionOutcome::NothingToReclaim => CompactionStatus::NoGcNeeded,
        }
    }
}
