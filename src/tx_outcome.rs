/// Which transaction boundary a pseudo-connection was asked to cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxBoundary {
    Begin,
    Commit,
}

/// Outcome returned by beginning or committing a transaction on a pseudo-connection.
///
/// Completion is immediate and carries no guarantee: the gateway runs each statement on its
/// own, so work issued between `Begin` and `Commit` is neither isolated nor rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    boundary: TxBoundary,
}

impl TxOutcome {
    #[must_use]
    pub(crate) fn completed(boundary: TxBoundary) -> Self {
        Self { boundary }
    }

    #[must_use]
    pub fn boundary(&self) -> TxBoundary {
        self.boundary
    }

    /// Always `false`.
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        false
    }
}
