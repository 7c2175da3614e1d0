use crate::tx_outcome::{TxBoundary, TxOutcome};

/// Stand-in connection handle with nothing behind it.
///
/// Every acquisition yields a fresh handle; there is no pool, no limit and nothing to clean up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PseudoConnection {
    _private: (),
}

impl PseudoConnection {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }

    /// Resolves immediately; nothing is opened on the gateway.
    #[allow(clippy::unused_async)]
    pub async fn begin_transaction(&self) -> TxOutcome {
        TxOutcome::completed(TxBoundary::Begin)
    }

    /// Resolves immediately; nothing is made durable.
    #[allow(clippy::unused_async)]
    pub async fn commit_transaction(&self) -> TxOutcome {
        TxOutcome::completed(TxBoundary::Commit)
    }
}
