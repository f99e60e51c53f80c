use async_trait::async_trait;

use crate::errors::PublishError;
use crate::ranking::RankedResult;

/// Destination for a finished run (a file, a spreadsheet, a chat channel).
///
/// Publishers render what `RankedResult::rows` and `summary` give them;
/// they never re-score or re-order.
#[async_trait]
pub trait ResultPublisher: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn publish(&self, result: &RankedResult) -> Result<(), PublishError>;
}
