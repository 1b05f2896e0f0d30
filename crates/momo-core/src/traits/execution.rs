//! Execution client trait definition.

use crate::error::ExecError;
use crate::types::{Order, OrderIntent, PortfolioState};
use async_trait::async_trait;

/// Trait for order execution collaborators.
///
/// The execution client owns the authoritative portfolio. Submission is
/// fire-and-forget from the decision cycle's perspective: fills appear in
/// the portfolio state of a later cycle, never the submitting one.
#[async_trait]
pub trait ExecutionClient: Send + Sync {
    /// Snapshot of the current portfolio state.
    async fn portfolio(&self) -> Result<PortfolioState, ExecError>;

    /// Submit an order intent.
    ///
    /// # Returns
    /// The recorded order with an ID and open status
    async fn submit(&self, intent: OrderIntent) -> Result<Order, ExecError>;

    /// Get the execution client name.
    fn name(&self) -> &str;
}
