//! Price feed trait definition.

use crate::error::FeedError;
use crate::types::Frequency;

/// Read-only view of per-asset price history at one instant.
///
/// The decision cycle is synchronous, so implementations must answer from
/// data already in hand; fetching and storage live behind this seam.
pub trait PriceFeed {
    /// Most recent price for a symbol, if any observation exists.
    fn current(&self, symbol: &str) -> Option<f64>;

    /// The last `bars` complete bars at the given frequency, oldest first,
    /// ending at the feed's current instant.
    ///
    /// A feed with insufficient history returns a shorter (possibly empty)
    /// window; that is a normal state, not an error. An unknown symbol
    /// yields an empty window. Errors are reserved for malformed data.
    fn history(&self, symbol: &str, bars: usize, frequency: Frequency)
        -> Result<Vec<f64>, FeedError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatFeed(f64);

    impl PriceFeed for FlatFeed {
        fn current(&self, _symbol: &str) -> Option<f64> {
            Some(self.0)
        }

        fn history(
            &self,
            _symbol: &str,
            bars: usize,
            _frequency: Frequency,
        ) -> Result<Vec<f64>, FeedError> {
            Ok(vec![self.0; bars])
        }
    }

    #[test]
    fn test_feed_is_object_safe() {
        let feed: Box<dyn PriceFeed> = Box::new(FlatFeed(42.0));
        assert_eq!(feed.current("btc_usd"), Some(42.0));
        assert_eq!(
            feed.history("btc_usd", 3, Frequency::Min5).unwrap(),
            vec![42.0, 42.0, 42.0]
        );
    }
}
