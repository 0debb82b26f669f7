//! Availability check use case.
//!
//! Decides whether an add-to-basket action may proceed, based on the remote
//! live stock figure and what the session's basket already holds.

use std::sync::Arc;

use stockgate_domain::availability::{
    assess, effective_quantity, ShortageNotice, StockDecision, StockQuery,
};
use stockgate_domain::common::none_if_empty;

use crate::infrastructure::ports::{BasketRepo, FailureLogPort, StockFeedPort};

/// Availability check use case.
///
/// Orchestrates: input validation, held-quantity lookup, live stock fetch,
/// decision policy. Infallible: every path yields a decision.
///
/// A failing stock feed never vetoes the action. The failure is written to
/// the critical log (request target, response body where available, product
/// number) and the check falls back to allow.
pub struct CheckAvailability {
    stock_feed: Arc<dyn StockFeedPort>,
    basket: Arc<dyn BasketRepo>,
    failure_log: Arc<dyn FailureLogPort>,
}

impl CheckAvailability {
    pub fn new(
        stock_feed: Arc<dyn StockFeedPort>,
        basket: Arc<dyn BasketRepo>,
        failure_log: Arc<dyn FailureLogPort>,
    ) -> Self {
        Self {
            stock_feed,
            basket,
            failure_log,
        }
    }

    /// Execute the availability check.
    ///
    /// # Returns
    /// The decision to apply: allowed with no notice, or denied with the
    /// notice to show the buyer.
    pub async fn execute(&self, query: &StockQuery) -> StockDecision {
        let Some(product_number) = none_if_empty(query.product_number.trim()) else {
            return StockDecision::deny(ShortageNotice::ProductNotFound);
        };

        let held = match none_if_empty(&query.session_key) {
            None => 0,
            Some(session_key) => match self.basket.held_quantity(product_number, session_key).await
            {
                Ok(quantity) => quantity,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        product_number,
                        "basket lookup failed, counting no held quantity"
                    );
                    0
                }
            },
        };

        let live_stock = match self.stock_feed.fetch_live_stock(product_number).await {
            Ok(count) => count,
            Err(e) => {
                self.failure_log.critical(e.target());
                self.failure_log.critical(e.body().unwrap_or_default());
                self.failure_log
                    .critical(&format!("Error with: {product_number}"));
                return StockDecision::allow();
            }
        };

        // No feed supplies a restock hint today; the out-of-stock branch of
        // the policy stays dormant until one does.
        assess(
            live_stock,
            None,
            effective_quantity(query.requested_quantity, held),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockBasketRepo, MockFailureLogPort, MockStockFeedPort, StockFeedError,
    };
    use std::sync::Arc;

    fn check(
        stock_feed: MockStockFeedPort,
        basket: MockBasketRepo,
        failure_log: MockFailureLogPort,
    ) -> CheckAvailability {
        CheckAvailability::new(Arc::new(stock_feed), Arc::new(basket), Arc::new(failure_log))
    }

    fn transport_error() -> StockFeedError {
        StockFeedError::Transport {
            url: "http://stock.example/SW10002".into(),
            message: "operation timed out".into(),
        }
    }

    #[tokio::test]
    async fn when_product_number_empty_denies_without_any_call() {
        // No expectations on any mock: a single port call would panic.
        let use_case = check(
            MockStockFeedPort::new(),
            MockBasketRepo::new(),
            MockFailureLogPort::new(),
        );

        let decision = use_case
            .execute(&StockQuery::new("", 1, "sess-1"))
            .await;

        assert!(!decision.allowed);
        assert_eq!(decision.notice, Some(ShortageNotice::ProductNotFound));
    }

    #[tokio::test]
    async fn when_product_number_blank_denies_without_any_call() {
        let use_case = check(
            MockStockFeedPort::new(),
            MockBasketRepo::new(),
            MockFailureLogPort::new(),
        );

        let decision = use_case
            .execute(&StockQuery::new("   ", 1, "sess-1"))
            .await;

        assert_eq!(decision.notice, Some(ShortageNotice::ProductNotFound));
    }

    #[tokio::test]
    async fn when_stock_sufficient_allows_without_message() {
        let mut stock_feed = MockStockFeedPort::new();
        stock_feed
            .expect_fetch_live_stock()
            .withf(|p| p == "SW10002")
            .returning(|_| Ok(5));

        let mut basket = MockBasketRepo::new();
        basket
            .expect_held_quantity()
            .withf(|p, s| p == "SW10002" && s == "sess-1")
            .returning(|_, _| Ok(0));

        let use_case = check(stock_feed, basket, MockFailureLogPort::new());
        let decision = use_case
            .execute(&StockQuery::new("SW10002", 2, "sess-1"))
            .await;

        assert!(decision.allowed);
        assert!(decision.message().is_none());
    }

    #[tokio::test]
    async fn when_held_quantity_pushes_over_stock_denies_with_both_figures() {
        let mut stock_feed = MockStockFeedPort::new();
        stock_feed
            .expect_fetch_live_stock()
            .returning(|_| Ok(4));

        let mut basket = MockBasketRepo::new();
        basket.expect_held_quantity().returning(|_, _| Ok(2));

        let use_case = check(stock_feed, basket, MockFailureLogPort::new());
        // requested 3 + held 2 = 5 wanted, 4 in stock
        let decision = use_case
            .execute(&StockQuery::new("SW10002", 3, "sess-1"))
            .await;

        assert!(!decision.allowed);
        let message = decision.message().expect("shortage notice");
        assert!(message.contains('4'));
        assert!(message.contains('5'));
    }

    #[tokio::test]
    async fn when_requested_quantity_not_positive_counts_as_one() {
        for requested in [-4, 0] {
            let mut stock_feed = MockStockFeedPort::new();
            stock_feed.expect_fetch_live_stock().returning(|_| Ok(0));

            let mut basket = MockBasketRepo::new();
            basket.expect_held_quantity().returning(|_, _| Ok(0));

            let use_case = check(stock_feed, basket, MockFailureLogPort::new());
            let decision = use_case
                .execute(&StockQuery::new("SW10002", requested, "sess-1"))
                .await;

            assert_eq!(
                decision.notice,
                Some(ShortageNotice::InsufficientStock {
                    in_stock: 0,
                    requested: 1
                }),
                "requested quantity {requested} should clamp to 1"
            );
        }
    }

    #[tokio::test]
    async fn when_session_key_empty_skips_basket_lookup() {
        let mut stock_feed = MockStockFeedPort::new();
        stock_feed.expect_fetch_live_stock().returning(|_| Ok(3));

        // No held_quantity expectation: a call would panic.
        let use_case = check(stock_feed, MockBasketRepo::new(), MockFailureLogPort::new());
        let decision = use_case.execute(&StockQuery::new("SW10002", 3, "")).await;

        assert!(decision.allowed);
    }

    #[tokio::test]
    async fn when_basket_lookup_fails_counts_no_held_quantity() {
        let mut stock_feed = MockStockFeedPort::new();
        stock_feed.expect_fetch_live_stock().returning(|_| Ok(2));

        let mut basket = MockBasketRepo::new();
        basket.expect_held_quantity().returning(|_, _| {
            Err(crate::infrastructure::ports::RepoError::database(
                "held_quantity",
                "database unavailable",
            ))
        });

        let use_case = check(stock_feed, basket, MockFailureLogPort::new());
        let decision = use_case
            .execute(&StockQuery::new("SW10002", 2, "sess-1"))
            .await;

        // 2 wanted, 2 in stock: allowed because the failed lookup counts as 0 held.
        assert!(decision.allowed);
    }

    #[tokio::test]
    async fn when_feed_fails_allows_and_logs_three_fields() {
        let mut stock_feed = MockStockFeedPort::new();
        stock_feed
            .expect_fetch_live_stock()
            .returning(|_| Err(transport_error()));

        let mut basket = MockBasketRepo::new();
        basket.expect_held_quantity().returning(|_, _| Ok(7));

        let mut failure_log = MockFailureLogPort::new();
        let mut seq = mockall::Sequence::new();
        failure_log
            .expect_critical()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|entry| entry == "http://stock.example/SW10002")
            .return_const(());
        failure_log
            .expect_critical()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|entry| entry.is_empty())
            .return_const(());
        failure_log
            .expect_critical()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|entry| entry == "Error with: SW10002")
            .return_const(());

        let use_case = check(stock_feed, basket, failure_log);
        let decision = use_case
            .execute(&StockQuery::new("SW10002", 99, "sess-1"))
            .await;

        // Fail open: allowed no matter how much was requested.
        assert!(decision.allowed);
        assert!(decision.message().is_none());
    }

    #[tokio::test]
    async fn when_feed_body_malformed_logs_the_body() {
        let mut stock_feed = MockStockFeedPort::new();
        stock_feed.expect_fetch_live_stock().returning(|_| {
            Err(StockFeedError::MalformedBody {
                url: "http://stock.example/SW10002".into(),
                body: "<html>maintenance</html>".into(),
            })
        });

        let mut basket = MockBasketRepo::new();
        basket.expect_held_quantity().returning(|_, _| Ok(0));

        let mut failure_log = MockFailureLogPort::new();
        let mut seq = mockall::Sequence::new();
        failure_log
            .expect_critical()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|entry| entry == "http://stock.example/SW10002")
            .return_const(());
        failure_log
            .expect_critical()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|entry| entry == "<html>maintenance</html>")
            .return_const(());
        failure_log
            .expect_critical()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|entry| entry.contains("SW10002"))
            .return_const(());

        let use_case = check(stock_feed, basket, failure_log);
        let decision = use_case
            .execute(&StockQuery::new("SW10002", 1, "sess-1"))
            .await;

        assert!(decision.allowed);
    }

    #[tokio::test]
    async fn scenario_fresh_basket_with_plenty_of_stock() {
        let mut stock_feed = MockStockFeedPort::new();
        stock_feed.expect_fetch_live_stock().returning(|_| Ok(5));

        let mut basket = MockBasketRepo::new();
        basket.expect_held_quantity().returning(|_, _| Ok(0));

        let use_case = check(stock_feed, basket, MockFailureLogPort::new());
        let decision = use_case
            .execute(&StockQuery::new("SW10002", 2, "sess-1"))
            .await;

        assert!(decision.allowed);
        assert_eq!(decision.message(), None);
    }

    #[tokio::test]
    async fn scenario_exact_stock_for_request_plus_held() {
        let mut stock_feed = MockStockFeedPort::new();
        stock_feed.expect_fetch_live_stock().returning(|_| Ok(5));

        let mut basket = MockBasketRepo::new();
        basket.expect_held_quantity().returning(|_, _| Ok(2));

        let use_case = check(stock_feed, basket, MockFailureLogPort::new());
        let decision = use_case
            .execute(&StockQuery::new("SW10002", 3, "sess-1"))
            .await;

        assert!(decision.allowed);
    }
}
