// App struct holds dependencies - the repository handle is for future surfaces
#![allow(dead_code)]

//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{BasketRepo, ClockPort, FailureLogPort, StockFeedPort};
use crate::use_cases::basket::{AddItem, BasketOps, BasketUseCases, CheckAvailability};

/// Main application state.
///
/// Holds repositories and use cases. Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for repository ports.
pub struct Repositories {
    pub basket: Arc<dyn BasketRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub basket: BasketUseCases,
}

impl App {
    pub fn new(
        basket: Arc<dyn BasketRepo>,
        stock_feed: Arc<dyn StockFeedPort>,
        failure_log: Arc<dyn FailureLogPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let check = Arc::new(CheckAvailability::new(
            stock_feed,
            basket.clone(),
            failure_log,
        ));
        let add = Arc::new(AddItem::new(check.clone(), basket.clone(), clock));
        let ops = Arc::new(BasketOps::new(basket.clone()));

        Self {
            repositories: Repositories { basket },
            use_cases: UseCases {
                basket: BasketUseCases::new(check, add, ops),
            },
        }
    }
}
