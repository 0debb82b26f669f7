//! Use case orchestration.

pub mod basket;
