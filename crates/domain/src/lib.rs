extern crate self as stockgate_domain;

pub mod availability;
pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use availability::{
    assess, effective_quantity, ShortageNotice, StockDecision, StockQuery,
};
pub use entities::BasketLine;
pub use error::DomainError;
pub use ids::BasketLineId;
pub use value_objects::{LineMode, ProductNumber};
