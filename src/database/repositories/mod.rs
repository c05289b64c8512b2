//! Repository implementations
//!
//! One repository per table, each owning its own SQL

pub mod group;
pub mod client;
pub mod catalog;
pub mod order;
pub mod order_item;

pub use group::GroupRepository;
pub use client::ClientRepository;
pub use catalog::CatalogRepository;
pub use order::OrderRepository;
pub use order_item::OrderItemRepository;
