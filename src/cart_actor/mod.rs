//! The cart actor: sole owner of the cart, serializing every mutation.

mod client;
mod service;

pub use client::CartClient;
pub use service::CartService;
