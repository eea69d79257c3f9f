//! Core types for the bistro backend.
//!
//! This crate provides the foundational types used throughout the bistro
//! platform:
//!
//! - **Identifiers**: `UserId`, `MenuItemId`, `CartItemId`, `ReviewId`,
//!   `PaymentId`
//! - **Users**: `User`, `Role`
//! - **Menu**: `MenuItem`, `Review`
//! - **Orders**: `CartItem`, `PaymentRecord`
//!
//! # Prices
//!
//! Menu prices and payment amounts are carried as `f64` dollars, matching
//! the wire format the clients submit. Conversion to the charge provider's
//! integer minor units happens at the provider boundary, by truncation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cart;
pub mod ids;
pub mod menu;
pub mod payment;
pub mod review;
pub mod user;

pub use cart::CartItem;
pub use ids::{CartItemId, IdError, MenuItemId, PaymentId, ReviewId, UserId};
pub use menu::MenuItem;
pub use payment::{PaymentRecord, CURRENCY};
pub use review::Review;
pub use user::{Role, User};
