//! Bistro HTTP API Service.
//!
//! This crate provides the HTTP API for the bistro backend, including:
//!
//! - Credential issuance and verification (JWT)
//! - User registration and role management
//! - Menu, review, and cart CRUD
//! - Payment intent creation and payment recording
//! - Admin statistics
//!
//! # Authentication
//!
//! The service mints its own HS256 credentials via `POST /jwt` and verifies
//! them statelessly on protected routes. Admin access is decided by
//! re-reading the user's role from storage on every check — never from a
//! claim inside the credential.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Some handlers need async only for routing consistency

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod stripe;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use stripe::{StripeClient, StripeError};
