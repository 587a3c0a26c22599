//! # Chat API
//! 
//! HTTP handlers, HTML page rendering, DTOs, and the router.

pub mod handlers;
pub mod dto;
pub mod error;
pub mod response;
pub mod router;
pub mod state;
pub mod view;

pub use router::build_router;
pub use state::AppState;
