//! Middleware del sistema
//!
//! Autenticación JWT, guard de administrador y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
