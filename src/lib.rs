//! Backend de alquiler de coches
//!
//! API HTTP sobre axum + sqlx/PostgreSQL. El núcleo es el motor de
//! admisión y disponibilidad de reservas (`controllers::booking_controller`);
//! el resto de recursos (flota, categorías, usuarios, auth) es CRUD.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
