//! Controllers de la aplicación
//!
//! Orquestación y reglas de negocio entre las rutas y los repositorios.
//! El motor de admisión de reservas vive en `booking_controller`.

pub mod auth_controller;
pub mod booking_controller;
pub mod car_controller;
pub mod category_controller;
pub mod user_controller;
