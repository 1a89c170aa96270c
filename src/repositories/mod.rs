//! Repositorios de acceso a datos
//!
//! Un repositorio por agregado. Las operaciones que deben ejecutarse
//! dentro de la transacción de admisión son funciones asociadas que
//! reciben `&mut PgConnection`; el resto trabaja sobre el pool.

pub mod booking_repository;
pub mod car_repository;
pub mod category_repository;
pub mod user_repository;
