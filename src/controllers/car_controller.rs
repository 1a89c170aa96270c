//! Controller de coches
//!
//! CRUD de la flota y consulta de disponibilidad por ventana de fechas.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::{AvailabilityQuery, CarResponse, CreateCarRequest, UpdateCarRequest};
use crate::dto::ApiResponse;
use crate::repositories::car_repository::CarRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::validate_date_range;

pub struct CarController {
    repository: CarRepository,
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CarRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<CarResponse>, AppError> {
        self.repository.list_all().await
    }

    pub async fn list_available(
        &self,
        query: AvailabilityQuery,
    ) -> Result<Vec<CarResponse>, AppError> {
        validate_date_range(query.start_date, query.end_date).map_err(|_| {
            validation_error("start_date", "start date must be strictly before end date")
        })?;

        self.repository
            .list_available(query.start_date, query.end_date)
            .await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CarResponse, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
    }

    pub async fn create(
        &self,
        request: CreateCarRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        request.validate()?;

        if request.price_per_day <= rust_decimal::Decimal::ZERO {
            return Err(validation_error(
                "price_per_day",
                "price per day must be positive",
            ));
        }

        let car = self
            .repository
            .create(
                request.name,
                request.category_id,
                request.seats,
                request.doors,
                request.transmission,
                request.fuel_type,
                request.has_ac,
                request.price_per_day,
                request.available,
                request.image_url,
            )
            .await?;

        info!("🚗 Coche creado: {} ({})", car.name, car.id);

        Ok(ApiResponse::success_with_message(
            car.into(),
            "Car created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCarRequest,
    ) -> Result<ApiResponse<CarResponse>, AppError> {
        request.validate()?;

        if let Some(price) = request.price_per_day {
            if price <= rust_decimal::Decimal::ZERO {
                return Err(validation_error(
                    "price_per_day",
                    "price per day must be positive",
                ));
            }
        }

        let car = self
            .repository
            .update(
                id,
                request.name,
                request.category_id,
                request.seats,
                request.doors,
                request.transmission,
                request.fuel_type,
                request.has_ac,
                request.price_per_day,
                request.available,
                request.image_url,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            car.into(),
            "Car updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        info!("🗑️ Coche {} eliminado (reservas en cascada)", id);
        Ok(())
    }
}
