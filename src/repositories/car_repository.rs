//! Repositorio de coches
//!
//! Acceso a la tabla cars. Las lecturas que participan en la admisión
//! de reservas reciben la conexión de la transacción en curso y bloquean
//! la fila del coche para serializar las escrituras por coche.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::car_dto::CarResponse;
use crate::models::car::Car;
use crate::utils::errors::AppError;

const CAR_WITH_CATEGORY: &str = r#"
    SELECT c.id, c.name, c.category_id, cat.name AS category_name,
           c.seats, c.doors, c.transmission, c.fuel_type, c.has_ac,
           c.price_per_day, c.available, c.image_url, c.created_at, c.updated_at
    FROM cars c
    LEFT JOIN categories cat ON cat.id = c.category_id
"#;

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<CarResponse>, AppError> {
        let cars = sqlx::query_as::<_, CarResponse>(
            &format!("{} ORDER BY c.created_at DESC", CAR_WITH_CATEGORY),
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    /// Coches marcados como disponibles y sin ninguna reserva activa
    /// (pending o approved) que solape con la ventana pedida.
    /// Solape de intervalo cerrado: reservas contiguas cuentan como conflicto.
    pub async fn list_available(
        &self,
        start_date: chrono::DateTime<chrono::Utc>,
        end_date: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<CarResponse>, AppError> {
        let query = format!(
            r#"{}
            WHERE c.available = TRUE
              AND NOT EXISTS (
                SELECT 1 FROM bookings b
                WHERE b.car_id = c.id
                  AND b.status IN ('pending', 'approved')
                  AND b.start_date <= $2
                  AND b.end_date >= $1
              )
            ORDER BY c.created_at DESC"#,
            CAR_WITH_CATEGORY
        );

        let cars = sqlx::query_as::<_, CarResponse>(&query)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(&self.pool)
            .await?;

        Ok(cars)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CarResponse>, AppError> {
        let car = sqlx::query_as::<_, CarResponse>(
            &format!("{} WHERE c.id = $1", CAR_WITH_CATEGORY),
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: String,
        category_id: Option<Uuid>,
        seats: Option<i32>,
        doors: Option<i32>,
        transmission: Option<String>,
        fuel_type: Option<String>,
        has_ac: bool,
        price_per_day: Decimal,
        available: bool,
        image_url: Option<String>,
    ) -> Result<Car, AppError> {
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (id, name, category_id, seats, doors, transmission, fuel_type,
                              has_ac, price_per_day, available, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(category_id)
        .bind(seats)
        .bind(doors)
        .bind(transmission)
        .bind(fuel_type)
        .bind(has_ac)
        .bind(price_per_day)
        .bind(available)
        .bind(image_url)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        category_id: Option<Uuid>,
        seats: Option<i32>,
        doors: Option<i32>,
        transmission: Option<String>,
        fuel_type: Option<String>,
        has_ac: Option<bool>,
        price_per_day: Option<Decimal>,
        available: Option<bool>,
        image_url: Option<String>,
    ) -> Result<Car, AppError> {
        // Obtener coche actual
        let current = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET name = $2, category_id = $3, seats = $4, doors = $5, transmission = $6,
                fuel_type = $7, has_ac = $8, price_per_day = $9, available = $10,
                image_url = $11, updated_at = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(category_id.or(current.category_id))
        .bind(seats.or(current.seats))
        .bind(doors.or(current.doors))
        .bind(transmission.or(current.transmission))
        .bind(fuel_type.or(current.fuel_type))
        .bind(has_ac.unwrap_or(current.has_ac))
        .bind(price_per_day.unwrap_or(current.price_per_day))
        .bind(available.unwrap_or(current.available))
        .bind(image_url.or(current.image_url))
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    /// Borrar un coche. Sus reservas caen en cascada (FK ON DELETE CASCADE).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Car not found".to_string()));
        }

        Ok(())
    }

    /// Catálogo para la admisión: flag de disponibilidad y precio por día.
    ///
    /// Se ejecuta sobre la conexión de la transacción de admisión y
    /// bloquea la fila (`FOR UPDATE`) para que dos admisiones concurrentes
    /// sobre el mismo coche se serialicen antes del chequeo de solape.
    pub async fn lock_availability_and_price(
        conn: &mut PgConnection,
        car_id: Uuid,
    ) -> Result<Option<(bool, Decimal)>, AppError> {
        let row = sqlx::query_as::<_, (bool, Decimal)>(
            "SELECT available, price_per_day FROM cars WHERE id = $1 FOR UPDATE",
        )
        .bind(car_id)
        .fetch_optional(conn)
        .await?;

        Ok(row)
    }
}
