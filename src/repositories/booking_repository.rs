//! Repositorio de reservas
//!
//! Acceso a la tabla bookings. Las operaciones que participan en la
//! admisión o en las transiciones de estado reciben la conexión de la
//! transacción en curso (`&mut PgConnection`); los listados usan el pool.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::booking_dto::{AdminBookingResponse, UserBookingResponse};
use crate::models::booking::{Booking, BookingStatus};
use crate::utils::errors::AppError;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// ¿Tiene el usuario alguna reserva en estado activo (pending/approved)?
    pub async fn user_has_active(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE user_id = $1 AND status = ANY($2))",
        )
        .bind(user_id)
        .bind(&BookingStatus::ACTIVE[..])
        .fetch_one(conn)
        .await?;

        Ok(exists)
    }

    /// ¿Existe alguna reserva del coche, en alguno de los estados dados,
    /// cuyo rango solape con [start_date, end_date]?
    ///
    /// Solape de intervalo cerrado: `existente.start <= end AND
    /// existente.end >= start`. Dos reservas contiguas en el mismo día
    /// cuentan como solape (el relevo el mismo día no está soportado).
    /// `exclude` deja fuera una reserva concreta, para re-chequear en la
    /// aprobación sin que la propia reserva se bloquee a sí misma.
    pub async fn has_overlap(
        conn: &mut PgConnection,
        car_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        statuses: &[BookingStatus],
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE car_id = $1
                  AND status = ANY($2)
                  AND start_date <= $4
                  AND end_date >= $3
                  AND ($5::uuid IS NULL OR id <> $5)
            )
            "#,
        )
        .bind(car_id)
        .bind(statuses)
        .bind(start_date)
        .bind(end_date)
        .bind(exclude)
        .fetch_one(conn)
        .await?;

        Ok(exists)
    }

    /// Insertar la reserva recién admitida, siempre en estado pending.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        conn: &mut PgConnection,
        user_id: Uuid,
        car_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        total_price: Decimal,
        is_over_18: bool,
        driving_license_number: String,
    ) -> Result<Booking, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, user_id, car_id, start_date, end_date, total_price,
                                  status, is_over_18, driving_license_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(car_id)
        .bind(start_date)
        .bind(end_date)
        .bind(total_price)
        .bind(is_over_18)
        .bind(driving_license_number)
        .bind(now)
        .fetch_one(conn)
        .await?;

        Ok(booking)
    }

    /// Leer una reserva bloqueando su fila para la transición de estado.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(booking)
    }

    pub async fn set_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

        Ok(booking)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<UserBookingResponse>, AppError> {
        let bookings = sqlx::query_as::<_, UserBookingResponse>(
            r#"
            SELECT b.id, b.car_id, c.name AS car_name, c.image_url AS car_image_url,
                   b.start_date, b.end_date, b.total_price, b.status, b.created_at
            FROM bookings b
            JOIN cars c ON c.id = b.car_id
            WHERE b.user_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn list_all(&self) -> Result<Vec<AdminBookingResponse>, AppError> {
        let bookings = sqlx::query_as::<_, AdminBookingResponse>(
            r#"
            SELECT b.id, b.start_date, b.end_date, b.total_price, b.status, b.is_over_18,
                   b.driving_license_number, b.created_at, b.updated_at,
                   u.id AS user_id, u.full_name AS user_full_name, u.email AS user_email,
                   c.id AS car_id, c.name AS car_name, c.price_per_day
            FROM bookings b
            JOIN users u ON u.id = b.user_id
            JOIN cars c ON c.id = b.car_id
            ORDER BY b.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }
}
