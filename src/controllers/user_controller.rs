//! Controller de usuarios (solo administración)

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user_dto::{UpdateUserRequest, UserResponse};
use crate::dto::ApiResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict_error, AppError};

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.repository.list_all().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    pub async fn update(
        &self,
        admin_id: Uuid,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        if let Some(email) = &request.email {
            let current = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

            if current.email != *email && self.repository.email_exists(email).await? {
                return Err(conflict_error("User", "email", email));
            }
        }

        let user = self
            .repository
            .update(id, request.full_name, request.email, request.role)
            .await?;

        info!("👤 Admin {} actualizó al usuario {}", admin_id, id);

        Ok(ApiResponse::success_with_message(
            user.into(),
            "User updated successfully".to_string(),
        ))
    }

    /// Borrar un usuario. Sus reservas caen en cascada (FK ON DELETE CASCADE).
    pub async fn delete(&self, admin_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        info!("👤 Admin {} eliminó al usuario {}", admin_id, id);
        Ok(())
    }
}
