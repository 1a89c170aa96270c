//! Controller de categorías

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::category_dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::dto::ApiResponse;
use crate::repositories::category_repository::CategoryRepository;
use crate::utils::errors::{conflict_error, AppError};

pub struct CategoryController {
    repository: CategoryRepository,
}

impl CategoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CategoryRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<CategoryResponse>, AppError> {
        let categories = self.repository.list_all().await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, AppError> {
        request.validate()?;

        if self.repository.name_exists(&request.name).await? {
            return Err(conflict_error("Category", "name", &request.name));
        }

        let category = self
            .repository
            .create(request.name, request.description)
            .await?;

        Ok(ApiResponse::success_with_message(
            category.into(),
            "Category created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, AppError> {
        request.validate()?;

        let category = self
            .repository
            .update(id, request.name, request.description)
            .await?;

        Ok(ApiResponse::success_with_message(
            category.into(),
            "Category updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
