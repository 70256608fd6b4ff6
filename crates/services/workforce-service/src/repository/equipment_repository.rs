//! Equipment repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::equipment::{self, ActiveModel, Entity as EquipmentEntity, Model};
use super::loaders::attach_users;
use super::write_error;
use common::{AppError, AppResult};
use domain::Equipment;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Equipment repository trait for dependency injection.
///
/// Reads resolve the assigned user.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn create(&self, equipment: Equipment) -> AppResult<Equipment>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Equipment>>;

    async fn find_by_serial_number(&self, serial_number: &str) -> AppResult<Option<Equipment>>;

    /// Equipment assigned to a user
    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Equipment>>;

    async fn find_all(&self) -> AppResult<Vec<Equipment>>;

    async fn update(&self, equipment: Equipment) -> AppResult<Equipment>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of EquipmentRepository
pub struct EquipmentStore {
    db: DatabaseConnection,
}

impl EquipmentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_users(&self, models: Vec<Model>) -> AppResult<Vec<Equipment>> {
        let items = models
            .into_iter()
            .map(Equipment::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(attach_users(
            &self.db,
            items,
            |e: &Equipment| e.assigned_to_user,
            |e, user| e.assigned_user = Some(user),
        )
        .await?)
    }

    async fn one_with_user(&self, model: Option<Model>) -> AppResult<Option<Equipment>> {
        match model {
            Some(model) => Ok(self.with_users(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    fn conflict(equipment: &Equipment) -> String {
        format!(
            "equipment with serial number '{}' already exists",
            equipment.serial_number.as_deref().unwrap_or_default()
        )
    }
}

#[async_trait]
impl EquipmentRepository for EquipmentStore {
    async fn create(&self, equipment: Equipment) -> AppResult<Equipment> {
        let model = ActiveModel::from(&equipment)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "equipment", Self::conflict(&equipment)))?;

        Ok(self.one_with_user(Some(model)).await?.unwrap_or(equipment))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Equipment>> {
        let result = EquipmentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        self.one_with_user(result).await
    }

    async fn find_by_serial_number(&self, serial_number: &str) -> AppResult<Option<Equipment>> {
        let result = EquipmentEntity::find()
            .filter(equipment::Column::SerialNumber.eq(serial_number))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        self.one_with_user(result).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Equipment>> {
        let models = EquipmentEntity::find()
            .filter(equipment::Column::AssignedToUser.eq(user_id))
            .order_by_asc(equipment::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn find_all(&self) -> AppResult<Vec<Equipment>> {
        let models = EquipmentEntity::find()
            .order_by_asc(equipment::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        self.with_users(models).await
    }

    async fn update(&self, equipment: Equipment) -> AppResult<Equipment> {
        let model = ActiveModel::from(&equipment)
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, "equipment", Self::conflict(&equipment)))?;

        Ok(self.one_with_user(Some(model)).await?.unwrap_or(equipment))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = EquipmentEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("equipment"));
        }

        Ok(())
    }
}
