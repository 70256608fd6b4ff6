//! Equipment service - Handles equipment inventory and assignment.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{
    CreateEquipment, DomainEvent, Equipment, EquipmentResponse, UpdateEquipment,
    EQUIPMENT_CREATED, EQUIPMENT_DELETED, EQUIPMENT_UPDATED, MAX_SERIAL_NUMBER_LENGTH,
};

use super::parse_id;
use crate::events::EventEmitter;
use crate::repository::{EquipmentRepository, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Equipment service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EquipmentService: Send + Sync {
    /// Register equipment; a serial number, when given, must be unused
    async fn create_equipment(&self, request: CreateEquipment) -> AppResult<EquipmentResponse>;

    async fn get_equipment(&self, id: &str) -> AppResult<EquipmentResponse>;

    async fn list_equipment(&self) -> AppResult<Vec<EquipmentResponse>>;

    async fn update_equipment(
        &self,
        id: &str,
        request: UpdateEquipment,
    ) -> AppResult<EquipmentResponse>;

    async fn delete_equipment(&self, id: &str) -> AppResult<()>;

    /// Equipment assigned to a user
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<EquipmentResponse>>;
}

/// Concrete implementation of EquipmentService.
pub struct EquipmentManager {
    equipment: Arc<dyn EquipmentRepository>,
    users: Arc<dyn UserRepository>,
    events: EventEmitter,
}

impl EquipmentManager {
    pub fn new(
        equipment: Arc<dyn EquipmentRepository>,
        users: Arc<dyn UserRepository>,
        events: EventEmitter,
    ) -> Self {
        Self {
            equipment,
            users,
            events,
        }
    }

    async fn ensure_user(&self, user_id: Uuid) -> AppResult<()> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("user")
            .map(|_| ())
    }

    async fn ensure_serial_free(&self, serial_number: &str, except: Option<Uuid>) -> AppResult<()> {
        let taken = self
            .equipment
            .find_by_serial_number(serial_number)
            .await?
            .is_some_and(|e| Some(e.id) != except);

        if taken {
            return Err(AppError::conflict(format!(
                "equipment with serial_number '{}' already exists",
                serial_number
            )));
        }
        Ok(())
    }

    fn event(event_type: &str, equipment: &Equipment) -> DomainEvent {
        let mut event = DomainEvent::new(event_type)
            .with("equipment_id", equipment.id.to_string())
            .with("name", equipment.name.clone());
        if let Some(serial_number) = &equipment.serial_number {
            event = event.with("serial_number", serial_number.clone());
        }
        event
    }
}

#[async_trait]
impl EquipmentService for EquipmentManager {
    async fn create_equipment(&self, request: CreateEquipment) -> AppResult<EquipmentResponse> {
        request.validate()?;

        if let Some(user_id) = request.assigned_to_user {
            self.ensure_user(user_id).await?;
        }
        if let Some(serial_number) = request.serial_number() {
            self.ensure_serial_free(serial_number, None).await?;
        }

        let equipment = self.equipment.create(Equipment::new(request)).await?;
        info!(equipment_id = %equipment.id, name = %equipment.name, "Equipment created");

        self.events
            .emit(Self::event(EQUIPMENT_CREATED, &equipment))
            .await;

        Ok(equipment.into())
    }

    async fn get_equipment(&self, id: &str) -> AppResult<EquipmentResponse> {
        let id = parse_id(id, "equipment")?;
        let equipment = self
            .equipment
            .find_by_id(id)
            .await?
            .ok_or_not_found("equipment")?;
        Ok(equipment.into())
    }

    async fn list_equipment(&self) -> AppResult<Vec<EquipmentResponse>> {
        let equipment = self.equipment.find_all().await?;
        Ok(equipment.into_iter().map(EquipmentResponse::from).collect())
    }

    async fn update_equipment(
        &self,
        id: &str,
        request: UpdateEquipment,
    ) -> AppResult<EquipmentResponse> {
        let id = parse_id(id, "equipment")?;
        request.validate()?;
        if request
            .new_serial_number()
            .is_some_and(|s| s.chars().count() as u64 > MAX_SERIAL_NUMBER_LENGTH)
        {
            return Err(AppError::invalid_argument(format!(
                "serial_number must be at most {} characters",
                MAX_SERIAL_NUMBER_LENGTH
            )));
        }

        let mut equipment = self
            .equipment
            .find_by_id(id)
            .await?
            .ok_or_not_found("equipment")?;

        if let Some(user_id) = request.new_assignee() {
            self.ensure_user(user_id).await?;
        }
        if let Some(serial_number) = request
            .new_serial_number()
            .filter(|s| equipment.serial_number.as_deref() != Some(*s))
        {
            self.ensure_serial_free(serial_number, Some(equipment.id))
                .await?;
        }

        equipment.apply(request);
        let equipment = self.equipment.update(equipment).await?;
        info!(equipment_id = %equipment.id, "Equipment updated");

        self.events
            .emit(Self::event(EQUIPMENT_UPDATED, &equipment))
            .await;

        Ok(equipment.into())
    }

    async fn delete_equipment(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "equipment")?;
        self.equipment
            .find_by_id(id)
            .await?
            .ok_or_not_found("equipment")?;

        self.equipment.delete(id).await?;
        info!(equipment_id = %id, "Equipment deleted");

        self.events
            .emit(DomainEvent::new(EQUIPMENT_DELETED).with("equipment_id", id.to_string()))
            .await;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<EquipmentResponse>> {
        let user_id = parse_id(user_id, "user")?;
        self.ensure_user(user_id).await?;

        let equipment = self.equipment.find_by_user(user_id).await?;
        Ok(equipment.into_iter().map(EquipmentResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use mockall::predicate::eq;

    use super::*;
    use crate::events::MockEventPublisher;
    use crate::repository::{MockEquipmentRepository, MockUserRepository};
    use domain::EquipmentStatus;

    fn create_request(serial_number: Option<&str>) -> CreateEquipment {
        CreateEquipment {
            name: "Pole Climber".to_string(),
            serial_number: serial_number.map(str::to_string),
            assigned_to_user: None,
            status: None,
            created_by: None,
        }
    }

    fn service(equipment: MockEquipmentRepository, users: MockUserRepository) -> EquipmentManager {
        EquipmentManager::new(
            Arc::new(equipment),
            Arc::new(users),
            EventEmitter::disabled(),
        )
    }

    #[tokio::test]
    async fn test_create_twice_with_same_serial() {
        let saved: Arc<Mutex<Vec<Equipment>>> = Arc::new(Mutex::new(Vec::new()));

        let mut equipment = MockEquipmentRepository::new();
        let reader = saved.clone();
        equipment.expect_find_by_serial_number().returning(move |serial| {
            Ok(reader
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.serial_number.as_deref() == Some(serial))
                .cloned())
        });
        let writer = saved.clone();
        equipment.expect_create().times(1).returning(move |e| {
            writer.lock().unwrap().push(e.clone());
            Ok(e)
        });

        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .withf(|event| event.event_type == EQUIPMENT_CREATED)
            .times(1)
            .returning(|_| Ok(()));

        let service = EquipmentManager::new(
            Arc::new(equipment),
            Arc::new(MockUserRepository::new()),
            EventEmitter::new(Some(Arc::new(publisher))),
        );

        let first = service
            .create_equipment(create_request(Some("SN-001")))
            .await
            .unwrap();
        assert_eq!(first.status, EquipmentStatus::Active);

        let second = service
            .create_equipment(create_request(Some("SN-001")))
            .await;
        assert!(matches!(second, Err(AppError::Conflict(_))));
        assert_eq!(saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_without_serial_skips_lookup() {
        let mut equipment = MockEquipmentRepository::new();
        equipment.expect_find_by_serial_number().never();
        equipment.expect_create().returning(|e| Ok(e));

        let response = service(equipment, MockUserRepository::new())
            .create_equipment(create_request(None))
            .await
            .unwrap();

        assert!(response.serial_number.is_none());
    }

    #[tokio::test]
    async fn test_blank_serials_do_not_conflict() {
        let mut equipment = MockEquipmentRepository::new();
        equipment.expect_find_by_serial_number().never();
        equipment.expect_create().times(2).returning(|e| Ok(e));

        let service = service(equipment, MockUserRepository::new());
        for _ in 0..2 {
            let response = service
                .create_equipment(create_request(Some("")))
                .await
                .unwrap();
            assert!(response.serial_number.is_none());
        }
    }

    #[tokio::test]
    async fn test_create_assigned_to_unknown_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let mut equipment = MockEquipmentRepository::new();
        equipment.expect_create().never();

        let mut request = create_request(None);
        request.assigned_to_user = Some(Uuid::new_v4());

        let result = service(equipment, users).create_equipment(request).await;
        assert!(matches!(result, Err(AppError::NotFound(label)) if label == "user"));
    }

    #[tokio::test]
    async fn test_update_unassigns_and_keeps_serial() {
        let mut existing = Equipment::new(create_request(Some("SN-002")));
        existing.assigned_to_user = Some(Uuid::new_v4());
        let equipment_id = existing.id;

        let mut equipment = MockEquipmentRepository::new();
        equipment
            .expect_find_by_id()
            .with(eq(equipment_id))
            .returning(move |_| Ok(Some(existing.clone())));
        equipment.expect_find_by_serial_number().never();
        equipment.expect_update().returning(|e| Ok(e));

        let update = UpdateEquipment {
            serial_number: Some(Some("SN-002".to_string())),
            assigned_to_user: Some(None),
            status: Some(EquipmentStatus::UnderMaintenance),
            ..Default::default()
        };
        let response = service(equipment, MockUserRepository::new())
            .update_equipment(&equipment_id.to_string(), update)
            .await
            .unwrap();

        assert!(response.assigned_to_user.is_none());
        assert_eq!(response.serial_number.as_deref(), Some("SN-002"));
        assert_eq!(response.status, EquipmentStatus::UnderMaintenance);
    }

    #[tokio::test]
    async fn test_update_serial_too_long() {
        let mut equipment = MockEquipmentRepository::new();
        equipment.expect_find_by_id().never();

        let update = UpdateEquipment {
            serial_number: Some(Some("X".repeat(51))),
            ..Default::default()
        };
        let result = service(equipment, MockUserRepository::new())
            .update_equipment(&Uuid::new_v4().to_string(), update)
            .await;

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_equipment() {
        let mut equipment = MockEquipmentRepository::new();
        equipment.expect_find_by_id().returning(|_| Ok(None));
        equipment.expect_delete().never();

        let result = service(equipment, MockUserRepository::new())
            .delete_equipment(&Uuid::new_v4().to_string())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(label)) if label == "equipment"));
    }
}
