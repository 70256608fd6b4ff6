//! Role service - Handles role-related business logic.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{
    CreateRole, DomainEvent, Role, RoleResponse, UpdateRole, ROLE_CREATED, ROLE_DELETED,
    ROLE_UPDATED,
};

use super::parse_id;
use crate::events::EventEmitter;
use crate::repository::RoleRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Role service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RoleService: Send + Sync {
    /// Create a role with a unique name
    async fn create_role(&self, request: CreateRole) -> AppResult<RoleResponse>;

    async fn get_role(&self, id: &str) -> AppResult<RoleResponse>;

    async fn list_roles(&self) -> AppResult<Vec<RoleResponse>>;

    /// Apply the fields present in the request
    async fn update_role(&self, id: &str, request: UpdateRole) -> AppResult<RoleResponse>;

    /// Delete a role; permissions and users referencing it are left in place
    async fn delete_role(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of RoleService using repository.
pub struct RoleManager {
    repo: Arc<dyn RoleRepository>,
    events: EventEmitter,
}

impl RoleManager {
    /// Create new role service instance with repository
    pub fn new(repo: Arc<dyn RoleRepository>, events: EventEmitter) -> Self {
        Self { repo, events }
    }

    fn name_taken(role_name: &str) -> AppError {
        AppError::conflict(format!("role with name '{}' already exists", role_name))
    }
}

#[async_trait]
impl RoleService for RoleManager {
    async fn create_role(&self, request: CreateRole) -> AppResult<RoleResponse> {
        request.validate()?;

        if self.repo.find_by_name(&request.role_name).await?.is_some() {
            return Err(Self::name_taken(&request.role_name));
        }

        let role = self
            .repo
            .create(Role::new(request.role_name, request.description))
            .await?;
        info!(role_id = %role.id, role_name = %role.role_name, "Role created");

        self.events
            .emit(
                DomainEvent::new(ROLE_CREATED)
                    .with("role_id", role.id.to_string())
                    .with("role_name", role.role_name.clone()),
            )
            .await;

        Ok(role.into())
    }

    async fn get_role(&self, id: &str) -> AppResult<RoleResponse> {
        let id = parse_id(id, "role")?;
        let role = self.repo.find_by_id(id).await?.ok_or_not_found("role")?;
        Ok(role.into())
    }

    async fn list_roles(&self) -> AppResult<Vec<RoleResponse>> {
        let roles = self.repo.find_all().await?;
        Ok(roles.into_iter().map(RoleResponse::from).collect())
    }

    async fn update_role(&self, id: &str, request: UpdateRole) -> AppResult<RoleResponse> {
        let id = parse_id(id, "role")?;
        request.validate()?;

        let mut role = self.repo.find_by_id(id).await?.ok_or_not_found("role")?;

        if let Some(new_name) = request.role_name.as_deref() {
            if new_name != role.role_name {
                if let Some(existing) = self.repo.find_by_name(new_name).await? {
                    if existing.id != role.id {
                        return Err(Self::name_taken(new_name));
                    }
                }
            }
        }

        role.apply(request);
        let role = self.repo.update(role).await?;
        info!(role_id = %role.id, "Role updated");

        self.events
            .emit(
                DomainEvent::new(ROLE_UPDATED)
                    .with("role_id", role.id.to_string())
                    .with("role_name", role.role_name.clone()),
            )
            .await;

        Ok(role.into())
    }

    async fn delete_role(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "role")?;
        self.repo.find_by_id(id).await?.ok_or_not_found("role")?;

        self.repo.delete(id).await?;
        info!(role_id = %id, "Role deleted");

        self.events
            .emit(DomainEvent::new(ROLE_DELETED).with("role_id", id.to_string()))
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use mockall::predicate::eq;
    use uuid::Uuid;

    use super::*;
    use crate::events::MockEventPublisher;
    use crate::repository::MockRoleRepository;

    fn sample_role(name: &str) -> Role {
        Role::new(name.to_string(), "test role".to_string())
    }

    fn create_request(name: &str) -> CreateRole {
        CreateRole {
            role_name: name.to_string(),
            description: "Handles field work".to_string(),
        }
    }

    fn publisher_expecting(event_type: &'static str) -> EventEmitter {
        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .withf(move |event| event.event_type == event_type)
            .times(1)
            .returning(|_| Ok(()));
        EventEmitter::new(Some(Arc::new(publisher)))
    }

    #[tokio::test]
    async fn test_create_role_success() {
        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_name()
            .with(eq("Technician"))
            .returning(|_| Ok(None));
        repo.expect_create().returning(|role| Ok(role));

        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .withf(|event| {
                event.event_type == ROLE_CREATED
                    && event.field("role_name") == Some("Technician")
                    && event.field("role_id").is_some()
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = RoleManager::new(
            Arc::new(repo),
            EventEmitter::new(Some(Arc::new(publisher))),
        );
        let role = service
            .create_role(create_request("Technician"))
            .await
            .unwrap();

        assert_eq!(role.role_name, "Technician");
        assert_eq!(role.description, "Handles field work");
        assert_eq!(role.created_at, role.updated_at);
    }

    #[tokio::test]
    async fn test_create_role_duplicate_name() {
        let stored: Arc<Mutex<Vec<Role>>> = Arc::new(Mutex::new(Vec::new()));

        let mut repo = MockRoleRepository::new();
        let lookup = stored.clone();
        repo.expect_find_by_name().returning(move |name| {
            Ok(lookup
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.role_name == name)
                .cloned())
        });
        let sink = stored.clone();
        repo.expect_create().times(1).returning(move |role| {
            sink.lock().unwrap().push(role.clone());
            Ok(role)
        });

        let service = RoleManager::new(Arc::new(repo), EventEmitter::disabled());

        service.create_role(create_request("Manager")).await.unwrap();
        let result = service.create_role(create_request("Manager")).await;

        match result {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("already exists")),
            other => panic!("expected conflict, got {:?}", other.map(|r| r.role_name)),
        }
        assert_eq!(stored.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_role_empty_name() {
        let repo = MockRoleRepository::new();
        let service = RoleManager::new(Arc::new(repo), EventEmitter::disabled());

        let result = service.create_role(create_request("")).await;
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_create_role_succeeds_when_publish_fails() {
        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_create().returning(|role| Ok(role));

        let mut publisher = MockEventPublisher::new();
        publisher.expect_publish().times(1).returning(|_| {
            Err(redis::RedisError::from((redis::ErrorKind::IoError, "down")).into())
        });

        let service = RoleManager::new(
            Arc::new(repo),
            EventEmitter::new(Some(Arc::new(publisher))),
        );
        let result = service.create_role(create_request("Dispatcher")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_role_persistence_failure_publishes_nothing() {
        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(AppError::Persistence(sea_orm::DbErr::Custom("down".into()))));

        let mut publisher = MockEventPublisher::new();
        publisher.expect_publish().never();

        let service = RoleManager::new(
            Arc::new(repo),
            EventEmitter::new(Some(Arc::new(publisher))),
        );
        let result = service.create_role(create_request("Auditor")).await;

        assert!(matches!(result, Err(AppError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_get_role_success() {
        let role = sample_role("Supervisor");
        let role_id = role.id;

        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_id()
            .with(eq(role_id))
            .returning(move |_| Ok(Some(role.clone())));

        let service = RoleManager::new(Arc::new(repo), EventEmitter::disabled());
        let result = service.get_role(&role_id.to_string()).await.unwrap();

        assert_eq!(result.id, role_id);
        assert_eq!(result.role_name, "Supervisor");
    }

    #[tokio::test]
    async fn test_get_role_not_found() {
        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = RoleManager::new(Arc::new(repo), EventEmitter::disabled());
        let result = service.get_role(&Uuid::new_v4().to_string()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_role_malformed_id() {
        let repo = MockRoleRepository::new();
        let service = RoleManager::new(Arc::new(repo), EventEmitter::disabled());

        let result = service.get_role("not-a-uuid").await;
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_list_roles() {
        let mut repo = MockRoleRepository::new();
        repo.expect_find_all()
            .returning(|| Ok(vec![sample_role("A"), sample_role("B")]));

        let service = RoleManager::new(Arc::new(repo), EventEmitter::disabled());
        let roles = service.list_roles().await.unwrap();

        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].role_name, "A");
    }

    #[tokio::test]
    async fn test_update_role_description_only() {
        let role = sample_role("Manager");
        let role_id = role.id;

        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_id()
            .with(eq(role_id))
            .returning(move |_| Ok(Some(role.clone())));
        repo.expect_find_by_name().never();
        repo.expect_update().returning(|role| Ok(role));

        let service = RoleManager::new(Arc::new(repo), publisher_expecting(ROLE_UPDATED));
        let updated = service
            .update_role(
                &role_id.to_string(),
                UpdateRole {
                    role_name: None,
                    description: Some("Runs the depot".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role_name, "Manager");
        assert_eq!(updated.description, "Runs the depot");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_role_name_taken() {
        let role = sample_role("Manager");
        let role_id = role.id;

        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(role.clone())));
        repo.expect_find_by_name()
            .with(eq("Supervisor"))
            .returning(|_| Ok(Some(sample_role("Supervisor"))));
        repo.expect_update().never();

        let service = RoleManager::new(Arc::new(repo), EventEmitter::disabled());
        let result = service
            .update_role(
                &role_id.to_string(),
                UpdateRole {
                    role_name: Some("Supervisor".to_string()),
                    description: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_role_publishes_event() {
        let role = sample_role("Temp");
        let role_id = role.id;

        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(role.clone())));
        repo.expect_delete()
            .with(eq(role_id))
            .times(1)
            .returning(|_| Ok(()));

        let mut publisher = MockEventPublisher::new();
        let expected = role_id.to_string();
        publisher
            .expect_publish()
            .withf(move |event| {
                event.event_type == ROLE_DELETED && event.field("role_id") == Some(expected.as_str())
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = RoleManager::new(
            Arc::new(repo),
            EventEmitter::new(Some(Arc::new(publisher))),
        );
        service.delete_role(&role_id.to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_role_not_found() {
        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = RoleManager::new(Arc::new(repo), EventEmitter::disabled());
        let result = service.delete_role(&Uuid::new_v4().to_string()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_role_not_found() {
        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = RoleManager::new(Arc::new(repo), EventEmitter::disabled());
        let result = service
            .update_role(
                &Uuid::new_v4().to_string(),
                UpdateRole {
                    role_name: Some("Dispatcher".to_string()),
                    description: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_role_with_current_values() {
        let mut role = sample_role("Dispatcher");
        let an_hour_ago = chrono::Utc::now() - chrono::Duration::hours(1);
        role.created_at = an_hour_ago;
        role.updated_at = an_hour_ago;
        let role_id = role.id;

        let mut repo = MockRoleRepository::new();
        let current = role.clone();
        repo.expect_find_by_id()
            .with(eq(role_id))
            .returning(move |_| Ok(Some(current.clone())));
        repo.expect_find_by_name().never();
        repo.expect_update().times(1).returning(|role| Ok(role));

        let service = RoleManager::new(Arc::new(repo), publisher_expecting(ROLE_UPDATED));
        let updated = service
            .update_role(
                &role_id.to_string(),
                UpdateRole {
                    role_name: Some(role.role_name.clone()),
                    description: Some(role.description.clone()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, role_id);
        assert_eq!(updated.role_name, "Dispatcher");
        assert_eq!(updated.created_at, an_hour_ago);
        assert!(updated.updated_at > an_hour_ago);
    }

    #[tokio::test]
    async fn test_delete_role_twice() {
        let role = sample_role("Seasonal");
        let role_id = role.id;
        let stored: Arc<Mutex<Vec<Role>>> = Arc::new(Mutex::new(vec![role]));

        let mut repo = MockRoleRepository::new();
        let lookup = stored.clone();
        repo.expect_find_by_id().returning(move |id| {
            Ok(lookup.lock().unwrap().iter().find(|r| r.id == id).cloned())
        });
        let sink = stored.clone();
        repo.expect_delete()
            .with(eq(role_id))
            .times(1)
            .returning(move |id| {
                sink.lock().unwrap().retain(|r| r.id != id);
                Ok(())
            });

        let service = RoleManager::new(Arc::new(repo), publisher_expecting(ROLE_DELETED));

        service.delete_role(&role_id.to_string()).await.unwrap();
        let second = service.delete_role(&role_id.to_string()).await;

        assert!(matches!(second, Err(AppError::NotFound(_))));
        assert!(stored.lock().unwrap().is_empty());
    }
}
