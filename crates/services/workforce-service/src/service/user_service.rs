//! User service - Handles workforce user business logic.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{
    CreateUser, DomainEvent, UpdateUser, User, UserResponse, USER_CREATED, USER_DELETED,
    USER_UPDATED,
};

use super::parse_id;
use crate::events::EventEmitter;
use crate::repository::{RoleRepository, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user; employee ID and email must be unused
    async fn create_user(&self, request: CreateUser) -> AppResult<UserResponse>;

    async fn get_user(&self, id: &str) -> AppResult<UserResponse>;

    async fn list_users(&self) -> AppResult<Vec<UserResponse>>;

    async fn update_user(&self, id: &str, request: UpdateUser) -> AppResult<UserResponse>;

    async fn delete_user(&self, id: &str) -> AppResult<()>;

    /// Users holding a role
    async fn list_by_role(&self, role_id: &str) -> AppResult<Vec<UserResponse>>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    events: EventEmitter,
}

impl UserManager {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        events: EventEmitter,
    ) -> Self {
        Self {
            users,
            roles,
            events,
        }
    }

    async fn ensure_role(&self, role_id: Uuid) -> AppResult<()> {
        self.roles
            .find_by_id(role_id)
            .await?
            .ok_or_not_found("role")
            .map(|_| ())
    }

    /// Fail when the employee ID or email belongs to a user other than `except`.
    async fn ensure_unique(
        &self,
        employee_id: Option<&str>,
        email: Option<&str>,
        except: Option<Uuid>,
    ) -> AppResult<()> {
        let taken = |user: &User| Some(user.id) != except;

        if let Some(employee_id) = employee_id {
            if self
                .users
                .find_by_employee_id(employee_id)
                .await?
                .is_some_and(|u| taken(&u))
            {
                return Err(AppError::conflict(format!(
                    "user with employee_id '{}' already exists",
                    employee_id
                )));
            }
        }

        if let Some(email) = email {
            if self
                .users
                .find_by_email(email)
                .await?
                .is_some_and(|u| taken(&u))
            {
                return Err(AppError::conflict(format!(
                    "user with email '{}' already exists",
                    email
                )));
            }
        }

        Ok(())
    }

    fn event(event_type: &str, user: &User) -> DomainEvent {
        DomainEvent::new(event_type)
            .with("user_id", user.id.to_string())
            .with("employee_id", user.employee_id.clone())
            .with("email", user.email.clone())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, request: CreateUser) -> AppResult<UserResponse> {
        request.validate()?;

        if let Some(role_id) = request.role_id {
            self.ensure_role(role_id).await?;
        }
        self.ensure_unique(Some(&request.employee_id), Some(&request.email), None)
            .await?;

        let user = self.users.create(User::new(request)).await?;
        info!(
            user_id = %user.id,
            employee_id = %user.employee_id,
            name = %user.full_name(),
            "User created"
        );

        self.events.emit(Self::event(USER_CREATED, &user)).await;

        Ok(user.into())
    }

    async fn get_user(&self, id: &str) -> AppResult<UserResponse> {
        let id = parse_id(id, "user")?;
        let user = self.users.find_by_id(id).await?.ok_or_not_found("user")?;
        Ok(user.into())
    }

    async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn update_user(&self, id: &str, request: UpdateUser) -> AppResult<UserResponse> {
        let id = parse_id(id, "user")?;
        request.validate()?;

        let mut user = self.users.find_by_id(id).await?.ok_or_not_found("user")?;

        if let Some(Some(role_id)) = request.role_id {
            self.ensure_role(role_id).await?;
        }

        let new_employee_id = request
            .employee_id
            .as_deref()
            .filter(|e| *e != user.employee_id);
        let new_email = request.email.as_deref().filter(|e| *e != user.email);
        self.ensure_unique(new_employee_id, new_email, Some(user.id))
            .await?;

        user.apply(request);
        let user = self.users.update(user).await?;
        info!(user_id = %user.id, "User updated");

        self.events.emit(Self::event(USER_UPDATED, &user)).await;

        Ok(user.into())
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "user")?;
        self.users.find_by_id(id).await?.ok_or_not_found("user")?;

        self.users.delete(id).await?;
        info!(user_id = %id, "User deleted");

        self.events
            .emit(DomainEvent::new(USER_DELETED).with("user_id", id.to_string()))
            .await;

        Ok(())
    }

    async fn list_by_role(&self, role_id: &str) -> AppResult<Vec<UserResponse>> {
        let role_id = parse_id(role_id, "role")?;
        self.ensure_role(role_id).await?;

        let users = self.users.find_by_role(role_id).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::events::MockEventPublisher;
    use crate::repository::{MockRoleRepository, MockUserRepository};
    use domain::{Role, UserProfile, UserStatus};

    fn create_request(employee_id: &str, email: &str) -> CreateUser {
        CreateUser {
            first_name: "Grace".to_string(),
            last_name: "Mensah".to_string(),
            employee_id: employee_id.to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            status: None,
            profile: None,
            role_id: None,
            created_by: None,
        }
    }

    fn service(users: MockUserRepository, roles: MockRoleRepository) -> UserManager {
        UserManager::new(Arc::new(users), Arc::new(roles), EventEmitter::disabled())
    }

    #[tokio::test]
    async fn test_create_user_applies_defaults() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_employee_id().returning(|_| Ok(None));
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|u| Ok(u));

        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .withf(|event| event.event_type == USER_CREATED && event.field("employee_id") == Some("E-1"))
            .times(1)
            .returning(|_| Ok(()));

        let service = UserManager::new(
            Arc::new(users),
            Arc::new(MockRoleRepository::new()),
            EventEmitter::new(Some(Arc::new(publisher))),
        );
        let user = service
            .create_user(create_request("E-1", "grace@example.com"))
            .await
            .unwrap();

        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.profile, UserProfile::FieldAgent);
        assert!(user.role.is_none());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_employee_id().returning(|_| Ok(None));
        users
            .expect_find_by_email()
            .with(eq("taken@example.com"))
            .returning(|email| Ok(Some(User::new(create_request("E-9", email)))));
        users.expect_create().never();

        let result = service(users, MockRoleRepository::new())
            .create_user(create_request("E-2", "taken@example.com"))
            .await;

        match result {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("email")),
            _ => panic!("expected conflict"),
        }
    }

    #[tokio::test]
    async fn test_create_user_duplicate_employee_id() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_employee_id()
            .returning(|id| Ok(Some(User::new(create_request(id, "other@example.com")))));
        users.expect_create().never();

        let result = service(users, MockRoleRepository::new())
            .create_user(create_request("E-1", "new@example.com"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_user_unknown_role() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_id().returning(|_| Ok(None));
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let mut request = create_request("E-3", "x@example.com");
        request.role_id = Some(Uuid::new_v4());

        let result = service(users, roles).create_user(request).await;
        assert!(matches!(result, Err(AppError::NotFound(label)) if label == "role"));
    }

    #[tokio::test]
    async fn test_create_user_invalid_email() {
        let result = service(MockUserRepository::new(), MockRoleRepository::new())
            .create_user(create_request("E-4", "nope"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_update_user_keeps_own_email() {
        let existing = User::new(create_request("E-5", "same@example.com"));
        let user_id = existing.id;
        let lookup = existing.clone();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(existing.clone())));
        users.expect_find_by_email().never();
        users
            .expect_find_by_employee_id()
            .returning(move |_| Ok(Some(lookup.clone())));
        users.expect_update().returning(|u| Ok(u));

        let update = UpdateUser {
            email: Some("same@example.com".to_string()),
            first_name: Some("Ama".to_string()),
            employee_id: Some("E-6".to_string()),
            ..Default::default()
        };
        let result = service(users, MockRoleRepository::new())
            .update_user(&user_id.to_string(), update)
            .await;

        // E-6 resolves to the same user, so the change is not a conflict
        let user = result.unwrap();
        assert_eq!(user.first_name, "Ama");
        assert_eq!(user.employee_id, "E-6");
    }

    #[tokio::test]
    async fn test_update_user_assigns_role() {
        let existing = User::new(create_request("E-7", "r@example.com"));
        let user_id = existing.id;
        let role = Role::new("Manager".to_string(), String::new());
        let role_id = role.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        users.expect_update().returning(|u| Ok(u));
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_id()
            .with(eq(role_id))
            .returning(move |_| Ok(Some(role.clone())));

        let update = UpdateUser {
            role_id: Some(Some(role_id)),
            ..Default::default()
        };
        let user = service(users, roles)
            .update_user(&user_id.to_string(), update)
            .await
            .unwrap();

        assert_eq!(user.role_id, Some(role_id));
    }

    #[tokio::test]
    async fn test_list_by_role_unknown_role() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_id().returning(|_| Ok(None));
        let mut users = MockUserRepository::new();
        users.expect_find_by_role().never();

        let result = service(users, roles)
            .list_by_role(&Uuid::new_v4().to_string())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let existing = User::new(create_request("E-8", "d@example.com"));
        let user_id = existing.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        users
            .expect_delete()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(()));

        service(users, MockRoleRepository::new())
            .delete_user(&user_id.to_string())
            .await
            .unwrap();
    }
}
