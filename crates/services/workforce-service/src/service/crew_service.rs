//! Crew service - Handles crews and their membership.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, OptionExt};
use domain::{
    AddCrewMember, CreateCrew, Crew, CrewMember, CrewMemberResponse, CrewResponse, DomainEvent,
    UpdateCrew, CREW_CREATED, CREW_DELETED, CREW_MEMBER_ADDED, CREW_MEMBER_REMOVED,
    CREW_UPDATED,
};

use super::parse_id;
use crate::events::EventEmitter;
use crate::repository::{CrewMemberRepository, CrewRepository, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Crew service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CrewService: Send + Sync {
    async fn create_crew(&self, request: CreateCrew) -> AppResult<CrewResponse>;

    /// Get a crew with its members
    async fn get_crew(&self, id: &str) -> AppResult<CrewResponse>;

    async fn list_crews(&self) -> AppResult<Vec<CrewResponse>>;

    async fn update_crew(&self, id: &str, request: UpdateCrew) -> AppResult<CrewResponse>;

    async fn delete_crew(&self, id: &str) -> AppResult<()>;

    /// Add a user to a crew; both must exist
    async fn add_member(
        &self,
        crew_id: &str,
        request: AddCrewMember,
    ) -> AppResult<CrewMemberResponse>;

    /// Remove a user from a crew
    async fn remove_member(&self, crew_id: &str, user_id: &str) -> AppResult<()>;

    async fn list_members(&self, crew_id: &str) -> AppResult<Vec<CrewMemberResponse>>;

    /// Crews the user belongs to
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<CrewResponse>>;
}

/// Concrete implementation of CrewService.
pub struct CrewManager {
    crews: Arc<dyn CrewRepository>,
    members: Arc<dyn CrewMemberRepository>,
    users: Arc<dyn UserRepository>,
    events: EventEmitter,
}

impl CrewManager {
    pub fn new(
        crews: Arc<dyn CrewRepository>,
        members: Arc<dyn CrewMemberRepository>,
        users: Arc<dyn UserRepository>,
        events: EventEmitter,
    ) -> Self {
        Self {
            crews,
            members,
            users,
            events,
        }
    }

    async fn load(&self, id: Uuid) -> AppResult<Crew> {
        self.crews.find_by_id(id).await?.ok_or_not_found("crew")
    }

    async fn ensure_user(&self, user_id: Uuid) -> AppResult<()> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("user")
            .map(|_| ())
    }

    fn event(event_type: &str, crew: &Crew) -> DomainEvent {
        DomainEvent::new(event_type)
            .with("crew_id", crew.id.to_string())
            .with("crew_name", crew.crew_name.clone())
    }

    fn member_event(event_type: &str, crew_id: Uuid, user_id: Uuid) -> DomainEvent {
        DomainEvent::new(event_type)
            .with("crew_id", crew_id.to_string())
            .with("user_id", user_id.to_string())
    }
}

#[async_trait]
impl CrewService for CrewManager {
    async fn create_crew(&self, request: CreateCrew) -> AppResult<CrewResponse> {
        request.validate()?;

        let crew = self.crews.create(Crew::new(request)).await?;
        info!(crew_id = %crew.id, crew_name = %crew.crew_name, "Crew created");

        self.events.emit(Self::event(CREW_CREATED, &crew)).await;

        Ok(crew.into())
    }

    async fn get_crew(&self, id: &str) -> AppResult<CrewResponse> {
        let id = parse_id(id, "crew")?;
        Ok(self.load(id).await?.into())
    }

    async fn list_crews(&self) -> AppResult<Vec<CrewResponse>> {
        let crews = self.crews.find_all().await?;
        Ok(crews.into_iter().map(CrewResponse::from).collect())
    }

    async fn update_crew(&self, id: &str, request: UpdateCrew) -> AppResult<CrewResponse> {
        let id = parse_id(id, "crew")?;
        request.validate()?;

        let mut crew = self.load(id).await?;
        crew.apply(request);

        let crew = self.crews.update(crew).await?;
        info!(crew_id = %crew.id, "Crew updated");

        self.events.emit(Self::event(CREW_UPDATED, &crew)).await;

        Ok(crew.into())
    }

    async fn delete_crew(&self, id: &str) -> AppResult<()> {
        let id = parse_id(id, "crew")?;
        self.load(id).await?;

        self.crews.delete(id).await?;
        info!(crew_id = %id, "Crew deleted");

        self.events
            .emit(DomainEvent::new(CREW_DELETED).with("crew_id", id.to_string()))
            .await;

        Ok(())
    }

    async fn add_member(
        &self,
        crew_id: &str,
        request: AddCrewMember,
    ) -> AppResult<CrewMemberResponse> {
        let crew_id = parse_id(crew_id, "crew")?;
        let crew = self.load(crew_id).await?;
        self.ensure_user(request.user_id).await?;

        if crew.has_member(request.user_id) {
            return Err(AppError::conflict(format!(
                "user '{}' is already a member of crew '{}'",
                request.user_id, crew.crew_name
            )));
        }

        let member = self
            .members
            .create(CrewMember::new(crew_id, request.user_id))
            .await?;
        info!(crew_id = %crew_id, user_id = %member.user_id, "Crew member added");

        self.events
            .emit(Self::member_event(CREW_MEMBER_ADDED, crew_id, member.user_id))
            .await;

        Ok(member.into())
    }

    async fn remove_member(&self, crew_id: &str, user_id: &str) -> AppResult<()> {
        let crew_id = parse_id(crew_id, "crew")?;
        let user_id = parse_id(user_id, "user")?;

        if !self.members.delete_by_crew_and_user(crew_id, user_id).await? {
            return Err(AppError::not_found("crew member"));
        }
        info!(crew_id = %crew_id, user_id = %user_id, "Crew member removed");

        self.events
            .emit(Self::member_event(CREW_MEMBER_REMOVED, crew_id, user_id))
            .await;

        Ok(())
    }

    async fn list_members(&self, crew_id: &str) -> AppResult<Vec<CrewMemberResponse>> {
        let crew_id = parse_id(crew_id, "crew")?;
        self.load(crew_id).await?;

        let members = self.members.find_by_crew(crew_id).await?;
        Ok(members.into_iter().map(CrewMemberResponse::from).collect())
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<CrewResponse>> {
        let user_id = parse_id(user_id, "user")?;
        self.ensure_user(user_id).await?;

        let memberships = self.members.find_by_user(user_id).await?;
        let crews = try_join_all(
            memberships
                .iter()
                .map(|member| self.crews.find_by_id(member.crew_id)),
        )
        .await?;

        Ok(crews.into_iter().flatten().map(CrewResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use mockall::predicate::eq;

    use super::*;
    use crate::events::MockEventPublisher;
    use crate::repository::{MockCrewMemberRepository, MockCrewRepository, MockUserRepository};
    use domain::{CreateUser, User};

    fn crew(name: &str) -> Crew {
        Crew::new(CreateCrew {
            crew_name: name.to_string(),
            created_by: None,
        })
    }

    fn user() -> User {
        User::new(CreateUser {
            first_name: "Kofi".to_string(),
            last_name: "Boateng".to_string(),
            employee_id: "E-100".to_string(),
            email: "kofi@example.com".to_string(),
            phone: String::new(),
            status: None,
            profile: None,
            role_id: None,
            created_by: None,
        })
    }

    fn service(
        crews: MockCrewRepository,
        members: MockCrewMemberRepository,
        users: MockUserRepository,
    ) -> CrewManager {
        CrewManager::new(
            Arc::new(crews),
            Arc::new(members),
            Arc::new(users),
            EventEmitter::disabled(),
        )
    }

    #[tokio::test]
    async fn test_create_crew_starts_empty() {
        let mut crews = MockCrewRepository::new();
        crews.expect_create().returning(|c| Ok(c));

        let response = service(crews, MockCrewMemberRepository::new(), MockUserRepository::new())
            .create_crew(CreateCrew {
                crew_name: "Line Crew A".to_string(),
                created_by: None,
            })
            .await
            .unwrap();

        assert_eq!(response.crew_name, "Line Crew A");
        assert!(response.members.is_empty());
    }

    #[tokio::test]
    async fn test_create_crew_empty_name() {
        let mut crews = MockCrewRepository::new();
        crews.expect_create().never();

        let result = service(crews, MockCrewMemberRepository::new(), MockUserRepository::new())
            .create_crew(CreateCrew {
                crew_name: String::new(),
                created_by: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_add_member_publishes_event() {
        let existing = crew("Night Shift");
        let crew_id = existing.id;
        let member_user = user();
        let user_id = member_user.id;

        let mut crews = MockCrewRepository::new();
        crews
            .expect_find_by_id()
            .with(eq(crew_id))
            .returning(move |_| Ok(Some(existing.clone())));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(member_user.clone())));
        let mut members = MockCrewMemberRepository::new();
        members.expect_create().times(1).returning(|m| Ok(m));

        let mut publisher = MockEventPublisher::new();
        publisher
            .expect_publish()
            .withf(move |event| {
                event.event_type == CREW_MEMBER_ADDED
                    && event.field("user_id") == Some(user_id.to_string().as_str())
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = CrewManager::new(
            Arc::new(crews),
            Arc::new(members),
            Arc::new(users),
            EventEmitter::new(Some(Arc::new(publisher))),
        );
        let member = service
            .add_member(&crew_id.to_string(), AddCrewMember { user_id })
            .await
            .unwrap();

        assert_eq!(member.crew_id, crew_id);
        assert_eq!(member.user_id, user_id);
    }

    #[tokio::test]
    async fn test_add_member_twice_conflicts() {
        let member_user = user();
        let user_id = member_user.id;
        let state = Arc::new(Mutex::new(crew("Day Shift")));
        let crew_id = state.lock().unwrap().id;

        let mut crews = MockCrewRepository::new();
        let reader = state.clone();
        crews
            .expect_find_by_id()
            .returning(move |_| Ok(Some(reader.lock().unwrap().clone())));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(member_user.clone())));
        let mut members = MockCrewMemberRepository::new();
        let writer = state.clone();
        members.expect_create().times(1).returning(move |m| {
            writer.lock().unwrap().members.push(m.clone());
            Ok(m)
        });

        let service = service(crews, members, users);
        service
            .add_member(&crew_id.to_string(), AddCrewMember { user_id })
            .await
            .unwrap();
        let second = service
            .add_member(&crew_id.to_string(), AddCrewMember { user_id })
            .await;

        assert!(matches!(second, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_add_member_unknown_user() {
        let existing = crew("Ops");
        let crew_id = existing.id;

        let mut crews = MockCrewRepository::new();
        crews
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let mut members = MockCrewMemberRepository::new();
        members.expect_create().never();

        let result = service(crews, members, users)
            .add_member(
                &crew_id.to_string(),
                AddCrewMember {
                    user_id: Uuid::new_v4(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(label)) if label == "user"));
    }

    #[tokio::test]
    async fn test_remove_missing_member() {
        let mut members = MockCrewMemberRepository::new();
        members
            .expect_delete_by_crew_and_user()
            .returning(|_, _| Ok(false));

        let result = service(MockCrewRepository::new(), members, MockUserRepository::new())
            .remove_member(&Uuid::new_v4().to_string(), &Uuid::new_v4().to_string())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(label)) if label == "crew member"));
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let member_user = user();
        let user_id = member_user.id;
        let first = crew("Alpha");
        let second = crew("Bravo");
        let memberships = vec![
            CrewMember::new(first.id, user_id),
            CrewMember::new(second.id, user_id),
        ];

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(member_user.clone())));
        let mut members = MockCrewMemberRepository::new();
        members
            .expect_find_by_user()
            .with(eq(user_id))
            .returning(move |_| Ok(memberships.clone()));
        let mut crews = MockCrewRepository::new();
        let known = vec![first, second];
        crews
            .expect_find_by_id()
            .returning(move |id| Ok(known.iter().find(|c| c.id == id).cloned()));

        let result = service(crews, members, users)
            .list_for_user(&user_id.to_string())
            .await
            .unwrap();

        let names: Vec<_> = result.iter().map(|c| c.crew_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo"]);
    }
}
