//! Service container wiring stores, publisher and managers together.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    AttendanceManager, AttendanceService, CrewManager, CrewService, EquipmentManager,
    EquipmentService, PermissionManager, PermissionService, RoleManager, RoleService,
    TimeOffManager, TimeOffService, TripManager, TripService, UserManager, UserService,
};
use crate::events::{EventEmitter, EventPublisher};
use crate::repository::{
    AttendanceStore, CrewMemberStore, CrewStore, EquipmentStore, PermissionStore, RoleStore,
    TimeOffStore, TripStore, UserStore,
};

/// All domain services, shared by the transport layer.
#[derive(Clone)]
pub struct Services {
    pub roles: Arc<dyn RoleService>,
    pub permissions: Arc<dyn PermissionService>,
    pub users: Arc<dyn UserService>,
    pub crews: Arc<dyn CrewService>,
    pub equipment: Arc<dyn EquipmentService>,
    pub attendance: Arc<dyn AttendanceService>,
    pub time_off: Arc<dyn TimeOffService>,
    pub trips: Arc<dyn TripService>,
}

impl Services {
    /// Build every service over one connection and one optional publisher.
    pub fn from_connection(
        db: DatabaseConnection,
        publisher: Option<Arc<dyn EventPublisher>>,
    ) -> Self {
        let events = EventEmitter::new(publisher);

        let role_repo = Arc::new(RoleStore::new(db.clone()));
        let user_repo = Arc::new(UserStore::new(db.clone()));

        Self {
            roles: Arc::new(RoleManager::new(role_repo.clone(), events.clone())),
            permissions: Arc::new(PermissionManager::new(
                Arc::new(PermissionStore::new(db.clone())),
                role_repo.clone(),
                events.clone(),
            )),
            users: Arc::new(UserManager::new(
                user_repo.clone(),
                role_repo,
                events.clone(),
            )),
            crews: Arc::new(CrewManager::new(
                Arc::new(CrewStore::new(db.clone())),
                Arc::new(CrewMemberStore::new(db.clone())),
                user_repo.clone(),
                events.clone(),
            )),
            equipment: Arc::new(EquipmentManager::new(
                Arc::new(EquipmentStore::new(db.clone())),
                user_repo.clone(),
                events.clone(),
            )),
            attendance: Arc::new(AttendanceManager::new(
                Arc::new(AttendanceStore::new(db.clone())),
                user_repo.clone(),
                events.clone(),
            )),
            time_off: Arc::new(TimeOffManager::new(
                Arc::new(TimeOffStore::new(db.clone())),
                user_repo.clone(),
                events.clone(),
            )),
            trips: Arc::new(TripManager::new(
                Arc::new(TripStore::new(db)),
                user_repo,
                events,
            )),
        }
    }
}
