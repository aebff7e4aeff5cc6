use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use wisma_core::{AppError, AppResult, UserIdentity};
use wisma_domain::{
    PermissionRecord, PermissionSelection, RoleDraft, RoleFields, RoleFormId, RoleFormMode,
    RoleFormPhase, RoleFormState, SubmitType,
};

use crate::role_admin_ports::{
    PermissionCatalogRepository, Role, RoleFormSession, RoleFormSessionStore, RoleListQuery,
    RolePage, RoleRepository, RoleSummary,
};

use super::RoleAdminService;

fn record(id: i64, name: &str, description: &str, parent: Option<&str>) -> PermissionRecord {
    PermissionRecord::new(id, name, description, parent.map(str::to_owned))
        .unwrap_or_else(|_| unreachable!())
}

struct FakeCatalog {
    records: Vec<PermissionRecord>,
}

impl Default for FakeCatalog {
    fn default() -> Self {
        Self {
            records: vec![
                record(1, "area", "Area", None),
                record(2, "area.read", "Lihat Area", Some("area")),
                record(3, "area.write", "Ubah Area", Some("area")),
                record(4, "orphan", "Yatim", Some("missing")),
                record(5, "role", "Role", None),
            ],
        }
    }
}

#[async_trait]
impl PermissionCatalogRepository for FakeCatalog {
    async fn fetch_all_permissions(&self) -> AppResult<Vec<PermissionRecord>> {
        Ok(self.records.clone())
    }
}

#[derive(Default)]
struct FakeRoleRepository {
    roles: Mutex<Vec<Role>>,
    next_failure: Mutex<Option<AppError>>,
    writes: Mutex<Vec<SubmitType>>,
}

impl FakeRoleRepository {
    fn with_roles(roles: Vec<Role>) -> Self {
        Self {
            roles: Mutex::new(roles),
            ..Self::default()
        }
    }

    async fn fail_next_write(&self, error: AppError) {
        *self.next_failure.lock().await = Some(error);
    }

    async fn record_write(&self, submit_type: SubmitType) -> AppResult<()> {
        self.writes.lock().await.push(submit_type);
        match self.next_failure.lock().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RoleRepository for FakeRoleRepository {
    async fn list_roles(&self, query: &RoleListQuery) -> AppResult<RolePage> {
        let roles = self.roles.lock().await;
        let matching: Vec<RoleSummary> = roles
            .iter()
            .filter(|role| {
                query.search.as_deref().is_none_or(|search| {
                    role.name.to_lowercase().contains(&search.to_lowercase())
                })
            })
            .map(|role| RoleSummary {
                id: role.id,
                name: role.name.clone(),
                level: role.level,
                permission_count: role.permission_ids.len(),
            })
            .collect();

        let total = matching.len() as u64;
        let skip = ((query.page - 1) * query.per_page) as usize;
        Ok(RolePage {
            roles: matching
                .into_iter()
                .skip(skip)
                .take(query.per_page as usize)
                .collect(),
            page: query.page,
            per_page: query.per_page,
            total,
        })
    }

    async fn find_role(&self, role_id: i64) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.id == role_id)
            .cloned())
    }

    async fn create_role(&self, draft: &RoleDraft) -> AppResult<Role> {
        self.record_write(SubmitType::Create).await?;

        let mut roles = self.roles.lock().await;
        let role = Role {
            id: roles.iter().map(|role| role.id).max().unwrap_or(0) + 1,
            name: draft.name().to_owned(),
            level: draft.level(),
            permission_ids: draft.permission_ids().to_vec(),
        };
        roles.push(role.clone());
        Ok(role)
    }

    async fn update_role(&self, role_id: i64, draft: &RoleDraft) -> AppResult<Role> {
        self.record_write(SubmitType::Update).await?;

        let mut roles = self.roles.lock().await;
        let role = roles
            .iter_mut()
            .find(|role| role.id == role_id)
            .ok_or_else(|| AppError::NotFound(format!("role {role_id}")))?;
        role.name = draft.name().to_owned();
        role.level = draft.level();
        role.permission_ids = draft.permission_ids().to_vec();
        Ok(role.clone())
    }

    async fn delete_role(&self, role_id: i64) -> AppResult<()> {
        self.record_write(SubmitType::Delete).await?;
        self.roles.lock().await.retain(|role| role.id != role_id);
        Ok(())
    }
}

#[derive(Default)]
struct FakeSessionStore {
    sessions: Mutex<HashMap<String, RoleFormSession>>,
    yield_on_load: bool,
}

#[async_trait]
impl RoleFormSessionStore for FakeSessionStore {
    async fn load(&self, subject: &str) -> AppResult<Option<RoleFormSession>> {
        if self.yield_on_load {
            tokio::task::yield_now().await;
        }
        Ok(self.sessions.lock().await.get(subject).cloned())
    }

    async fn save(&self, subject: &str, session: RoleFormSession) -> AppResult<()> {
        self.sessions
            .lock()
            .await
            .insert(subject.to_owned(), session);
        Ok(())
    }

    async fn remove(&self, subject: &str) -> AppResult<()> {
        self.sessions.lock().await.remove(subject);
        Ok(())
    }
}

struct Fixture {
    service: RoleAdminService,
    roles: Arc<FakeRoleRepository>,
    sessions: Arc<FakeSessionStore>,
}

fn fixture() -> Fixture {
    fixture_with_sessions(FakeSessionStore::default())
}

fn fixture_with_sessions(sessions: FakeSessionStore) -> Fixture {
    let roles = Arc::new(FakeRoleRepository::with_roles(vec![
        Role {
            id: 7,
            name: "Satpam".to_owned(),
            level: 2,
            permission_ids: vec![1, 2, 3],
        },
        Role {
            id: 8,
            name: "Teknisi".to_owned(),
            level: 3,
            permission_ids: vec![2],
        },
    ]));
    let sessions = Arc::new(sessions);
    let service = RoleAdminService::new(
        Arc::new(FakeCatalog::default()),
        roles.clone(),
        sessions.clone(),
    );

    Fixture {
        service,
        roles,
        sessions,
    }
}

fn admin() -> UserIdentity {
    UserIdentity::new(
        "admin-1",
        "Admin",
        ["role.read", "role.create", "role.update", "role.delete"],
    )
}

fn reader() -> UserIdentity {
    UserIdentity::new("reader-1", "Reader", ["role.read"])
}

fn fields(name: &str, level: i32) -> RoleFields {
    RoleFields {
        name: name.to_owned(),
        level,
    }
}

#[tokio::test]
async fn permission_tree_leaves_out_dangling_records() {
    let fixture = fixture();

    let tree = fixture
        .service
        .permission_tree(&reader())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(tree.roots().len(), 2);
    assert_eq!(tree.len(), 4);
    assert!(!tree.contains(4));
    assert_eq!(tree.unresolved().len(), 1);
}

#[tokio::test]
async fn permission_tree_requires_read_permission() {
    let fixture = fixture();
    let outsider = UserIdentity::new("guest", "Guest", Vec::<String>::new());

    let result = fixture.service.permission_tree(&outsider).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn stateless_toggle_cascades_over_the_catalog() {
    let fixture = fixture();
    let start: PermissionSelection = [2].into_iter().collect();

    let selected = fixture
        .service
        .toggle_selection(&reader(), &start, 1)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(selected.to_vec(), vec![1, 2, 3]);

    let unknown = fixture.service.toggle_selection(&reader(), &start, 4).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn list_roles_filters_and_normalizes_paging() {
    let fixture = fixture();

    let page = fixture
        .service
        .list_roles(
            &reader(),
            RoleListQuery {
                search: Some(" sat ".to_owned()),
                page: 0,
                per_page: 0,
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 1);
    assert_eq!(page.total, 1);
    assert_eq!(page.roles[0].name, "Satpam");
    assert_eq!(page.roles[0].permission_count, 3);
}

#[tokio::test]
async fn create_flow_persists_role_and_closes_form() {
    let fixture = fixture();
    let actor = admin();

    let session = fixture
        .service
        .open_create_form(&actor)
        .await
        .unwrap_or_else(|_| unreachable!());
    let form_id = session.form_id;
    assert_eq!(
        session.state.form().map(|form| form.mode()),
        Some(RoleFormMode::Create)
    );

    let result = fixture
        .service
        .update_fields(&actor, form_id, fields("Pengelola Area", 1))
        .await;
    assert!(result.is_ok());

    let session = fixture
        .service
        .toggle_permission(&actor, form_id, 1)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(
        session.state.form().map(|form| form.selection().to_vec()),
        Some(vec![1, 2, 3])
    );

    let session = fixture
        .service
        .request_submit(&actor, form_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(
        session.confirmation_message().as_deref(),
        Some("Create role 'Pengelola Area' with 3 permission(s)?")
    );

    let outcome = fixture
        .service
        .confirm(&actor, form_id)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(outcome.submit_type, SubmitType::Create);
    assert_eq!(outcome.message, "Role 'Pengelola Area' created.");
    assert_eq!(
        outcome.role.map(|role| role.permission_ids),
        Some(vec![1, 2, 3])
    );
    assert!(fixture.sessions.sessions.lock().await.is_empty());
    assert_eq!(fixture.roles.roles.lock().await.len(), 3);
}

#[tokio::test]
async fn failed_update_restores_form_with_selection() {
    let fixture = fixture();
    let actor = admin();

    let session = fixture
        .service
        .open_update_form(&actor, 8)
        .await
        .unwrap_or_else(|_| unreachable!());
    let form_id = session.form_id;

    let session = fixture
        .service
        .toggle_permission(&actor, form_id, 3)
        .await
        .unwrap_or_else(|_| unreachable!());
    let before = session.state.form().cloned();

    assert!(fixture.service.request_submit(&actor, form_id).await.is_ok());
    fixture
        .roles
        .fail_next_write(AppError::Validation("level is too high".to_owned()))
        .await;

    let result = fixture.service.confirm(&actor, form_id).await;

    assert!(matches!(result, Err(AppError::Validation(message)) if message == "level is too high"));
    let stored = fixture
        .service
        .current_form(&actor)
        .await
        .unwrap_or_else(|_| unreachable!())
        .unwrap_or_else(|| unreachable!());
    assert_eq!(stored.state.phase(), RoleFormPhase::Open);
    assert_eq!(stored.state.form().cloned(), before);
    assert_eq!(
        stored.state.form().map(|form| form.selection().to_vec()),
        Some(vec![2, 3])
    );
}

#[tokio::test]
async fn detail_form_ignores_clicks_and_cannot_submit() {
    let fixture = fixture();
    let actor = reader();

    let session = fixture
        .service
        .open_detail_form(&actor, 7)
        .await
        .unwrap_or_else(|_| unreachable!());
    let form_id = session.form_id;

    let session = fixture
        .service
        .toggle_permission(&actor, form_id, 1)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(
        session.state.form().map(|form| form.selection().to_vec()),
        Some(vec![1, 2, 3])
    );

    let submit = fixture.service.request_submit(&actor, form_id).await;
    assert!(matches!(submit, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn reader_cannot_open_create_form() {
    let fixture = fixture();

    let result = fixture.service.open_create_form(&reader()).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(fixture.sessions.sessions.lock().await.is_empty());
}

#[tokio::test]
async fn opening_unknown_role_is_not_found() {
    let fixture = fixture();

    let result = fixture.service.open_update_form(&admin(), 404).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn replaced_form_id_is_rejected_as_stale() {
    let fixture = fixture();
    let actor = admin();

    let first = fixture
        .service
        .open_create_form(&actor)
        .await
        .unwrap_or_else(|_| unreachable!());
    let second = fixture
        .service
        .open_update_form(&actor, 7)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_ne!(first.form_id, second.form_id);

    let stale = fixture
        .service
        .toggle_permission(&actor, first.form_id, 1)
        .await;
    assert!(matches!(stale, Err(AppError::Conflict(_))));

    let unknown = fixture
        .service
        .request_submit(&actor, RoleFormId::new())
        .await;
    assert!(matches!(unknown, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn toggling_unknown_permission_is_not_found() {
    let fixture = fixture();
    let actor = admin();
    let session = fixture
        .service
        .open_create_form(&actor)
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = fixture
        .service
        .toggle_permission(&actor, session.form_id, 4)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn delete_flow_removes_role() {
    let fixture = fixture();
    let actor = admin();

    let session = fixture
        .service
        .request_delete(&actor, 8)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(
        session.confirmation_message().as_deref(),
        Some("Delete role 'Teknisi'? This cannot be undone.")
    );

    let outcome = fixture
        .service
        .confirm(&actor, session.form_id)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(outcome.submit_type, SubmitType::Delete);
    assert_eq!(outcome.message, "Role 'Teknisi' deleted.");
    assert!(outcome.role.is_none());
    assert!(
        fixture
            .roles
            .roles
            .lock()
            .await
            .iter()
            .all(|role| role.id != 8)
    );
}

#[tokio::test]
async fn failed_delete_dismisses_confirmation() {
    let fixture = fixture();
    let actor = admin();
    let session = fixture
        .service
        .request_delete(&actor, 8)
        .await
        .unwrap_or_else(|_| unreachable!());
    fixture
        .roles
        .fail_next_write(AppError::Conflict("role is still assigned".to_owned()))
        .await;

    let result = fixture.service.confirm(&actor, session.form_id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(
        fixture
            .service
            .current_form(&actor)
            .await
            .unwrap_or_else(|_| unreachable!())
            .is_none()
    );
}

#[tokio::test]
async fn delete_requires_delete_permission_and_an_idle_form() {
    let fixture = fixture();

    let forbidden = fixture.service.request_delete(&reader(), 8).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden(_))));

    let actor = admin();
    assert!(fixture.service.open_create_form(&actor).await.is_ok());
    let busy = fixture.service.request_delete(&actor, 8).await;
    assert!(matches!(busy, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn cancel_returns_to_form_or_clears_delete() {
    let fixture = fixture();
    let actor = admin();

    let session = fixture
        .service
        .open_update_form(&actor, 7)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(
        fixture
            .service
            .request_submit(&actor, session.form_id)
            .await
            .is_ok()
    );
    let restored = fixture
        .service
        .cancel_confirmation(&actor, session.form_id)
        .await
        .unwrap_or_else(|_| unreachable!())
        .unwrap_or_else(|| unreachable!());
    assert_eq!(restored.state.phase(), RoleFormPhase::Open);

    assert!(
        fixture
            .service
            .close_form(&actor, session.form_id)
            .await
            .is_ok()
    );
    let delete = fixture
        .service
        .request_delete(&actor, 7)
        .await
        .unwrap_or_else(|_| unreachable!());
    let cleared = fixture
        .service
        .cancel_confirmation(&actor, delete.form_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(cleared.is_none());
    assert!(fixture.sessions.sessions.lock().await.is_empty());
}

#[tokio::test]
async fn confirm_requires_permission_for_the_pending_call() {
    let fixture = fixture();
    let actor = admin();
    let session = fixture
        .service
        .open_create_form(&actor)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(
        fixture
            .service
            .update_fields(&actor, session.form_id, fields("Vendor", 0))
            .await
            .is_ok()
    );
    assert!(
        fixture
            .service
            .request_submit(&actor, session.form_id)
            .await
            .is_ok()
    );

    let demoted = UserIdentity::new("admin-1", "Admin", ["role.read"]);
    let result = fixture.service.confirm(&demoted, session.form_id).await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(fixture.roles.writes.lock().await.is_empty());
    let stored = fixture
        .sessions
        .load("admin-1")
        .await
        .unwrap_or_else(|_| unreachable!())
        .map(|session| session.state);
    assert!(matches!(stored, Some(RoleFormState::Confirming { .. })));
}

fn yielding_fixture() -> Fixture {
    fixture_with_sessions(FakeSessionStore {
        yield_on_load: true,
        ..FakeSessionStore::default()
    })
}

#[tokio::test]
async fn concurrent_confirms_perform_a_single_create() {
    let fixture = yielding_fixture();
    let actor = admin();
    let session = fixture
        .service
        .open_create_form(&actor)
        .await
        .unwrap_or_else(|_| unreachable!());
    let form_id = session.form_id;
    assert!(
        fixture
            .service
            .update_fields(&actor, form_id, fields("Vendor", 4))
            .await
            .is_ok()
    );
    assert!(fixture.service.request_submit(&actor, form_id).await.is_ok());

    let (first, second) = tokio::join!(
        fixture.service.confirm(&actor, form_id),
        fixture.service.confirm(&actor, form_id),
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::Conflict(_))));
    assert_eq!(*fixture.roles.writes.lock().await, vec![SubmitType::Create]);
    assert_eq!(fixture.roles.roles.lock().await.len(), 3);
}

#[tokio::test]
async fn concurrent_clicks_on_one_form_are_both_applied() {
    let fixture = yielding_fixture();
    let actor = admin();
    let session = fixture
        .service
        .open_create_form(&actor)
        .await
        .unwrap_or_else(|_| unreachable!());

    let (first, second) = tokio::join!(
        fixture
            .service
            .toggle_permission(&actor, session.form_id, 1),
        fixture
            .service
            .toggle_permission(&actor, session.form_id, 5),
    );
    assert!(first.is_ok());
    assert!(second.is_ok());

    let stored = fixture
        .sessions
        .load("admin-1")
        .await
        .unwrap_or_else(|_| unreachable!())
        .and_then(|session| session.state.form().map(|form| form.selection().to_vec()));
    assert_eq!(stored, Some(vec![1, 2, 3, 5]));
}
