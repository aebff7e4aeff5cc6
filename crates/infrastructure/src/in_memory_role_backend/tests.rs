use wisma_application::{PermissionCatalogRepository, Role, RoleListQuery, RoleRepository};
use wisma_core::AppError;
use wisma_domain::{PermissionRecord, PermissionSelection, RoleDraft, RoleFields};

use super::InMemoryRoleBackend;

fn backend() -> InMemoryRoleBackend {
    let permissions = [
        (1, "area", None),
        (2, "area.read", Some("area")),
        (3, "area.write", Some("area")),
    ]
    .into_iter()
    .map(|(id, name, parent)| {
        PermissionRecord::new(id, name, name, parent.map(str::to_owned))
            .unwrap_or_else(|_| unreachable!())
    })
    .collect();

    InMemoryRoleBackend::new(
        permissions,
        vec![
            Role {
                id: 1,
                name: "Satpam".to_owned(),
                level: 2,
                permission_ids: vec![2],
            },
            Role {
                id: 2,
                name: "Teknisi".to_owned(),
                level: 3,
                permission_ids: vec![1, 2, 3],
            },
        ],
    )
}

fn draft(name: &str, ids: &[i64]) -> RoleDraft {
    let selection: PermissionSelection = ids.iter().copied().collect();
    RoleDraft::new(
        &RoleFields {
            name: name.to_owned(),
            level: 1,
        },
        &selection,
    )
    .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn returns_catalog_in_insertion_order() {
    let records = backend()
        .fetch_all_permissions()
        .await
        .unwrap_or_else(|_| unreachable!());

    let ids: Vec<i64> = records.iter().map(PermissionRecord::id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn lists_with_case_insensitive_search_and_paging() {
    let backend = backend();

    let page = backend
        .list_roles(&RoleListQuery {
            search: Some("TEK".to_owned()),
            ..RoleListQuery::default()
        })
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(page.total, 1);
    assert_eq!(page.roles[0].permission_count, 3);

    let second = backend
        .list_roles(&RoleListQuery {
            search: None,
            page: 2,
            per_page: 1,
        })
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(second.total, 2);
    assert_eq!(second.roles[0].name, "Teknisi");
}

#[tokio::test]
async fn create_assigns_next_id_and_rejects_duplicates() {
    let backend = backend();

    let created = backend
        .create_role(&draft("Vendor", &[1]))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(created.id, 3);

    let duplicate = backend.create_role(&draft("satpam", &[])).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let unknown = backend.create_role(&draft("Kurir", &[42])).await;
    assert!(matches!(unknown, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn update_and_delete_require_existing_role() {
    let backend = backend();

    let updated = backend
        .update_role(1, &draft("Satpam Malam", &[1, 2, 3]))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(updated.permission_ids, vec![1, 2, 3]);

    let missing = backend.update_role(9, &draft("Hilang", &[])).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    assert!(backend.delete_role(1).await.is_ok());
    assert!(matches!(
        backend.delete_role(1).await,
        Err(AppError::NotFound(_))
    ));
    assert!(
        backend
            .find_role(1)
            .await
            .unwrap_or_else(|_| unreachable!())
            .is_none()
    );
}
