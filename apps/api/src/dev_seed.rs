use wisma_application::Role;
use wisma_core::AppResult;
use wisma_domain::PermissionRecord;
use wisma_infrastructure::InMemoryRoleBackend;

const SEED_PERMISSIONS: &[(i64, &str, &str, Option<&str>)] = &[
    (1, "unit", "Unit", None),
    (2, "unit.read", "Lihat Unit", Some("unit")),
    (3, "unit.write", "Ubah Unit", Some("unit")),
    (4, "unit.access_card", "Kartu Akses", Some("unit")),
    (5, "unit.access_card.print", "Cetak Kartu Akses", Some("unit.access_card")),
    (6, "tenant", "Penghuni", None),
    (7, "tenant.read", "Lihat Penghuni", Some("tenant")),
    (8, "tenant.write", "Ubah Penghuni", Some("tenant")),
    (9, "vendor", "Vendor", None),
    (10, "vendor.read", "Lihat Vendor", Some("vendor")),
    (11, "inventory", "Inventaris", None),
    (12, "inventory.read", "Lihat Inventaris", Some("inventory")),
    (13, "checklist", "Checklist", None),
    (14, "checklist.read", "Lihat Checklist", Some("checklist")),
    (15, "news", "Berita", None),
    (16, "news.publish", "Terbitkan Berita", Some("news")),
    (17, "role", "Role", None),
    (18, "role.read", "Lihat Role", Some("role")),
    (19, "role.create", "Buat Role", Some("role")),
    (20, "role.update", "Ubah Role", Some("role")),
    (21, "role.delete", "Hapus Role", Some("role")),
];

/// Builds an in-memory backend with a small property-complex catalog.
pub fn seeded_backend() -> AppResult<InMemoryRoleBackend> {
    let permissions = SEED_PERMISSIONS
        .iter()
        .map(|(id, name, description, parent)| {
            PermissionRecord::new(*id, *name, *description, parent.map(str::to_owned))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let roles = vec![
        Role {
            id: 1,
            name: "Administrator".to_owned(),
            level: 0,
            permission_ids: permissions.iter().map(PermissionRecord::id).collect(),
        },
        Role {
            id: 2,
            name: "Satpam".to_owned(),
            level: 3,
            permission_ids: vec![1, 2, 4, 5, 6, 7],
        },
        Role {
            id: 3,
            name: "Teknisi".to_owned(),
            level: 4,
            permission_ids: vec![11, 12, 13, 14],
        },
    ];

    Ok(InMemoryRoleBackend::new(permissions, roles))
}
