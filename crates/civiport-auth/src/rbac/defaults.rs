//! Static role-to-permission default table.

use std::collections::{HashMap, HashSet};

use civiport_entity::account::Role;
use civiport_entity::permission::PermissionCode;

/// Defines the default permission set for each role.
///
/// Built once, never mutated at runtime. Explicit grants only ever add on
/// top of these defaults. Admin is absent by design: the bypass tier never
/// consults the table.
#[derive(Debug, Clone)]
pub struct RoleDefaults {
    /// Role → set of permissions.
    defaults: HashMap<Role, HashSet<PermissionCode>>,
}

impl RoleDefaults {
    /// Creates the default table.
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        // Citizen: file complaints with attachments, nothing administrative.
        let mut citizen = HashSet::new();
        citizen.insert(PermissionCode::FileUpload);
        defaults.insert(Role::Citizen, citizen);

        // Agent: complaint handling within their sector.
        let mut agent = HashSet::new();
        agent.insert(PermissionCode::ComplaintView);
        agent.insert(PermissionCode::ComplaintResolve);
        agent.insert(PermissionCode::FileUpload);
        agent.insert(PermissionCode::DashboardView);
        defaults.insert(Role::Agent, agent);

        // Editor: content production for news, events, and the directory.
        let mut editor = HashSet::new();
        editor.insert(PermissionCode::NewsCreate);
        editor.insert(PermissionCode::NewsPublish);
        editor.insert(PermissionCode::EventCreate);
        editor.insert(PermissionCode::EventPublish);
        editor.insert(PermissionCode::DirectoryEdit);
        editor.insert(PermissionCode::EstablishmentCreate);
        editor.insert(PermissionCode::EstablishmentUpdate);
        editor.insert(PermissionCode::FileUpload);
        editor.insert(PermissionCode::DashboardView);
        defaults.insert(Role::Editor, editor);

        // Manager: editor + agent surface plus oversight, minus portal
        // settings and grant/user administration.
        let mut manager = HashSet::new();
        manager.insert(PermissionCode::NewsCreate);
        manager.insert(PermissionCode::NewsPublish);
        manager.insert(PermissionCode::NewsDelete);
        manager.insert(PermissionCode::EventCreate);
        manager.insert(PermissionCode::EventPublish);
        manager.insert(PermissionCode::EventDelete);
        manager.insert(PermissionCode::ComplaintView);
        manager.insert(PermissionCode::ComplaintAssign);
        manager.insert(PermissionCode::ComplaintResolve);
        manager.insert(PermissionCode::ComplaintDelete);
        manager.insert(PermissionCode::EstablishmentCreate);
        manager.insert(PermissionCode::EstablishmentUpdate);
        manager.insert(PermissionCode::EstablishmentVerify);
        manager.insert(PermissionCode::DirectoryEdit);
        manager.insert(PermissionCode::FileUpload);
        manager.insert(PermissionCode::UserRead);
        manager.insert(PermissionCode::ReportView);
        manager.insert(PermissionCode::ReportExport);
        manager.insert(PermissionCode::DashboardView);
        manager.insert(PermissionCode::AuditView);
        defaults.insert(Role::Manager, manager);

        Self { defaults }
    }

    /// Creates a table with no entries. Every role then depends entirely
    /// on explicit grants (the bypass tier excepted).
    pub fn empty() -> Self {
        Self {
            defaults: HashMap::new(),
        }
    }

    /// Returns the default permission set for the given role.
    pub fn permissions_for_role(&self, role: &Role) -> HashSet<PermissionCode> {
        self.defaults.get(role).cloned().unwrap_or_default()
    }

    /// Checks whether the role's defaults include the permission.
    pub fn contains(&self, role: &Role, code: &PermissionCode) -> bool {
        self.defaults
            .get(role)
            .map(|perms| perms.contains(code))
            .unwrap_or(false)
    }
}

impl Default for RoleDefaults {
    fn default() -> Self {
        Self::new()
    }
}
