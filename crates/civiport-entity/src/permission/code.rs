//! The closed permission catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A permission code, grouped by subject area. Codes carry no behavior;
/// the resolver decides whether an account holds one.
///
/// Persisted as snake_case text in the grants table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCode {
    // News
    /// Create and edit news drafts.
    NewsCreate,
    /// Publish news items.
    NewsPublish,
    /// Delete news items.
    NewsDelete,

    // Events
    /// Create and edit events.
    EventCreate,
    /// Publish events to the public calendar.
    EventPublish,
    /// Delete events.
    EventDelete,

    // Complaints
    /// View submitted complaints.
    ComplaintView,
    /// Assign complaints to sector agents.
    ComplaintAssign,
    /// Resolve or close complaints.
    ComplaintResolve,
    /// Delete complaints.
    ComplaintDelete,

    // Establishments
    /// Register new establishments in the directory.
    EstablishmentCreate,
    /// Update establishment records.
    EstablishmentUpdate,
    /// Verify establishment ownership claims.
    EstablishmentVerify,

    // Directory
    /// Edit public directory pages.
    DirectoryEdit,

    // Uploads
    /// Upload files through the validated pipeline.
    FileUpload,

    // Accounts
    /// Read account profiles.
    UserRead,
    /// Manage accounts (activate, deactivate, change roles).
    UserManage,
    /// Create and revoke permission grants.
    GrantManage,

    // Reports
    /// View administrative reports.
    ReportView,
    /// Export report data.
    ReportExport,

    // System
    /// View the admin dashboard.
    DashboardView,
    /// Search the audit log.
    AuditView,
    /// Change portal settings.
    SettingsManage,
}

impl PermissionCode {
    /// Every code in the catalogue, in declaration order.
    pub const ALL: [PermissionCode; 23] = [
        Self::NewsCreate,
        Self::NewsPublish,
        Self::NewsDelete,
        Self::EventCreate,
        Self::EventPublish,
        Self::EventDelete,
        Self::ComplaintView,
        Self::ComplaintAssign,
        Self::ComplaintResolve,
        Self::ComplaintDelete,
        Self::EstablishmentCreate,
        Self::EstablishmentUpdate,
        Self::EstablishmentVerify,
        Self::DirectoryEdit,
        Self::FileUpload,
        Self::UserRead,
        Self::UserManage,
        Self::GrantManage,
        Self::ReportView,
        Self::ReportExport,
        Self::DashboardView,
        Self::AuditView,
        Self::SettingsManage,
    ];

    /// Return the code as its snake_case string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewsCreate => "news_create",
            Self::NewsPublish => "news_publish",
            Self::NewsDelete => "news_delete",
            Self::EventCreate => "event_create",
            Self::EventPublish => "event_publish",
            Self::EventDelete => "event_delete",
            Self::ComplaintView => "complaint_view",
            Self::ComplaintAssign => "complaint_assign",
            Self::ComplaintResolve => "complaint_resolve",
            Self::ComplaintDelete => "complaint_delete",
            Self::EstablishmentCreate => "establishment_create",
            Self::EstablishmentUpdate => "establishment_update",
            Self::EstablishmentVerify => "establishment_verify",
            Self::DirectoryEdit => "directory_edit",
            Self::FileUpload => "file_upload",
            Self::UserRead => "user_read",
            Self::UserManage => "user_manage",
            Self::GrantManage => "grant_manage",
            Self::ReportView => "report_view",
            Self::ReportExport => "report_export",
            Self::DashboardView => "dashboard_view",
            Self::AuditView => "audit_view",
            Self::SettingsManage => "settings_manage",
        }
    }
}

impl fmt::Display for PermissionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionCode {
    type Err = civiport_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news_create" => Ok(Self::NewsCreate),
            "news_publish" => Ok(Self::NewsPublish),
            "news_delete" => Ok(Self::NewsDelete),
            "event_create" => Ok(Self::EventCreate),
            "event_publish" => Ok(Self::EventPublish),
            "event_delete" => Ok(Self::EventDelete),
            "complaint_view" => Ok(Self::ComplaintView),
            "complaint_assign" => Ok(Self::ComplaintAssign),
            "complaint_resolve" => Ok(Self::ComplaintResolve),
            "complaint_delete" => Ok(Self::ComplaintDelete),
            "establishment_create" => Ok(Self::EstablishmentCreate),
            "establishment_update" => Ok(Self::EstablishmentUpdate),
            "establishment_verify" => Ok(Self::EstablishmentVerify),
            "directory_edit" => Ok(Self::DirectoryEdit),
            "file_upload" => Ok(Self::FileUpload),
            "user_read" => Ok(Self::UserRead),
            "user_manage" => Ok(Self::UserManage),
            "grant_manage" => Ok(Self::GrantManage),
            "report_view" => Ok(Self::ReportView),
            "report_export" => Ok(Self::ReportExport),
            "dashboard_view" => Ok(Self::DashboardView),
            "audit_view" => Ok(Self::AuditView),
            "settings_manage" => Ok(Self::SettingsManage),
            _ => Err(civiport_core::AppError::validation(format!(
                "Unknown permission code: '{s}'"
            ))),
        }
    }
}
