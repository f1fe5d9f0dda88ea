//! Capability context and the rights filter for wiki entries.

use crate::domain::entities::WikiEntryRecord;

/// Role the platform gateway resolved for the current course context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseRole {
    /// Course administrator: may edit, add, and delete entries.
    Admin,
    /// Enrolled (or anonymous) viewer: sees published entries only.
    Member,
}

/// Capability context for the requesting viewer, passed explicitly to every
/// rights decision instead of living in ambient request state.
#[derive(Debug, Clone)]
pub struct ViewerContext {
    pub user: Option<String>,
    pub role: CourseRole,
}

impl ViewerContext {
    pub fn admin(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            role: CourseRole::Admin,
        }
    }

    pub fn member(user: Option<String>) -> Self {
        Self {
            user,
            role: CourseRole::Member,
        }
    }

    /// Viewing is never denied outright; restriction happens by filtering.
    pub fn can_view(&self) -> bool {
        true
    }

    pub fn can_edit(&self) -> bool {
        self.role == CourseRole::Admin
    }

    pub fn can_add(&self) -> bool {
        self.can_edit()
    }

    pub fn can_delete(&self) -> bool {
        self.can_edit()
    }
}

/// Drop the entries the viewer may not see, preserving input order.
///
/// Editors see drafts and published entries alike; everyone else sees only
/// published entries.
pub fn apply_rights(viewer: &ViewerContext, entries: Vec<WikiEntryRecord>) -> Vec<WikiEntryRecord> {
    if viewer.can_edit() {
        return entries;
    }

    entries
        .into_iter()
        .filter(|entry| !entry.is_draft)
        .collect()
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;

    fn entry(position: i32, is_draft: bool) -> WikiEntryRecord {
        let now = OffsetDateTime::UNIX_EPOCH;
        WikiEntryRecord {
            id: Uuid::new_v4(),
            position,
            is_html: true,
            html: String::from("<p>body</p>"),
            is_draft,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn member_capabilities_are_view_only() {
        let viewer = ViewerContext::member(Some("student@example.edu".into()));
        assert!(viewer.can_view());
        assert!(!viewer.can_edit());
        assert!(!viewer.can_add());
        assert!(!viewer.can_delete());
    }

    #[test]
    fn admin_holds_every_capability() {
        let viewer = ViewerContext::admin("staff@example.edu");
        assert!(viewer.can_view());
        assert!(viewer.can_edit());
        assert!(viewer.can_add());
        assert!(viewer.can_delete());
    }

    #[test]
    fn admins_see_the_list_unchanged() {
        let entries = vec![entry(1, false), entry(2, true), entry(3, true)];
        let filtered = apply_rights(&ViewerContext::admin("staff@example.edu"), entries.clone());
        assert_eq!(filtered, entries);
    }

    #[test]
    fn members_see_published_entries_in_original_order() {
        let published_first = entry(1, false);
        let draft = entry(2, true);
        let published_last = entry(3, false);
        let entries = vec![published_first.clone(), draft, published_last.clone()];

        let filtered = apply_rights(&ViewerContext::member(None), entries);
        assert_eq!(filtered, vec![published_first, published_last]);
    }

    #[test]
    fn filtering_an_all_draft_list_yields_nothing() {
        let entries = vec![entry(1, true), entry(2, true)];
        let filtered = apply_rights(&ViewerContext::member(None), entries);
        assert!(filtered.is_empty());
    }
}
