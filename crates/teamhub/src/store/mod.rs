//! Client-side entity stores
//!
//! The stores are the only shared mutable state of the client core. They are
//! written by API response handling and by the event dispatcher, and read by
//! smart folder evaluation. Writers follow last-writer-wins; nothing here is
//! transactional.

mod entity_map;

pub use entity_map::EntityMap;

use crate::api::ResourcesResponse;
use crate::error::SyncResult;
use crate::events::AppEvent;
use crate::models::{
    Document, ExtraFields, Folder, SmartFolder, Subscription, Tag, Team, Template, User,
    UserPermissions, Workspace,
};
use crate::smart_folder::filter_documents;
use chrono::{DateTime, TimeZone};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Stores shared between the event stream and its readers
pub type SharedStores = Arc<RwLock<Stores>>;

/// Entity caches of the current team
#[derive(Debug, Default, Clone)]
pub struct NavStore {
    pub docs: EntityMap<Document>,
    pub folders: EntityMap<Folder>,
    pub workspaces: EntityMap<Workspace>,
    pub tags: EntityMap<Tag>,
    pub templates: EntityMap<Template>,
    pub smart_folders: EntityMap<SmartFolder>,
    /// Every processed event, by event id
    pub app_events: EntityMap<AppEvent>,
}

impl NavStore {
    /// Upsert the entities of a resource fetch
    pub fn merge_resources(&mut self, resources: ResourcesResponse) {
        self.workspaces.upsert(resources.workspaces);
        self.folders.upsert(resources.folders);
        self.docs.upsert(resources.docs);
    }

    /// Remove a workspace together with every cached document and folder in it.
    ///
    /// Returns the number of documents and folders removed.
    pub fn remove_workspace(&mut self, workspace_id: &str) -> (usize, usize) {
        self.workspaces.remove_by_ids([workspace_id]);
        let doc_ids = self.docs.ids_where(|doc| doc.workspace_id == workspace_id);
        let folder_ids = self
            .folders
            .ids_where(|folder| folder.workspace_id == workspace_id);
        (
            self.docs.remove_by_ids(&doc_ids),
            self.folders.remove_by_ids(&folder_ids),
        )
    }

    /// Documents currently belonging to a cached smart folder.
    ///
    /// Returns `None` when the smart folder is not cached.
    pub fn smart_folder_documents<Tz: TimeZone>(
        &self,
        smart_folder_id: &str,
        now: &DateTime<Tz>,
    ) -> Option<Vec<&Document>> {
        let folder = self.smart_folders.get(smart_folder_id)?;
        Some(filter_documents(self.docs.values(), folder, now))
    }
}

/// State of the team page being viewed
#[derive(Debug, Default, Clone)]
pub struct PageStore {
    pub team: Option<Team>,
    pub permissions: Vec<UserPermissions>,
    pub subscription: Option<Subscription>,
}

impl PageStore {
    /// Replace the page team and take its permissions and subscription
    pub fn set_team(&mut self, team: Team) {
        self.permissions = team.permissions.clone();
        self.subscription = team.subscription.clone();
        self.team = Some(team);
    }

    /// Shallow-merge a partial team into the page team, if one is loaded
    pub fn merge_team(&mut self, patch: &ExtraFields) -> SyncResult<()> {
        if let Some(team) = self.team.as_mut() {
            *team = team.merged_with(patch)?;
        }
        Ok(())
    }

    /// Insert a permission or replace the one with the same id
    pub fn update_single_permission(&mut self, permission: UserPermissions) {
        match self.permissions.iter_mut().find(|p| p.id == permission.id) {
            Some(existing) => *existing = permission,
            None => self.permissions.push(permission),
        }
    }

    pub fn remove_single_permission(&mut self, permission_id: &str) {
        self.permissions.retain(|p| p.id != permission_id);
    }

    pub fn remove_user_in_permissions(&mut self, user_id: &str) {
        self.permissions.retain(|p| p.user.id != user_id);
    }

    pub fn update_user_in_permissions(&mut self, user_id: &str, display_name: &str) {
        for permission in self.permissions.iter_mut().filter(|p| p.user.id == user_id) {
            permission.user.display_name = display_name.to_string();
        }
    }

    pub fn update_subscription(&mut self, subscription: Option<Subscription>) {
        self.subscription = subscription;
    }
}

/// State shared by every team of the signed-in user
#[derive(Debug, Default, Clone)]
pub struct GlobalStore {
    pub current_user: Option<User>,
    pub teams: Vec<Team>,
}

impl GlobalStore {
    /// Drop a user from the permission list of every team
    pub fn remove_user_from_teams(&mut self, user_id: &str) {
        for team in &mut self.teams {
            team.permissions.retain(|p| p.user.id != user_id);
        }
    }

    /// Shallow-merge a partial team into the listed team with the same id
    pub fn merge_team(&mut self, team_id: &str, patch: &ExtraFields) -> SyncResult<()> {
        for team in self.teams.iter_mut().filter(|t| t.id == team_id) {
            *team = team.merged_with(patch)?;
        }
        Ok(())
    }

    pub fn current_user_id(&self) -> Option<&str> {
        self.current_user.as_ref().map(|u| u.id.as_str())
    }
}

/// All client stores
#[derive(Debug, Default, Clone)]
pub struct Stores {
    pub nav: NavStore,
    pub page: PageStore,
    pub global: GlobalStore,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the stores for sharing between tasks
    pub fn shared(self) -> SharedStores {
        Arc::new(RwLock::new(self))
    }

    /// Stores for a signed-in user viewing `team`
    pub fn for_team(current_user: Option<User>, team: Team) -> Self {
        let mut stores = Self::new();
        stores.global.current_user = current_user;
        stores.global.teams.push(team.clone());
        stores.page.set_team(team);
        stores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocStatus, LeafCondition, SmartFolderCondition};
    use chrono::{FixedOffset, Utc};

    fn perm(id: &str, user_id: &str) -> UserPermissions {
        UserPermissions::new(id, "member", User::new(user_id, user_id))
    }

    #[test]
    fn test_remove_workspace_cascades() {
        let now = Utc::now();
        let mut nav = NavStore::default();
        nav.workspaces
            .upsert([Workspace::new("ws-1", "One"), Workspace::new("ws-2", "Two")]);
        nav.docs.upsert([
            Document::new("d1", "ws-1", now),
            Document::new("d2", "ws-1", now),
            Document::new("d3", "ws-2", now),
        ]);
        nav.folders
            .upsert([Folder::new("f1", "ws-1", "a"), Folder::new("f2", "ws-2", "b")]);

        assert_eq!(nav.remove_workspace("ws-1"), (2, 1));
        assert!(!nav.workspaces.contains("ws-1"));
        assert!(nav.workspaces.contains("ws-2"));
        assert!(nav.docs.contains("d3"));
        assert!(nav.folders.contains("f2"));
        assert_eq!(nav.docs.len(), 1);
    }

    #[test]
    fn test_smart_folder_documents() {
        let now = FixedOffset::east_opt(0).unwrap().from_utc_datetime(&Utc::now().naive_utc());
        let mut nav = NavStore::default();
        nav.docs.upsert([
            Document::new("d1", "ws-1", Utc::now()).with_status(DocStatus::Completed),
            Document::new("d2", "ws-1", Utc::now()),
        ]);
        nav.smart_folders.upsert([SmartFolder::new(
            "sf-1",
            "Done",
            SmartFolderCondition::and(vec![LeafCondition::Status {
                value: Some(DocStatus::Completed),
            }]),
        )]);

        let docs = nav.smart_folder_documents("sf-1", &now).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "d1");
        assert!(nav.smart_folder_documents("missing", &now).is_none());
    }

    #[test]
    fn test_page_permissions() {
        let mut page = PageStore::default();
        page.update_single_permission(perm("p1", "u1"));
        page.update_single_permission(perm("p2", "u2"));
        let mut admin = perm("p1", "u1");
        admin.role = "admin".into();
        page.update_single_permission(admin);

        assert_eq!(page.permissions.len(), 2);
        assert_eq!(page.permissions[0].role, "admin");

        page.update_user_in_permissions("u2", "Grace");
        assert_eq!(page.permissions[1].user.display_name, "Grace");

        page.remove_user_in_permissions("u2");
        page.remove_single_permission("p1");
        assert!(page.permissions.is_empty());
    }

    #[test]
    fn test_remove_user_from_every_team() {
        let mut global = GlobalStore::default();
        global.teams = vec![
            Team::new("t1", "One").with_permissions(vec![perm("p1", "u1"), perm("p2", "u2")]),
            Team::new("t2", "Two").with_permissions(vec![perm("p3", "u1")]),
        ];

        global.remove_user_from_teams("u1");
        assert_eq!(global.teams[0].permissions.len(), 1);
        assert!(global.teams[1].permissions.is_empty());
    }

    #[test]
    fn test_merge_team_keeps_unpatched_fields() {
        let team = Team::new("t1", "Old").with_permissions(vec![perm("p1", "u1")]);
        let mut stores = Stores::for_team(None, team);
        let mut patch = ExtraFields::new();
        patch.insert("name".into(), serde_json::json!("New"));

        stores.page.merge_team(&patch).unwrap();
        stores.global.merge_team("t1", &patch).unwrap();
        stores.global.merge_team("t2", &patch).unwrap();

        let page_team = stores.page.team.as_ref().unwrap();
        assert_eq!(page_team.name, "New");
        assert_eq!(page_team.permissions.len(), 1);
        assert_eq!(stores.global.teams[0].name, "New");
    }

    #[test]
    fn test_for_team_seeds_page_and_global() {
        let team = Team::new("t1", "One").with_permissions(vec![perm("p1", "u1")]);
        let stores = Stores::for_team(Some(User::new("u1", "Ada")), team);

        assert_eq!(stores.page.permissions.len(), 1);
        assert_eq!(stores.global.teams.len(), 1);
        assert_eq!(stores.global.current_user_id(), Some("u1"));
    }
}
