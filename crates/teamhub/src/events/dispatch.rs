//! Applying app events to the entity stores

use super::{AppEvent, EventKind, EventListener, HandlerFamily};
use crate::api::{ResourceApi, ResourcesQuery};
use crate::error::SyncResult;
use crate::models::{
    ExtraFields, SmartFolder, Subscription, Tag, Template, UserPermissions, Workspace,
};
use crate::store::SharedStores;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routes decoded events to their handler family.
///
/// Handlers never fail the stream: a bad payload or a failed fetch drops the
/// update for that event and leaves the caches as they were.
pub struct EventDispatcher {
    stores: SharedStores,
    api: Arc<dyn ResourceApi>,
    comments: Option<Arc<dyn EventListener>>,
    notifications: Option<Arc<dyn EventListener>>,
}

impl EventDispatcher {
    pub fn new(stores: SharedStores, api: Arc<dyn ResourceApi>) -> Self {
        Self {
            stores,
            api,
            comments: None,
            notifications: None,
        }
    }

    pub fn with_comments_listener(mut self, listener: Arc<dyn EventListener>) -> Self {
        self.comments = Some(listener);
        self
    }

    pub fn with_notifications_listener(mut self, listener: Arc<dyn EventListener>) -> Self {
        self.notifications = Some(listener);
        self
    }

    pub fn stores(&self) -> &SharedStores {
        &self.stores
    }

    /// Decode a push message and dispatch it. Malformed messages are dropped.
    pub async fn handle_message(&self, raw: &str) {
        match AppEvent::decode(raw) {
            Ok(event) => self.dispatch(event).await,
            Err(err) => debug!("Dropping undecodable event message: {}", err),
        }
    }

    /// Apply one event, then record it in the event log.
    ///
    /// Replays of an already recorded id are applied again.
    pub async fn dispatch(&self, event: AppEvent) {
        if let Some(family) = event.kind.family() {
            if let Err(err) = self.apply(family, &event).await {
                if err.is_network() {
                    debug!(
                        "Event {} ({}) not applied, fetch failed [{}]: {}",
                        event.id,
                        event.kind,
                        err.code(),
                        err
                    );
                } else {
                    warn!(
                        "Event {} ({}) not applied [{}]: {}",
                        event.id,
                        event.kind,
                        err.code(),
                        err
                    );
                }
            }
        }

        self.stores.write().await.nav.app_events.upsert([event]);
    }

    async fn apply(&self, family: HandlerFamily, event: &AppEvent) -> SyncResult<()> {
        match family {
            HandlerFamily::Team => self.on_team_update(event).await,
            HandlerFamily::Permissions => self.on_permissions(event).await,
            HandlerFamily::Subscription => self.on_subscription(event).await,
            HandlerFamily::Resources => self.on_resources(event).await,
            HandlerFamily::Users => self.on_users(event).await,
            HandlerFamily::Tags => self.on_tags(event).await,
            HandlerFamily::Templates => self.on_templates(event).await,
            HandlerFamily::Workspaces => self.on_workspaces(event).await,
            HandlerFamily::SmartFolders => self.on_smart_folders(event).await,
            HandlerFamily::Comments => {
                if let Some(listener) = &self.comments {
                    listener.on_event(event);
                }
                Ok(())
            }
            HandlerFamily::Notifications => {
                if let Some(listener) = &self.notifications {
                    listener.on_event(event);
                }
                Ok(())
            }
        }
    }

    async fn on_team_update(&self, event: &AppEvent) -> SyncResult<()> {
        let Some(patch) = event.data_field::<ExtraFields>("team")? else {
            return Ok(());
        };

        let mut stores = self.stores.write().await;
        if stores.page.team.is_none() {
            return Ok(());
        }
        stores.page.merge_team(&patch)?;
        if let Some(team_id) = patch.get("id").and_then(|v| v.as_str()) {
            stores.global.merge_team(team_id, &patch)?;
        }
        Ok(())
    }

    async fn on_permissions(&self, event: &AppEvent) -> SyncResult<()> {
        match event.kind {
            EventKind::PermissionsCreate => {
                if let Some(permission) = event.data_field::<UserPermissions>("userPermissions")? {
                    self.stores
                        .write()
                        .await
                        .page
                        .update_single_permission(permission);
                }
            }
            _ => {
                if let Some(id) = event.data_field::<String>("userPermissionsId")? {
                    self.stores.write().await.page.remove_single_permission(&id);
                }
            }
        }
        Ok(())
    }

    async fn on_subscription(&self, event: &AppEvent) -> SyncResult<()> {
        let subscription: Subscription = event.required_field("subscription")?;
        let subscription = if subscription.is_inactive() {
            None
        } else {
            Some(subscription)
        };
        self.stores
            .write()
            .await
            .page
            .update_subscription(subscription);
        Ok(())
    }

    async fn on_users(&self, event: &AppEvent) -> SyncResult<()> {
        match event.kind {
            EventKind::UserRemoval => {
                let Some(user_id) = event.data_field::<String>("userId")? else {
                    return Ok(());
                };
                let mut stores = self.stores.write().await;
                stores.global.remove_user_from_teams(&user_id);
                stores.page.remove_user_in_permissions(&user_id);
            }
            _ => {
                let display_name = event.data_field::<String>("displayName")?;
                if let (Some(user_id), Some(display_name)) = (&event.user_id, display_name) {
                    self.stores
                        .write()
                        .await
                        .page
                        .update_user_in_permissions(user_id, &display_name);
                }
            }
        }
        Ok(())
    }

    async fn on_tags(&self, event: &AppEvent) -> SyncResult<()> {
        let tag: Tag = event.required_field("tag")?;
        let mut stores = self.stores.write().await;
        if event.kind == EventKind::TagCreate {
            stores.nav.tags.upsert([tag]);
        } else {
            stores.nav.tags.remove_by_ids([tag.id]);
        }
        Ok(())
    }

    async fn on_smart_folders(&self, event: &AppEvent) -> SyncResult<()> {
        if event.kind == EventKind::SmartFolderDelete {
            let id: String = event.required_field("smartFolderId")?;
            self.stores.write().await.nav.smart_folders.remove_by_ids([id]);
        } else {
            let folder: SmartFolder = event.required_field("smartFolder")?;
            self.stores.write().await.nav.smart_folders.upsert([folder]);
        }
        Ok(())
    }

    async fn on_templates(&self, event: &AppEvent) -> SyncResult<()> {
        let raw = event.data.get("template").cloned().unwrap_or_default();

        if event.kind == EventKind::TemplateDelete {
            if let Some(id) = raw.as_str() {
                self.stores.write().await.nav.templates.remove_by_ids([id]);
            }
            return Ok(());
        }

        let template = match raw.as_str() {
            Some(id) => match self.api.get_template(id).await {
                Ok(template) => template,
                Err(err) => {
                    debug!("Template {} could not be fetched: {}", id, err);
                    return Ok(());
                }
            },
            None => event.required_field::<Template>("template")?,
        };
        self.stores.write().await.nav.templates.upsert([template]);
        Ok(())
    }

    async fn on_workspaces(&self, event: &AppEvent) -> SyncResult<()> {
        if event.kind == EventKind::WorkspaceRemoval {
            let Some(workspace_id) = event.data.get("workspace").and_then(|v| v.as_str()) else {
                return Ok(());
            };
            let (docs, folders) = self.stores.write().await.nav.remove_workspace(workspace_id);
            info!(
                "Workspace {} removed with {} documents and {} folders",
                workspace_id, docs, folders
            );
            return Ok(());
        }

        let workspace: Workspace = event.required_field("workspace")?;
        let added: Vec<String> = event.data_field("added")?.unwrap_or_default();
        let workspace_id = workspace.id.clone();

        let current_user_joined = {
            let mut stores = self.stores.write().await;
            stores.nav.workspaces.upsert([workspace]);
            stores
                .global
                .current_user_id()
                .map(|me| added.iter().any(|id| id == me))
                .unwrap_or(false)
        };

        if !current_user_joined {
            return Ok(());
        }
        let Some(team_id) = event.team_id.as_deref() else {
            return Ok(());
        };

        let query = ResourcesQuery {
            resources_ids: Vec::new(),
            workspaces_ids: vec![workspace_id],
            minimal: false,
        };
        let resources = self.api.get_resources(team_id, &query).await?;
        self.stores.write().await.nav.merge_resources(resources);
        Ok(())
    }

    async fn on_resources(&self, event: &AppEvent) -> SyncResult<()> {
        let Some(team_id) = event.team_id.as_deref() else {
            return Ok(());
        };

        let query = resource_candidates(event)?;
        if query.is_empty() {
            return Ok(());
        }

        let resources = self.api.get_resources(team_id, &query).await?;

        let returned_workspaces: HashSet<String> =
            resources.workspaces.iter().map(|w| w.id.clone()).collect();
        let returned_resources: HashSet<String> = resources
            .docs
            .iter()
            .map(|d| d.id.clone())
            .chain(resources.folders.iter().map(|f| f.id.clone()))
            .collect();

        let gone_workspaces: Vec<&String> = query
            .workspaces_ids
            .iter()
            .filter(|id| !returned_workspaces.contains(*id))
            .collect();
        let gone_resources: Vec<&String> = query
            .resources_ids
            .iter()
            .filter(|id| !returned_resources.contains(*id))
            .collect();

        let mut stores = self.stores.write().await;
        stores.nav.merge_resources(resources);
        stores.nav.workspaces.remove_by_ids(&gone_workspaces);
        let removed = stores.nav.docs.remove_by_ids(&gone_resources)
            + stores.nav.folders.remove_by_ids(&gone_resources);
        if removed > 0 {
            debug!(
                "Removed {} resources no longer visible after {}",
                removed, event.kind
            );
        }
        Ok(())
    }
}

/// Collect the ids a resource event asks to re-fetch.
///
/// Three payload shapes are read: a `resources` map of workspace id to
/// resource ids (only for `resourcesUpdate`), a single `resource` id and a
/// single `workspaceId`.
fn resource_candidates(event: &AppEvent) -> SyncResult<ResourcesQuery> {
    let mut query = ResourcesQuery {
        minimal: true,
        ..Default::default()
    };

    if event.kind == EventKind::ResourcesUpdate {
        if let Some(by_workspace) =
            event.data_field::<BTreeMap<String, Option<Vec<String>>>>("resources")?
        {
            let mut seen = HashSet::new();
            for (workspace_id, resource_ids) in by_workspace {
                query.workspaces_ids.push(workspace_id);
                for id in resource_ids.unwrap_or_default() {
                    if seen.insert(id.clone()) {
                        query.resources_ids.push(id);
                    }
                }
            }
        }
    }
    if let Some(resource) = event.data_field::<String>("resource")? {
        query.resources_ids.push(resource);
    }
    if let Some(workspace_id) = event.data_field::<String>("workspaceId")? {
        query.workspaces_ids.push(workspace_id);
    }
    Ok(query)
}
