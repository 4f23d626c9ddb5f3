//! Event types and the dispatch table

use serde::{Deserialize, Serialize};

/// Type of an app event, as sent in the envelope's `type` field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    TeamUpdate,
    PermissionsCreate,
    PermissionsRemoval,
    SubscriptionUpdate,
    SubscriptionCreate,
    CreateDoc,
    ContentUpdate,
    ResourcesUpdate,
    ArchiveDoc,
    UnarchiveDoc,
    UserRemoval,
    UserUpdate,
    TagCreate,
    TagRemoval,
    TemplateDelete,
    TemplateUpdate,
    WorkspaceCreate,
    WorkspaceRemoval,
    WorkspaceUpdate,
    CommentThreadCreated,
    CommentThreadUpdated,
    CommentThreadDeleted,
    CommentCreated,
    CommentUpdated,
    CommentDeleted,
    SmartFolderCreate,
    SmartFolderUpdate,
    SmartFolderDelete,
    NotificationCreated,
    NotificationViewed,
    /// A type this client has no handler for
    Other(String),
}

/// Group of event kinds sharing one handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerFamily {
    Team,
    Permissions,
    Subscription,
    Resources,
    Users,
    Tags,
    Templates,
    Workspaces,
    Comments,
    SmartFolders,
    Notifications,
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::TeamUpdate => "teamUpdate",
            EventKind::PermissionsCreate => "permissionsCreate",
            EventKind::PermissionsRemoval => "permissionsRemoval",
            EventKind::SubscriptionUpdate => "subscriptionUpdate",
            EventKind::SubscriptionCreate => "subscriptionCreate",
            EventKind::CreateDoc => "createDoc",
            EventKind::ContentUpdate => "contentUpdate",
            EventKind::ResourcesUpdate => "resourcesUpdate",
            EventKind::ArchiveDoc => "archiveDoc",
            EventKind::UnarchiveDoc => "unarchiveDoc",
            EventKind::UserRemoval => "userRemoval",
            EventKind::UserUpdate => "userUpdate",
            EventKind::TagCreate => "tagCreate",
            EventKind::TagRemoval => "tagRemoval",
            EventKind::TemplateDelete => "templateDelete",
            EventKind::TemplateUpdate => "templateUpdate",
            EventKind::WorkspaceCreate => "workspaceCreate",
            EventKind::WorkspaceRemoval => "workspaceRemoval",
            EventKind::WorkspaceUpdate => "workspaceUpdate",
            EventKind::CommentThreadCreated => "commentThreadCreated",
            EventKind::CommentThreadUpdated => "commentThreadUpdated",
            EventKind::CommentThreadDeleted => "commentThreadDeleted",
            EventKind::CommentCreated => "commentCreated",
            EventKind::CommentUpdated => "commentUpdated",
            EventKind::CommentDeleted => "commentDeleted",
            EventKind::SmartFolderCreate => "smartFolderCreate",
            EventKind::SmartFolderUpdate => "smartFolderUpdate",
            EventKind::SmartFolderDelete => "smartFolderDelete",
            EventKind::NotificationCreated => "notificationCreated",
            EventKind::NotificationViewed => "notificationViewed",
            EventKind::Other(other) => other,
        }
    }

    /// The handler family responsible for this kind, if any
    pub fn family(&self) -> Option<HandlerFamily> {
        use EventKind::*;

        let family = match self {
            TeamUpdate => HandlerFamily::Team,
            PermissionsCreate | PermissionsRemoval => HandlerFamily::Permissions,
            SubscriptionUpdate | SubscriptionCreate => HandlerFamily::Subscription,
            CreateDoc | ContentUpdate | ResourcesUpdate | ArchiveDoc | UnarchiveDoc => {
                HandlerFamily::Resources
            }
            UserRemoval | UserUpdate => HandlerFamily::Users,
            TagCreate | TagRemoval => HandlerFamily::Tags,
            TemplateDelete | TemplateUpdate => HandlerFamily::Templates,
            WorkspaceCreate | WorkspaceRemoval | WorkspaceUpdate => HandlerFamily::Workspaces,
            CommentThreadCreated | CommentThreadUpdated | CommentThreadDeleted | CommentCreated
            | CommentUpdated | CommentDeleted => HandlerFamily::Comments,
            SmartFolderCreate | SmartFolderUpdate | SmartFolderDelete => {
                HandlerFamily::SmartFolders
            }
            NotificationCreated | NotificationViewed => HandlerFamily::Notifications,
            Other(_) => return None,
        };
        Some(family)
    }
}

impl From<&str> for EventKind {
    fn from(value: &str) -> Self {
        match value {
            "teamUpdate" => EventKind::TeamUpdate,
            "permissionsCreate" => EventKind::PermissionsCreate,
            "permissionsRemoval" => EventKind::PermissionsRemoval,
            "subscriptionUpdate" => EventKind::SubscriptionUpdate,
            "subscriptionCreate" => EventKind::SubscriptionCreate,
            "createDoc" => EventKind::CreateDoc,
            "contentUpdate" => EventKind::ContentUpdate,
            "resourcesUpdate" => EventKind::ResourcesUpdate,
            "archiveDoc" => EventKind::ArchiveDoc,
            "unarchiveDoc" => EventKind::UnarchiveDoc,
            "userRemoval" => EventKind::UserRemoval,
            "userUpdate" => EventKind::UserUpdate,
            "tagCreate" => EventKind::TagCreate,
            "tagRemoval" => EventKind::TagRemoval,
            "templateDelete" => EventKind::TemplateDelete,
            "templateUpdate" => EventKind::TemplateUpdate,
            "workspaceCreate" => EventKind::WorkspaceCreate,
            "workspaceRemoval" => EventKind::WorkspaceRemoval,
            "workspaceUpdate" => EventKind::WorkspaceUpdate,
            "commentThreadCreated" => EventKind::CommentThreadCreated,
            "commentThreadUpdated" => EventKind::CommentThreadUpdated,
            "commentThreadDeleted" => EventKind::CommentThreadDeleted,
            "commentCreated" => EventKind::CommentCreated,
            "commentUpdated" => EventKind::CommentUpdated,
            "commentDeleted" => EventKind::CommentDeleted,
            "smartFolderCreate" => EventKind::SmartFolderCreate,
            "smartFolderUpdate" => EventKind::SmartFolderUpdate,
            "smartFolderDelete" => EventKind::SmartFolderDelete,
            "notificationCreated" => EventKind::NotificationCreated,
            "notificationViewed" => EventKind::NotificationViewed,
            other => EventKind::Other(other.to_string()),
        }
    }
}

impl From<String> for EventKind {
    fn from(value: String) -> Self {
        EventKind::from(value.as_str())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
