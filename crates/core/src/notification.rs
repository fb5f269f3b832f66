//! Push notification drafts.
//!
//! The composer collects a [`NotificationDraft`]; only a validated
//! [`Notification`] can be dispatched, and each one maps to exactly one
//! backend endpoint.

use serde::{Deserialize, Serialize};

use crate::types::{IdError, UserId, UserRole};

/// Why a draft cannot be sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Message is required")]
    EmptyBody,
    #[error("User ID is required")]
    MissingUserId,
    #[error("invalid user id: {0}")]
    InvalidUserId(#[from] IdError),
}

/// Who receives a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    User(UserId),
    Role(UserRole),
    Broadcast,
}

impl NotificationTarget {
    #[must_use]
    pub const fn mode(&self) -> ComposerMode {
        match self {
            Self::User(_) => ComposerMode::User,
            Self::Role(_) => ComposerMode::Role,
            Self::Broadcast => ComposerMode::Broadcast,
        }
    }
}

/// Composer tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposerMode {
    #[default]
    User,
    Role,
    Broadcast,
}

impl ComposerMode {
    pub const ALL: [Self; 3] = [Self::User, Self::Role, Self::Broadcast];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Role => "role",
            Self::Broadcast => "broadcast",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "Single User",
            Self::Role => "By Role",
            Self::Broadcast => "Broadcast All",
        }
    }
}

/// Raw composer input. Nothing is checked until [`NotificationDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationDraft {
    #[serde(default)]
    pub mode: ComposerMode,
    #[serde(default)]
    pub user_id: String,
    pub role: Option<UserRole>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl NotificationDraft {
    /// Check the draft and resolve its target.
    ///
    /// Title and body are trimmed. In role mode a missing role falls back to
    /// parents, matching the composer's default selection.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank title or body, or a missing / malformed
    /// user id in single-user mode.
    pub fn validate(&self) -> Result<Notification, NotificationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(NotificationError::EmptyTitle);
        }
        let body = self.body.trim();
        if body.is_empty() {
            return Err(NotificationError::EmptyBody);
        }

        let target = match self.mode {
            ComposerMode::User => {
                if self.user_id.trim().is_empty() {
                    return Err(NotificationError::MissingUserId);
                }
                NotificationTarget::User(UserId::parse(&self.user_id)?)
            }
            ComposerMode::Role => NotificationTarget::Role(self.role.unwrap_or(UserRole::Parent)),
            ComposerMode::Broadcast => NotificationTarget::Broadcast,
        };

        Ok(Notification {
            target,
            title: title.to_owned(),
            body: body.to_owned(),
        })
    }
}

/// A notification ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    target: NotificationTarget,
    title: String,
    body: String,
}

impl Notification {
    #[must_use]
    pub const fn target(&self) -> &NotificationTarget {
        &self.target
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// A canned title and body that pre-fills the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickTemplate {
    pub title: &'static str,
    pub body: &'static str,
}

pub const QUICK_TEMPLATES: [QuickTemplate; 4] = [
    QuickTemplate {
        title: "Welcome to WeCare!",
        body: "Thank you for joining. Start exploring our services today!",
    },
    QuickTemplate {
        title: "Profile Approved",
        body: "Congratulations! Your nanny profile has been verified. You can now receive booking requests.",
    },
    QuickTemplate {
        title: "New Feature Available",
        body: "Check out our latest features in the app. Update now for the best experience!",
    },
    QuickTemplate {
        title: "Scheduled Maintenance",
        body: "WeCare will undergo maintenance tonight from 2 AM to 4 AM IST. We apologize for the inconvenience.",
    },
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft(mode: ComposerMode, title: &str, body: &str) -> NotificationDraft {
        NotificationDraft {
            mode,
            title: title.to_owned(),
            body: body.to_owned(),
            ..NotificationDraft::default()
        }
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = draft(ComposerMode::Broadcast, "   ", "Hello").validate().unwrap_err();
        assert_eq!(err, NotificationError::EmptyTitle);
    }

    #[test]
    fn test_blank_body_rejected() {
        let err = draft(ComposerMode::Broadcast, "Hi", "\n").validate().unwrap_err();
        assert_eq!(err, NotificationError::EmptyBody);
    }

    #[test]
    fn test_user_mode_requires_id() {
        let err = draft(ComposerMode::User, "Hi", "There").validate().unwrap_err();
        assert_eq!(err, NotificationError::MissingUserId);

        let mut d = draft(ComposerMode::User, "Hi", "There");
        d.user_id = "not/an/id".to_owned();
        assert!(matches!(d.validate(), Err(NotificationError::InvalidUserId(_))));
    }

    #[test]
    fn test_user_mode_target() {
        let mut d = draft(ComposerMode::User, " Hi ", " There ");
        d.user_id = "65f1c0ffee0123456789abcd".to_owned();
        let n = d.validate().unwrap();
        assert_eq!(n.title(), "Hi");
        assert_eq!(n.body(), "There");
        assert!(matches!(
            n.target(),
            NotificationTarget::User(id) if id.as_str() == "65f1c0ffee0123456789abcd"
        ));
    }

    #[test]
    fn test_role_mode_defaults_to_parents() {
        let n = draft(ComposerMode::Role, "Hi", "There").validate().unwrap();
        assert_eq!(n.target(), &NotificationTarget::Role(UserRole::Parent));

        let mut d = draft(ComposerMode::Role, "Hi", "There");
        d.role = Some(UserRole::Nanny);
        assert_eq!(d.validate().unwrap().target(), &NotificationTarget::Role(UserRole::Nanny));
    }

    #[test]
    fn test_broadcast_ignores_user_id() {
        let mut d = draft(ComposerMode::Broadcast, "Hi", "There");
        d.user_id = "abc".to_owned();
        let n = d.validate().unwrap();
        assert_eq!(n.target(), &NotificationTarget::Broadcast);
        assert_eq!(n.target().mode(), ComposerMode::Broadcast);
    }

    #[test]
    fn test_quick_templates_are_sendable() {
        for t in QUICK_TEMPLATES {
            assert!(draft(ComposerMode::Broadcast, t.title, t.body).validate().is_ok());
        }
    }
}
