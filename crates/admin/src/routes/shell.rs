//! Layout shared by every signed-in page: navigation, header and flash
//! messages.

use askama::Template;
use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::{filters, models::CurrentAdmin};

/// One entry of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

/// Sidebar entries, in display order.
pub const NAV_ITEMS: [NavItem; 9] = [
    NavItem { href: "/", label: "Dashboard" },
    NavItem { href: "/users", label: "Users" },
    NavItem { href: "/approvals", label: "Approvals" },
    NavItem { href: "/providers", label: "Providers" },
    NavItem { href: "/bookings", label: "Bookings" },
    NavItem { href: "/reviews", label: "Reviews" },
    NavItem { href: "/notifications", label: "Notifications" },
    NavItem { href: "/analytics", label: "Analytics" },
    NavItem { href: "/settings", label: "Settings" },
];

impl NavItem {
    /// Exact match, or for anything but the dashboard a prefix match, so
    /// `/users/abc` keeps "Users" highlighted.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        path == self.href || (self.href != "/" && path.starts_with(self.href))
    }
}

/// Sidebar entry as rendered.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Everything `base.html` needs besides the page body.
#[derive(Debug, Clone)]
pub struct ShellView {
    pub admin_name: String,
    pub admin_phone: String,
    pub admin_initial: char,
    /// Header date, e.g. "Monday, 19 October 2026".
    pub today: String,
    pub current_path: String,
    pub nav: Vec<NavLink>,
}

impl ShellView {
    #[must_use]
    pub fn new(admin: &CurrentAdmin, current_path: &str) -> Self {
        Self::at(admin, current_path, Local::now())
    }

    fn at(admin: &CurrentAdmin, current_path: &str, now: DateTime<Local>) -> Self {
        let nav = NAV_ITEMS
            .iter()
            .map(|item| NavLink {
                href: item.href,
                label: item.label,
                active: item.is_active(current_path),
            })
            .collect();
        Self {
            admin_name: admin.display_name().to_string(),
            admin_phone: admin.phone_number.clone(),
            admin_initial: admin.initial(),
            today: now.format("%A, %-d %B %Y").to_string(),
            current_path: current_path.to_string(),
            nav,
        }
    }
}

/// Stand-in for a detail page whose record could not be loaded.
#[derive(Template)]
#[template(path = "unavailable.html")]
pub struct UnavailableTemplate {
    pub shell: ShellView,
    pub heading: &'static str,
    pub back_href: &'static str,
    pub back_label: &'static str,
    pub message: String,
}

/// `?success=` / `?error=` left by a redirect after a form post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flash {
    pub success: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use wecare_core::{AdminId, UserRole};

    use super::*;

    fn admin() -> CurrentAdmin {
        CurrentAdmin {
            id: AdminId::parse("65a1b2c3d4e5f60718293a4b").unwrap(),
            name: "WeCare Admin".to_string(),
            phone_number: "+919999999999".to_string(),
            email: None,
            role: UserRole::Admin,
        }
    }

    fn active_labels(path: &str) -> Vec<&'static str> {
        NAV_ITEMS
            .iter()
            .filter(|item| item.is_active(path))
            .map(|item| item.label)
            .collect()
    }

    #[test]
    fn test_dashboard_only_active_on_root() {
        assert_eq!(active_labels("/"), vec!["Dashboard"]);
        assert_eq!(active_labels("/users"), vec!["Users"]);
    }

    #[test]
    fn test_prefix_match_for_detail_pages() {
        assert_eq!(active_labels("/users/65a1b2c3"), vec!["Users"]);
        assert_eq!(active_labels("/bookings/abc"), vec!["Bookings"]);
    }

    #[test]
    fn test_shell_view_header() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        let shell = ShellView::at(&admin(), "/reviews", now);
        assert_eq!(shell.today, "Monday, 19 October 2026");
        assert_eq!(shell.admin_initial, 'W');
        let active: Vec<_> = shell.nav.iter().filter(|l| l.active).map(|l| l.label).collect();
        assert_eq!(active, vec!["Reviews"]);
    }
}
