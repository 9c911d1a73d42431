mod connection;

use serde::{Deserialize, Serialize};

use crate::users::Role;

pub use connection::{session_layer, Connection, SESSION_COOKIE};

/// Form currently selected by the navigation bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Register,
    Login,
}

/// Authentication state of one connection.
///
/// `email` and `role` are copied from the store at login time and are not
/// refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub logged_in: bool,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub page: Page,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            logged_in: false,
            role: None,
            email: None,
            page: Page::Register,
        }
    }
}

impl Session {
    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    pub fn sign_in(&mut self, email: String, role: Role) {
        self.logged_in = true;
        self.email = Some(email);
        self.role = Some(role);
    }

    pub fn sign_out(&mut self) {
        *self = Self {
            page: Page::Login,
            ..Self::default()
        };
    }

    /// Dashboard data for a logged-in session.
    pub fn dashboard(&self) -> Option<Dashboard> {
        if !self.logged_in {
            return None;
        }
        let (email, role) = (self.email.clone()?, self.role?);
        Some(Dashboard {
            email,
            role,
            message: dashboard_message(role),
        })
    }

    /// What the connection should be shown right now.
    pub fn view(&self) -> View {
        match self.dashboard() {
            Some(d) => View::Dashboard(d),
            None => match self.page {
                Page::Register => View::Register,
                Page::Login => View::Login,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Dashboard {
    pub email: String,
    pub role: Role,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Register,
    Login,
    Dashboard(Dashboard),
}

pub fn dashboard_message(role: Role) -> &'static str {
    match role {
        Role::Farmer => "Farmer Dashboard - Manage crops & inventory",
        Role::Customer => "Customer Dashboard - Browse & order produce",
        _ => "General Dashboard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_register_logged_out() {
        let s = Session::default();
        assert!(!s.logged_in);
        assert_eq!(s.role, None);
        assert_eq!(s.email, None);
        assert_eq!(s.page, Page::Register);
        assert_eq!(s.view(), View::Register);
    }

    #[test]
    fn navigation_switches_forms() {
        let mut s = Session::default();
        s.navigate(Page::Login);
        assert_eq!(s.view(), View::Login);
        s.navigate(Page::Register);
        assert_eq!(s.view(), View::Register);
    }

    #[test]
    fn dashboard_wins_over_page_when_logged_in() {
        let mut s = Session::default();
        s.sign_in("a@x.com".into(), Role::Farmer);
        s.navigate(Page::Register);
        match s.view() {
            View::Dashboard(d) => {
                assert_eq!(d.email, "a@x.com");
                assert_eq!(d.role, Role::Farmer);
            }
            other => panic!("expected dashboard, got {other:?}"),
        }
    }

    #[test]
    fn sign_out_restores_initial_values_on_login_page() {
        let mut s = Session::default();
        s.sign_in("a@x.com".into(), Role::Customer);
        s.sign_out();
        assert_eq!(
            s,
            Session {
                logged_in: false,
                role: None,
                email: None,
                page: Page::Login,
            }
        );
        assert_eq!(s.view(), View::Login);
    }

    #[test]
    fn messages_follow_role() {
        assert!(dashboard_message(Role::Farmer).contains("crops & inventory"));
        assert!(dashboard_message(Role::Customer).contains("Browse & order"));
        assert_eq!(dashboard_message(Role::MarketOwner), "General Dashboard");
        assert_eq!(dashboard_message(Role::Logistics), "General Dashboard");
    }

    #[test]
    fn view_serializes_with_tag() {
        let json = serde_json::to_value(View::Login).unwrap();
        assert_eq!(json, serde_json::json!({ "view": "login" }));

        let mut s = Session::default();
        s.sign_in("m@x.com".into(), Role::MarketOwner);
        let json = serde_json::to_value(s.view()).unwrap();
        assert_eq!(json["view"], "dashboard");
        assert_eq!(json["role"], "Market Owner");
        assert_eq!(json["message"], "General Dashboard");
    }
}
