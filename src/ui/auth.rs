/// Session-dependent chrome: admin bar, edit button, filter bar visibility
/// and the login/logout control.
use tracing::info;

use crate::state::session::{SessionStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

/// What the header's login link does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginControl {
    /// Go to the login page
    Login,
    /// Clear the session and go back to the landing page
    Logout,
}

impl LoginControl {
    pub fn label(self) -> &'static str {
        match self {
            LoginControl::Login => "login",
            LoginControl::Logout => "logout",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUi {
    pub admin_bar: Visibility,
    pub filter_bar: Visibility,
    /// `None` once the button has been removed for anonymous visitors
    pub edit_button: Option<Visibility>,
    pub login_control: LoginControl,
}

impl Default for AuthUi {
    /// The layout before the session has been looked at
    fn default() -> Self {
        Self {
            admin_bar: Visibility::Hidden,
            filter_bar: Visibility::Visible,
            edit_button: Some(Visibility::Hidden),
            login_control: LoginControl::Login,
        }
    }
}

/// Adjust the chrome to the stored token. An empty token counts as absent.
pub fn sync_auth_ui(token: Option<&str>) -> AuthUi {
    let mut ui = AuthUi::default();

    match token.filter(|t| !t.is_empty()) {
        Some(_) => {
            ui.admin_bar = Visibility::Visible;
            ui.filter_bar = Visibility::Hidden;
            ui.edit_button = Some(Visibility::Visible);
            ui.login_control = LoginControl::Logout;
        }
        None => {
            ui.admin_bar = Visibility::Hidden;
            ui.edit_button = None;
        }
    }

    ui
}

/// Forget the stored session. The caller then reloads the landing page.
pub fn logout(store: &SessionStore) -> Result<(), StoreError> {
    store.clear_session()?;
    info!("user logged out");
    Ok(())
}
