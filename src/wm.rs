use std::env;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowManager {
    Sway,
    I3,
    Openbox,
    Other,
}

impl WindowManager {
    pub fn detect() -> Self {
        Self::from_env(
            env::var("DESKTOP_SESSION").ok().as_deref(),
            env::var("SWAYSOCK").ok().as_deref(),
            env::var("I3SOCK").ok().as_deref(),
        )
    }

    pub fn from_env(session: Option<&str>, swaysock: Option<&str>, i3sock: Option<&str>) -> Self {
        if let Some(session) = session {
            if session.ends_with("sway") {
                return WindowManager::Sway;
            } else if session.ends_with("i3") {
                return WindowManager::I3;
            } else if session.ends_with("openbox") {
                return WindowManager::Openbox;
            }
        }
        if swaysock.is_some_and(|s| !s.is_empty()) {
            return WindowManager::Sway;
        }
        if let Some(sock) = i3sock {
            if sock.contains("sway") {
                return WindowManager::Sway;
            } else if sock.contains("i3") {
                return WindowManager::I3;
            }
        }
        WindowManager::Other
    }
}

/// When to cap long submenus, see [`crate::submenu`].
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Workaround {
    /// Only where the popup scrolling bug exists (sway).
    #[default]
    Auto,
    Always,
    Never,
}

impl Workaround {
    pub fn is_active(self, wm: WindowManager) -> bool {
        match self {
            Workaround::Auto => wm == WindowManager::Sway,
            Workaround::Always => true,
            Workaround::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_name_wins() {
        assert_eq!(WindowManager::from_env(Some("/usr/share/wayland-sessions/sway"), None, None), WindowManager::Sway);
        assert_eq!(WindowManager::from_env(Some("i3"), Some("/run/sway.sock"), None), WindowManager::I3);
        assert_eq!(WindowManager::from_env(Some("openbox"), None, None), WindowManager::Openbox);
    }

    #[test]
    fn sockets_are_checked_next() {
        assert_eq!(WindowManager::from_env(Some("plasma"), Some("/run/user/1000/sway-ipc.sock"), None), WindowManager::Sway);
        assert_eq!(WindowManager::from_env(None, None, Some("/run/user/1000/i3/ipc-socket.1")), WindowManager::I3);
        assert_eq!(WindowManager::from_env(None, Some(""), None), WindowManager::Other);
    }

    #[test]
    fn auto_workaround_only_on_sway() {
        assert!(Workaround::Auto.is_active(WindowManager::Sway));
        assert!(!Workaround::Auto.is_active(WindowManager::I3));
        assert!(Workaround::Always.is_active(WindowManager::Other));
        assert!(!Workaround::Never.is_active(WindowManager::Sway));
    }
}
