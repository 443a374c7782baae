#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavRoute {
    pub label: &'static str,
    pub path: &'static str,
    /// Active only on an exact match.
    pub end: bool,
    pub call_to_action: bool,
}

const fn route(label: &'static str, path: &'static str) -> NavRoute {
    NavRoute {
        label,
        path,
        end: false,
        call_to_action: false,
    }
}

pub const ROUTES: [NavRoute; 7] = [
    NavRoute {
        end: true,
        ..route("Home", "/")
    },
    route("About", "/about"),
    route("Contact", "/contact"),
    route("Events", "/events"),
    route("Gallery", "/gallery"),
    route("Registration", "/registration"),
    NavRoute {
        call_to_action: true,
        ..route("Donate", "/donate")
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
    pub call_to_action: bool,
    /// Following the link also dismisses the mobile menu.
    pub closes_menu: bool,
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_ascii_lowercase()
    }
}

impl NavRoute {
    pub fn is_active(&self, current: &str) -> bool {
        let current = normalize(current);
        let own = normalize(self.path);
        if current == own {
            return true;
        }
        if self.end {
            return false;
        }
        current
            .strip_prefix(own.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Links for one layout, with the route matching `current` highlighted.
/// The call-to-action route is never highlighted.
pub fn links(layout: Layout, current: &str) -> Vec<NavLink> {
    ROUTES
        .iter()
        .map(|r| NavLink {
            label: r.label,
            path: r.path,
            active: !r.call_to_action && r.is_active(current),
            call_to_action: r.call_to_action,
            closes_menu: layout == Layout::Mobile,
        })
        .collect()
}
