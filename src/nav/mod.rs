//! Site header behaviour: the mobile menu state machine, the route table
//! behind both link layouts, and the translation dropdown opener.

pub mod menu;
pub mod routes;
pub mod translate;

pub use menu::{ClickTarget, MenuEvent, MenuState, NavMenu};
pub use routes::{links, Layout, NavLink, NavRoute, ROUTES};
pub use translate::{open_translate_dropdown, DropdownOutcome, DropdownWidget, RetryPolicy, WidgetHost};
