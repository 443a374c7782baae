use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Where a document-level click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    InsideMenu,
    BurgerButton,
    Elsewhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    BurgerClick,
    DocumentClick(ClickTarget),
    LinkClick,
    CloseButton,
    Backdrop,
}

impl MenuState {
    pub fn next(self, event: MenuEvent) -> MenuState {
        match (self, event) {
            (MenuState::Closed, MenuEvent::BurgerClick) => MenuState::Open,
            (MenuState::Open, MenuEvent::BurgerClick) => MenuState::Closed,
            // The outside-click listener only exists while the menu is open.
            (MenuState::Closed, MenuEvent::DocumentClick(_)) => MenuState::Closed,
            (MenuState::Open, MenuEvent::DocumentClick(ClickTarget::Elsewhere)) => {
                MenuState::Closed
            }
            (MenuState::Open, MenuEvent::DocumentClick(_)) => MenuState::Open,
            (_, MenuEvent::LinkClick | MenuEvent::CloseButton | MenuEvent::Backdrop) => {
                MenuState::Closed
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct NavMenu {
    state: MenuState,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    /// Whether document clicks should currently be delivered.
    pub fn listening_for_outside_clicks(&self) -> bool {
        self.is_open()
    }

    pub fn handle(&mut self, event: MenuEvent) -> MenuState {
        let next = self.state.next(event);
        if next != self.state {
            debug!(from = ?self.state, to = ?next, ?event, "menu transition");
        }
        self.state = next;
        next
    }
}
