/// Actionable button in a window heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ControlButton {
    Minimize,
    Toggle,
    Close,
}

impl ControlButton {
    pub const ALL: [ControlButton; 3] = [
        ControlButton::Minimize,
        ControlButton::Toggle,
        ControlButton::Close,
    ];
}

/// What the toggle button currently offers to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleAffordance {
    #[default]
    Maximize,
    Restore,
}

impl ToggleAffordance {
    pub fn for_maximized(maximized: bool) -> Self {
        if maximized {
            ToggleAffordance::Restore
        } else {
            ToggleAffordance::Maximize
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    buttons: Vec<ControlButton>,
    toggle: ToggleAffordance,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(ControlButton::ALL)
    }
}

impl Controls {
    /// Keeps the requested order and drops duplicates.
    pub fn new(buttons: impl IntoIterator<Item = ControlButton>) -> Self {
        let mut unique = Vec::new();
        for button in buttons {
            if !unique.contains(&button) {
                unique.push(button);
            }
        }
        Self {
            buttons: unique,
            toggle: ToggleAffordance::Maximize,
        }
    }

    pub fn buttons(&self) -> &[ControlButton] {
        &self.buttons
    }

    pub fn has(&self, button: ControlButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn toggle_affordance(&self) -> ToggleAffordance {
        self.toggle
    }

    pub(crate) fn sync_toggle(&mut self, maximized: bool) {
        self.toggle = ToggleAffordance::for_maximized(maximized);
    }
}
