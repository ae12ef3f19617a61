//! Mobile navigation menu state.
//!
//! The open flag is computed purely from input events; rendering projects
//! it into `active` classes on the toggle and panel.

/// Viewport width at or below which the collapsible menu behavior applies.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuEvent {
    ToggleClicked,
    LinkSelected {
        viewport_width: f64,
    },
    OutsideClick {
        viewport_width: f64,
        inside_menu: bool,
        inside_toggle: bool,
    },
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn apply(self, event: MenuEvent) -> Self {
        match event {
            MenuEvent::ToggleClicked => Self { open: !self.open },
            MenuEvent::LinkSelected { viewport_width } => {
                if viewport_width <= MOBILE_BREAKPOINT {
                    Self { open: false }
                } else {
                    self
                }
            }
            MenuEvent::OutsideClick {
                viewport_width,
                inside_menu,
                inside_toggle,
            } => {
                if viewport_width <= MOBILE_BREAKPOINT && !inside_menu && !inside_toggle {
                    Self { open: false }
                } else {
                    self
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> MenuState {
        MenuState::default().apply(MenuEvent::ToggleClicked)
    }

    #[test]
    fn starts_closed() {
        assert!(!MenuState::default().is_open());
    }

    #[test]
    fn toggle_flips_both_ways() {
        let state = MenuState::default();
        let state = state.apply(MenuEvent::ToggleClicked);
        assert!(state.is_open());
        let state = state.apply(MenuEvent::ToggleClicked);
        assert!(!state.is_open());
    }

    #[test]
    fn link_selection_closes_on_narrow_viewport() {
        let state = open().apply(MenuEvent::LinkSelected {
            viewport_width: 480.0,
        });
        assert!(!state.is_open());
    }

    #[test]
    fn link_selection_keeps_menu_on_wide_viewport() {
        let state = open().apply(MenuEvent::LinkSelected {
            viewport_width: 1280.0,
        });
        assert!(state.is_open());
    }

    #[test]
    fn outside_click_closes_regardless_of_prior_state() {
        for start in [MenuState::default(), open()] {
            let state = start.apply(MenuEvent::OutsideClick {
                viewport_width: 480.0,
                inside_menu: false,
                inside_toggle: false,
            });
            assert!(!state.is_open());
        }
    }

    #[test]
    fn click_inside_menu_or_toggle_is_ignored() {
        let state = open().apply(MenuEvent::OutsideClick {
            viewport_width: 480.0,
            inside_menu: true,
            inside_toggle: false,
        });
        assert!(state.is_open());

        let state = open().apply(MenuEvent::OutsideClick {
            viewport_width: 480.0,
            inside_menu: false,
            inside_toggle: true,
        });
        assert!(state.is_open());
    }

    #[test]
    fn outside_click_on_wide_viewport_is_ignored() {
        let state = open().apply(MenuEvent::OutsideClick {
            viewport_width: 1280.0,
            inside_menu: false,
            inside_toggle: false,
        });
        assert!(state.is_open());
    }

    #[test]
    fn breakpoint_is_inclusive() {
        let state = open().apply(MenuEvent::LinkSelected {
            viewport_width: MOBILE_BREAKPOINT,
        });
        assert!(!state.is_open());
    }
}
