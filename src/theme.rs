#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn pressed(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Glyph shown in the toggle; mirrors the mode the page is in.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_toggle_round_trips() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn persisted_strings_parse_back() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::from_str(theme.as_str()), Some(theme));
        }
    }

    #[test]
    fn unknown_stored_value_is_rejected() {
        assert_eq!(Theme::from_str("solarized"), None);
        assert_eq!(Theme::from_str(""), None);
    }

    #[test]
    fn icon_mirrors_mode() {
        assert_eq!(Theme::Dark.icon(), "☀️");
        assert_eq!(Theme::Light.icon(), "🌙");
    }

    #[test]
    fn aria_state_tracks_dark() {
        assert!(Theme::Dark.pressed());
        assert!(!Theme::Light.pressed());
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark theme");
    }
}
