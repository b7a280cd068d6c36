//! Keyboard input understood by the grid and its rows.

/// Navigation keys, named after their `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` string. Anything else is not ours.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "PageUp" => Some(Self::PageUp),
            "PageDown" => Some(Self::PageDown),
            "Home" => Some(Self::Home),
            "End" => Some(Self::End),
            _ => None,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Home => "Home",
            Self::End => "End",
        }
    }
}

/// A key press together with the modifier that changes its meaning.
///
/// Ctrl (or Meta on macOS) turns Home/End from row moves into grid moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: NavKey,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: NavKey) -> Self {
        Self { key, ctrl: false }
    }

    pub fn with_ctrl(key: NavKey) -> Self {
        Self { key, ctrl: true }
    }

    pub fn parse(key: &str, ctrl: bool) -> Option<Self> {
        NavKey::from_key(key).map(|key| Self { key, ctrl })
    }

    /// Parse a CLI-style chord such as `Down`, `ArrowDown` or `Ctrl+End`.
    pub fn parse_chord(chord: &str) -> Option<Self> {
        let (ctrl, name) = match chord.split_once('+') {
            Some((modifier, name)) if modifier.eq_ignore_ascii_case("ctrl") => (true, name),
            Some(_) => return None,
            None => (false, chord),
        };
        let key = NavKey::from_key(name).or_else(|| match name {
            "Up" => Some(NavKey::ArrowUp),
            "Down" => Some(NavKey::ArrowDown),
            "Left" => Some(NavKey::ArrowLeft),
            "Right" => Some(NavKey::ArrowRight),
            _ => None,
        })?;
        Some(Self { key, ctrl })
    }

    /// The move this key requests inside a single row, if any.
    ///
    /// Home/End only stay within the row when Ctrl is not held.
    pub fn row_direction(&self) -> Option<RowDirection> {
        match (self.key, self.ctrl) {
            (NavKey::ArrowLeft, _) => Some(RowDirection::Left),
            (NavKey::ArrowRight, _) => Some(RowDirection::Right),
            (NavKey::Home, false) => Some(RowDirection::Home),
            (NavKey::End, false) => Some(RowDirection::End),
            _ => None,
        }
    }

    /// The move this key requests across rows, if any.
    pub fn grid_direction(&self) -> Option<GridDirection> {
        match (self.key, self.ctrl) {
            (NavKey::ArrowUp, _) => Some(GridDirection::Up),
            (NavKey::ArrowDown, _) => Some(GridDirection::Down),
            (NavKey::PageUp, _) => Some(GridDirection::PageUp),
            (NavKey::PageDown, _) => Some(GridDirection::PageDown),
            (NavKey::Home, true) => Some(GridDirection::Home),
            (NavKey::End, true) => Some(GridDirection::End),
            _ => None,
        }
    }
}

/// Horizontal moves resolved by the row navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowDirection {
    Left,
    Right,
    Home,
    End,
}

/// Moves resolved by the grid navigator.
///
/// `Home` and `End` here are the Ctrl-modified variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridDirection {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_home_end_split_on_ctrl() {
        let home = KeyInput::new(NavKey::Home);
        assert_eq!(home.row_direction(), Some(RowDirection::Home));
        assert_eq!(home.grid_direction(), None);

        let ctrl_home = KeyInput::with_ctrl(NavKey::Home);
        assert_eq!(ctrl_home.row_direction(), None);
        assert_eq!(ctrl_home.grid_direction(), Some(GridDirection::Home));
    }

    #[test]
    fn test_arrows_ignore_ctrl() {
        let left = KeyInput::with_ctrl(NavKey::ArrowLeft);
        assert_eq!(left.row_direction(), Some(RowDirection::Left));
        let down = KeyInput::with_ctrl(NavKey::ArrowDown);
        assert_eq!(down.grid_direction(), Some(GridDirection::Down));
    }

    #[test]
    fn test_parse_dom_keys() {
        assert_eq!(
            KeyInput::parse("PageDown", false),
            Some(KeyInput::new(NavKey::PageDown))
        );
        assert_eq!(KeyInput::parse("Tab", false), None);
        assert_eq!(KeyInput::parse("arrowup", false), None);
    }

    #[test]
    fn test_parse_chord() {
        assert_eq!(
            KeyInput::parse_chord("Ctrl+End"),
            Some(KeyInput::with_ctrl(NavKey::End))
        );
        assert_eq!(
            KeyInput::parse_chord("Down"),
            Some(KeyInput::new(NavKey::ArrowDown))
        );
        assert_eq!(KeyInput::parse_chord("Shift+End"), None);
        assert_eq!(KeyInput::parse_chord("Ctrl+Q"), None);
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in [NavKey::ArrowUp, NavKey::PageDown, NavKey::End] {
            assert_eq!(NavKey::from_key(key.as_key()), Some(key));
        }
    }
}
