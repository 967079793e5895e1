//! Selection types

/// Host platform, which decides the multi-select key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Command key toggles
    MacOs,
    /// Control key toggles
    #[default]
    Other,
}

/// Modifier state at activation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Range modifier (shift)
    pub range: bool,
    /// Multi modifier (ctrl, or command on macOS)
    pub multi: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Self = Self {
        range: false,
        multi: false,
    };

    /// Only the range modifier held
    pub const RANGE: Self = Self {
        range: true,
        multi: false,
    };

    /// Only the multi modifier held
    pub const MULTI: Self = Self {
        range: false,
        multi: true,
    };

    /// Map raw key state to modifiers for a platform
    pub fn from_keys(shift: bool, ctrl: bool, meta: bool, platform: Platform) -> Self {
        let multi = match platform {
            Platform::MacOs => meta,
            Platform::Other => ctrl,
        };
        Self {
            range: shift,
            multi,
        }
    }
}

/// What a `toggle` call did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    /// The set became exactly the activated photo
    Replaced,
    /// The photo was added (`true`) or removed (`false`)
    Toggled(bool),
    /// A contiguous range was unioned in
    RangeAdded {
        /// Photos in the inclusive range
        len: usize,
    },
    /// Range requested but an endpoint is no longer visible; only the anchor moved
    AnchorMoved,
}
