//! The application's page set.

/// Which page the UI is showing. Derived/selectable state, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Welcome,
    Upload,
    Analyze,
    Results,
}

impl Page {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Page::Welcome => "Welcome",
            Page::Upload => "Select Files",
            Page::Analyze => "Analyze",
            Page::Results => "Results",
        }
    }
}
