use serde::Deserialize;
use serde::Serialize;

/// Visibility and heading of an overlay. Carries no content of its own.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Modal {
    title: String,
    open: bool,
}

impl Modal {
    pub fn open(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}
