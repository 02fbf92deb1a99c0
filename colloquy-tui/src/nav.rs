//! Screen navigation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Catalog,
    Chat,
    SignIn,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Catalog => "Agents",
            Screen::Chat => "Chat",
            Screen::SignIn => "Account",
        }
    }
}
