//! Application state definitions.

use crate::catalog::CatalogState;
use crate::config::TuiConfig;
use crate::favorites::FavoritesTracker;
use crate::gateway::Gateway;
use crate::nav::Screen;
use crate::notifications::{Notification, NotificationLevel};
use crate::session::SessionStore;
use crate::theme::MidnightTheme;
use crate::transcript::Transcript;
use colloquy_core::{Agent, AgentId};
use tui_textarea::TextArea;

pub struct App {
    pub config: TuiConfig,
    pub gateway: Gateway,
    pub theme: MidnightTheme,
    pub screen: Screen,
    pub session: SessionStore,
    pub catalog: CatalogState,
    pub favorites: FavoritesTracker,
    pub selected: Option<AgentId>,
    pub transcript: Option<Transcript>,
    pub chat_input: TextArea<'static>,
    pub auth: AuthForm,
    pub notifications: Vec<Notification>,
}

impl App {
    pub fn new(config: TuiConfig, gateway: Gateway, session: SessionStore) -> Self {
        Self {
            config,
            gateway,
            theme: MidnightTheme::midnight(),
            screen: Screen::Catalog,
            session,
            catalog: CatalogState::Loading,
            favorites: FavoritesTracker::default(),
            selected: None,
            transcript: None,
            chat_input: TextArea::default(),
            auth: AuthForm::new(),
            notifications: Vec::new(),
        }
    }

    pub fn agents(&self) -> &[Agent] {
        self.catalog.agents()
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        let selected = self.selected?;
        self.agents().iter().find(|a| a.agent_id == selected)
    }

    pub fn select_next(&mut self) {
        let agents = self.catalog.agents();
        if agents.is_empty() {
            self.selected = None;
            return;
        }
        let next = match self.selected.and_then(|id| position_of(agents, id)) {
            Some(index) if index + 1 < agents.len() => index + 1,
            Some(index) => index,
            None => 0,
        };
        self.selected = Some(agents[next].agent_id);
    }

    pub fn select_previous(&mut self) {
        let agents = self.catalog.agents();
        if agents.is_empty() {
            self.selected = None;
            return;
        }
        let prev = match self.selected.and_then(|id| position_of(agents, id)) {
            Some(index) if index > 0 => index - 1,
            Some(index) => index,
            None => 0,
        };
        self.selected = Some(agents[prev].agent_id);
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// Drop the most recent notification; the footer falls back to hints.
    pub fn dismiss_notification(&mut self) {
        self.notifications.pop();
    }

    /// Open a chat if a user is present; anonymous selection is intercepted
    /// and redirected to the identity prompt. Returns whether a transcript
    /// was created.
    pub fn try_open_chat(&mut self, agent: Agent) -> bool {
        if self.session.is_authenticated() {
            self.open_chat(agent);
            true
        } else {
            self.auth.reset();
            self.screen = Screen::SignIn;
            false
        }
    }

    /// Open a chat with an agent. Callers gate on an authenticated session.
    pub fn open_chat(&mut self, agent: Agent) {
        self.transcript = Some(Transcript::start(agent));
        self.chat_input = TextArea::default();
        self.screen = Screen::Chat;
    }

    /// Leave the chat. Dropping the transcript cancels any scheduled reply.
    pub fn close_chat(&mut self) {
        self.transcript = None;
        self.chat_input = TextArea::default();
        self.screen = Screen::Catalog;
    }

    pub fn chat_input_text(&self) -> String {
        self.chat_input.lines().join("\n")
    }

    pub fn reset_chat_input(&mut self) {
        self.chat_input = TextArea::default();
    }
}

fn position_of(agents: &[Agent], id: AgentId) -> Option<usize> {
    agents.iter().position(|a| a.agent_id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
    DisplayName,
}

/// Sign-in / sign-up form state.
#[derive(Debug, Clone)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub focus: AuthField,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::SignIn,
            email: String::new(),
            password: String::new(),
            display_name: String::new(),
            focus: AuthField::Email,
            error: None,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        if self.mode == AuthMode::SignIn && self.focus == AuthField::DisplayName {
            self.focus = AuthField::Email;
        }
        self.error = None;
    }

    pub fn next_field(&mut self) {
        self.focus = match (self.focus, self.mode) {
            (AuthField::Email, _) => AuthField::Password,
            (AuthField::Password, AuthMode::SignUp) => AuthField::DisplayName,
            (AuthField::Password, AuthMode::SignIn) => AuthField::Email,
            (AuthField::DisplayName, _) => AuthField::Email,
        };
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_field_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused_field_mut().pop();
    }

    fn focused_field_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
            AuthField::DisplayName => &mut self.display_name,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}
