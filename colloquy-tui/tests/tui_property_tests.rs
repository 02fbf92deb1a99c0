use colloquy_core::{Agent, AgentId, ColorScheme, EntityIdType, IconGlyph, TurnRole};
use colloquy_replies::Persona;
use colloquy_tui::catalog::CatalogState;
use colloquy_tui::config::{ThemeConfig, TuiConfig};
use colloquy_tui::favorites::FavoritesTracker;
use colloquy_tui::keys::{map_key, Action};
use colloquy_tui::notifications::NotificationLevel;
use colloquy_tui::persistence::{self, PersistedSession};
use colloquy_tui::state::{AuthField, AuthForm, AuthMode};
use colloquy_tui::transcript::Transcript;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use proptest::prelude::*;

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "http://localhost:54321".to_string(),
        anon_key: "test-key".to_string(),
        request_timeout_ms: 5_000,
        reply_delay_ms: 1_500,
        session_path: "tmp/colloquy-session.json".into(),
        error_log_path: "tmp/colloquy-errors.log".into(),
        theme: ThemeConfig {
            name: "midnight".to_string(),
        },
    }
}

fn sample_agent(name: &str) -> Agent {
    Agent {
        agent_id: AgentId::generate(),
        name: name.to_string(),
        description: "An agent".to_string(),
        expertise: "JavaScript, Node.js, React".to_string(),
        color_scheme: ColorScheme::Emerald,
        icon: IconGlyph::Stethoscope,
        created_at: chrono::Utc::now(),
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

// ============================================================================
// Config validation
// ============================================================================

#[test]
fn config_requires_anon_key() {
    let mut config = base_config();
    config.anon_key = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn config_requires_known_theme() {
    let mut config = base_config();
    config.theme = ThemeConfig {
        name: "daylight".to_string(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn config_rejects_zero_delays() {
    let mut config = base_config();
    config.reply_delay_ms = 0;
    assert!(config.validate().is_err());

    let mut config = base_config();
    config.request_timeout_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn base_config_is_valid() {
    assert!(base_config().validate().is_ok());
}

// ============================================================================
// Session persistence
// ============================================================================

#[test]
fn persisted_session_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    assert!(persistence::load(&path).unwrap().is_none());

    let state = PersistedSession {
        access_token: "jwt-token".to_string(),
    };
    persistence::save(&path, &state).unwrap();
    let loaded = persistence::load(&path).unwrap().unwrap();
    assert_eq!(loaded.access_token, "jwt-token");

    persistence::clear(&path).unwrap();
    assert!(persistence::load(&path).unwrap().is_none());
    // Clearing twice is fine.
    persistence::clear(&path).unwrap();
}

// ============================================================================
// Catalog states
// ============================================================================

#[test]
fn empty_catalog_is_ready_not_failed() {
    let state = CatalogState::Ready(Vec::new());
    assert!(state.agents().is_empty());
    assert_ne!(state, CatalogState::Loading);
    assert!(!matches!(state, CatalogState::Failed(_)));
}

// ============================================================================
// Chat scenario: Code Doctor end to end (sans timer)
// ============================================================================

#[test]
fn code_doctor_chat_scenario() {
    let mut transcript = Transcript::start(sample_agent("Code Doctor"));

    // Seeded with exactly the Code Doctor greeting.
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.turns()[0].role, TurnRole::Assistant);
    assert_eq!(transcript.turns()[0].content, Persona::CodeDoctor.greeting());

    // Sending "fix this" appends the user turn verbatim.
    let reply = transcript.push_user("fix this").expect("send accepted");
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.turns()[1].role, TurnRole::User);
    assert_eq!(transcript.turns()[1].content, "fix this");

    // After the delay elapses the reply embeds the text in the template.
    transcript.apply_reply(reply);
    assert_eq!(transcript.len(), 3);
    let last = transcript.turns().last().unwrap();
    assert_eq!(last.role, TurnRole::Assistant);
    assert!(last.content.contains("fix this"));
}

// ============================================================================
// Anonymous gating
// ============================================================================

#[test]
fn anonymous_selection_never_creates_a_transcript() {
    let config = base_config();
    let gateway = colloquy_tui::gateway::Gateway::new(&config).unwrap();
    let (session, _rx) = colloquy_tui::session::SessionStore::new(gateway.clone());
    let mut app = colloquy_tui::state::App::new(config, gateway, session);
    app.catalog = CatalogState::Ready(vec![sample_agent("Code Doctor")]);
    app.selected = Some(app.agents()[0].agent_id);

    let agent = app.selected_agent().cloned().unwrap();
    assert!(!app.try_open_chat(agent));
    assert!(app.transcript.is_none());
    assert_eq!(app.screen, colloquy_tui::nav::Screen::SignIn);
    assert!(app.favorites.is_empty());
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn esc_dismisses_the_latest_notification() {
    assert_eq!(map_key(key(KeyCode::Esc)), Some(Action::Cancel));

    let config = base_config();
    let gateway = colloquy_tui::gateway::Gateway::new(&config).unwrap();
    let (session, _rx) = colloquy_tui::session::SessionStore::new(gateway.clone());
    let mut app = colloquy_tui::state::App::new(config, gateway, session);

    app.notify(NotificationLevel::Info, "Signed out.");
    app.notify(NotificationLevel::Success, "Signed in.");
    app.dismiss_notification();
    assert_eq!(app.notifications.len(), 1);
    assert_eq!(app.notifications[0].message, "Signed out.");

    app.dismiss_notification();
    assert!(app.notifications.is_empty());
    // Dismissing with nothing shown is a no-op.
    app.dismiss_notification();
    assert!(app.notifications.is_empty());
}

// ============================================================================
// Auth form
// ============================================================================

#[test]
fn auth_form_cycles_fields_per_mode() {
    let mut form = AuthForm::new();
    assert_eq!(form.mode, AuthMode::SignIn);
    assert_eq!(form.focus, AuthField::Email);
    form.next_field();
    assert_eq!(form.focus, AuthField::Password);
    form.next_field();
    assert_eq!(form.focus, AuthField::Email);

    form.toggle_mode();
    assert_eq!(form.mode, AuthMode::SignUp);
    form.next_field();
    form.next_field();
    assert_eq!(form.focus, AuthField::DisplayName);
    form.next_field();
    assert_eq!(form.focus, AuthField::Email);

    // Leaving sign-up never strands focus on the name field.
    form.next_field();
    form.next_field();
    form.toggle_mode();
    assert_ne!(form.focus, AuthField::DisplayName);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn movement_keys_are_consistent(ch in prop::sample::select(vec!['j', 'k', 'q', 'f', 'r', 'a', 'z', 'm', 'w'])) {
        let action = map_key(key(KeyCode::Char(ch)));
        let expected = match ch {
            'j' => Some(Action::MoveDown),
            'k' => Some(Action::MoveUp),
            'q' => Some(Action::Quit),
            'f' => Some(Action::ToggleFavorite),
            'r' => Some(Action::Refresh),
            'a' => Some(Action::Account),
            _ => None,
        };
        prop_assert_eq!(action, expected);
    }

    #[test]
    fn arrows_match_vi_movement(_dummy in 0u8..1u8) {
        prop_assert_eq!(map_key(key(KeyCode::Up)), map_key(key(KeyCode::Char('k'))));
        prop_assert_eq!(map_key(key(KeyCode::Down)), map_key(key(KeyCode::Char('j'))));
    }

    #[test]
    fn blank_text_never_grows_a_transcript(spaces in "[ \\t]{0,10}") {
        let mut transcript = Transcript::start(sample_agent("Prompt Sensei"));
        let before = transcript.len();
        prop_assert!(transcript.push_user(&spaces).is_none());
        prop_assert_eq!(transcript.len(), before);
    }

    #[test]
    fn accepted_sends_grow_by_exactly_one(text in "[a-zA-Z0-9 ]{1,40}") {
        prop_assume!(!text.trim().is_empty());
        let mut transcript = Transcript::start(sample_agent("Prompt Sensei"));
        let before = transcript.len();
        let reply = transcript.push_user(&text);
        prop_assert!(reply.is_some());
        prop_assert_eq!(transcript.len(), before + 1);
        prop_assert!(transcript.reply_pending());
    }

    #[test]
    fn double_toggle_restores_favorite_state(start_favorited in any::<bool>()) {
        let mut tracker = FavoritesTracker::default();
        let id = AgentId::generate();
        if start_favorited {
            tracker.apply_insert(id);
        }
        let before = tracker.is_favorite(id);
        for _ in 0..2 {
            if tracker.is_favorite(id) {
                tracker.apply_remove(id);
            } else {
                tracker.apply_insert(id);
            }
        }
        prop_assert_eq!(tracker.is_favorite(id), before);
    }
}
