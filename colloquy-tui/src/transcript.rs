//! Conversation transcript model.
//!
//! An append-only sequence of turns for one (user, agent) chat session,
//! held only in memory and dropped when the user leaves the chat. The
//! simulated reply is computed eagerly (it is a pure template lookup) and
//! appended after an artificial delay; the delay task is owned by the
//! transcript and aborted when the transcript is dropped, so a completion
//! can never land on a disposed chat.

use crate::events::TuiEvent;
use colloquy_core::{Agent, Turn, TurnRole};
use colloquy_replies::Persona;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Transcript {
    pub agent: Agent,
    pub persona: Persona,
    turns: Vec<Turn>,
    reply_pending: bool,
    reply_task: Option<JoinHandle<()>>,
}

impl Transcript {
    /// Open a chat with an agent, seeded with the persona greeting.
    pub fn start(agent: Agent) -> Self {
        let persona = Persona::from_name(&agent.name);
        let greeting = Turn::new(TurnRole::Assistant, persona.greeting());
        Self {
            agent,
            persona,
            turns: vec![greeting],
            reply_pending: false,
            reply_task: None,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        // Never true: start() always seeds the greeting.
        self.turns.is_empty()
    }

    pub fn reply_pending(&self) -> bool {
        self.reply_pending
    }

    /// Append a user turn and return the canned reply to be scheduled.
    ///
    /// Blank or whitespace-only text is rejected, as is any send while a
    /// reply is still pending; both leave the transcript unchanged and
    /// return `None`.
    pub fn push_user(&mut self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.reply_pending {
            return None;
        }
        self.turns.push(Turn::new(TurnRole::User, trimmed));
        self.reply_pending = true;
        Some(self.persona.reply(trimmed))
    }

    /// Schedule the reply to arrive after the artificial latency.
    ///
    /// The spawned task only sends an event; the append happens back on the
    /// event loop via [`apply_reply`](Self::apply_reply). The handle is kept
    /// so dropping the transcript cancels the timer.
    pub fn schedule_reply(
        &mut self,
        reply: String,
        delay: Duration,
        sender: mpsc::Sender<TuiEvent>,
    ) {
        let agent_id = self.agent.agent_id;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender
                .send(TuiEvent::ReplyReady {
                    agent_id,
                    text: reply,
                })
                .await;
        });
        self.reply_task = Some(handle);
    }

    /// Append the assistant reply and clear the pending flag.
    /// Ignored if no reply is pending (a stale event).
    pub fn apply_reply(&mut self, text: String) {
        if !self.reply_pending {
            return;
        }
        self.turns.push(Turn::new(TurnRole::Assistant, text));
        self.reply_pending = false;
        self.reply_task = None;
    }
}

impl Drop for Transcript {
    fn drop(&mut self) {
        if let Some(task) = self.reply_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_core::{AgentId, ColorScheme, EntityIdType, IconGlyph};

    fn agent(name: &str) -> Agent {
        Agent {
            agent_id: AgentId::generate(),
            name: name.to_string(),
            description: String::new(),
            expertise: "JavaScript, React".to_string(),
            color_scheme: ColorScheme::Emerald,
            icon: IconGlyph::Stethoscope,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn start_seeds_exactly_the_greeting() {
        let transcript = Transcript::start(agent("Code Doctor"));
        assert_eq!(transcript.len(), 1);
        let seed = &transcript.turns()[0];
        assert_eq!(seed.role, TurnRole::Assistant);
        assert_eq!(seed.content, Persona::CodeDoctor.greeting());
    }

    #[test]
    fn blank_sends_never_change_the_transcript() {
        let mut transcript = Transcript::start(agent("Code Doctor"));
        assert!(transcript.push_user("").is_none());
        assert!(transcript.push_user("   \t\n").is_none());
        assert_eq!(transcript.len(), 1);
        assert!(!transcript.reply_pending());
    }

    #[test]
    fn send_appends_one_turn_and_sets_pending() {
        let mut transcript = Transcript::start(agent("Code Doctor"));
        let reply = transcript.push_user("fix this").expect("send accepted");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[1].role, TurnRole::User);
        assert_eq!(transcript.turns()[1].content, "fix this");
        assert!(transcript.reply_pending());
        assert!(reply.contains("fix this"));
    }

    #[test]
    fn sends_are_noops_while_a_reply_is_pending() {
        let mut transcript = Transcript::start(agent("Code Doctor"));
        let reply = transcript.push_user("fix this").expect("send accepted");
        assert!(transcript.push_user("and this too").is_none());
        assert!(transcript.push_user("hello?").is_none());
        assert_eq!(transcript.len(), 2);

        transcript.apply_reply(reply);
        assert_eq!(transcript.len(), 3);
        assert!(!transcript.reply_pending());
        assert!(transcript.push_user("and this too").is_some());
    }

    #[test]
    fn reply_lands_in_the_persona_template() {
        let mut transcript = Transcript::start(agent("Code Doctor"));
        let reply = transcript.push_user("fix this").expect("send accepted");
        transcript.apply_reply(reply);
        let last = transcript.turns().last().unwrap();
        assert_eq!(last.role, TurnRole::Assistant);
        assert!(last.content.contains("fix this"));
        assert!(last.content.contains("recommendations"));
    }

    #[test]
    fn unknown_agent_degrades_to_generic_text() {
        let mut transcript = Transcript::start(agent("Sous Chef"));
        assert_eq!(transcript.persona, Persona::Unknown);
        assert_eq!(
            transcript.turns()[0].content,
            Persona::Unknown.greeting()
        );
        let reply = transcript.push_user("julienne?").expect("send accepted");
        assert!(!reply.contains("julienne?"));
    }

    #[test]
    fn stale_reply_events_are_ignored() {
        let mut transcript = Transcript::start(agent("Code Doctor"));
        transcript.apply_reply("late".to_string());
        assert_eq!(transcript.len(), 1);
    }
}
