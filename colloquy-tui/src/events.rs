//! Event types for the TUI event loop.

use colloquy_core::AgentId;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    /// A simulated reply finished its artificial delay.
    ReplyReady { agent_id: AgentId, text: String },
}
