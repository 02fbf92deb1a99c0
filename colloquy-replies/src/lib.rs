//! Colloquy Replies - Simulated Reply Engine
//!
//! Deterministic greeting and reply generation for the canned agent
//! personas. Everything here is a pure lookup: no I/O, no latency. The
//! artificial "thinking" delay belongs to the client, not this crate.
//!
//! Personas are a closed, tagged enumeration. A catalog row whose name is
//! not recognized maps to [`Persona::Unknown`], which degrades to generic
//! fallback text rather than failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback greeting for unrecognized personas.
const GENERIC_GREETING: &str = "Hello! How can I help you today?";

/// Fallback reply for unrecognized personas.
const GENERIC_REPLY: &str =
    "I understand your question. Let me provide a helpful response based on my expertise.";

/// The closed set of chat personas the catalog may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    CodeDoctor,
    PromptSensei,
    DailyAiTips,
    PromptTrainer,
    AiTrendsMentor,
    UiCritic,
    /// Catalog row whose display name matched no known persona.
    Unknown,
}

impl Persona {
    /// Map an agent display name to its persona.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Code Doctor" => Persona::CodeDoctor,
            "Prompt Sensei" => Persona::PromptSensei,
            "Daily AI Tips" => Persona::DailyAiTips,
            "Prompt Trainer" => Persona::PromptTrainer,
            "AI Trends Mentor" => Persona::AiTrendsMentor,
            "UI Critic" => Persona::UiCritic,
            _ => Persona::Unknown,
        }
    }

    /// Canonical display name, or `None` for the unknown variant.
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            Persona::CodeDoctor => Some("Code Doctor"),
            Persona::PromptSensei => Some("Prompt Sensei"),
            Persona::DailyAiTips => Some("Daily AI Tips"),
            Persona::PromptTrainer => Some("Prompt Trainer"),
            Persona::AiTrendsMentor => Some("AI Trends Mentor"),
            Persona::UiCritic => Some("UI Critic"),
            Persona::Unknown => None,
        }
    }

    /// The assistant turn that seeds every new transcript with this persona.
    pub fn greeting(&self) -> &'static str {
        match self {
            Persona::CodeDoctor => {
                "Hello! I'm Code Doctor, your expert in fullstack JavaScript development. \
                 I can help you identify issues in your code, suggest improvements, and \
                 optimize performance. What code would you like me to review?"
            }
            Persona::PromptSensei => {
                "Greetings! I'm Prompt Sensei, your master guide in prompt engineering. \
                 I'll help you craft better prompts, analyze their effectiveness, and teach \
                 you the principles of excellent AI communication. Share a prompt you'd like \
                 me to improve!"
            }
            Persona::DailyAiTips => {
                "Hi there! I'm Daily AI Tips, your source for valuable insights about AI \
                 productivity and prompt engineering. I share practical tips and best \
                 practices to help you become more effective with AI tools. What aspect of \
                 AI would you like to learn about?"
            }
            Persona::PromptTrainer => {
                "Welcome! I'm Prompt Trainer, your AI tutor for mastering prompt \
                 engineering. I'll challenge you with exercises, provide feedback, and help \
                 you develop expert-level skills. Ready for your first prompt engineering \
                 challenge?"
            }
            Persona::AiTrendsMentor => {
                "Hello! I'm AI Trends Mentor, keeping you updated on the latest in AI and \
                 prompt engineering. I provide insights on new models, tools, and research \
                 breakthroughs. What recent AI developments interest you?"
            }
            Persona::UiCritic => {
                "Hi! I'm UI Critic, your frontend and UX expert specializing in React and \
                 Tailwind CSS. I'll review your UI for usability, accessibility, and modern \
                 design patterns. Share your code or design for a thorough review!"
            }
            Persona::Unknown => GENERIC_GREETING,
        }
    }

    /// Produce the canned reply for one user turn.
    ///
    /// The user text is embedded verbatim as a cosmetic echo; it is never
    /// analyzed. Unknown personas return the generic fallback regardless of
    /// input.
    pub fn reply(&self, user_text: &str) -> String {
        match self {
            Persona::CodeDoctor => format!(
                "I've analyzed your request about \"{user_text}\". Here are my recommendations:\n\n\
                 1. **Code Structure**: Consider breaking this into smaller, focused functions\n\
                 2. **Performance**: Look for opportunities to optimize loops and reduce complexity\n\
                 3. **Best Practices**: Ensure proper error handling and type safety\n\n\
                 Would you like me to provide specific code examples for any of these improvements?"
            ),
            Persona::PromptSensei => format!(
                "Excellent question about \"{user_text}\"! Let me help you improve this:\n\n\
                 **Current Analysis**: Your prompt has good intentions but could be more precise.\n\n\
                 **Improved Version**: Try being more specific about the desired output format and context.\n\n\
                 **Why This Works Better**: Specificity reduces ambiguity and gives the AI clearer instructions.\n\n\
                 Would you like me to demonstrate with a concrete example?"
            ),
            Persona::DailyAiTips => format!(
                "Great topic! Here's today's tip about \"{user_text}\":\n\n\
                 💡 **Pro Tip**: When working with AI models, always provide context and examples \
                 in your prompts. This improves accuracy by 40-60%.\n\n\
                 **Quick Implementation**: Start your prompts with \"Given this context: [your context]\" \
                 followed by your actual request.\n\n\
                 **Advanced Technique**: Use the \"few-shot\" approach by providing 2-3 examples of \
                 desired input-output pairs.\n\n\
                 Want more tips on this topic?"
            ),
            Persona::PromptTrainer => format!(
                "Excellent! Let's work on \"{user_text}\". Here's your challenge:\n\n\
                 **Exercise**: Rewrite this prompt to be more effective:\n\"Make this better\"\n\n\
                 **Your Task**: Transform it into a specific, actionable prompt with:\n\
                 - Clear context\n- Specific requirements\n- Desired output format\n\n\
                 **Scoring Criteria**: Clarity (3 pts), Specificity (3 pts), Actionability (4 pts)\n\n\
                 Share your rewrite and I'll score it with detailed feedback!"
            ),
            Persona::AiTrendsMentor => format!(
                "Great question about \"{user_text}\"! Here's the latest:\n\n\
                 **This Week's Highlights**:\n\
                 🔥 New multimodal capabilities in latest models\n\
                 📈 Improved reasoning in code generation\n\
                 ⚡ Faster inference times across major platforms\n\n\
                 **Impact for Developers**: These improvements mean better code completion and \
                 more accurate technical responses.\n\n\
                 **What to Watch**: Integration of these features into popular IDEs and development tools.\n\n\
                 Want the full weekly briefing with links to sources?"
            ),
            Persona::UiCritic => format!(
                "Thanks for sharing \"{user_text}\"! Here's my UX review:\n\n\
                 **Strengths**:\n✅ Good use of spacing and hierarchy\n✅ Consistent color scheme\n\n\
                 **Areas for Improvement**:\n\
                 🔧 **Accessibility**: Add proper ARIA labels and focus states\n\
                 🔧 **Mobile**: Consider responsive breakpoints for smaller screens\n\
                 🔧 **Performance**: Optimize image loading and component rendering\n\n\
                 **Specific Recommendations**:\n\
                 - Use `focus:ring-2` for better keyboard navigation\n\
                 - Implement `loading=\"lazy\"` for images\n\
                 - Add hover states for better interactivity\n\n\
                 Would you like me to provide the improved code?"
            ),
            Persona::Unknown => GENERIC_REPLY.to_string(),
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name().unwrap_or("Unknown"))
    }
}

/// All personas with a catalog display name.
pub const KNOWN_PERSONAS: [Persona; 6] = [
    Persona::CodeDoctor,
    Persona::PromptSensei,
    Persona::DailyAiTips,
    Persona::PromptTrainer,
    Persona::AiTrendsMentor,
    Persona::UiCritic,
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_names_map_to_their_persona() {
        for persona in KNOWN_PERSONAS {
            let name = persona.display_name().unwrap();
            assert_eq!(Persona::from_name(name), persona);
        }
    }

    #[test]
    fn unknown_names_map_to_unknown() {
        assert_eq!(Persona::from_name("Sous Chef"), Persona::Unknown);
        assert_eq!(Persona::from_name(""), Persona::Unknown);
        // Matching is exact, not case-insensitive.
        assert_eq!(Persona::from_name("code doctor"), Persona::Unknown);
    }

    #[test]
    fn greetings_are_persona_specific() {
        for persona in KNOWN_PERSONAS {
            assert_ne!(persona.greeting(), GENERIC_GREETING);
            assert!(persona.greeting().contains(persona.display_name().unwrap()));
        }
        assert_eq!(Persona::Unknown.greeting(), GENERIC_GREETING);
    }

    #[test]
    fn code_doctor_greeting_is_the_mapped_string() {
        assert!(Persona::CodeDoctor
            .greeting()
            .starts_with("Hello! I'm Code Doctor, your expert in fullstack JavaScript"));
    }

    proptest! {
        #[test]
        fn replies_embed_the_user_text_verbatim(text in "[a-zA-Z0-9 .,?!]{0,80}") {
            for persona in KNOWN_PERSONAS {
                let reply = persona.reply(&text);
                prop_assert!(reply.contains(&text));
            }
        }

        #[test]
        fn unknown_reply_ignores_input(text in "\\PC{0,80}") {
            prop_assert_eq!(Persona::Unknown.reply(&text), GENERIC_REPLY);
        }
    }
}
