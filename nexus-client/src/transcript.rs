//! Append-only chat transcript.

use nexus_types::Message;

pub const GREETING_SYSTEM: &str = "🚀 Enterprise KI-Ökosystem initialisiert. System online.";
pub const GREETING_ASSISTANT: &str =
    "Willkommen im Enterprise KI-Ökosystem! Ich bin Ihr AI Assistant. Wie kann ich Sie unterstützen?";

/// Ordered list of messages shown to the user. Entries are never removed or
/// reordered.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript opened with the system banner and the assistant welcome.
    pub fn with_greeting() -> Self {
        let mut transcript = Self::new();
        transcript.push(Message::system(GREETING_SYSTEM));
        transcript.push(Message::assistant(GREETING_ASSISTANT));
        transcript
    }

    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Messages appended at or after position `start`.
    pub fn since(&self, start: usize) -> &[Message] {
        self.messages.get(start..).unwrap_or(&[])
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
