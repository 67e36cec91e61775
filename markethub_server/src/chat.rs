//! The live-chat relay: a single shared broadcast channel with no rooms, no authentication and
//! no persistence.
//!
//! The relay is an explicit process-wide registry. It is created once at server start, lives for
//! the life of the process, and its state (the ordered message history) dies with it. Connecting
//! clients replay the full history, then follow the broadcast. After every user message a canned
//! auto-response is appended after a fixed delay, chosen by case-insensitive substring match
//! against a small keyword table.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use log::*;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Buffered messages per subscriber before a slow consumer starts lagging.
const BROADCAST_CAPACITY: usize = 64;

const FALLBACK_RESPONSE: &str = "I'm not sure I understand. Can you clarify?";

/// Keyword table for the auto-responder. First match wins.
const CANNED_RESPONSES: [(&str, &str); 4] = [
    ("hello", "Hello! How can I assist you today?"),
    ("order", "You can track your order in the Orders section."),
    ("refund", "For refunds, please visit the support section."),
    ("help", "I'm here to help! Please describe your issue."),
];

pub const BOT_SENDER: &str = "bot";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// A client-supplied label. There is no identity beyond it.
    pub sender: String,
    pub text: String,
}

pub struct ChatRelay {
    history: Mutex<Vec<ChatMessage>>,
    tx: broadcast::Sender<ChatMessage>,
    reply_delay: Duration,
}

impl ChatRelay {
    pub fn new(reply_delay: Duration) -> Arc<Self> {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Arc::new(Self { history: Mutex::new(Vec::new()), tx, reply_delay })
    }

    /// The full in-memory history, oldest first. This is what a connecting client replays.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.history.lock().expect("chat history lock poisoned").clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatMessage> {
        self.tx.subscribe()
    }

    /// Append a message and broadcast it to every connected client. Send errors only mean there
    /// are no subscribers right now; the history still records the message.
    pub fn send(&self, message: ChatMessage) {
        self.history.lock().expect("chat history lock poisoned").push(message.clone());
        if self.tx.send(message).is_err() {
            trace!("💬️ No chat subscribers connected");
        }
    }

    /// Append and broadcast the user message, then schedule the canned auto-response.
    pub fn send_with_auto_reply(self: &Arc<Self>, message: ChatMessage) {
        let reply = ChatMessage { sender: BOT_SENDER.to_string(), text: canned_reply(&message.text).to_string() };
        self.send(message);
        let relay = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(relay.reply_delay).await;
            relay.send(reply);
        });
    }
}

fn canned_reply(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    CANNED_RESPONSES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, response)| *response)
        .unwrap_or(FALLBACK_RESPONSE)
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::{canned_reply, ChatMessage, ChatRelay, BOT_SENDER, FALLBACK_RESPONSE};

    fn msg(sender: &str, text: &str) -> ChatMessage {
        ChatMessage { sender: sender.to_string(), text: text.to_string() }
    }

    #[test]
    fn keyword_matching_is_case_insensitive_substring() {
        assert_eq!(canned_reply("HELLO there"), "Hello! How can I assist you today?");
        assert_eq!(canned_reply("where is my Order?"), "You can track your order in the Orders section.");
        assert_eq!(canned_reply("I want a refund now"), "For refunds, please visit the support section.");
        assert_eq!(canned_reply("help me"), "I'm here to help! Please describe your issue.");
        assert_eq!(canned_reply("¯\\_(ツ)_/¯"), FALLBACK_RESPONSE);
    }

    #[test]
    fn history_preserves_append_order() {
        let relay = ChatRelay::new(Duration::from_millis(1));
        relay.send(msg("ada", "first"));
        relay.send(msg("cass", "second"));
        let history = relay.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "first");
        assert_eq!(history[1].text, "second");
    }

    #[tokio::test]
    async fn subscribers_receive_broadcasts() {
        let relay = ChatRelay::new(Duration::from_millis(1));
        let mut rx = relay.subscribe();
        relay.send(msg("ada", "ping"));
        let received = rx.recv().await.expect("Broadcast failed");
        assert_eq!(received.text, "ping");
    }

    #[tokio::test]
    async fn auto_reply_arrives_after_the_delay() {
        let relay = ChatRelay::new(Duration::from_millis(5));
        let mut rx = relay.subscribe();
        relay.send_with_auto_reply(msg("ada", "hello bot"));

        let first = rx.recv().await.expect("Broadcast failed");
        assert_eq!(first.sender, "ada");
        let second = rx.recv().await.expect("Broadcast failed");
        assert_eq!(second.sender, BOT_SENDER);
        assert_eq!(second.text, "Hello! How can I assist you today?");
        assert_eq!(relay.history().len(), 2);
    }
}
