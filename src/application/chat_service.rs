// Chat service - Single-room broadcast with a connected-nickname roster
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::broadcast;

const EVENT_BUFFER: usize = 100;

/// Events fanned out to every connected chat client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ChatEvent {
    Announcement(String),
    Nicknames(Vec<String>),
    RoomMessage { nickname: String, message: String },
}

#[derive(Clone)]
pub struct ChatService {
    events: broadcast::Sender<ChatEvent>,
    nicknames: Arc<Mutex<Vec<String>>>,
}

impl ChatService {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            events,
            nicknames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a nickname, announce it and publish the fresh roster. The
    /// returned receiver sees every event from this point on, the join
    /// announcement included.
    pub fn join(&self, nickname: &str) -> broadcast::Receiver<ChatEvent> {
        let receiver = self.events.subscribe();
        let roster = {
            let mut nicknames = self.nicknames.lock().unwrap();
            nicknames.push(nickname.to_string());
            nicknames.clone()
        };
        self.broadcast(ChatEvent::Announcement(format!("{} has connected", nickname)));
        self.broadcast(ChatEvent::Nicknames(roster));
        receiver
    }

    pub fn leave(&self, nickname: &str) {
        let roster = {
            let mut nicknames = self.nicknames.lock().unwrap();
            if let Some(position) = nicknames.iter().position(|name| name == nickname) {
                nicknames.remove(position);
            }
            nicknames.clone()
        };
        self.broadcast(ChatEvent::Announcement(format!(
            "{} has disconnected",
            nickname
        )));
        self.broadcast(ChatEvent::Nicknames(roster));
    }

    /// Relay one message from a client to the whole room.
    pub fn message(&self, nickname: &str, message: &str) {
        self.broadcast(ChatEvent::RoomMessage {
            nickname: nickname.to_string(),
            message: message.to_string(),
        });
    }

    fn broadcast(&self, event: ChatEvent) {
        // Send only fails when nobody is connected, which is fine.
        let _ = self.events.send(event);
    }
}

impl Default for ChatService {
    fn default() -> Self {
        Self::new()
    }
}
