//! In-memory room membership: chat/qa membership sets and video rosters.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RoomRegistry, SessionId, TopicChannel, UserId, VideoParticipant};

#[derive(Default)]
struct Rooms {
    /// (channel, session) -> member set. No identity details; fan-out only
    /// ever needs the target ids.
    topics: HashMap<(TopicChannel, SessionId), HashSet<UserId>>,
    /// session -> ordered roster. Identity details are required here so new
    /// peers can discover who to set up connections with.
    video: HashMap<SessionId, Vec<VideoParticipant>>,
}

/// Process-local room membership registry.
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    rooms: Mutex<Rooms>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(Rooms::default()),
        }
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join_topic(&self, channel: TopicChannel, session_id: &SessionId, user_id: &UserId) {
        let mut rooms = self.rooms.lock().await;
        rooms
            .topics
            .entry((channel, session_id.clone()))
            .or_default()
            .insert(user_id.clone());
        tracing::debug!(
            "'{}' joined room {}",
            user_id,
            channel.room_name(session_id)
        );
    }

    async fn leave_topic(&self, channel: TopicChannel, session_id: &SessionId, user_id: &UserId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(members) = rooms.topics.get_mut(&(channel, session_id.clone())) {
            members.remove(user_id);
            if members.is_empty() {
                rooms.topics.remove(&(channel, session_id.clone()));
            }
        }
        tracing::debug!("'{}' left room {}", user_id, channel.room_name(session_id));
    }

    async fn topic_members(&self, channel: TopicChannel, session_id: &SessionId) -> Vec<UserId> {
        let rooms = self.rooms.lock().await;
        rooms
            .topics
            .get(&(channel, session_id.clone()))
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn join_video(
        &self,
        session_id: &SessionId,
        participant: VideoParticipant,
    ) -> Vec<VideoParticipant> {
        let mut rooms = self.rooms.lock().await;
        let roster = rooms.video.entry(session_id.clone()).or_default();
        // Joining twice must not duplicate the roster entry.
        if !roster.iter().any(|p| p.user_id == participant.user_id) {
            roster.push(participant);
        }
        roster.clone()
    }

    async fn leave_video(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Vec<VideoParticipant> {
        let mut rooms = self.rooms.lock().await;
        let remaining = match rooms.video.get_mut(session_id) {
            Some(roster) => {
                roster.retain(|p| p.user_id != *user_id);
                roster.clone()
            }
            None => Vec::new(),
        };
        if remaining.is_empty() {
            rooms.video.remove(session_id);
        }
        remaining
    }

    async fn video_roster(&self, session_id: &SessionId) -> Vec<VideoParticipant> {
        let rooms = self.rooms.lock().await;
        rooms.video.get(session_id).cloned().unwrap_or_default()
    }

    async fn is_video_member(&self, session_id: &SessionId, user_id: &UserId) -> bool {
        let rooms = self.rooms.lock().await;
        rooms
            .video
            .get(session_id)
            .is_some_and(|roster| roster.iter().any(|p| p.user_id == *user_id))
    }

    async fn remove_everywhere(
        &self,
        user_id: &UserId,
    ) -> Vec<(SessionId, Vec<VideoParticipant>)> {
        let mut rooms = self.rooms.lock().await;

        rooms.topics.retain(|_, members| {
            members.remove(user_id);
            !members.is_empty()
        });

        let mut affected = Vec::new();
        rooms.video.retain(|session_id, roster| {
            if roster.iter().any(|p| p.user_id == *user_id) {
                roster.retain(|p| p.user_id != *user_id);
                affected.push((session_id.clone(), roster.clone()));
            }
            !roster.is_empty()
        });
        affected
    }
}
