use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Wire literal for the shared admin room.
pub const ADMIN_ROOM: &str = "admin_room";

pub type SessionId = Uuid;

/// A logical delivery channel. Every user has a room keyed by their
/// email; all admin connections share a single fixed room. Typed instead
/// of raw strings so a typo'd room name cannot silently create a new
/// bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomKey {
    User(String),
    Admin,
}

impl RoomKey {
    pub fn user(email: impl Into<String>) -> RoomKey {
        RoomKey::User(email.into())
    }

    /// Parses a raw room key from the wire: the admin literal or a
    /// non-empty user email.
    pub fn parse(raw: &str) -> Option<RoomKey> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw == ADMIN_ROOM {
            return Some(RoomKey::Admin);
        }
        Some(RoomKey::User(raw.to_string()))
    }
}

impl std::fmt::Display for RoomKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomKey::User(email) => write!(f, "{}", email),
            RoomKey::Admin => write!(f, "{}", ADMIN_ROOM),
        }
    }
}

/// Membership registry mapping rooms to live sessions. Purely in-memory
/// and rebuilt as connections rejoin; rooms are never persisted.
#[derive(Debug, Default)]
pub struct Rooms {
    members: HashMap<RoomKey, HashSet<SessionId>>,
    joined: HashMap<SessionId, HashSet<RoomKey>>,
}

impl Rooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session to a room. A session may belong to any number of
    /// rooms at once (the admin app joins every conversation it opens
    /// plus the admin room). Joining twice is harmless.
    pub fn join(&mut self, session: SessionId, room: RoomKey) {
        self.members
            .entry(room.clone())
            .or_default()
            .insert(session);
        self.joined.entry(session).or_default().insert(room);
    }

    /// Drops a session from every room it joined, pruning rooms that
    /// become empty.
    pub fn leave_all(&mut self, session: SessionId) {
        let Some(rooms) = self.joined.remove(&session) else {
            return;
        };
        for room in rooms {
            if let Some(members) = self.members.get_mut(&room) {
                members.remove(&session);
                if members.is_empty() {
                    self.members.remove(&room);
                }
            }
        }
    }

    /// Current members of a room, in no particular order.
    pub fn members(&self, room: &RoomKey) -> impl Iterator<Item = &SessionId> {
        self.members.get(room).into_iter().flatten()
    }

    pub fn is_member(&self, session: SessionId, room: &RoomKey) -> bool {
        self.members
            .get(room)
            .map(|members| members.contains(&session))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognizes_the_admin_literal() {
        assert_eq!(RoomKey::parse("admin_room"), Some(RoomKey::Admin));
        assert_eq!(
            RoomKey::parse("ana@example.com"),
            Some(RoomKey::user("ana@example.com"))
        );
        assert_eq!(RoomKey::parse(""), None);
        assert_eq!(RoomKey::parse("   "), None);
    }

    #[test]
    fn join_makes_a_session_a_member() {
        let mut rooms = Rooms::new();
        let session = Uuid::new_v4();
        let room = RoomKey::user("ana@example.com");

        rooms.join(session, room.clone());
        assert!(rooms.is_member(session, &room));
        assert_eq!(rooms.members(&room).count(), 1);
    }

    #[test]
    fn sessions_may_join_many_rooms() {
        let mut rooms = Rooms::new();
        let admin = Uuid::new_v4();

        rooms.join(admin, RoomKey::Admin);
        rooms.join(admin, RoomKey::user("a@x.com"));
        rooms.join(admin, RoomKey::user("b@x.com"));

        assert!(rooms.is_member(admin, &RoomKey::Admin));
        assert!(rooms.is_member(admin, &RoomKey::user("a@x.com")));
        assert!(rooms.is_member(admin, &RoomKey::user("b@x.com")));
    }

    #[test]
    fn rejoining_does_not_duplicate_membership() {
        let mut rooms = Rooms::new();
        let session = Uuid::new_v4();
        let room = RoomKey::user("ana@example.com");

        rooms.join(session, room.clone());
        rooms.join(session, room.clone());
        assert_eq!(rooms.members(&room).count(), 1);
    }

    #[test]
    fn leave_all_removes_every_membership() {
        let mut rooms = Rooms::new();
        let admin = Uuid::new_v4();
        let client = Uuid::new_v4();
        let user_room = RoomKey::user("ana@example.com");

        rooms.join(admin, RoomKey::Admin);
        rooms.join(admin, user_room.clone());
        rooms.join(client, user_room.clone());

        rooms.leave_all(admin);

        assert!(!rooms.is_member(admin, &RoomKey::Admin));
        assert!(!rooms.is_member(admin, &user_room));
        // Other sessions are untouched.
        assert!(rooms.is_member(client, &user_room));
    }

    #[test]
    fn empty_rooms_have_no_members() {
        let rooms = Rooms::new();
        assert_eq!(rooms.members(&RoomKey::Admin).count(), 0);
    }
}
