use super::protocol::*;
use super::rooms::RoomKey;
use crate::models::{Message, SenderRole};
use chrono::Utc;
use serde_json::json;

#[test]
fn join_room_frame_deserializes() {
    let frame = r#"{"event":"join_room","data":"ana@example.com"}"#;
    match serde_json::from_str::<ClientEvent>(frame) {
        Ok(ClientEvent::JoinRoom(room)) => assert_eq!(room, "ana@example.com"),
        other => panic!("unexpected parse result: {:?}", other),
    }
}

#[test]
fn send_message_frame_deserializes() {
    let frame = r#"{"event":"send_message","data":{"email":"ana@example.com","content":"oi","sender":"admin"}}"#;
    match serde_json::from_str::<ClientEvent>(frame) {
        Ok(ClientEvent::SendMessage(payload)) => {
            assert_eq!(payload.email, "ana@example.com");
            assert_eq!(payload.content, "oi");
            assert_eq!(payload.sender, Some(SenderRole::Admin));
        }
        other => panic!("unexpected parse result: {:?}", other),
    }
}

#[test]
fn send_message_sender_defaults_to_absent() {
    let frame = r#"{"event":"send_message","data":{"email":"ana@example.com","content":"oi"}}"#;
    match serde_json::from_str::<ClientEvent>(frame) {
        Ok(ClientEvent::SendMessage(payload)) => assert_eq!(payload.sender, None),
        other => panic!("unexpected parse result: {:?}", other),
    }
}

#[test]
fn mark_read_uses_camel_case_on_the_wire() {
    let frame = r#"{"event":"mark_read","data":{"userEmail":"ana@example.com","actor":"admin"}}"#;
    match serde_json::from_str::<ClientEvent>(frame) {
        Ok(ClientEvent::MarkRead(payload)) => {
            assert_eq!(payload.user_email, "ana@example.com");
            assert_eq!(payload.actor, SenderRole::Admin);
        }
        other => panic!("unexpected parse result: {:?}", other),
    }
}

#[test]
fn malformed_frames_are_rejected() {
    assert!(serde_json::from_str::<ClientEvent>("not json").is_err());
    assert!(serde_json::from_str::<ClientEvent>(r#"{"event":"unknown","data":{}}"#).is_err());
    assert!(
        serde_json::from_str::<ClientEvent>(r#"{"event":"send_message","data":{"email":1}}"#)
            .is_err()
    );
}

#[test]
fn new_message_frame_carries_the_persisted_row() {
    let message = Message {
        id: 101,
        user_email: "ana@example.com".to_string(),
        sender: SenderRole::User,
        content: "oi".to_string(),
        created_at: Utc::now(),
        is_read: false,
    };

    let event = ServerEvent::NewMessage(NewMessagePayload::from(&message));
    let frame: serde_json::Value = serde_json::from_str(&event.to_frame()).unwrap();

    assert_eq!(frame["event"], "new_message");
    assert_eq!(frame["data"]["id"], 101);
    assert_eq!(frame["data"]["user_email"], "ana@example.com");
    assert_eq!(frame["data"]["sender"], "user");
    assert_eq!(frame["data"]["content"], "oi");
    assert!(frame["data"]["created_at"].is_string());
}

#[test]
fn receipt_for_user_actor_targets_admin() {
    let receipt = ReadReceiptPayload::new("ana@example.com", SenderRole::User);
    assert_eq!(receipt.reader_email, "ana@example.com");
    assert_eq!(receipt.read_by_user_email, "admin");
    assert_eq!(receipt.actor, SenderRole::User);
}

#[test]
fn receipt_for_admin_actor_targets_the_user() {
    let receipt = ReadReceiptPayload::new("ana@example.com", SenderRole::Admin);
    assert_eq!(receipt.reader_email, "admin");
    assert_eq!(receipt.read_by_user_email, "ana@example.com");
    assert_eq!(receipt.actor, SenderRole::Admin);
}

#[test]
fn receipt_from_a_user_lands_in_the_admin_room() {
    let (room, receipt) = read_receipt("ana@example.com", SenderRole::User, 3);
    assert_eq!(room, RoomKey::Admin);
    assert_eq!(receipt.reader_email, "ana@example.com");
}

#[test]
fn receipt_from_the_admin_lands_in_the_user_room() {
    let (room, receipt) = read_receipt("ana@example.com", SenderRole::Admin, 1);
    assert_eq!(room, RoomKey::user("ana@example.com"));
    assert_eq!(receipt.read_by_user_email, "ana@example.com");
}

#[test]
fn receipt_still_goes_out_when_nothing_was_unread() {
    // A repeated mark-read flips no rows but must still produce a
    // receipt for the counterparty.
    let (room, receipt) = read_receipt("ana@example.com", SenderRole::Admin, 0);
    assert_eq!(room, RoomKey::user("ana@example.com"));
    assert_eq!(receipt.reader_email, "admin");
    assert_eq!(receipt.actor, SenderRole::Admin);
}

#[test]
fn receipt_frame_uses_camel_case_fields() {
    let event =
        ServerEvent::MessageReadReceipt(ReadReceiptPayload::new("ana@example.com", SenderRole::Admin));
    let frame: serde_json::Value = serde_json::from_str(&event.to_frame()).unwrap();

    assert_eq!(frame["event"], "message_read_receipt");
    assert_eq!(frame["data"]["readerEmail"], "admin");
    assert_eq!(frame["data"]["readByUserEmail"], "ana@example.com");
    assert_eq!(frame["data"]["actor"], "admin");
    assert!(frame["data"]["timestamp"].is_string());
}

#[test]
fn error_frame_shape() {
    let event = ServerEvent::error("Failed to store message", "database error");
    let frame: serde_json::Value = serde_json::from_str(&event.to_frame()).unwrap();

    assert_eq!(
        frame,
        json!({
            "event": "error",
            "data": {"message": "Failed to store message", "error": "database error"}
        })
    );
}
