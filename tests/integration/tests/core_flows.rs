//! Messaging and permission flows against the full service stack

use beacon_service::{
    InviteService, ListMessagesQuery, MemberService, MessageService, ReactionService,
    ServiceError, UpdateMessageRequest,
};
use integration_tests::fixtures::parse_id;
use integration_tests::TestApp;

fn assert_permission_denied<T: std::fmt::Debug>(result: Result<T, ServiceError>) {
    match result {
        Err(e) if e.is_permission_denied() => {}
        other => panic!("expected permission denial, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_content_is_rejected() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (_, channel) = app.create_server(owner, "lounge").await;

    let result = app.send(channel, owner, "").await;
    match result {
        Err(e) => assert_eq!(e.status_code(), 400),
        Ok(_) => panic!("empty content must fail validation"),
    }
}

#[tokio::test]
async fn unicode_content_round_trips_byte_for_byte() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (_, channel) = app.create_server(owner, "lounge").await;

    let content = format!("héllo 你好 \u{1F980}{}", "\u{1F600}".repeat(3990));
    assert!(content.chars().count() <= 4000);

    app.send(channel, owner, &content).await.unwrap();

    let messages = MessageService::new(&app.ctx)
        .list(channel, owner, ListMessagesQuery::default())
        .await
        .unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content.as_bytes(), content.as_bytes());
}

#[tokio::test]
async fn over_long_content_is_rejected() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (_, channel) = app.create_server(owner, "lounge").await;

    let result = app.send(channel, owner, &"x".repeat(4001)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn non_member_cannot_send_until_joined() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (stranger, _) = app.register("sage").await;
    let (server, channel) = app.create_server(owner, "lounge").await;

    assert_permission_denied(app.send(channel, stranger, "hello?").await);

    MemberService::new(&app.ctx).join(server, stranger).await.unwrap();
    app.send(channel, stranger, "hello!").await.unwrap();
}

#[tokio::test]
async fn join_twice_conflicts_leave_twice_fails() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (member, _) = app.register("sage").await;
    let (server, _) = app.create_server(owner, "lounge").await;

    let members = MemberService::new(&app.ctx);
    members.join(server, member).await.unwrap();

    let second = members.join(server, member).await;
    match second {
        Err(e) => assert_eq!(e.status_code(), 409),
        Ok(()) => panic!("second join must conflict"),
    }

    members.leave(server, member).await.unwrap();
    assert!(members.leave(server, member).await.is_err());
}

#[tokio::test]
async fn only_the_author_may_edit_or_delete() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (author, _) = app.register("sage").await;
    let (server, channel) = app.create_server(owner, "lounge").await;

    MemberService::new(&app.ctx).join(server, author).await.unwrap();
    let message = app.send(channel, author, "mine").await.unwrap();
    let message_id = parse_id(&message.id);

    let messages = MessageService::new(&app.ctx);

    // The server owner gets no override
    assert_permission_denied(
        messages
            .edit(
                channel,
                message_id,
                owner,
                UpdateMessageRequest {
                    content: "hijacked".to_string(),
                },
            )
            .await,
    );
    assert_permission_denied(messages.delete(channel, message_id, owner).await);

    // The author can do both
    let edited = messages
        .edit(
            channel,
            message_id,
            author,
            UpdateMessageRequest {
                content: "mine, edited".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(edited.edited_at.is_some());

    messages.delete(channel, message_id, author).await.unwrap();
}

#[tokio::test]
async fn deleted_messages_never_reappear_in_listings() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (_, channel) = app.create_server(owner, "lounge").await;

    let keep = app.send(channel, owner, "keep").await.unwrap();
    let dropped = app.send(channel, owner, "drop").await.unwrap();

    MessageService::new(&app.ctx)
        .delete(channel, parse_id(&dropped.id), owner)
        .await
        .unwrap();

    let listed = MessageService::new(&app.ctx)
        .list(channel, owner, ListMessagesQuery::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);
}

#[tokio::test]
async fn leaving_a_server_blocks_sending() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (member, _) = app.register("sage").await;
    let (server, channel) = app.create_server(owner, "lounge").await;

    let members = MemberService::new(&app.ctx);
    members.join(server, member).await.unwrap();
    app.send(channel, member, "still here").await.unwrap();

    members.leave(server, member).await.unwrap();
    assert_permission_denied(app.send(channel, member, "gone").await);
}

#[tokio::test]
async fn listing_is_ascending_with_working_cursor() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (_, channel) = app.create_server(owner, "lounge").await;

    let mut ids = Vec::new();
    for n in 0..5 {
        let message = app.send(channel, owner, &format!("m{n}")).await.unwrap();
        ids.push(message.id);
    }

    let service = MessageService::new(&app.ctx);

    let all = service
        .list(channel, owner, ListMessagesQuery::default())
        .await
        .unwrap();
    let listed: Vec<String> = all.iter().map(|m| m.id.clone()).collect();
    assert_eq!(listed, ids, "ascending by creation");

    let page = service
        .list(
            channel,
            owner,
            ListMessagesQuery {
                after: Some(ids[1].clone()),
                before: None,
                limit: Some(2),
            },
        )
        .await
        .unwrap();
    let paged: Vec<String> = page.iter().map(|m| m.id.clone()).collect();
    assert_eq!(paged, ids[2..4].to_vec());
}

#[tokio::test]
async fn reactions_are_idempotent_and_permission_gated() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (stranger, _) = app.register("sage").await;
    let (_, channel) = app.create_server(owner, "lounge").await;

    let message = app.send(channel, owner, "react to me").await.unwrap();
    let message_id = parse_id(&message.id);

    let reactions = ReactionService::new(&app.ctx);

    assert_permission_denied(reactions.react(channel, message_id, stranger, "👍").await);

    reactions.react(channel, message_id, owner, "👍").await.unwrap();
    // Re-reacting is a silent no-op
    reactions.react(channel, message_id, owner, "👍").await.unwrap();

    let listed = MessageService::new(&app.ctx)
        .list(channel, owner, ListMessagesQuery::default())
        .await
        .unwrap();
    assert_eq!(listed[0].reactions.len(), 1);
    assert_eq!(listed[0].reactions[0].count, 1);
    assert!(listed[0].reactions[0].me);
}

#[tokio::test]
async fn end_to_end_register_invite_message_delete() {
    let app = TestApp::new();

    // Register A and B; A creates a server
    let (a, _) = app.register("alice").await;
    let (b, b_auth) = app.register("bob").await;
    let (server, channel) = app.create_server(a, "hangout").await;

    // A creates an invite, B redeems it
    let invite = InviteService::new(&app.ctx)
        .create_invite(a, server, Default::default())
        .await
        .unwrap();
    InviteService::new(&app.ctx)
        .redeem(&invite.code, b)
        .await
        .unwrap();

    // B sends "hi"
    let sent = app.send(channel, b, "hi").await.unwrap();

    // A sees exactly that message
    let listed = MessageService::new(&app.ctx)
        .list(channel, a, ListMessagesQuery::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "hi");
    assert_eq!(listed[0].author.id, b_auth.user.id);
    assert!(listed[0].edited_at.is_none());

    // Authorship gates deletion: A cannot delete B's message
    assert_permission_denied(
        MessageService::new(&app.ctx)
            .delete(channel, parse_id(&sent.id), a)
            .await,
    );

    // B deletes it and the channel reads empty
    MessageService::new(&app.ctx)
        .delete(channel, parse_id(&sent.id), b)
        .await
        .unwrap();
    let listed = MessageService::new(&app.ctx)
        .list(channel, a, ListMessagesQuery::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}
