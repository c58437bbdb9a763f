//! Realtime fan-out: services publish, the router delivers

use std::sync::Arc;
use std::time::Duration;

use beacon_core::Snowflake;
use beacon_gateway::{Connection, ConnectionRegistry, EventRouter, GatewayFrame, Room};
use beacon_service::{DmService, FriendService, InviteService, MemberService, MessageService};
use beacon_service::{ListMessagesQuery, UpdateMessageRequest};
use integration_tests::fixtures::parse_id;
use integration_tests::TestApp;
use tokio::sync::mpsc;

struct LiveClient {
    rx: mpsc::Receiver<GatewayFrame>,
}

impl LiveClient {
    /// Await the next dispatch frame, with a deadline so a missing
    /// fan-out fails the test instead of hanging it
    async fn next(&mut self) -> GatewayFrame {
        tokio::time::timeout(Duration::from_secs(1), self.rx.recv())
            .await
            .expect("frame within a second")
            .expect("connection still registered")
    }

    fn expect_nothing(&mut self) {
        assert!(self.rx.try_recv().is_err(), "no frame expected");
    }
}

struct Realtime {
    registry: Arc<ConnectionRegistry>,
    router: Arc<EventRouter>,
}

impl Realtime {
    fn start(app: &TestApp) -> Self {
        let registry = ConnectionRegistry::new_shared();
        let router = EventRouter::new(Arc::clone(&registry), app.bus.clone());
        router.start();
        Self { registry, router }
    }

    /// Register a live connection the way the gateway endpoint does
    /// after Identify: subscribed to the user's current rooms.
    fn connect(&self, session: &str, user: Snowflake, rooms: Vec<Room>) -> LiveClient {
        let (tx, rx) = mpsc::channel(64);
        self.registry
            .register(Arc::new(Connection::new(session.to_string(), user, tx)), rooms);
        LiveClient { rx }
    }
}

#[tokio::test]
async fn message_lifecycle_fans_out_in_order() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (server, channel) = app.create_server(owner, "lounge").await;

    let realtime = Realtime::start(&app);
    let mut client = realtime.connect("s1", owner, vec![Room::Server(server)]);

    let sent = app.send(channel, owner, "first").await.unwrap();
    let message_id = parse_id(&sent.id);

    MessageService::new(&app.ctx)
        .edit(
            channel,
            message_id,
            owner,
            UpdateMessageRequest {
                content: "first, edited".to_string(),
            },
        )
        .await
        .unwrap();
    MessageService::new(&app.ctx)
        .delete(channel, message_id, owner)
        .await
        .unwrap();

    let kinds: Vec<String> = [
        client.next().await,
        client.next().await,
        client.next().await,
    ]
    .into_iter()
    .map(|f| f.t.unwrap())
    .collect();
    assert_eq!(kinds, vec!["MESSAGE_CREATED", "MESSAGE_EDITED", "MESSAGE_DELETED"]);

    realtime.router.stop();
}

#[tokio::test]
async fn membership_changes_update_the_recipient_set() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (joiner, _) = app.register("sage").await;
    let (server, channel) = app.create_server(owner, "lounge").await;

    let realtime = Realtime::start(&app);
    let mut owner_client = realtime.connect("s1", owner, vec![Room::Server(server)]);
    // The joiner connects before being a member: no rooms yet
    let mut joiner_client = realtime.connect("s2", joiner, vec![]);

    let invite = InviteService::new(&app.ctx)
        .create_invite(owner, server, Default::default())
        .await
        .unwrap();
    // The owner hears about the new invite; the outsider does not
    assert_eq!(owner_client.next().await.t.as_deref(), Some("INVITE_CREATED"));
    joiner_client.expect_nothing();

    InviteService::new(&app.ctx)
        .redeem(&invite.code, joiner)
        .await
        .unwrap();
    assert_eq!(owner_client.next().await.t.as_deref(), Some("MEMBER_JOINED"));
    assert_eq!(joiner_client.next().await.t.as_deref(), Some("MEMBER_JOINED"));

    // From now on channel traffic reaches both
    app.send(channel, joiner, "hi all").await.unwrap();
    assert_eq!(owner_client.next().await.t.as_deref(), Some("MESSAGE_CREATED"));
    assert_eq!(joiner_client.next().await.t.as_deref(), Some("MESSAGE_CREATED"));

    // Leaving cuts the joiner out of future fan-out
    MemberService::new(&app.ctx).leave(server, joiner).await.unwrap();
    assert_eq!(owner_client.next().await.t.as_deref(), Some("MEMBER_LEFT"));
    assert_eq!(joiner_client.next().await.t.as_deref(), Some("MEMBER_LEFT"));

    app.send(channel, owner, "alone again").await.unwrap();
    assert_eq!(owner_client.next().await.t.as_deref(), Some("MESSAGE_CREATED"));
    joiner_client.expect_nothing();

    realtime.router.stop();
}

#[tokio::test]
async fn dm_and_friend_events_reach_exactly_the_pair() {
    let app = TestApp::new();
    let (a, _) = app.register("alice").await;
    let (b, b_auth) = app.register("bob").await;
    let (bystander, _) = app.register("carol").await;

    let realtime = Realtime::start(&app);
    let mut a_client = realtime.connect("s1", a, vec![]);
    let mut b_client = realtime.connect("s2", b, vec![]);
    let mut c_client = realtime.connect("s3", bystander, vec![]);

    let tag = format!("{}#{}", b_auth.user.username, b_auth.user.discriminator);
    FriendService::new(&app.ctx).request(a, &tag).await.unwrap();
    assert_eq!(a_client.next().await.t.as_deref(), Some("FRIEND_REQUESTED"));
    assert_eq!(b_client.next().await.t.as_deref(), Some("FRIEND_REQUESTED"));
    c_client.expect_nothing();

    FriendService::new(&app.ctx).accept(b, a).await.unwrap();
    assert_eq!(a_client.next().await.t.as_deref(), Some("FRIEND_ACCEPTED"));
    assert_eq!(b_client.next().await.t.as_deref(), Some("FRIEND_ACCEPTED"));

    // Opening a DM subscribes both sides; messages then flow to the
    // pair and nobody else
    let dm = DmService::new(&app.ctx).open_dm(a, b).await.unwrap();
    assert_eq!(a_client.next().await.t.as_deref(), Some("DM_OPENED"));
    assert_eq!(b_client.next().await.t.as_deref(), Some("DM_OPENED"));

    app.send(parse_id(&dm.id), a, "hey").await.unwrap();
    assert_eq!(a_client.next().await.t.as_deref(), Some("MESSAGE_CREATED"));
    assert_eq!(b_client.next().await.t.as_deref(), Some("MESSAGE_CREATED"));
    c_client.expect_nothing();

    realtime.router.stop();
}

#[tokio::test]
async fn fanout_failure_never_fails_the_request() {
    let app = TestApp::new();
    let (owner, _) = app.register("river").await;
    let (server, channel) = app.create_server(owner, "lounge").await;

    let realtime = Realtime::start(&app);
    // A connection whose receiver is already gone
    let dead = realtime.connect("s1", owner, vec![Room::Server(server)]);
    drop(dead);

    // The send itself still succeeds, and the dead connection is swept
    app.send(channel, owner, "into the void").await.unwrap();

    let listed = MessageService::new(&app.ctx)
        .list(channel, owner, ListMessagesQuery::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    realtime.router.stop();
}
