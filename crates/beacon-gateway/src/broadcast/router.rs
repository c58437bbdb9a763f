//! Event router
//!
//! A single task consumes the event bus in accept order and fans each
//! event out to the connections authorized to see it. Because there is
//! one consumer and per-connection queues preserve order, every
//! recipient sees a channel's events in the order the messaging engine
//! accepted them. Delivery is fire-and-forget; a slow connection drops
//! frames rather than stalling the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use beacon_core::{DomainEvent, Snowflake};
use beacon_service::EventBus;
use tokio::sync::broadcast;
use tracing::{info, trace, warn};

use crate::connection::{Connection, ConnectionRegistry, Room};
use crate::protocol::GatewayFrame;

/// Routes domain events to live connections
pub struct EventRouter {
    registry: Arc<ConnectionRegistry>,
    bus: EventBus,
    running: AtomicBool,
}

impl EventRouter {
    /// Create a router over a registry and the process event bus
    pub fn new(registry: Arc<ConnectionRegistry>, bus: EventBus) -> Arc<Self> {
        Arc::new(Self {
            registry,
            bus,
            running: AtomicBool::new(false),
        })
    }

    /// Spawn the router loop. The bus subscription is taken here, so
    /// events published after `start` returns are never missed.
    pub fn start(self: &Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Event router is already running");
            return;
        }
        let receiver = self.bus.subscribe();
        let router = Arc::clone(self);
        tokio::spawn(async move {
            router.run(receiver).await;
        });
        info!("Event router started");
    }

    /// Stop the router loop after the current event
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the router loop is live
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn run(&self, mut receiver: broadcast::Receiver<DomainEvent>) {
        while self.running.load(Ordering::SeqCst) {
            match receiver.recv().await {
                Ok(event) => self.route(&event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // Skipped events are lost for every connection;
                    // clients recover through the HTTP listing.
                    warn!(lagged = n, "Event router lagged behind the bus");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    warn!("Event bus closed");
                    break;
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!("Event router stopped");
    }

    /// Compute the recipient set for one event and deliver it.
    /// Exhaustive over the event enum on purpose: adding an event kind
    /// must force a routing decision here.
    pub fn route(&self, event: &DomainEvent) {
        trace!(event_type = event.event_type(), "Routing event");

        match event {
            DomainEvent::MessageCreated(e) | DomainEvent::MessageEdited(e) => {
                self.to_channel_audience(e.server_id, e.channel_id, event);
            }
            DomainEvent::MessageDeleted(e) => {
                self.to_channel_audience(e.server_id, e.channel_id, event);
            }
            DomainEvent::ReactionAdded(e) | DomainEvent::ReactionRemoved(e) => {
                self.to_channel_audience(e.server_id, e.channel_id, event);
            }

            DomainEvent::MemberJoined(e) => {
                // Subscribe first so the joiner's own connections see the
                // event and everything after it.
                self.registry.subscribe_user(e.user_id, Room::Server(e.server_id));
                self.to_room(Room::Server(e.server_id), event);
            }
            DomainEvent::MemberLeft(e) => {
                self.registry.unsubscribe_user(e.user_id, Room::Server(e.server_id));
                self.to_room(Room::Server(e.server_id), event);
                // The leaver still learns the leave succeeded
                self.to_user(e.user_id, event);
            }

            DomainEvent::ServerUpdated(e) => {
                self.to_room(Room::Server(e.server_id), event);
            }
            DomainEvent::ChannelCreated(e) => {
                self.to_room(Room::Server(e.server_id), event);
            }
            DomainEvent::InviteCreated(e) => {
                self.to_room(Room::Server(e.server_id), event);
            }

            DomainEvent::DmOpened(e) => {
                let (a, b) = e.participants;
                self.registry.subscribe_user(a, Room::Channel(e.channel_id));
                self.registry.subscribe_user(b, Room::Channel(e.channel_id));
                self.to_user(a, event);
                self.to_user(b, event);
            }

            DomainEvent::FriendRequested(e)
            | DomainEvent::FriendAccepted(e)
            | DomainEvent::FriendRemoved(e) => {
                self.to_user(e.requester_id, event);
                self.to_user(e.target_id, event);
            }
        }
    }

    /// Server channels broadcast to the server room; DM channels to the
    /// channel room.
    fn to_channel_audience(
        &self,
        server_id: Option<Snowflake>,
        channel_id: Snowflake,
        event: &DomainEvent,
    ) {
        let room = match server_id {
            Some(server_id) => Room::Server(server_id),
            None => Room::Channel(channel_id),
        };
        self.to_room(room, event);
    }

    fn to_room(&self, room: Room, event: &DomainEvent) {
        let sent = self.registry.send_to_room(room, |c| frame_for(c, event));
        trace!(event_type = event.event_type(), ?room, sent, "Event fanned out");
    }

    fn to_user(&self, user_id: Snowflake, event: &DomainEvent) {
        self.registry.send_to_user(user_id, |c| frame_for(c, event));
    }
}

fn frame_for(connection: &Connection, event: &DomainEvent) -> GatewayFrame {
    let payload = serde_json::to_value(event).unwrap_or_default();
    GatewayFrame::dispatch(event.event_type(), connection.next_sequence(), payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::events::{DmOpenedEvent, FriendLinkEvent, MemberEvent, MessageEvent};
    use chrono::Utc;
    use tokio::sync::mpsc;

    fn message_created(server: Option<i64>, channel: i64, author: i64) -> DomainEvent {
        DomainEvent::MessageCreated(MessageEvent {
            message_id: Snowflake::new(999),
            channel_id: Snowflake::new(channel),
            server_id: server.map(Snowflake::new),
            author_id: Snowflake::new(author),
            content: "hi".to_string(),
            edited_at: None,
            timestamp: Utc::now(),
        })
    }

    struct Fixture {
        registry: Arc<ConnectionRegistry>,
        router: Arc<EventRouter>,
    }

    impl Fixture {
        fn new() -> Self {
            let registry = ConnectionRegistry::new_shared();
            let router = EventRouter::new(Arc::clone(&registry), EventBus::new(16));
            Self { registry, router }
        }

        fn connect(&self, session: &str, user: i64, rooms: Vec<Room>) -> mpsc::Receiver<GatewayFrame> {
            let (tx, rx) = mpsc::channel(16);
            let connection = Arc::new(Connection::new(
                session.to_string(),
                Snowflake::new(user),
                tx,
            ));
            self.registry.register(connection, rooms);
            rx
        }
    }

    #[tokio::test]
    async fn test_server_message_goes_to_server_room() {
        let fx = Fixture::new();
        let mut member = fx.connect("s1", 1, vec![Room::Server(Snowflake::new(10))]);
        let mut outsider = fx.connect("s2", 2, vec![]);

        fx.router.route(&message_created(Some(10), 100, 1));

        let frame = member.try_recv().unwrap();
        assert_eq!(frame.t.as_deref(), Some("MESSAGE_CREATED"));
        assert!(outsider.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dm_message_goes_to_channel_room() {
        let fx = Fixture::new();
        let mut a = fx.connect("s1", 1, vec![Room::Channel(Snowflake::new(100))]);
        let mut b = fx.connect("s2", 2, vec![Room::Channel(Snowflake::new(100))]);
        let mut stranger = fx.connect("s3", 3, vec![]);

        fx.router.route(&message_created(None, 100, 1));

        assert!(a.try_recv().is_ok());
        assert!(b.try_recv().is_ok());
        assert!(stranger.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_member_joined_subscribes_joiner() {
        let fx = Fixture::new();
        let mut joiner = fx.connect("s1", 1, vec![]);

        fx.router.route(&DomainEvent::MemberJoined(MemberEvent::new(
            Snowflake::new(10),
            Snowflake::new(1),
        )));
        // The join event itself reaches the joiner through the room
        assert_eq!(joiner.try_recv().unwrap().t.as_deref(), Some("MEMBER_JOINED"));

        // And so do subsequent channel events
        fx.router.route(&message_created(Some(10), 100, 2));
        assert_eq!(
            joiner.try_recv().unwrap().t.as_deref(),
            Some("MESSAGE_CREATED")
        );
    }

    #[tokio::test]
    async fn test_member_left_stops_fanout_to_leaver() {
        let fx = Fixture::new();
        let server_room = Room::Server(Snowflake::new(10));
        let mut leaver = fx.connect("s1", 1, vec![server_room]);
        let mut stayer = fx.connect("s2", 2, vec![server_room]);

        fx.router.route(&DomainEvent::MemberLeft(MemberEvent::new(
            Snowflake::new(10),
            Snowflake::new(1),
        )));
        // Both parties observe the leave itself
        assert_eq!(leaver.try_recv().unwrap().t.as_deref(), Some("MEMBER_LEFT"));
        assert_eq!(stayer.try_recv().unwrap().t.as_deref(), Some("MEMBER_LEFT"));

        fx.router.route(&message_created(Some(10), 100, 2));
        assert!(leaver.try_recv().is_err(), "leaver no longer receives");
        assert!(stayer.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_dm_opened_subscribes_both_participants() {
        let fx = Fixture::new();
        let mut a = fx.connect("s1", 1, vec![]);
        let mut b = fx.connect("s2", 2, vec![]);

        fx.router.route(&DomainEvent::DmOpened(DmOpenedEvent::new(
            Snowflake::new(100),
            (Snowflake::new(1), Snowflake::new(2)),
        )));
        assert!(a.try_recv().is_ok());
        assert!(b.try_recv().is_ok());

        fx.router.route(&message_created(None, 100, 1));
        assert!(a.try_recv().is_ok());
        assert!(b.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_friend_events_reach_both_parties_only() {
        let fx = Fixture::new();
        let mut requester = fx.connect("s1", 1, vec![]);
        let mut target = fx.connect("s2", 2, vec![]);
        let mut bystander = fx.connect("s3", 3, vec![]);

        fx.router.route(&DomainEvent::FriendRequested(FriendLinkEvent::new(
            Snowflake::new(1),
            Snowflake::new(2),
        )));

        assert!(requester.try_recv().is_ok());
        assert!(target.try_recv().is_ok());
        assert!(bystander.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_per_connection_order_matches_accept_order() {
        let fx = Fixture::new();
        let room = Room::Server(Snowflake::new(10));
        let mut rx = fx.connect("s1", 1, vec![room]);

        for n in 0..5 {
            let mut event = message_created(Some(10), 100, 1);
            if let DomainEvent::MessageCreated(ref mut e) = event {
                e.message_id = Snowflake::new(n);
            }
            fx.router.route(&event);
        }

        let mut sequences = Vec::new();
        let mut message_ids = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            sequences.push(frame.s.unwrap());
            let id = frame.d.unwrap()["message_id"].as_str().unwrap().to_string();
            message_ids.push(id);
        }
        assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
        assert_eq!(message_ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn test_router_end_to_end_via_bus() {
        let bus = EventBus::new(16);
        let registry = ConnectionRegistry::new_shared();
        let router = EventRouter::new(Arc::clone(&registry), bus.clone());
        router.start();

        let (tx, mut rx) = mpsc::channel(16);
        registry.register(
            Arc::new(Connection::new(
                "s1".to_string(),
                Snowflake::new(1),
                tx,
            )),
            vec![Room::Server(Snowflake::new(10))],
        );

        bus.publish(DomainEvent::ServerUpdated(
            beacon_core::events::ServerUpdatedEvent {
                server_id: Snowflake::new(10),
                timestamp: Utc::now(),
            },
        ));

        let frame = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .expect("fan-out within a second")
            .expect("frame delivered");
        assert_eq!(frame.t.as_deref(), Some("SERVER_UPDATED"));

        router.stop();
    }
}
