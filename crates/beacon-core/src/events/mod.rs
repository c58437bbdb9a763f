//! Domain events

mod domain_event;

pub use domain_event::{
    ChannelCreatedEvent, DmOpenedEvent, DomainEvent, FriendLinkEvent, InviteCreatedEvent,
    MemberEvent, MessageDeletedEvent, MessageEvent, ReactionEvent, ServerUpdatedEvent,
};
