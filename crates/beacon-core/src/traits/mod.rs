//! Store traits (ports)

mod repositories;

pub use repositories::{
    CategoryRepository, ChannelRepository, FriendRepository, InviteRepository,
    MembershipRepository, MessageQuery, MessageRepository, ReactionRepository, ServerRepository,
    StoreResult, UserRepository,
};
