//! Data transfer objects for the API boundary

mod requests;
mod responses;

pub use requests::{
    CreateChannelRequest, CreateInviteRequest, CreateMessageRequest, CreateServerRequest,
    FriendRequestBody, ListMessagesQuery, LoginRequest, RegisterRequest, UpdateMessageRequest,
    UpdateServerRequest, UpdateUserRequest,
};
pub use responses::{
    AuthResponse, CategoryWithChannels, ChannelResponse, FriendEntryResponse, InviteResponse,
    InviteSummaryResponse, MemberResponse, MessageResponse, ReactionGroupResponse, ServerResponse,
    ServerTreeResponse, UserResponse,
};
