//! # beacon-service
//!
//! Application layer containing business logic, services, DTOs, and the
//! process-wide event bus.

pub mod bus;
pub mod dto;
pub mod services;

pub use bus::EventBus;
pub use dto::{
    AuthResponse, CategoryWithChannels, ChannelResponse, CreateChannelRequest,
    CreateInviteRequest, CreateMessageRequest, CreateServerRequest, FriendEntryResponse,
    FriendRequestBody, InviteResponse, InviteSummaryResponse, ListMessagesQuery, LoginRequest,
    MemberResponse, MessageResponse, ReactionGroupResponse, RegisterRequest, ServerResponse,
    ServerTreeResponse, UpdateMessageRequest, UpdateServerRequest, UpdateUserRequest,
    UserResponse,
};
pub use services::{
    AuthService, ChannelService, DmService, FriendService, InviteService, MemberService,
    MessageService, PermissionService, ReactionService, ServerService, ServiceContext,
    ServiceError, ServiceResult, UserService,
};
