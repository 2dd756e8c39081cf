//! Domain layer for the signaling relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod history;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, MediaKind, Member, Room};
pub use error::{RegistryError, ValueObjectError};
pub use factory::{ConnectionIdFactory, MessageIdFactory, RoomIdFactory};
pub use history::{ChatHistory, DEFAULT_HISTORY_CAPACITY};
pub use repository::{AddMemberOutcome, RemoveMemberOutcome, RoomRepository};
#[cfg(test)]
pub use repository::MockRoomRepository;
pub use value_object::{ConnectionId, MessageId, RoomId, Timestamp};
