//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から受け取ったイベントを SignalingRouter が各ユースケースに振り分け、Domain 層を操作します。

pub mod create_room;
pub mod disconnect_member;
pub mod error;
pub mod event;
pub mod join_room;
pub mod notification;
pub mod relay_signal;
pub mod router;
pub mod send_message;
pub mod toggle_media;

pub use create_room::CreateRoomUseCase;
pub use disconnect_member::DisconnectMemberUseCase;
pub use error::RouteError;
pub use event::{InboundEvent, NegotiationKind};
pub use join_room::JoinRoomUseCase;
pub use notification::{Delivery, Notification};
pub use relay_signal::RelaySignalUseCase;
pub use router::SignalingRouter;
pub use send_message::SendMessageUseCase;
pub use toggle_media::ToggleMediaUseCase;
