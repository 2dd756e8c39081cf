//! UseCase: ルーム作成処理

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomRepository};

use super::notification::{Delivery, Notification};

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 空のルームを作成し、要求者に新しいルーム ID を返す
    pub async fn execute(&self, requester: &ConnectionId) -> Vec<Delivery> {
        let room_id = self.repository.create_room().await;
        tracing::debug!(requester = %requester, room_id = %room_id, "create-room handled");
        vec![Delivery::new(
            requester.clone(),
            Notification::RoomCreated(room_id),
        )]
    }
}
