//! UseCase: メディア（映像・音声）のオン／オフ切り替え処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MediaKind, RoomRepository};

use super::{
    error::RouteError,
    notification::{Delivery, Notification},
};

/// メディア切り替えのユースケース
pub struct ToggleMediaUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl ToggleMediaUseCase {
    /// 新しい ToggleMediaUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 送信者自身のフラグを更新し、同じルームの他メンバーへ通知する
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        kind: MediaKind,
        enabled: bool,
    ) -> Result<Vec<Delivery>, RouteError> {
        let not_bound = || RouteError::NotBound(sender.clone());

        let room_id = self.repository.room_of(sender).await.ok_or_else(not_bound)?;
        self.repository
            .set_toggle(&room_id, sender, kind, enabled)
            .await
            .map_err(|_| not_bound())?;
        let recipients = self
            .repository
            .member_ids(&room_id)
            .await
            .map_err(|_| not_bound())?;

        Ok(Delivery::broadcast(
            &recipients,
            Some(sender),
            &Notification::MediaToggled {
                kind,
                connection_id: sender.clone(),
                enabled,
            },
        ))
    }
}
