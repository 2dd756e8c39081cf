//! UseCase: 切断処理
//!
//! トランスポートから切断が通知された接続をルームから取り除き、残りのメンバーへ退出を通知します。
//! 最後のメンバーが退出したルームは Repository 側で同時に破棄されます。

use std::sync::Arc;

use crate::domain::{ConnectionId, RemoveMemberOutcome, RoomRepository};

use super::{
    error::RouteError,
    notification::{Delivery, Notification},
};

/// 切断のユースケース
pub struct DisconnectMemberUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl DisconnectMemberUseCase {
    /// 新しい DisconnectMemberUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 切断を実行し、残りのメンバーへの `user-left` を返す
    pub async fn execute(&self, connection_id: &ConnectionId) -> Result<Vec<Delivery>, RouteError> {
        let not_bound = || RouteError::NotBound(connection_id.clone());

        let room_id = self
            .repository
            .room_of(connection_id)
            .await
            .ok_or_else(not_bound)?;
        let outcome = self
            .repository
            .remove_member(&room_id, connection_id)
            .await
            .map_err(|_| not_bound())?;

        match &outcome {
            RemoveMemberOutcome::RoomDestroyed { .. } => {
                tracing::info!(connection_id = %connection_id, room_id = %room_id, "last member left")
            }
            RemoveMemberOutcome::Remaining { remaining, .. } => tracing::info!(
                connection_id = %connection_id,
                room_id = %room_id,
                remaining = remaining.len(),
                "member left"
            ),
        }

        Ok(Delivery::broadcast(
            outcome.remaining(),
            None,
            &Notification::UserLeft(connection_id.clone()),
        ))
    }
}
