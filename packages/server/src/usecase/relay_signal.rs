//! UseCase: WebRTC ネゴシエーション中継処理
//!
//! offer / answer / ice-candidate のペイロードは解釈せず、宛先の接続にそのまま転送します。
//! 宛先が接続中かどうかはトランスポート側で判断し、存在しなければ黙って破棄されます。

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ConnectionId, RoomRepository};

use super::{
    error::RouteError,
    event::NegotiationKind,
    notification::{Delivery, Notification},
};

/// ネゴシエーション中継のユースケース
pub struct RelaySignalUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl RelaySignalUseCase {
    /// 新しい RelaySignalUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 送信者がルームに所属していれば、宛先だけに送信者 ID 付きで転送する
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        kind: NegotiationKind,
        target: ConnectionId,
        payload: Value,
    ) -> Result<Vec<Delivery>, RouteError> {
        if self.repository.room_of(sender).await.is_none() {
            return Err(RouteError::NotBound(sender.clone()));
        }

        Ok(vec![Delivery::new(
            target,
            Notification::Negotiation {
                kind,
                sender: sender.clone(),
                payload,
            },
        )])
    }
}
