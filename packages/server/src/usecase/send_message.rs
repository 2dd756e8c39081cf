//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ送信処理（履歴への追加、送信者を含む全員への配送）
//!
//! ### なぜこのテストが必要か
//! - 作成者名はクライアントではなくサーバー側の所属情報から決まることを保証する
//! - タイムスタンプは受信時刻で付与されることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - エッジケース：送信者のみが所属している場合
//! - 異常系：ルーム未所属の送信者

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, MessageIdFactory, RoomRepository, Timestamp};

use super::{
    error::RouteError,
    notification::{Delivery, Notification},
};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Delivery>)` - 送信者を含むルーム全員への `new-message`
    /// * `Err(RouteError::NotBound)` - 送信者がどのルームにも所属していない
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        body: String,
    ) -> Result<Vec<Delivery>, RouteError> {
        let not_bound = || RouteError::NotBound(sender.clone());

        // 1. 送信者の所属ルームと表示名を取得
        let room_id = self.repository.room_of(sender).await.ok_or_else(not_bound)?;
        let author = self
            .repository
            .get_member(&room_id, sender)
            .await
            .ok_or_else(not_bound)?
            .display_name;

        // 2. 受信時刻でメッセージを作成し、履歴に追加
        let message = ChatMessage::new(MessageIdFactory::generate(), author, body, Timestamp::now());
        if let Some(evicted) = self
            .repository
            .append_message(&room_id, message.clone())
            .await
            .map_err(|_| not_bound())?
        {
            tracing::trace!(room_id = %room_id, message_id = %evicted.id, "history full, oldest message evicted");
        }

        // 3. 送信者を含む全員に配送
        let recipients = self
            .repository
            .member_ids(&room_id)
            .await
            .map_err(|_| not_bound())?;
        Ok(Delivery::broadcast(
            &recipients,
            None,
            &Notification::NewMessage(message),
        ))
    }
}
