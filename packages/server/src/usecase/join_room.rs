//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加者への初期状態（メンバー一覧・チャット履歴）の送信と、他メンバーへの参加通知
//!
//! ### なぜこのテストが必要か
//! - 参加通知と退出通知の対応関係（同一接続 ID の再参加を含む）を保証する
//! - 存在しないルームへの参加で状態が変化しないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルーム / 既存メンバーのいるルームへの参加
//! - 異常系：存在しないルーム、不正な形式のルーム ID
//! - エッジケース：同一接続 ID での再参加、別ルームからの移動

use std::sync::Arc;

use crate::domain::{AddMemberOutcome, ConnectionId, RoomId, RoomRepository};

use super::{
    error::RouteError,
    notification::{Delivery, Notification},
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Delivery>)` - 送信すべき通知（順序どおりに配送すること）
    /// * `Err(RouteError::RoomNotFound)` - ルームが存在しない（状態は変更されない）
    pub async fn execute(
        &self,
        requester: &ConnectionId,
        room_id: &str,
        display_name: String,
    ) -> Result<Vec<Delivery>, RouteError> {
        // 1. ルームの存在確認（ここまでは一切状態を変更しない）
        let room_id = RoomId::new(room_id.to_string())
            .map_err(|_| RouteError::RoomNotFound(room_id.to_string()))?;
        self.repository.member_ids(&room_id).await?;

        let mut deliveries = Vec::new();

        // 2. 別のルームに所属している場合はそちらから退出させる
        if let Some(previous) = self.repository.room_of(requester).await
            && previous != room_id
        {
            let outcome = self.repository.remove_member(&previous, requester).await?;
            tracing::info!(
                connection_id = %requester,
                room_id = %previous,
                "left previous room before joining another"
            );
            deliveries.extend(Delivery::broadcast(
                outcome.remaining(),
                None,
                &Notification::UserLeft(requester.clone()),
            ));
        }

        // 3. メンバーを追加（同一接続 ID の古いエントリは置き換えられる）
        let outcome = self
            .repository
            .add_member(&room_id, requester.clone(), display_name)
            .await?;
        let room = self.repository.get_room(&room_id).await?;
        let others: Vec<ConnectionId> = room
            .member_ids()
            .into_iter()
            .filter(|id| id != requester)
            .collect();

        if let AddMemberOutcome::StaleReplaced { prior, .. } = &outcome {
            tracing::info!(
                connection_id = %prior.connection_id,
                room_id = %room_id,
                "stale member replaced on rejoin"
            );
            deliveries.extend(Delivery::broadcast(
                &others,
                None,
                &Notification::UserLeft(prior.connection_id.clone()),
            ));
        }

        // 4. 参加者本人へ: 自分以外のメンバー一覧とチャット履歴
        let members = room
            .members
            .iter()
            .filter(|m| &m.connection_id != requester)
            .cloned()
            .collect();
        deliveries.push(Delivery::new(
            requester.clone(),
            Notification::UsersInRoom(members),
        ));
        deliveries.push(Delivery::new(
            requester.clone(),
            Notification::ChatHistory(room.history.to_vec()),
        ));

        // 5. 他のメンバーへ: 参加通知
        deliveries.extend(Delivery::broadcast(
            &others,
            None,
            &Notification::UserJoined(outcome.member().clone()),
        ));

        tracing::info!(
            connection_id = %requester,
            room_id = %room_id,
            display_name = %outcome.member().display_name,
            members = room.members.len(),
            "member joined"
        );
        Ok(deliveries)
    }
}
