//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ルーム本体と「接続 ID → ルーム ID」のインデックスを同じ Mutex の内側に置き、
//! メンバー変更とインデックス更新を一つのクリティカルセクションで行います。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AddMemberOutcome, ChatMessage, ConnectionId, DEFAULT_HISTORY_CAPACITY, MediaKind, Member,
    RegistryError, RemoveMemberOutcome, Room, RoomId, RoomIdFactory, RoomRepository, Timestamp,
};

/// Mutex で保護される内部状態
#[derive(Default)]
struct RegistryState {
    /// 生存中のルーム
    rooms: HashMap<RoomId, Room>,
    /// 接続 ID → 所属ルーム ID
    bindings: HashMap<ConnectionId, RoomId>,
}

/// インメモリ Room Repository 実装
///
/// ドメイン層の RoomRepository trait を実装します（依存性の逆転）。
/// プロセス終了とともに全ての状態は失われます。
pub struct InMemoryRoomRepository {
    state: Mutex<RegistryState>,
    /// 各ルームが保持するチャット履歴の上限
    history_capacity: usize,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// 履歴上限を指定して InMemoryRoomRepository を作成
    pub fn with_history_capacity(history_capacity: usize) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            history_capacity,
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self) -> RoomId {
        let mut state = self.state.lock().await;
        let mut room_id = RoomIdFactory::generate();
        while state.rooms.contains_key(&room_id) {
            room_id = RoomIdFactory::generate();
        }
        state.rooms.insert(
            room_id.clone(),
            Room::with_history_capacity(room_id.clone(), Timestamp::now(), self.history_capacity),
        );
        tracing::info!(room_id = %room_id, "room created");
        room_id
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RegistryError> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.clone()))
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let state = self.state.lock().await;
        let mut rooms: Vec<Room> = state.rooms.values().cloned().collect();
        rooms.sort_by_key(|room| room.created_at);
        rooms
    }

    async fn add_member(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        display_name: String,
    ) -> Result<AddMemberOutcome, RegistryError> {
        let mut state = self.state.lock().await;
        let RegistryState { rooms, bindings } = &mut *state;

        if let Some(bound) = bindings.get(&connection_id)
            && bound != room_id
        {
            return Err(RegistryError::BoundElsewhere {
                connection_id,
                room_id: bound.clone(),
            });
        }

        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.clone()))?;

        let member = Member::new(connection_id.clone(), display_name, Timestamp::now());
        let prior = room.add_member(member.clone());
        bindings.insert(connection_id, room_id.clone());

        Ok(match prior {
            Some(prior) => AddMemberOutcome::StaleReplaced { member, prior },
            None => AddMemberOutcome::Added(member),
        })
    }

    async fn remove_member(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<RemoveMemberOutcome, RegistryError> {
        let mut state = self.state.lock().await;
        let RegistryState { rooms, bindings } = &mut *state;

        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.clone()))?;
        let member =
            room.remove_member(connection_id)
                .ok_or_else(|| RegistryError::MemberNotPresent {
                    room_id: room_id.clone(),
                    connection_id: connection_id.clone(),
                })?;

        if bindings.get(connection_id) == Some(room_id) {
            bindings.remove(connection_id);
        }

        if room.is_empty() {
            rooms.remove(room_id);
            tracing::info!(room_id = %room_id, "room destroyed");
            return Ok(RemoveMemberOutcome::RoomDestroyed { member });
        }

        Ok(RemoveMemberOutcome::Remaining {
            member,
            remaining: room.member_ids(),
        })
    }

    async fn append_message(
        &self,
        room_id: &RoomId,
        message: ChatMessage,
    ) -> Result<Option<ChatMessage>, RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.clone()))?;
        Ok(room.append_message(message))
    }

    async fn set_toggle(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        kind: MediaKind,
        enabled: bool,
    ) -> Result<bool, RegistryError> {
        let mut state = self.state.lock().await;
        let room = state
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.clone()))?;
        room.set_toggle(connection_id, kind, enabled)
            .ok_or_else(|| RegistryError::MemberNotPresent {
                room_id: room_id.clone(),
                connection_id: connection_id.clone(),
            })
    }

    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        let state = self.state.lock().await;
        state.bindings.get(connection_id).cloned()
    }

    async fn get_member(&self, room_id: &RoomId, connection_id: &ConnectionId) -> Option<Member> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room_id)
            .and_then(|room| room.get_member(connection_id))
            .cloned()
    }

    async fn member_ids(&self, room_id: &RoomId) -> Result<Vec<ConnectionId>, RegistryError> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room_id)
            .map(Room::member_ids)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::MessageIdFactory;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository のルーム生成・参加・退出・履歴・トグル操作
    // - メンバー変更と接続インデックスが常に一致すること
    //
    // 【なぜこのテストが必要か】
    // - Repository は UseCase から呼ばれるデータアクセス層の中核
    // - 空のルームが観測されないこと（退出と同時に破棄）を保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. ルーム ID の一意性
    // 2. 存在しないルームへの参加（エラーケース）
    // 3. 同一接続 ID での再参加（古いエントリの置換）
    // 4. 最後のメンバー退出によるルーム破棄
    // 5. 履歴上限と FIFO 削除
    // ========================================

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn message(body: &str) -> ChatMessage {
        ChatMessage::new(
            MessageIdFactory::generate(),
            "Alice".to_string(),
            body.to_string(),
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn test_create_room_ids_are_unique() {
        // テスト項目: 生成されるルーム ID は常に一意
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let mut ids = HashSet::new();
        for _ in 0..200 {
            ids.insert(repo.create_room().await);
        }

        // then (期待する結果):
        assert_eq!(ids.len(), 200);
        assert_eq!(repo.list_rooms().await.len(), 200);
    }

    #[tokio::test]
    async fn test_get_room_not_found() {
        // テスト項目: 存在しないルームの取得は RoomNotFound になる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room_id = RoomIdFactory::generate();

        // when (操作):
        let result = repo.get_room(&room_id).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RegistryError::RoomNotFound(room_id));
    }

    #[tokio::test]
    async fn test_add_member_success() {
        // テスト項目: 参加するとメンバーとインデックスの両方に反映される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room_id = repo.create_room().await;

        // when (操作):
        let outcome = repo
            .add_member(&room_id, conn("a"), "Alice".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(matches!(outcome, AddMemberOutcome::Added(_)));
        assert_eq!(repo.room_of(&conn("a")).await, Some(room_id.clone()));
        let room = repo.get_room(&room_id).await.unwrap();
        assert_eq!(room.members.len(), 1);
        assert_eq!(room.members[0].display_name, "Alice");
    }

    #[tokio::test]
    async fn test_add_member_to_unknown_room_changes_nothing() {
        // テスト項目: 存在しないルームへの参加はエラーになり、状態は変わらない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let live = repo.create_room().await;
        let unknown = RoomIdFactory::generate();

        // when (操作):
        let result = repo
            .add_member(&unknown, conn("a"), "Alice".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RegistryError::RoomNotFound(unknown));
        assert_eq!(repo.room_of(&conn("a")).await, None);
        assert!(repo.get_room(&live).await.unwrap().members.is_empty());
    }

    #[tokio::test]
    async fn test_add_member_same_connection_replaces_stale_entry() {
        // テスト項目: 同一接続 ID での再参加は古いエントリを返して置き換える
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room_id = repo.create_room().await;
        repo.add_member(&room_id, conn("a"), "Alice".to_string())
            .await
            .unwrap();

        // when (操作):
        let outcome = repo
            .add_member(&room_id, conn("a"), "Alicia".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        match outcome {
            AddMemberOutcome::StaleReplaced { member, prior } => {
                assert_eq!(prior.display_name, "Alice");
                assert_eq!(member.display_name, "Alicia");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(repo.member_ids(&room_id).await.unwrap(), vec![conn("a")]);
    }

    #[tokio::test]
    async fn test_add_member_bound_elsewhere_fails() {
        // テスト項目: 別ルームに所属中の接続は参加できない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let first = repo.create_room().await;
        let second = repo.create_room().await;
        repo.add_member(&first, conn("a"), "Alice".to_string())
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .add_member(&second, conn("a"), "Alice".to_string())
            .await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RegistryError::BoundElsewhere {
                connection_id: conn("a"),
                room_id: first.clone(),
            }
        );
        assert!(repo.member_ids(&second).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_non_last_member_keeps_room() {
        // テスト項目: 最後以外のメンバーが退出してもルームは残る
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room_id = repo.create_room().await;
        repo.add_member(&room_id, conn("a"), "Alice".to_string())
            .await
            .unwrap();
        repo.add_member(&room_id, conn("b"), "Bob".to_string())
            .await
            .unwrap();

        // when (操作):
        let outcome = repo.remove_member(&room_id, &conn("b")).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome.member().display_name, "Bob");
        assert_eq!(outcome.remaining(), &[conn("a")]);
        assert_eq!(repo.room_of(&conn("b")).await, None);
        let room = repo.get_room(&room_id).await.unwrap();
        assert_eq!(room.member_ids(), vec![conn("a")]);
    }

    #[tokio::test]
    async fn test_remove_last_member_destroys_room() {
        // テスト項目: 最後のメンバーが退出するとルームが破棄される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room_id = repo.create_room().await;
        repo.add_member(&room_id, conn("a"), "Alice".to_string())
            .await
            .unwrap();

        // when (操作):
        let outcome = repo.remove_member(&room_id, &conn("a")).await.unwrap();

        // then (期待する結果):
        assert!(matches!(outcome, RemoveMemberOutcome::RoomDestroyed { .. }));
        assert_eq!(
            repo.get_room(&room_id).await.unwrap_err(),
            RegistryError::RoomNotFound(room_id.clone())
        );
        assert!(repo.list_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_absent_member() {
        // テスト項目: 所属していない接続の退出は MemberNotPresent になる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room_id = repo.create_room().await;

        // when (操作):
        let result = repo.remove_member(&room_id, &conn("ghost")).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            RegistryError::MemberNotPresent {
                room_id: room_id.clone(),
                connection_id: conn("ghost"),
            }
        );
        // 空のまま作成されたルームは参加者がいなくても残る
        assert!(repo.get_room(&room_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_append_message_evicts_oldest_over_capacity() {
        // テスト項目: 履歴が上限を超えると最も古いメッセージだけが削除される
        // given (前提条件):
        let repo = InMemoryRoomRepository::with_history_capacity(3);
        let room_id = repo.create_room().await;
        for body in ["one", "two", "three"] {
            repo.append_message(&room_id, message(body)).await.unwrap();
        }

        // when (操作):
        let evicted = repo.append_message(&room_id, message("four")).await.unwrap();

        // then (期待する結果):
        assert_eq!(evicted.unwrap().body, "one");
        let room = repo.get_room(&room_id).await.unwrap();
        let bodies: Vec<_> = room.history.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["two", "three", "four"]);
    }

    #[tokio::test]
    async fn test_append_message_to_unknown_room() {
        // テスト項目: 存在しないルームへの追加はエラーになる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room_id = RoomIdFactory::generate();

        // when (操作):
        let result = repo.append_message(&room_id, message("hi")).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RegistryError::RoomNotFound(room_id));
    }

    #[tokio::test]
    async fn test_set_toggle_returns_previous_value() {
        // テスト項目: トグルは前回値を返し、指定フラグを更新する
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room_id = repo.create_room().await;
        repo.add_member(&room_id, conn("a"), "Alice".to_string())
            .await
            .unwrap();

        // when (操作):
        let first = repo
            .set_toggle(&room_id, &conn("a"), MediaKind::Video, true)
            .await
            .unwrap();
        let second = repo
            .set_toggle(&room_id, &conn("a"), MediaKind::Video, false)
            .await
            .unwrap();

        // then (期待する結果):
        assert!(!first);
        assert!(second);
        let member = repo.get_member(&room_id, &conn("a")).await.unwrap();
        assert!(!member.video_enabled);
    }

    #[tokio::test]
    async fn test_set_toggle_absent_member() {
        // テスト項目: 所属していない接続のトグルは MemberNotPresent になる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room_id = repo.create_room().await;

        // when (操作):
        let result = repo
            .set_toggle(&room_id, &conn("ghost"), MediaKind::Audio, true)
            .await;

        // then (期待する結果):
        assert!(matches!(
            result.unwrap_err(),
            RegistryError::MemberNotPresent { .. }
        ));
    }
}
