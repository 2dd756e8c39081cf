//! ルームレジストリの Repository 実装
//!
//! `domain::RoomRepository` を満たす具体的な保存先をまとめます。
//! ルーター（UseCase 層）は trait にのみ依存し、起動時に `Arc<dyn RoomRepository>` として注入されます。

pub mod inmemory;

pub use inmemory::InMemoryRoomRepository;
