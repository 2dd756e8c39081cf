//! プロセス内メモリに保持するルームレジストリ（再起動で消える）

pub mod room;

pub use room::InMemoryRoomRepository;
