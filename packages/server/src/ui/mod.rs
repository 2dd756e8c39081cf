//! UI 層: HTTP / WebSocket の入出力
//!
//! トランスポートから届いたフレームを InboundEvent に変換してディスパッチャーに渡し、
//! ルーターが返した配送先へ JSON フレームを送ります。

mod dispatcher;
pub mod handler;
mod runner;
pub mod state;

pub use runner::{build_app, run};
pub use state::{AppState, ConnectionHub};
