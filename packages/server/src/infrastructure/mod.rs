//! Infrastructure 層
//!
//! Repository の具体的な実装と、通信路で使う DTO を提供します。

pub mod dto;
pub mod repository;
