//! Infrastructure layer
//!
//! ドメイン層が定義する trait の具体的な実装を提供します。
//!
//! - `codec`: JSON ワイヤーフォーマット
//! - `dto`: WebSocket / HTTP の DTO
//! - `message_pusher`: WebSocket 送信ハンドルとブロードキャストエンジン
//! - `repository`: インメモリの接続レジストリ

pub mod codec;
pub mod dto;
pub mod message_pusher;
pub mod repository;
