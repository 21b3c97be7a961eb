//! UseCase 層
//!
//! セッションの接続・切断とメッセージの振り分けを実装するレイヤー。
//! UI 層から呼び出され、Domain 層の `Registry` を操作します。

pub mod connect_session;
pub mod disconnect_session;
pub mod route_message;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use route_message::{RouteMessageUseCase, RouteOutcome};
