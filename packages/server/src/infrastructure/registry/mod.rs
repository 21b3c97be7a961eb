//! Registry の実装
//!
//! ドメイン層が定義する `Registry` trait の具体的な実装を提供します。
//! UseCase 層と UI 層は trait（ドメイン層）に依存し、この実装に直接依存しません。

pub mod inmemory;

pub use inmemory::InMemoryRegistry;
