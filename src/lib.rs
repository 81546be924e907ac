/*
 * Responsibility
 * - crate のモジュール構成
 * - tests/ から Router を組み立てられるように app / state / repos などを公開する
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod policy;
pub mod repos;
pub mod services;
pub mod state;
