/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: Bearer 検証 → AuthCtx
 * - http: request id / trace / body limit / timeout
 * - cors: ブラウザ向け CORS
 */
pub mod auth;
pub mod cors;
pub mod http;
