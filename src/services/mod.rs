/*
 * Responsibility
 * - handler / middleware から使う service 群
 *   - auth: access token 検証
 *   - id_codec: 公開 ID ↔ 内部 ID
 */
pub mod auth;
pub mod id_codec;
