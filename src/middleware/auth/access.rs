//! access token (HS256 JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を受け取り、署名 + exp を検証する
//! - 成功時は subject を `AuthCtx.user_id` として extensions に格納し、handler へ進む
//! - 失敗時は handler を呼ばずに 401 を返す
//!   - ヘッダなし / 非 UTF-8 / `Bearer ` なし / 空 token は同じ経路 (MissingToken)
//!   - 署名不正 / 期限切れ / subject 不正は InvalidToken

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 保護対象の Router に認証を掛ける。
///
/// 例：
/// ```ignore
/// let protected = api::v1::protected_routes();
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// app = app.nest("/api/v1", protected);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

/// `Authorization` ヘッダから token 部分を取り出す。取り出せなければ None。
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or(AppError::MissingToken)?;

    let verified = match state.auth.verify_verified(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(AppError::InvalidToken);
        }
    };

    let auth_ctx = AuthCtx::new(verified.user_id).with_jti(verified.jti);
    tracing::debug!(
        user_id = %auth_ctx.user_id,
        jti = auth_ctx.jti.as_deref(),
        "access token accepted"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
