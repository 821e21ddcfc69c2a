/*!
 * 会话认证中间件
 *
 * 从 `X-Session-ID` 请求头读取会话令牌，经 `SessionStore` 解析为身份后
 * 写入请求扩展，供后续的角色校验与处理程序使用。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireSession;
 *
 * web::scope("/api/courses")
 *     .wrap(RequireSession)
 *     .route("", web::get().to(list_courses));
 * ```
 *
 * 在处理程序中提取身份：
 *
 * ```rust,ignore
 * let identity = RequireSession::extract_identity(&req);
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `X-Session-ID: <token>`
 * 2. 中间件每次请求都从共享缓存重新解析令牌
 * 3. 解析成功时写入 `SessionIdentity` 与 `SessionToken`，继续处理请求
 * 4. 缺失、未知或过期的令牌返回 401
 */

use crate::errors::PlatformError;
use crate::session::{SessionIdentity, SessionToken};
use crate::state::AppState;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

use super::create_error_response;

pub const SESSION_HEADER: &str = "X-Session-ID";

#[derive(Clone)]
pub struct RequireSession;

// 辅助函数：提取并解析会话令牌
async fn extract_and_resolve_session(
    req: &ServiceRequest,
) -> Result<(SessionIdentity, String), PlatformError> {
    let token = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PlatformError::unauthenticated("Missing session ID"))?
        .to_string();

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| PlatformError::internal("Application state is not configured"))?;

    let identity = state
        .sessions
        .resolve(&token)
        .await
        .ok_or_else(|| PlatformError::unauthenticated("Invalid or expired session"))?;

    Ok((identity, token))
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    HttpResponse::NoContent().finish().map_into_right_body(),
                ));
            }

            match extract_and_resolve_session(&req).await {
                Ok((identity, token)) => {
                    debug!("Session authentication successful for ID: {}", identity.user_id);
                    req.extensions_mut().insert(identity);
                    req.extensions_mut().insert(SessionToken(token));
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "Session authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(create_error_response(&err).map_into_right_body()))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取身份信息
impl RequireSession {
    /// 从请求扩展中提取会话身份
    /// 此函数应该在应用了RequireSession中间件的路由处理程序中使用
    pub fn extract_identity(req: &HttpRequest) -> Option<SessionIdentity> {
        req.extensions().get::<SessionIdentity>().cloned()
    }

    /// 从请求扩展中提取用户ID
    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        req.extensions()
            .get::<SessionIdentity>()
            .map(|identity| identity.user_id)
    }

    /// 从请求扩展中提取原始会话令牌
    pub fn extract_token(req: &HttpRequest) -> Option<String> {
        req.extensions()
            .get::<SessionToken>()
            .map(|token| token.0.clone())
    }

    /// 提取会话身份，缺失时返回 401
    pub fn require_identity(req: &HttpRequest) -> Result<SessionIdentity, PlatformError> {
        Self::extract_identity(req)
            .ok_or_else(|| PlatformError::unauthenticated("Authentication required"))
    }
}
