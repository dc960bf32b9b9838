//! # Google 로그인
//!
//! 두 가지 방식을 지원합니다.
//! 1. 클라이언트가 받은 ID 토큰을 tokeninfo 엔드포인트로 검증 (`POST /api/auth/google`)
//! 2. 서버 주도 OAuth 인가 코드 플로우 (`GET /api/auth/google` → 콜백)
//!
//! 엔드포인트 URL은 설정값이라 테스트에서는 로컬 가짜 서버로 바꿀 수 있습니다.

use oauth2::{
    basic::BasicClient, AuthUrl, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RedirectUrl,
    TokenUrl,
};
use serde::Deserialize;

use crate::{config::GoogleOAuthConfig, error::AppError, models::NewGoogleUser};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

pub const INVALID_GOOGLE_TOKEN: &str = "Google token无效";
pub const INCOMPLETE_GOOGLE_PROFILE: &str = "Google用户信息不完整";

/// 인가 URL과 토큰 URL만 설정된 OAuth2 클라이언트
pub type GoogleOAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// tokeninfo / userinfo 응답 중 필요한 필드만
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    pub sub: Option<String>,
    /// tokeninfo에만 있는 필드: 토큰을 발급받은 클라이언트 ID
    pub aud: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl GoogleProfile {
    /// sub와 email이 모두 있어야 계정과 연결할 수 있습니다.
    pub fn into_new_user(self) -> Result<NewGoogleUser, AppError> {
        match (self.sub, self.email) {
            (Some(google_id), Some(email)) if !google_id.is_empty() && !email.is_empty() => {
                Ok(NewGoogleUser {
                    google_id,
                    email,
                    name: self.name,
                    avatar: self.picture,
                })
            }
            _ => Err(AppError::bad_request(INCOMPLETE_GOOGLE_PROFILE)),
        }
    }
}

/// ID 토큰을 tokeninfo로 검증합니다. 호출 실패나 200이 아닌 응답은 모두 400입니다.
///
/// `expected_aud`가 있으면 다른 클라이언트에 발급된 토큰도 400입니다.
pub async fn verify_id_token(
    client: &reqwest::Client,
    tokeninfo_url: &str,
    id_token: &str,
    expected_aud: Option<&str>,
) -> Result<GoogleProfile, AppError> {
    let response = client
        .get(tokeninfo_url)
        .query(&[("id_token", id_token)])
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("Google tokeninfo request failed: {}", e);
            AppError::bad_request(INVALID_GOOGLE_TOKEN)
        })?;

    if !response.status().is_success() {
        tracing::debug!("Google tokeninfo rejected token: {}", response.status());
        return Err(AppError::bad_request(INVALID_GOOGLE_TOKEN));
    }

    let profile = response.json::<GoogleProfile>().await.map_err(|e| {
        tracing::warn!("Google tokeninfo returned unexpected body: {}", e);
        AppError::bad_request(INVALID_GOOGLE_TOKEN)
    })?;

    if let Some(expected) = expected_aud {
        if profile.aud.as_deref() != Some(expected) {
            tracing::warn!("Google ID token issued for another client: {:?}", profile.aud);
            return Err(AppError::bad_request(INVALID_GOOGLE_TOKEN));
        }
    }

    Ok(profile)
}

/// OAuth access 토큰으로 사용자 프로필을 가져옵니다.
pub async fn fetch_userinfo(
    client: &reqwest::Client,
    userinfo_url: &str,
    access_token: &str,
) -> Result<GoogleProfile, AppError> {
    let profile = client
        .get(userinfo_url)
        .bearer_auth(access_token)
        .send()
        .await?
        .error_for_status()?
        .json::<GoogleProfile>()
        .await?;

    Ok(profile)
}

pub fn build_oauth_client(
    config: &GoogleOAuthConfig,
    token_url: &str,
) -> Result<GoogleOAuthClient, AppError> {
    let invalid_url = |e: oauth2::url::ParseError| AppError::Internal(format!("Invalid OAuth URL: {}", e));

    Ok(BasicClient::new(ClientId::new(config.client_id.clone()))
        .set_client_secret(ClientSecret::new(config.client_secret.clone()))
        .set_auth_uri(AuthUrl::new(GOOGLE_AUTH_URL.to_string()).map_err(invalid_url)?)
        .set_token_uri(TokenUrl::new(token_url.to_string()).map_err(invalid_url)?)
        .set_redirect_uri(RedirectUrl::new(config.redirect_url.clone()).map_err(invalid_url)?))
}
