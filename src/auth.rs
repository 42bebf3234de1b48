use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
};
use cookie::Cookie;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::models::UserInfo;

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "auth_token";
/// Name of the cookie carrying the JSON-encoded [`UserInfo`].
pub const USER_INFO_COOKIE: &str = "user_info";

/// RoleClass
///
/// The closed set of roles the front end distinguishes. Produced from the free-form
/// role string by [`RoleClass::classify`]; `Unclassified` satisfies no role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum RoleClass {
    Admin,
    Student,
    Professor,
    Unclassified,
}

/// Role aliases (English and Spanish) accepted from the identity backend.
/// New aliases are added here and nowhere else.
const ROLE_SYNONYMS: &[(&str, RoleClass)] = &[
    ("admin", RoleClass::Admin),
    ("administrador", RoleClass::Admin),
    ("student", RoleClass::Student),
    ("estudiante", RoleClass::Student),
    ("professor", RoleClass::Professor),
    ("profesor", RoleClass::Professor),
];

impl RoleClass {
    /// Maps a raw role string onto a role class, ignoring ASCII case.
    pub fn classify(role: Option<&str>) -> Self {
        role.and_then(|raw| {
            ROLE_SYNONYMS
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(raw))
                .map(|(_, class)| *class)
        })
        .unwrap_or(RoleClass::Unclassified)
    }

    /// True when this class meets a route's role requirement.
    pub fn satisfies(self, required: RoleClass) -> bool {
        self != RoleClass::Unclassified && self == required
    }

    /// The dashboard a signed-in user of this class lands on.
    pub fn home_dashboard(self) -> &'static str {
        match self {
            RoleClass::Admin => "/dashboard/admin",
            RoleClass::Student => "/dashboard/student",
            RoleClass::Professor => "/dashboard/professor",
            RoleClass::Unclassified => "/dashboard",
        }
    }

    /// Spanish label shown on the generic dashboard. Anything not admin or professor
    /// is shown as a student.
    pub fn label(self) -> &'static str {
        match self {
            RoleClass::Admin => "Administrador",
            RoleClass::Professor => "Profesor",
            _ => "Estudiante",
        }
    }
}

/// UserInfoCookie
///
/// Outcome of decoding the `user_info` cookie. Decoding never fails outward: a missing
/// cookie and an undecodable one both leave the role unknown.
///
/// The role is read on its own from any JSON object. The full [`UserInfo`] profile is
/// decoded separately and is `None` when other fields have unexpected types, which
/// never affects the role.
#[derive(Debug, Clone, PartialEq)]
pub enum UserInfoCookie {
    Absent,
    Invalid,
    Decoded {
        role: Option<String>,
        profile: Option<UserInfo>,
    },
}

impl UserInfoCookie {
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return UserInfoCookie::Absent;
        };
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(value @ Value::Object(_)) => value,
            Ok(other) => {
                tracing::debug!(kind = ?other, "ignoring non-object user_info cookie");
                return UserInfoCookie::Invalid;
            }
            Err(e) => {
                tracing::debug!(error = %e, "ignoring undecodable user_info cookie");
                return UserInfoCookie::Invalid;
            }
        };

        let role = value.get("role").and_then(Value::as_str).map(str::to_string);
        let profile = match serde_json::from_value::<UserInfo>(value) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!(error = %e, "user_info profile fields do not match; role kept");
                None
            }
        };
        UserInfoCookie::Decoded { role, profile }
    }

    pub fn user_info(&self) -> Option<&UserInfo> {
        match self {
            UserInfoCookie::Decoded { profile, .. } => profile.as_ref(),
            _ => None,
        }
    }

    pub fn role(&self) -> RoleClass {
        match self {
            UserInfoCookie::Decoded { role, .. } => RoleClass::classify(role.as_deref()),
            _ => RoleClass::Unclassified,
        }
    }
}

/// SessionCookies
///
/// The two cookies the front end relies on, lifted out of the request headers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCookies {
    // Opaque token. Only its presence is meaningful here; it is never validated.
    pub token: Option<String>,
    pub user_info: UserInfoCookie,
}

impl SessionCookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let token = extract_cookie(headers, SESSION_COOKIE).filter(|t| !t.is_empty());
        let user_info = UserInfoCookie::decode(extract_cookie(headers, USER_INFO_COOKIE).as_deref());
        Self { token, user_info }
    }

    pub fn has_session(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> RoleClass {
        self.user_info.role()
    }
}

/// Finds a cookie by name across every `Cookie` header, percent-decoding its value.
/// Pieces that do not parse are skipped. A repeated name resolves to its last value.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|header_value| header_value.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .filter_map(|piece| Cookie::parse_encoded(piece.trim().to_string()).ok())
        .filter(|c| c.name() == name)
        .map(|c| c.value().to_string())
        .last()
}

/// SessionUser
///
/// The signed-in visitor as seen by page handlers. The access guard has already routed
/// anonymous visitors to the login page; this extractor still rejects with
/// 401 Unauthorized when no session token is present.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub info: Option<UserInfo>,
    pub role: RoleClass,
}

impl SessionUser {
    /// Identifier recorded as a team's creator.
    pub fn user_id(&self) -> String {
        self.info
            .as_ref()
            .map(|info| info.id.clone())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| "current-user-id".to_string())
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookies = SessionCookies::from_headers(&parts.headers);
        if !cookies.has_session() {
            return Err(StatusCode::UNAUTHORIZED);
        }
        let role = cookies.role();
        let info = match cookies.user_info {
            UserInfoCookie::Decoded { profile, .. } => profile,
            _ => None,
        };
        Ok(SessionUser { info, role })
    }
}
