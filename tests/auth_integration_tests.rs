use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, Method, Request, StatusCode, Uri, header, request::Parts},
};
use innosistemas_web::auth::{RoleClass, SessionCookies, SessionUser, UserInfoCookie};

// --- Helper Functions ---

/// Helper to get the mutable Parts struct from a generated Request
fn get_request_parts(method: Method, uri: Uri, cookie: Option<&str>) -> Parts {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder.body(axum::body::Body::empty()).unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn headers_with(cookies: &[&str]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for cookie in cookies {
        headers.append(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
    }
    headers
}

// --- Role classification ---

#[test]
fn test_classify_accepts_bilingual_synonyms() {
    assert_eq!(RoleClass::classify(Some("admin")), RoleClass::Admin);
    assert_eq!(RoleClass::classify(Some("Administrador")), RoleClass::Admin);
    assert_eq!(RoleClass::classify(Some("student")), RoleClass::Student);
    assert_eq!(RoleClass::classify(Some("Estudiante")), RoleClass::Student);
    assert_eq!(RoleClass::classify(Some("professor")), RoleClass::Professor);
    assert_eq!(RoleClass::classify(Some("Profesor")), RoleClass::Professor);
}

#[test]
fn test_classify_ignores_case() {
    assert_eq!(RoleClass::classify(Some("ADMIN")), RoleClass::Admin);
    assert_eq!(RoleClass::classify(Some("eStUdIaNtE")), RoleClass::Student);
}

#[test]
fn test_classify_unknown_roles() {
    assert_eq!(RoleClass::classify(None), RoleClass::Unclassified);
    assert_eq!(RoleClass::classify(Some("")), RoleClass::Unclassified);
    assert_eq!(RoleClass::classify(Some("teacher")), RoleClass::Unclassified);
    assert_eq!(RoleClass::classify(Some(" admin")), RoleClass::Unclassified);
}

#[test]
fn test_unclassified_satisfies_nothing() {
    for required in [
        RoleClass::Admin,
        RoleClass::Student,
        RoleClass::Professor,
        RoleClass::Unclassified,
    ] {
        assert!(!RoleClass::Unclassified.satisfies(required));
    }
    assert!(RoleClass::Admin.satisfies(RoleClass::Admin));
    assert!(!RoleClass::Admin.satisfies(RoleClass::Student));
}

// --- Cookie decoding ---

#[test]
fn test_user_info_decode_variants() {
    assert_eq!(UserInfoCookie::decode(None), UserInfoCookie::Absent);
    assert_eq!(UserInfoCookie::decode(Some("{oops")), UserInfoCookie::Invalid);
    assert_eq!(UserInfoCookie::decode(Some("null")), UserInfoCookie::Invalid);

    let decoded = UserInfoCookie::decode(Some(r#"{"name":"Ana","role":"Estudiante"}"#));
    let info = decoded.user_info().unwrap();
    assert_eq!(info.name, "Ana");
    assert_eq!(decoded.role(), RoleClass::Student);
}

#[test]
fn test_user_info_without_role_is_unclassified() {
    let decoded = UserInfoCookie::decode(Some(r#"{"id":"7","email":"a@udea.edu.co"}"#));
    assert!(matches!(decoded, UserInfoCookie::Decoded { .. }));
    assert_eq!(decoded.role(), RoleClass::Unclassified);
}

#[test]
fn test_role_survives_mistyped_profile_fields() {
    let decoded = UserInfoCookie::decode(Some(r#"{"role":"admin","id":42,"courseIds":[1,2],"name":null}"#));
    assert_eq!(decoded.role(), RoleClass::Admin);
    assert!(decoded.user_info().is_none());

    let decoded = UserInfoCookie::decode(Some(r#"{"role":"Estudiante","permissions":null}"#));
    assert_eq!(decoded.role(), RoleClass::Student);
}

#[test]
fn test_session_cookies_percent_decoded() {
    let encoded = urlencoding::encode(r#"{"role":"admin","name":"Root; User"}"#);
    let headers = headers_with(&[&format!("theme=dark; auth_token=abc; user_info={}", encoded)]);
    let cookies = SessionCookies::from_headers(&headers);

    assert_eq!(cookies.token.as_deref(), Some("abc"));
    assert!(cookies.has_session());
    assert_eq!(cookies.role(), RoleClass::Admin);
    assert_eq!(cookies.user_info.user_info().unwrap().name, "Root; User");
}

#[test]
fn test_session_cookies_across_multiple_headers() {
    let headers = headers_with(&["auth_token=abc", r#"user_info={"role":"profesor"}"#]);
    let cookies = SessionCookies::from_headers(&headers);
    assert!(cookies.has_session());
    assert_eq!(cookies.role(), RoleClass::Professor);
}

#[test]
fn test_repeated_cookie_takes_last_value() {
    let cookies = SessionCookies::from_headers(&headers_with(&["auth_token=; auth_token=abc"]));
    assert_eq!(cookies.token.as_deref(), Some("abc"));
    assert!(cookies.has_session());

    let cookies = SessionCookies::from_headers(&headers_with(&["auth_token=abc", "auth_token="]));
    assert!(!cookies.has_session());

    let headers = headers_with(&[r#"user_info={"role":"student"}; user_info={"role":"admin"}"#]);
    assert_eq!(SessionCookies::from_headers(&headers).role(), RoleClass::Admin);
}

#[test]
fn test_missing_cookies() {
    let cookies = SessionCookies::from_headers(&HeaderMap::new());
    assert!(!cookies.has_session());
    assert_eq!(cookies.user_info, UserInfoCookie::Absent);
    assert_eq!(cookies.role(), RoleClass::Unclassified);
}

// --- SessionUser extractor ---

#[tokio::test]
async fn test_session_user_resolved_from_cookies() {
    let cookie = format!(
        "auth_token=abc; user_info={}",
        urlencoding::encode(r#"{"id":"42","name":"Ana","role":"student"}"#)
    );
    let mut parts = get_request_parts(Method::GET, "/dashboard".parse().unwrap(), Some(&cookie));

    let user = SessionUser::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(user.role, RoleClass::Student);
    assert_eq!(user.user_id(), "42");
    assert_eq!(user.info.unwrap().name, "Ana");
}

#[tokio::test]
async fn test_session_user_keeps_role_when_profile_mistyped() {
    let cookie = format!(
        "auth_token=abc; user_info={}",
        urlencoding::encode(r#"{"id":42,"role":"admin"}"#)
    );
    let mut parts = get_request_parts(Method::GET, "/admin".parse().unwrap(), Some(&cookie));

    let user = SessionUser::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(user.role, RoleClass::Admin);
    assert!(user.info.is_none());
    assert_eq!(user.user_id(), "current-user-id");
}

#[tokio::test]
async fn test_session_user_without_user_info() {
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap(), Some("auth_token=abc"));

    let user = SessionUser::from_request_parts(&mut parts, &()).await.unwrap();
    assert_eq!(user.role, RoleClass::Unclassified);
    assert!(user.info.is_none());
    assert_eq!(user.user_id(), "current-user-id");
}

#[tokio::test]
async fn test_session_user_rejects_missing_token() {
    let mut parts = get_request_parts(
        Method::GET,
        "/".parse().unwrap(),
        Some(r#"user_info={"role":"admin"}"#),
    );

    let result = SessionUser::from_request_parts(&mut parts, &()).await;
    assert_eq!(result.unwrap_err(), StatusCode::UNAUTHORIZED);
}
