//! Request-time access control for every page navigation.
//!
//! The guard reads the session cookies, classifies the visitor's role and walks a
//! fixed sequence of rules. The first rule that fires decides the outcome, so the
//! order of the checks in [`GuardPolicy::evaluate`] is part of the contract.

use axum::{
    extract::{Request, State},
    http::Uri,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::{RoleClass, SessionCookies};

/// RouteRule
///
/// Restricts every path starting with `prefix` to visitors of class `role`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRule {
    pub prefix: &'static str,
    pub role: RoleClass,
}

/// Paths reachable without a session (exact match, or followed by `/`).
pub const PUBLIC_PATHS: &[&str] = &["/auth/login", "/auth/register", "/"];

/// Role-restricted areas, in evaluation order. The first matching prefix wins.
pub const ROUTE_RULES: &[RouteRule] = &[
    RouteRule { prefix: "/dashboard/admin", role: RoleClass::Admin },
    RouteRule { prefix: "/admin", role: RoleClass::Admin },
    RouteRule { prefix: "/dashboard/student", role: RoleClass::Student },
];

/// Asset prefixes let through regardless of session state.
pub const ASSET_PREFIXES: &[&str] = &["/_next", "/icons", "/images", "/favicon"];

/// Path segments (after the leading `/`) the guard is never invoked for.
pub const EXCLUDED_PREFIXES: &[&str] = &["api", "_next/static", "_next/image", "favicon.ico"];

const AUTH_PAGES: &[&str] = &["/auth/login", "/auth/register"];
const LOGIN_PATH: &str = "/auth/login";
const FALLBACK_DASHBOARD: &str = "/dashboard";

/// GuardDecision
///
/// The only two outcomes of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the router handle the request.
    Continue,
    /// Send the visitor to `path`. `next` is set only by the no-session redirect and
    /// carries the originally requested path for post-login return.
    Redirect { path: String, next: Option<String> },
}

impl GuardDecision {
    fn to(path: &str) -> Self {
        GuardDecision::Redirect {
            path: path.to_string(),
            next: None,
        }
    }
}

/// GuardPolicy
///
/// The immutable tables the guard consults. [`GuardPolicy::default`] carries the
/// production tables; other policies exist only to exercise the evaluation order.
#[derive(Debug, Clone, Copy)]
pub struct GuardPolicy {
    pub public_paths: &'static [&'static str],
    pub route_rules: &'static [RouteRule],
    pub asset_prefixes: &'static [&'static str],
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            public_paths: PUBLIC_PATHS,
            route_rules: ROUTE_RULES,
            asset_prefixes: ASSET_PREFIXES,
        }
    }
}

impl GuardPolicy {
    /// evaluate
    ///
    /// Decides what to do with a navigation to `path`. Each numbered step is terminal
    /// when it fires.
    pub fn evaluate(&self, path: &str, cookies: &SessionCookies) -> GuardDecision {
        // 1-2. Inputs and role classification.
        let has_session = cookies.has_session();
        let role = cookies.role();

        // 3. Signed-in visitors never see the login/register forms.
        if has_session && AUTH_PAGES.contains(&path) {
            return GuardDecision::to(role.home_dashboard());
        }

        // 4. Nor the anonymous landing page.
        if has_session && path == "/" {
            return GuardDecision::to(role.home_dashboard());
        }

        // 5. Assets and public pages, with or without a session.
        if self.is_asset(path) || self.is_public(path) {
            return GuardDecision::Continue;
        }

        // 6. Everything else needs a session.
        if !has_session {
            return GuardDecision::Redirect {
                path: LOGIN_PATH.to_string(),
                next: Some(path.to_string()),
            };
        }

        // 7. First matching rule only, not the most specific one.
        if let Some(rule) = self.first_rule(path) {
            if !role.satisfies(rule.role) {
                return GuardDecision::to(FALLBACK_DASHBOARD);
            }
        }

        // 8. No rule applies, or the visitor meets it.
        GuardDecision::Continue
    }

    pub fn first_rule(&self, path: &str) -> Option<&RouteRule> {
        self.route_rules.iter().find(|rule| path.starts_with(rule.prefix))
    }

    fn is_asset(&self, path: &str) -> bool {
        self.asset_prefixes.iter().any(|prefix| path.starts_with(prefix))
    }

    fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|public| {
            path == *public
                || path
                    .strip_prefix(public)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// is_excluded
///
/// Paths the guard is not mounted on at all: the API, framework build output and the
/// favicon. Matching is by prefix of the path with its leading slash removed, so
/// `/apidocs` is excluded as well.
pub fn is_excluded(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    EXCLUDED_PREFIXES.iter().any(|prefix| rest.starts_with(prefix))
}

/// redirect_location
///
/// Builds the `Location` for a redirect decision. The original query string is kept;
/// when `next` is given it replaces any existing `next` parameter.
pub fn redirect_location(uri: &Uri, path: &str, next: Option<&str>) -> String {
    let mut pairs: Vec<String> = uri
        .query()
        .map(|q| {
            q.split('&')
                .filter(|pair| !pair.is_empty())
                .filter(|pair| next.is_none() || pair.split('=').next() != Some("next"))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if let Some(next) = next {
        pairs.push(format!("next={}", urlencoding::encode(next)));
    }

    if pairs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, pairs.join("&"))
    }
}

/// access_guard
///
/// Axum middleware mounting [`GuardPolicy::evaluate`] in front of the router.
/// Redirects are issued as 307 Temporary Redirect.
pub async fn access_guard(
    State(policy): State<GuardPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if is_excluded(path) {
        return next.run(request).await;
    }

    let cookies = SessionCookies::from_headers(request.headers());
    match policy.evaluate(path, &cookies) {
        GuardDecision::Continue => next.run(request).await,
        GuardDecision::Redirect { path: target, next: return_to } => {
            let location = redirect_location(request.uri(), &target, return_to.as_deref());
            tracing::debug!(
                from = %request.uri().path(),
                to = %location,
                role = ?cookies.role(),
                "access guard redirect"
            );
            Redirect::temporary(&location).into_response()
        }
    }
}
