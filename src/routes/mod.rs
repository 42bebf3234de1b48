/// Router Module Index
///
/// Splits the pages by who may reach them. Access control itself is the access
/// guard middleware applied over all of them in `create_router`.

/// Pages reachable without a session, plus the health probe.
pub mod public;

/// Pages for any signed-in visitor.
pub mod authenticated;

/// Administrator-only pages.
pub mod admin;
