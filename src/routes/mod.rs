//! Router Module Index
//!
//! Splits the HTTP surface by access level. The admin module is wrapped in
//! `admin_guard` at merge time in `create_router`, so nothing in it can be
//! reached without passing the session gate.

/// Routes open to every visitor.
pub mod public;

/// Routes restricted to sessions for which `can_access_admin` holds.
pub mod admin;
