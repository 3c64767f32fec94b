/// Authentication and authorization
///
/// - [`session`]: verification of identity-provider session tokens
/// - [`middleware`]: the per-request [`middleware::AuthContext`] and its extractor
/// - [`authorization`]: role lookup and role/ownership checks
/// - [`webhook`]: signature verification for identity-provider webhooks

pub mod authorization;
pub mod middleware;
pub mod session;
pub mod webhook;
