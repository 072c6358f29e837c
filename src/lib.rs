//! # DevLinks
//!
//! `devlinks` is a link-in-bio service: users sign up, authenticate with a
//! cookie-held signed token, edit a public profile, and manage a list of
//! outbound links with per-link click tracking.
//!
//! ## Authentication
//!
//! Sessions are stateless: a signed `HS256` token carrying the user id is set
//! as an `HttpOnly` cookie at signup/login and verified on every request that
//! needs an identity. There is no server-side session store; logout clears the
//! cookie and the token ages out after its fixed 7-day window.
//!
//! ## Authorization
//!
//! Public profile reads and click tracking require no identity. Profile edits
//! require the authenticated user to own the target username. The session
//! guard additionally redirects page navigation (`/login`, `/signup`,
//! `/profile/...`) based on token state, ahead of any route handler.

pub mod api;
pub mod cli;
