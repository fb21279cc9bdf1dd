//! Page views — view models composed from storage and the carousel engine.
//!
//! ARCHITECTURE
//! ============
//! Each view owns its fetched copy of the data it renders. Long-lived views
//! (the home carousel) guard their asynchronous fetches with a `ViewScope`
//! so a torn-down view never applies a late result. Request-scoped views
//! (directory, courses, admin editor) fetch, build, and are dropped.

pub mod carousel_admin;
pub mod courses;
pub mod home;
pub mod projects;
pub mod scope;
pub mod users;

pub use scope::ViewScope;

/// Case-insensitive substring match; an absent or blank query matches all.
pub(crate) fn matches_query(haystacks: &[&str], query: Option<&str>) -> bool {
    let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
        return true;
    };
    let needle = query.to_lowercase();
    haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
}
