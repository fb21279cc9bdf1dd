//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own filesystem and persistence side effects so route
//! handlers can stay focused on request parsing and status mapping.

pub mod upload;
