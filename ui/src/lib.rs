//! Shared UI crate for Pulseboard. Cross-platform logic and views live here.

pub mod core;
pub mod insights;
pub mod views;

pub mod components {
    // Shared application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}
