mod home;
pub use home::Home;

mod insights;
pub use insights::Insights;
