//! Application pages module
//!
//! - Home (protected)
//! - Profile (protected)
//! - Login (anonymous only)
//! - Not found

mod home;
mod layout;
mod login;
mod not_found;
mod profile;

pub use home::HomePage;
pub use layout::ProtectedLayout;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use profile::ProfilePage;
