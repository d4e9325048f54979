//! Authentication UI module
//!
//! This module provides the auth context and the login form.

mod context;
mod login_form;

pub use context::{
    AuthContext, CurrentUserQuery, provide_auth_context, use_auth_context, use_current_user,
    use_next_collections,
};
pub use login_form::LoginForm;
