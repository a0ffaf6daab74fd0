//! Authentication command handlers.

mod google_sign_in;
mod login;
mod signup;

pub use google_sign_in::{GoogleSignInCommand, GoogleSignInHandler, GoogleSignInResult};
pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use signup::{SignupCommand, SignupHandler, SignupResult};
