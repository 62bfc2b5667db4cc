//! Authentication actions.
//!
//! Each action is a small struct built from the collaborators it needs and
//! run with `execute`. [`AuthManager`](crate::AuthManager) wires them to the
//! store's configuration; they can also be used directly with any
//! [`UserRepository`](crate::UserRepository).

mod forgot_password;
mod login;
mod logout;
mod register;
mod restore_session;

use std::time::Duration;

pub use forgot_password::ForgotPasswordAction;
pub use login::LoginAction;
pub use logout::LogoutAction;
pub use register::RegisterAction;
pub use restore_session::RestoreSessionAction;

/// Waits out the artificial network delay. Dropping the future before it
/// completes abandons the action before anything is written.
async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}
