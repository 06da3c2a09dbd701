//! Commands and outcomes for the identity registry.

use crate::model::{User, UserRole};

/// A login attempt. `name` may be omitted; a fresh account then gets a
/// role-specific placeholder name until a later login supplies one.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub shop_id: Option<String>,
}

#[derive(Debug)]
pub enum RegistryCommand {
    Login(LoginRequest),
    ResetPassword {
        email: String,
        new_password: String,
    },
    /// Fold an imported user list into the directory. Incoming records
    /// win on conflicting emails.
    Merge { users: Vec<User> },
}

#[derive(Debug)]
pub enum RegistryOutcome {
    LoggedIn(User),
    PasswordReset,
    Merged(MergeReport),
}

/// What a merge did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    pub replaced: usize,
}
