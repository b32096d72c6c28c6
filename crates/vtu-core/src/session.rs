use crate::api::types::User;

/// In-process session store.
///
/// Holds the profile of the currently authenticated user, if any. The bearer
/// token itself lives inside [`crate::ApiClient`]; this store is what the
/// interpreter consults to gate authenticated flows and report balance.
/// Nothing here survives the process.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn clear(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
