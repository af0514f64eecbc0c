use serde::{Deserialize, Serialize};

/// Identity returned by the sign-in provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl AuthUser {
    /// Name stamped as `author` on new posts.
    pub fn author_name(&self) -> String {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("Admin")
            .to_string()
    }
}
