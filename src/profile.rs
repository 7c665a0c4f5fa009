use crate::error::CardError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The poster's identity, shown in the first card's header block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name next to the avatar
    pub username: String,
    /// Path to an avatar image on disk; when absent (or unreadable at
    /// render time) a placeholder with the username's initial is drawn
    pub avatar_path: Option<PathBuf>,
}

impl Default for UserProfile {
    fn default() -> UserProfile {
        UserProfile {
            username: "your name".to_string(),
            avatar_path: None,
        }
    }
}

impl UserProfile {
    /// The first character of the username, used by the avatar placeholder
    pub fn initial(&self) -> char {
        self.username.chars().next().unwrap_or('?')
    }
}

/// Persists a [UserProfile] as a small JSON file, read once at startup and
/// written on save
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// A store at the conventional per-user location,
    /// `<config dir>/card-gen/profile.json`
    pub fn new() -> Option<ProfileStore> {
        let path = dirs::config_dir()?
            .join(env!("CARGO_PKG_NAME"))
            .join("profile.json");
        Some(ProfileStore { path })
    }

    /// A store at an explicit path
    pub fn at<P: AsRef<Path>>(path: P) -> ProfileStore {
        ProfileStore {
            path: path.as_ref().to_owned(),
        }
    }

    /// Load the saved profile. A missing or unreadable file is not an
    /// error; the default profile is returned instead so the caller always
    /// has something to render with.
    pub fn load(&self) -> UserProfile {
        match fs::read_to_string(&self.path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(profile) => profile,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), %err, "profile file is corrupt, using defaults");
                    UserProfile::default()
                }
            },
            Err(_) => UserProfile::default(),
        }
    }

    /// Save the profile, creating parent directories as needed
    pub fn save(&self, profile: &UserProfile) -> Result<(), CardError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("card-gen-test-{}-{name}", std::process::id()))
            .join("profile.json")
    }

    #[test]
    fn roundtrips_through_disk() {
        let path = scratch_path("roundtrip");
        let store = ProfileStore::at(&path);
        let profile = UserProfile {
            username: "esthete".to_string(),
            avatar_path: Some(PathBuf::from("/tmp/avatar.png")),
        };

        store.save(&profile).unwrap();
        assert_eq!(store.load(), profile);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let store = ProfileStore::at("/definitely/not/a/real/path/profile.json");
        assert_eq!(store.load(), UserProfile::default());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{{{{ not json").unwrap();

        let store = ProfileStore::at(&path);
        assert_eq!(store.load(), UserProfile::default());

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn initial_falls_back_when_username_is_empty() {
        let mut profile = UserProfile::default();
        profile.username.clear();
        assert_eq!(profile.initial(), '?');
    }
}
