//! Customer account administration.

use flatmart_core::Username;
use flatmart_storefront::db::UserRepository;

use crate::error::Result;

/// Usernames of every customer, in file order.
///
/// # Errors
///
/// Returns a storage error if the users file cannot be read.
pub fn list_users(users: &UserRepository) -> Result<Vec<Username>> {
    Ok(users.all()?.into_iter().map(|u| u.username).collect())
}

/// Delete a customer account.
///
/// Returns `false` without touching the file when the username is blank or
/// unknown.
///
/// # Errors
///
/// Returns a storage error if the users file cannot be read or rewritten.
pub fn delete_user(users: &UserRepository, username: &str) -> Result<bool> {
    let deleted = users.delete(username)?;
    if !deleted {
        tracing::info!(username = username.trim(), "No such user to delete");
    }
    Ok(deleted)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use flatmart_core::Digest;
    use flatmart_storefront::models::User;

    use super::*;

    fn user(name: &str) -> User {
        User {
            username: Username::parse(name).unwrap(),
            password: Digest::of("secret1"),
            email: Digest::of("a@example.com"),
            phone: Digest::of("13800138000"),
        }
    }

    #[test]
    fn test_list_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.txt");
        let repo = UserRepository::new(&path);
        repo.create(&user("alice")).unwrap();
        repo.create(&user("bobby")).unwrap();

        let names: Vec<_> = list_users(&repo).unwrap().into_iter().map(Username::into_inner).collect();
        assert_eq!(names, ["alice", "bobby"]);

        let before = std::fs::read(&path).unwrap();
        assert!(!delete_user(&repo, "carol").unwrap());
        assert!(!delete_user(&repo, "").unwrap());
        assert_eq!(std::fs::read(&path).unwrap(), before);

        assert!(delete_user(&repo, "alice").unwrap());
        assert_eq!(list_users(&repo).unwrap().len(), 1);
    }
}
