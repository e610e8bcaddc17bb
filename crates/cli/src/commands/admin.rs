//! Admin menu: goods and customer maintenance.

use std::io::{BufRead, Write};

use flatmart_admin::AdminError;
use flatmart_admin::services::{self, GoodDraft};
use flatmart_core::GoodId;
use flatmart_storefront::services::catalog::CatalogError;
use flatmart_storefront::services::checkout::RateSource;

use super::{CliError, Shell};
use crate::console::ConsoleError;

const ADMIN_MENU: &[&str] = &[
    "1. Add good",
    "2. Modify good",
    "3. Delete good",
    "4. List goods",
    "5. List users",
    "6. Delete user",
    "0. Logout",
];

impl<R: BufRead, W: Write, S: RateSource> Shell<R, W, S> {
    /// Run the admin menu until logout.
    pub(super) fn admin_session(&mut self) -> Result<(), ConsoleError> {
        loop {
            let result = match self.menu("Admin", ADMIN_MENU)?.as_str() {
                "1" => self.add_good(),
                "2" => self.modify_good(),
                "3" => self.delete_good(),
                "4" => self.list_goods(),
                "5" => self.list_users(),
                "6" => self.delete_user(),
                "0" => {
                    self.console.say("Logged out")?;
                    return Ok(());
                }
                _ => {
                    self.console.say("Invalid option, please try again")?;
                    Ok(())
                }
            };
            self.settle(result)?;
        }
    }

    fn ask_good_fields(&mut self, id: String) -> Result<GoodDraft, ConsoleError> {
        Ok(GoodDraft {
            id,
            name: self.console.ask("Name: ")?,
            description: self.console.ask("Description: ")?,
            price: self.console.ask("Price: ")?,
            stock: self.console.ask("Stock: ")?,
            category: self.console.ask("Category: ")?,
        })
    }

    fn add_good(&mut self) -> Result<(), CliError> {
        let id = self.console.ask("Good ID: ")?;
        let draft = self.ask_good_fields(id)?;
        let good = services::add_good(self.state.catalog_mut(), &draft)?;
        self.console.say(format!("Added {good}"))?;
        Ok(())
    }

    fn modify_good(&mut self) -> Result<(), CliError> {
        let raw = self.console.ask("Good ID to modify: ")?;
        let id = GoodId::parse(&raw).map_err(AdminError::from)?;
        let catalog = self.state.catalog_mut();
        catalog.refresh()?;
        let Some(current) = catalog.by_id(&id) else {
            return Err(AdminError::from(CatalogError::NotFound(id)).into());
        };
        let current = current.to_string();

        self.console.say(format!("Current: {current}"))?;
        let draft = self.ask_good_fields(id.to_string())?;
        let good = services::modify_good(self.state.catalog_mut(), id.as_str(), &draft)?;
        self.console.say(format!("Updated {good}"))?;
        Ok(())
    }

    fn delete_good(&mut self) -> Result<(), CliError> {
        let id = self.console.ask("Good ID to delete: ")?;
        services::delete_good(self.state.catalog_mut(), &id)?;
        self.console.say(format!("Deleted good {}", id.trim()))?;
        Ok(())
    }

    fn list_goods(&mut self) -> Result<(), CliError> {
        let goods = services::list_goods(self.state.catalog_mut())?;
        if goods.is_empty() {
            self.console.say("No goods in the catalog")?;
        }
        for good in goods {
            self.console.say(good)?;
        }
        Ok(())
    }

    fn list_users(&mut self) -> Result<(), CliError> {
        let users = services::list_users(self.state.users())?;
        if users.is_empty() {
            self.console.say("No registered users")?;
        }
        for username in &users {
            self.console.say(username)?;
        }
        Ok(())
    }

    fn delete_user(&mut self) -> Result<(), CliError> {
        let username = self.console.ask("Username to delete: ")?;
        if services::delete_user(self.state.users(), &username)? {
            self.console.say(format!("Deleted user {}", username.trim()))?;
        } else {
            self.console.say("User not found")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::tests::session;

    const ADMIN: &str = "3\nroot\nletmein\n";

    #[test]
    fn test_add_list_delete_goods() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "{ADMIN}1\nG3\nSprocket\nsteel sprocket\n2.50\n40\nparts\n4\n3\nG1\n4\n0\n0\n"
        );
        let out = session(&dir, &script);
        assert!(out.contains("Added [G3] Sprocket"));
        assert!(out.contains("Deleted good G1"));

        let text = std::fs::read_to_string(dir.path().join("goods.txt")).unwrap();
        assert!(text.contains("G3,Sprocket,steel sprocket,2.50,40,parts\n"));
        assert!(!text.contains("G1,"));
    }

    #[test]
    fn test_invalid_good_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "{ADMIN}1\nG3\nSprocket\nsteel, large\n2.50\n40\nparts\n\
             1\nG4\nBolt\nbolt\n-1\n40\nparts\n0\n0\n"
        );
        let out = session(&dir, &script);
        assert!(out.contains("invalid description"));
        assert!(out.contains("price cannot be negative"));
        let text = std::fs::read_to_string(dir.path().join("goods.txt")).unwrap();
        assert!(!text.contains("G3"));
        assert!(!text.contains("G4"));
    }

    #[test]
    fn test_modify_good() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "{ADMIN}2\nG9\n2\nG1\nWidget Pro\nshiny\n120\n8\ntools\n0\n0\n"
        );
        let out = session(&dir, &script);
        assert!(out.contains("Good G9 not found"));
        assert!(out.contains("Current: [G1] Widget"));
        assert!(out.contains("Updated [G1] Widget Pro"));
    }

    #[test]
    fn test_delete_unknown_good() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(&dir, &format!("{ADMIN}3\nG9\n0\n0\n"));
        assert!(out.contains("Good G9 not found"));
    }

    #[test]
    fn test_list_and_delete_users() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!(
            "1\nalice\nhunter22\nalice@example.com\n13800138000\n\
             {ADMIN}5\n6\nmallory\n6\nalice\n5\n0\n0\n"
        );
        let out = session(&dir, &script);
        assert!(out.contains("Choose an option: alice\n"));
        assert!(out.contains("User not found"));
        assert!(out.contains("Deleted user alice"));
        assert!(out.contains("No registered users"));
    }
}
