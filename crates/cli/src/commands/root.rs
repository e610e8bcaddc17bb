//! Root menu: accounts and session entry.

use std::io::{BufRead, Write};

use flatmart_admin::services::AdminAuth;
use flatmart_storefront::services::auth::{AuthService, Registration};
use flatmart_storefront::services::checkout::RateSource;

use super::{CliError, Shell};
use crate::console::ConsoleError;

const ROOT_MENU: &[&str] = &[
    "1. Register",
    "2. Login",
    "3. Admin login",
    "4. Recover password",
    "0. Exit",
];

impl<R: BufRead, W: Write, S: RateSource> Shell<R, W, S> {
    /// Run the root menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::Io` if the terminal fails. End of input is a
    /// normal exit.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        match self.root_loop() {
            Ok(()) | Err(ConsoleError::Closed) => {
                tracing::info!("Session ended");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn root_loop(&mut self) -> Result<(), ConsoleError> {
        loop {
            let result = match self.menu("Flatmart", ROOT_MENU)?.as_str() {
                "1" => self.register(),
                "2" => self.login(),
                "3" => self.admin_login(),
                "4" => self.recover_password(),
                "0" => {
                    self.console.say("Goodbye!")?;
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

    fn register(&mut self) -> Result<(), CliError> {
        let registration = Registration {
            username: self.console.ask("Username (3-20 characters): ")?,
            password: self.console.ask_secret("Password (6-20 characters): ")?,
            email: self.console.ask("Email: ")?,
            phone: self.console.ask("Phone (11 digits): ")?,
        };
        let user = self.state.auth().register(registration)?;
        self.console
            .say(format!("Registration successful. Welcome, {}!", user.username))?;
        Ok(())
    }

    fn login(&mut self) -> Result<(), CliError> {
        let username = self.console.ask("Username: ")?;
        let password = self.console.ask_secret("Password: ")?;
        let user = self.state.auth().login(&username, &password)?;

        self.console.say(format!("Welcome back, {}!", user.username))?;
        self.user_session(&user)?;
        Ok(())
    }

    fn admin_login(&mut self) -> Result<(), CliError> {
        let username = self.console.ask("Admin username: ")?;
        let password = self.console.ask_secret("Admin password: ")?;
        let admin = AdminAuth::new(&self.admins).login(&username, &password)?;

        self.console.say(format!("Logged in as admin {}", admin.username))?;
        self.admin_session()?;
        Ok(())
    }

    fn recover_password(&mut self) -> Result<(), CliError> {
        let username = self.console.ask("Username: ")?;
        let user = self.state.auth().begin_recovery(&username)?;

        let email = self.console.ask("Registered email: ")?;
        let phone = self.console.ask("Registered phone: ")?;
        AuthService::verify_identity(&user, &email, &phone)?;

        let password = self.console.ask_secret("New password (6-20 characters): ")?;
        self.state.auth().reset_password(&user, password)?;
        self.console.say("Password reset. You can now log in.")?;
        Ok(())
    }
}
