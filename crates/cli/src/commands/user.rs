//! Customer menu: browsing, cart, checkout and history.

use std::io::{BufRead, Write};

use flatmart_core::GoodId;
use flatmart_storefront::AppError;
use flatmart_storefront::models::User;
use flatmart_storefront::services::cart::{Cart, CartChange};
use flatmart_storefront::services::checkout::{self, DiscountKind, RateSource};

use super::{CliError, Shell};
use crate::console::ConsoleError;

const USER_MENU: &[&str] = &[
    "1. Browse goods",
    "2. View cart",
    "3. Add to cart",
    "4. Modify cart",
    "5. Checkout",
    "6. Purchase history",
    "0. Logout",
];

impl<R: BufRead, W: Write, S: RateSource> Shell<R, W, S> {
    /// Run the customer menu until logout.
    ///
    /// Whatever is left in the cart goes back to stock when the session
    /// ends, including when input runs out.
    pub(super) fn user_session(&mut self, user: &User) -> Result<(), ConsoleError> {
        let mut cart = Cart::new();
        let outcome = self.user_loop(user, &mut cart);

        if !cart.is_empty() {
            match cart.release(self.state.catalog_mut()) {
                Ok(units) => {
                    tracing::info!(username = %user.username, units, "Cart released on logout");
                }
                Err(err) => {
                    let message = AppError::from(err).report();
                    tracing::warn!(username = %user.username, %message, "Could not release cart");
                }
            }
        }
        outcome
    }

    fn user_loop(&mut self, user: &User, cart: &mut Cart) -> Result<(), ConsoleError> {
        let title = format!("{}'s account", user.username);
        loop {
            let result = match self.menu(&title, USER_MENU)?.as_str() {
                "1" => self.browse(),
                "2" => self.view_cart(cart),
                "3" => self.add_to_cart(cart),
                "4" => self.modify_cart(cart),
                "5" => self.checkout(user, cart),
                "6" => self.purchase_history(user),
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

    fn browse(&mut self) -> Result<(), CliError> {
        let goods = self.state.catalog_mut().list()?;
        if goods.is_empty() {
            self.console.say("No goods available")?;
        }
        for good in goods {
            self.console.say(good)?;
        }
        Ok(())
    }

    fn view_cart(&mut self, cart: &Cart) -> Result<(), CliError> {
        if cart.is_empty() {
            self.console.say("Your cart is empty")?;
        }
        for item in cart.items() {
            self.console.say(item)?;
        }
        Ok(())
    }

    fn add_to_cart(&mut self, cart: &mut Cart) -> Result<(), CliError> {
        let id = self.ask_good_id()?;
        let Some(quantity) = self.console.ask_number("Quantity: ")? else {
            return Ok(());
        };
        let item = cart.add(self.state.catalog_mut(), &id, quantity)?;
        let message = format!("Added {quantity} x {} to your cart", item.good.name);
        self.console.say(message)?;
        Ok(())
    }

    fn modify_cart(&mut self, cart: &mut Cart) -> Result<(), CliError> {
        let id = self.ask_good_id()?;
        let Some(quantity) = self.console.ask_number("New quantity (0 to remove): ")? else {
            return Ok(());
        };
        let message = match cart.modify(self.state.catalog_mut(), &id, quantity)? {
            CartChange::Removed { .. } => format!("Removed {id} from your cart"),
            CartChange::Decreased { restored } => {
                format!("Quantity of {id} reduced by {restored}")
            }
            CartChange::Increased { taken } => format!("Quantity of {id} increased by {taken}"),
            CartChange::Unchanged => "Quantity unchanged".to_owned(),
        };
        self.console.say(message)?;
        Ok(())
    }

    fn checkout(&mut self, user: &User, cart: &mut Cart) -> Result<(), CliError> {
        let quote = checkout::quote(cart, &mut self.rates)?;

        for line in &quote.lines {
            self.console.say(format!(
                "{} x {} @ {} = {:.2}",
                line.name, line.quantity, line.unit_price, line.subtotal
            ))?;
        }
        self.console.say(format!("Total: {:.2}", quote.total))?;
        let rule = match quote.kind {
            DiscountKind::Random => "lucky draw".to_owned(),
            DiscountKind::Tiered { thousands } => format!("{thousands} x 1000 spent"),
        };
        self.console
            .say(format!("Discount rate: {:.2} ({rule})", quote.rate))?;
        self.console
            .say(format!("Amount due: {:.2}", quote.discounted))?;

        if !self.console.confirm("Confirm purchase? (y/n): ")? {
            self.console.say("Checkout cancelled")?;
            return Ok(());
        }
        self.state.checkout().confirm(&quote, cart, &user.username)?;
        self.console.say("Purchase complete. Thank you!")?;
        Ok(())
    }

    fn purchase_history(&mut self, user: &User) -> Result<(), CliError> {
        let purchases = self.state.purchases().for_user(&user.username)?;
        if purchases.is_empty() {
            self.console.say("No purchases yet")?;
        }
        for purchase in &purchases {
            self.console
                .say(format!("{} x {}", purchase.good_id, purchase.quantity))?;
        }
        Ok(())
    }

    fn ask_good_id(&mut self) -> Result<GoodId, CliError> {
        let raw = self.console.ask("Good ID: ")?;
        GoodId::parse(&raw).map_err(|e| CliError::App(AppError::BadInput(e.to_string())))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use flatmart_storefront::config::StoreConfig;
    use flatmart_storefront::db::GoodsRepository;

    use super::super::tests::session;

    const LOGIN: &str = "1\nalice\nhunter22\nalice@example.com\n13800138000\n2\nalice\nhunter22\n";

    fn stock(dir: &tempfile::TempDir, id: &str) -> u32 {
        let config = StoreConfig::in_dir(dir.path());
        GoodsRepository::new(config.goods_file)
            .all()
            .unwrap()
            .into_iter()
            .find(|g| g.id.as_str() == id)
            .unwrap()
            .stock
    }

    #[test]
    fn test_browse_sorted_by_price() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(&dir, &format!("{LOGIN}1\n0\n0\n"));
        let widget = out.find("[G1] Widget").unwrap();
        let gadget = out.find("[G2] Gadget").unwrap();
        assert!(widget < gadget);
    }

    #[test]
    fn test_checkout_flow() {
        let dir = tempfile::tempdir().unwrap();
        // 5 x 100 = 500 at the pinned 0.8 rate.
        let out = session(&dir, &format!("{LOGIN}3\nG1\n5\n2\n5\ny\n6\n0\n0\n"));

        assert!(out.contains("Added 5 x Widget to your cart"));
        assert!(out.contains("[G1] Widget x 5"));
        assert!(out.contains("Total: 500.00"));
        assert!(out.contains("Amount due: 400.00"));
        assert!(out.contains("Purchase complete"));
        assert!(out.contains("G1 x 5"));
        assert_eq!(stock(&dir, "G1"), 5);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("purchases.txt")).unwrap(),
            "alice,G1,5\n"
        );
    }

    #[test]
    fn test_oversized_checkout_is_refused_and_stock_returned() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("goods.txt"),
            "id,name,description,price,stock,category\n\
             BIG,Yacht,very large,79228162514264337593543950335,5,boats\n",
        )
        .unwrap();

        let out = session(&dir, &format!("{LOGIN}3\nBIG\n2\n5\n0\n0\n"));

        assert!(out.contains("Cart total is too large to check out"));
        assert!(!out.contains("Purchase complete"));
        assert_eq!(stock(&dir, "BIG"), 5);
        assert!(!dir.path().join("purchases.txt").exists());
    }

    #[test]
    fn test_tiered_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(&dir, &format!("{LOGIN}3\nG2\n5\n5\ny\n0\n0\n"));
        assert!(out.contains("Total: 2500.00"));
        assert!(out.contains("Discount rate: 0.96"));
        assert!(out.contains("Amount due: 2400.00"));
    }

    #[test]
    fn test_declined_checkout_keeps_cart() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(&dir, &format!("{LOGIN}3\nG1\n2\n5\nn\n2\n0\n0\n"));
        assert!(out.contains("Checkout cancelled"));
        assert!(out.contains("[G1] Widget x 2"));
        assert!(!dir.path().join("purchases.txt").exists());
        // Logging out returned the held units.
        assert_eq!(stock(&dir, "G1"), 10);
    }

    #[test]
    fn test_empty_cart_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let out = session(&dir, &format!("{LOGIN}5\n0\n0\n"));
        assert!(out.contains("Your cart is empty"));
        assert!(!dir.path().join("purchases.txt").exists());
    }

    #[test]
    fn test_cart_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("{LOGIN}3\nG1\n11\n3\nG9\n1\n3\nG1\nmany\n4\nG2\n1\n0\n0\n");
        let out = session(&dir, &script);
        assert!(out.contains("Insufficient stock (available: 10)"));
        assert!(out.contains("Good not found"));
        assert!(out.contains("Please enter a whole number"));
        assert!(out.contains("That good is not in your cart"));
    }

    #[test]
    fn test_modify_cart() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("{LOGIN}3\nG1\n4\n4\nG1\n6\n4\nG1\n0\n2\n0\n0\n");
        let out = session(&dir, &script);
        assert!(out.contains("Quantity of G1 increased by 2"));
        assert!(out.contains("Removed G1 from your cart"));
        assert_eq!(stock(&dir, "G1"), 10);
    }
}
