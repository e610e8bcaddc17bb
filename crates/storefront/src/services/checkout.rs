//! Checkout and discount policy.
//!
//! Totals under 1000 get a random rate drawn from a [`RateSource`]; larger
//! totals get 2% off per full thousand, never below zero.

use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;

use flatmart_core::{GoodId, Price, Username};

use super::cart::Cart;
use crate::db::{PurchaseRepository, RepositoryError};
use crate::models::Purchase;

/// Totals at or above this use the tiered rate.
const TIER_THRESHOLD: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Rate reduction per full thousand (0.02).
const TIER_STEP: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Random rates are drawn in basis points from this range (0.7001..=0.8999).
const RANDOM_RATE_BP: core::ops::Range<i64> = 7001..9000;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("cart is empty")]
    EmptyCart,

    /// A line subtotal or the cart total does not fit in a `Decimal`.
    #[error("cart total is too large")]
    TotalOverflow,

    /// Writing the purchase log failed.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Supplier of the discount rate for totals below the tier threshold.
pub trait RateSource {
    /// Draw a rate in `(0, 1)`.
    fn draw(&mut self) -> Decimal;
}

/// Uniformly random rate between 0.70 and 0.90 (exclusive).
#[derive(Debug)]
pub struct RandomRate<R> {
    rng: R,
}

impl RandomRate<rand::rngs::ThreadRng> {
    /// Random rates from the thread-local generator.
    #[must_use]
    pub fn thread_local() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> RandomRate<R> {
    /// Random rates from a caller-supplied generator.
    #[must_use]
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RateSource for RandomRate<R> {
    fn draw(&mut self) -> Decimal {
        Decimal::new(self.rng.random_range(RANDOM_RATE_BP), 4)
    }
}

/// Always the same rate.
#[derive(Debug, Clone, Copy)]
pub struct FixedRate(pub Decimal);

impl RateSource for FixedRate {
    fn draw(&mut self) -> Decimal {
        self.0
    }
}

/// Which branch of the discount policy priced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    /// Random rate for small totals.
    Random,
    /// Tiered rate; `thousands` is `floor(total / 1000)`.
    Tiered {
        /// Full thousands in the total.
        thousands: Decimal,
    },
}

/// One priced cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteLine {
    /// Good being bought.
    pub good_id: GoodId,
    /// Name shown on the receipt.
    pub name: String,
    /// Price per unit at quote time.
    pub unit_price: Price,
    /// Units bought.
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub subtotal: Decimal,
}

/// A priced cart awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Lines in cart order.
    pub lines: Vec<QuoteLine>,
    /// Undiscounted sum of line subtotals.
    pub total: Decimal,
    /// Multiplier applied to `total`.
    pub rate: Decimal,
    /// How `rate` was chosen.
    pub kind: DiscountKind,
    /// `total * rate`, rounded to cents.
    pub discounted: Decimal,
}

/// Discount rate for `total`, drawing from `source` below the threshold.
#[must_use]
pub fn discount_rate(total: Decimal, source: &mut impl RateSource) -> (Decimal, DiscountKind) {
    if total < TIER_THRESHOLD {
        return (source.draw(), DiscountKind::Random);
    }
    let thousands = (total / TIER_THRESHOLD).floor();
    let rate = (Decimal::ONE - TIER_STEP * thousands).max(Decimal::ZERO);
    (rate, DiscountKind::Tiered { thousands })
}

/// Price the cart.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if there is nothing to price, or
/// `CheckoutError::TotalOverflow` if an amount does not fit in a `Decimal`.
/// The cart is left as it was in both cases.
pub fn quote(cart: &Cart, source: &mut impl RateSource) -> Result<Quote, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let lines = cart
        .items()
        .iter()
        .map(|item| {
            Ok(QuoteLine {
                good_id: item.good.id.clone(),
                name: item.good.name.clone(),
                unit_price: item.good.price,
                quantity: item.quantity,
                subtotal: item.subtotal().ok_or(CheckoutError::TotalOverflow)?,
            })
        })
        .collect::<Result<Vec<_>, CheckoutError>>()?;
    let total = lines
        .iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.subtotal))
        .ok_or(CheckoutError::TotalOverflow)?;
    let (rate, kind) = discount_rate(total, source);
    let discounted = total
        .checked_mul(rate)
        .ok_or(CheckoutError::TotalOverflow)?
        .round_dp(2);

    Ok(Quote {
        lines,
        total,
        rate,
        kind,
        discounted,
    })
}

/// Turns confirmed quotes into purchase records.
#[derive(Debug, Clone)]
pub struct Checkout {
    purchases: PurchaseRepository,
}

impl Checkout {
    /// Checkout writing to `purchases`.
    #[must_use]
    pub const fn new(purchases: PurchaseRepository) -> Self {
        Self { purchases }
    }

    /// Record one purchase per quoted line and clear the cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for a quote with no lines, or
    /// `CheckoutError::Repository` if the log cannot be written; the cart is
    /// kept in both cases.
    pub fn confirm(
        &self,
        quote: &Quote,
        cart: &mut Cart,
        username: &Username,
    ) -> Result<Vec<Purchase>, CheckoutError> {
        if quote.lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let purchases: Vec<Purchase> = quote
            .lines
            .iter()
            .map(|line| Purchase {
                username: username.clone(),
                good_id: line.good_id.clone(),
                quantity: line.quantity,
            })
            .collect();

        self.purchases.record_all(&purchases)?;
        cart.clear();
        tracing::info!(
            username = %username,
            lines = purchases.len(),
            total = %quote.total,
            paid = %quote.discounted,
            "Checkout completed"
        );
        Ok(purchases)
    }
}
