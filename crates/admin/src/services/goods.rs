//! Catalog maintenance.
//!
//! Every write goes through [`Catalog`] so the session's cached view stays in
//! step with the file.

use flatmart_core::{GoodId, Price, check_field};
use flatmart_storefront::models::Good;
use flatmart_storefront::services::catalog::{Catalog, CatalogError};

use crate::error::{AdminError, Result};

/// Unvalidated good fields as typed by an admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoodDraft {
    /// Good ID; must be non-empty.
    pub id: String,
    /// Display name; must be non-empty.
    pub name: String,
    /// Free text; may be empty.
    pub description: String,
    /// Non-negative decimal.
    pub price: String,
    /// Whole number of units.
    pub stock: String,
    /// Category label; may be empty.
    pub category: String,
}

impl GoodDraft {
    /// Validate every field and build the good.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::MissingField` for a blank id or name,
    /// `AdminError::InvalidPrice`/`AdminError::InvalidStock` for a negative or
    /// non-numeric value, and `AdminError::InvalidText` for text the file
    /// format cannot hold.
    pub fn validate(&self) -> Result<Good> {
        if self.id.trim().is_empty() {
            return Err(AdminError::MissingField("id"));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AdminError::MissingField("name"));
        }
        let description = self.description.trim();
        let category = self.category.trim();
        for (field, value) in [
            ("name", name),
            ("description", description),
            ("category", category),
        ] {
            check_field(value).map_err(|source| AdminError::InvalidText { field, source })?;
        }

        let stock = self.stock.trim();
        Ok(Good {
            id: GoodId::parse(&self.id)?,
            name: name.to_owned(),
            description: description.to_owned(),
            price: Price::parse(&self.price)?,
            stock: stock
                .parse()
                .map_err(|_| AdminError::InvalidStock(stock.to_owned()))?,
            category: category.to_owned(),
        })
    }
}

/// Validate and append a new good.
///
/// IDs are not checked for uniqueness.
///
/// # Errors
///
/// Returns a validation error (nothing written) or a storage error.
pub fn add_good(catalog: &mut Catalog, draft: &GoodDraft) -> Result<Good> {
    let good = draft.validate()?;
    if catalog.by_id(&good.id).is_some() {
        tracing::warn!(good_id = %good.id, "Adding a good with an ID that already exists");
    }
    catalog.insert(&good)?;
    Ok(good)
}

/// Replace the good with ID `id` by the validated draft.
///
/// The draft's own `id` is ignored.
///
/// # Errors
///
/// Returns `AdminError::Catalog` with `CatalogError::NotFound` for an
/// unknown ID, a validation error (nothing written), or a storage error.
pub fn modify_good(catalog: &mut Catalog, id: &str, draft: &GoodDraft) -> Result<Good> {
    let id = GoodId::parse(id)?;
    catalog.refresh()?;
    if catalog.by_id(&id).is_none() {
        return Err(CatalogError::NotFound(id).into());
    }

    let good = GoodDraft {
        id: id.to_string(),
        ..draft.clone()
    }
    .validate()?;
    catalog.replace(&good)?;
    tracing::info!(good_id = %good.id, "Good modified");
    Ok(good)
}

/// Delete the good with ID `id`.
///
/// # Errors
///
/// Returns `AdminError::Catalog` with `CatalogError::NotFound` (file left
/// untouched) for an unknown ID, or a storage error.
pub fn delete_good(catalog: &mut Catalog, id: &str) -> Result<()> {
    let id = GoodId::parse(id)?;
    catalog.remove(&id)?;
    Ok(())
}

/// Every good, cheapest first.
///
/// # Errors
///
/// Returns a storage error if the goods file cannot be read.
pub fn list_goods(catalog: &mut Catalog) -> Result<&[Good]> {
    Ok(catalog.list()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use flatmart_core::{FieldError, PriceError};
    use flatmart_storefront::db::GoodsRepository;

    use super::*;

    fn draft(id: &str, price: &str, stock: &str) -> GoodDraft {
        GoodDraft {
            id: id.to_owned(),
            name: format!("Good {id}"),
            description: "plain".to_owned(),
            price: price.to_owned(),
            stock: stock.to_owned(),
            category: "misc".to_owned(),
        }
    }

    fn catalog() -> (tempfile::TempDir, Catalog) {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::open(GoodsRepository::new(dir.path().join("goods.txt"))).unwrap();
        (dir, catalog)
    }

    #[test]
    fn test_validate() {
        let good = draft(" G1 ", "12.50", " 3 ").validate().unwrap();
        assert_eq!(good.id.as_str(), "G1");
        assert_eq!(good.stock, 3);

        let mut blank_name = draft("G1", "1", "1");
        blank_name.name = "  ".to_owned();
        assert!(matches!(blank_name.validate(), Err(AdminError::MissingField("name"))));
        assert!(matches!(
            draft("", "1", "1").validate(),
            Err(AdminError::MissingField("id"))
        ));
        assert!(matches!(
            draft("G1", "-1", "1").validate(),
            Err(AdminError::InvalidPrice(PriceError::Negative))
        ));
        assert!(matches!(
            draft("G1", "abc", "1").validate(),
            Err(AdminError::InvalidPrice(PriceError::Invalid(_)))
        ));
        assert!(matches!(
            draft("G1", "1", "-2").validate(),
            Err(AdminError::InvalidStock(_))
        ));

        let mut comma = draft("G1", "1", "1");
        comma.description = "red, large".to_owned();
        assert!(matches!(
            comma.validate(),
            Err(AdminError::InvalidText {
                field: "description",
                source: FieldError::Reserved { found: ',' }
            })
        ));
    }

    #[test]
    fn test_add_modify_delete() {
        let (dir, mut catalog) = catalog();
        add_good(&mut catalog, &draft("G1", "5", "2")).unwrap();
        add_good(&mut catalog, &draft("G2", "1", "2")).unwrap();

        let mut changed = draft("ignored", "7", "9");
        changed.name = "Renamed".to_owned();
        let good = modify_good(&mut catalog, "G1", &changed).unwrap();
        assert_eq!(good.id.as_str(), "G1");
        assert_eq!(good.name, "Renamed");

        let listed: Vec<_> = list_goods(&mut catalog)
            .unwrap()
            .iter()
            .map(|g| (g.id.to_string(), g.stock))
            .collect();
        assert_eq!(listed, [("G2".to_owned(), 2), ("G1".to_owned(), 9)]);

        delete_good(&mut catalog, "G2").unwrap();
        let text = std::fs::read_to_string(dir.path().join("goods.txt")).unwrap();
        assert_eq!(
            text,
            "id,name,description,price,stock,category\nG1,Renamed,plain,7,9,misc\n"
        );
    }

    #[test]
    fn test_unknown_ids() {
        let (dir, mut catalog) = catalog();
        add_good(&mut catalog, &draft("G1", "5", "2")).unwrap();
        let before = std::fs::read(dir.path().join("goods.txt")).unwrap();

        assert!(matches!(
            modify_good(&mut catalog, "G9", &draft("G9", "1", "1")),
            Err(AdminError::Catalog(CatalogError::NotFound(_)))
        ));
        assert!(matches!(
            delete_good(&mut catalog, "G9"),
            Err(AdminError::Catalog(CatalogError::NotFound(_)))
        ));
        assert_eq!(std::fs::read(dir.path().join("goods.txt")).unwrap(), before);
    }

    #[test]
    fn test_invalid_modify_writes_nothing() {
        let (dir, mut catalog) = catalog();
        add_good(&mut catalog, &draft("G1", "5", "2")).unwrap();
        let before = std::fs::read(dir.path().join("goods.txt")).unwrap();

        assert!(modify_good(&mut catalog, "G1", &draft("G1", "-5", "2")).is_err());
        assert_eq!(std::fs::read(dir.path().join("goods.txt")).unwrap(), before);
    }
}
