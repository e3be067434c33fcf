// Catalog module: the in-memory store of listings shown on the main screen.
// Nothing here touches the terminal or the network; the UI layer feeds it
// `ListingForm`s and re-renders from `CatalogStore::listings()`.

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Identifier assigned by the store. Starts at 1, never reused.
pub type ListingId = u64;

/// A seller-submitted catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    /// Whole Rupiah, always greater than zero.
    pub price: u64,
    pub description: String,
    /// Phone number used to build the WhatsApp link.
    pub seller_contact: String,
}

/// Raw text of the seller form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingForm {
    pub name: String,
    pub price: String,
    pub description: String,
    pub seller_contact: String,
}

impl ListingForm {
    /// Build a form from the four raw inputs.
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
        seller_contact: impl Into<String>,
    ) -> Self {
        ListingForm {
            name: name.into(),
            price: price.into(),
            description: description.into(),
            seller_contact: seller_contact.into(),
        }
    }

    /// Pre-fill a form from an existing listing (used by the edit flow).
    pub fn from_listing(listing: &Listing) -> Self {
        ListingForm {
            name: listing.name.clone(),
            price: listing.price.to_string(),
            description: listing.description.clone(),
            seller_contact: listing.seller_contact.clone(),
        }
    }

    /// Reset every field to empty, as after a successful submit.
    pub fn clear(&mut self) {
        *self = ListingForm::default();
    }

    /// Check every field and turn the form into a listing carrying `id`.
    fn validate(&self, id: ListingId) -> Result<Listing, ListingError> {
        require(&self.name, Field::Name)?;
        require(&self.price, Field::Price)?;
        let price = parse_price(&self.price)?;
        require(&self.description, Field::Description)?;
        require(&self.seller_contact, Field::SellerContact)?;

        Ok(Listing {
            id,
            name: self.name.clone(),
            price,
            description: self.description.clone(),
            seller_contact: self.seller_contact.clone(),
        })
    }
}

/// Form fields, named in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Price,
    Description,
    SellerContact,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Description => "description",
            Field::SellerContact => "seller contact",
        };
        f.write_str(label)
    }
}

/// Why a submitted form was not accepted into the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("{0} must not be empty")]
    EmptyField(Field),
    #[error("price must be a whole number greater than zero, got {0:?}")]
    InvalidPrice(String),
}

/// Text fields every stored listing must have filled in, with price > 0.
fn check(listing: &Listing) -> Result<(), ListingError> {
    require(&listing.name, Field::Name)?;
    if listing.price == 0 {
        return Err(ListingError::InvalidPrice(listing.price.to_string()));
    }
    require(&listing.description, Field::Description)?;
    require(&listing.seller_contact, Field::SellerContact)?;
    Ok(())
}

fn require(value: &str, field: Field) -> Result<(), ListingError> {
    if value.trim().is_empty() {
        return Err(ListingError::EmptyField(field));
    }
    Ok(())
}

fn parse_price(text: &str) -> Result<u64, ListingError> {
    match text.trim().parse::<i64>() {
        Ok(price) if price > 0 => Ok(price as u64),
        _ => Err(ListingError::InvalidPrice(text.to_string())),
    }
}

/// Ordered, id-keyed collection of listings for the current session.
#[derive(Debug)]
pub struct CatalogStore {
    listings: Vec<Listing>,
    next_id: ListingId,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Empty catalog; the first listing added gets id 1.
    pub fn new() -> Self {
        CatalogStore {
            listings: Vec::new(),
            next_id: 1,
        }
    }

    /// Validate `form` and append a new listing at the tail.
    ///
    /// A rejected form leaves the store untouched, including the id counter.
    pub fn add(&mut self, form: &ListingForm) -> Result<Listing, ListingError> {
        let listing = form.validate(self.next_id)?;
        self.next_id += 1;
        debug!(id = listing.id, name = %listing.name, "listing added");
        self.listings.push(listing.clone());
        Ok(listing)
    }

    /// Like [`CatalogStore::add`], but clears the form once the listing is stored.
    pub fn submit(&mut self, form: &mut ListingForm) -> Result<Listing, ListingError> {
        let listing = self.add(form)?;
        form.clear();
        Ok(listing)
    }

    /// Replace the listing with `id` in place. The stored id is kept no
    /// matter what `replacement.id` says. Unknown ids are ignored.
    ///
    /// A replacement with a blank field or a zero price is rejected and the
    /// stored listing stays as it was.
    pub fn update(
        &mut self,
        id: ListingId,
        replacement: Listing,
    ) -> Result<Option<&Listing>, ListingError> {
        check(&replacement)?;
        let Some(position) = self.position(id) else {
            return Ok(None);
        };
        self.listings[position] = Listing { id, ..replacement };
        debug!(id, "listing updated");
        Ok(Some(&self.listings[position]))
    }

    /// Edit-form path: validate like `add`, then `update`.
    pub fn edit(
        &mut self,
        id: ListingId,
        form: &ListingForm,
    ) -> Result<Option<&Listing>, ListingError> {
        let replacement = form.validate(id)?;
        self.update(id, replacement)
    }

    /// Take the listing with `id` out of the catalog, if present.
    pub fn remove(&mut self, id: ListingId) -> Option<Listing> {
        let position = self.position(id)?;
        debug!(id, "listing removed");
        Some(self.listings.remove(position))
    }

    /// Look a listing up by id.
    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Current snapshot, in insertion order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Number of listings currently held.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// True when nothing has been listed, or everything was removed.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    fn position(&self, id: ListingId) -> Option<usize> {
        self.listings.iter().position(|l| l.id == id)
    }
}
