// Contact module: builds the WhatsApp deep link a buyer opens to talk to
// the seller of a listing.

use anyhow::{bail, Context, Result};
use reqwest::Url;

use crate::catalog::Listing;

const WHATSAPP_BASE: &str = "https://wa.me";

/// Greeting pre-filled in the chat, mentioning the item.
pub fn greeting(item_name: &str) -> String {
    format!("Halo, saya tertarik dengan {}", item_name)
}

/// wa.me only accepts the bare digits of a number: `+62 812-3456`
/// becomes `628123456`.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// `https://wa.me/<digits>?text=<greeting>` with the text URL-encoded.
pub fn whatsapp_link(phone: &str, item_name: &str) -> Result<Url> {
    let digits = normalize_phone(phone);
    if digits.is_empty() {
        bail!("Seller has no usable contact number: {:?}", phone);
    }
    let base = format!("{}/{}", WHATSAPP_BASE, digits);
    Url::parse_with_params(&base, &[("text", greeting(item_name))])
        .with_context(|| format!("Invalid contact number {:?}", phone))
}

/// Convenience wrapper for a stored listing.
pub fn listing_link(listing: &Listing) -> Result<Url> {
    whatsapp_link(&listing.seller_contact, &listing.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_points_at_phone_and_carries_greeting() {
        let url = whatsapp_link("08123456789", "Chair").unwrap();

        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/08123456789");
        let text: Vec<_> = url
            .query_pairs()
            .filter(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(text, vec!["Halo, saya tertarik dengan Chair".to_string()]);
    }

    #[test]
    fn item_name_is_encoded() {
        let url = whatsapp_link("0812", "Lamp & shade").unwrap();
        let query = url.query().unwrap();
        assert!(!query.contains(" & "));
        assert!(url
            .query_pairs()
            .any(|(_, v)| v == "Halo, saya tertarik dengan Lamp & shade"));
    }

    #[test]
    fn blank_phone_is_rejected() {
        assert!(whatsapp_link("   ", "Chair").is_err());
        assert!(whatsapp_link("call me", "Chair").is_err());
    }

    #[test]
    fn formatted_phone_is_reduced_to_digits() {
        assert_eq!(normalize_phone("+62 812-3456"), "628123456");

        let url = whatsapp_link("+62 812-3456", "Chair").unwrap();
        assert_eq!(url.path(), "/628123456");
    }

    #[test]
    fn listing_link_uses_contact_and_name() {
        let listing = Listing {
            id: 1,
            name: "Chair".into(),
            price: 50000,
            description: "Wooden chair".into(),
            seller_contact: " 08123456789 ".into(),
        };
        assert_eq!(listing_link(&listing).unwrap().path(), "/08123456789");
    }
}
