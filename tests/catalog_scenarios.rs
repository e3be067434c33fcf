use ubmager_cli::catalog::{CatalogStore, Field, Listing, ListingError, ListingForm};

fn form(name: &str, price: &str, description: &str, contact: &str) -> ListingForm {
    ListingForm::new(name, price, description, contact)
}

#[test]
fn chair_is_accepted_and_broken_table_is_rejected() {
    let mut store = CatalogStore::new();

    let chair = store
        .add(&form("Chair", "50000", "Wooden chair", "08123456789"))
        .unwrap();
    assert_eq!(
        chair,
        Listing {
            id: 1,
            name: "Chair".into(),
            price: 50000,
            description: "Wooden chair".into(),
            seller_contact: "08123456789".into(),
        }
    );

    let table = store.add(&form("Table", "0", "Broken", "08123456789"));
    assert_eq!(table, Err(ListingError::InvalidPrice("0".into())));
    assert_eq!(store.len(), 1);
}

#[test]
fn removed_ids_are_not_reused() {
    let mut store = CatalogStore::new();
    store
        .add(&form("Chair", "50000", "Wooden chair", "08123456789"))
        .unwrap();

    store.remove(1).unwrap();
    assert!(store.is_empty());

    let lamp = store
        .add(&form("Lamp", "10000", "LED", "08199999999"))
        .unwrap();
    assert_eq!(lamp.id, 2);
}

#[test]
fn fourth_listing_follows_third_after_removing_second() {
    let mut store = CatalogStore::new();
    let ids: Vec<_> = ["A", "B", "C"]
        .iter()
        .map(|name| store.add(&form(name, "100", "desc", "0811")).unwrap().id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    store.remove(2).unwrap();
    let fourth = store.add(&form("D", "100", "desc", "0811")).unwrap();

    assert_eq!(fourth.id, 4);
    let names: Vec<_> = store.listings().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C", "D"]);
}

#[test]
fn each_valid_add_grows_by_one_with_a_larger_id() {
    let mut store = CatalogStore::new();
    let mut last_id = 0;
    for (i, price) in ["1", "25", " 300 ", "999999"].iter().enumerate() {
        let listing = store.add(&form("Item", price, "desc", "0811")).unwrap();
        assert!(listing.id > last_id);
        last_id = listing.id;
        assert_eq!(store.len(), i + 1);
    }
}

#[test]
fn invalid_forms_leave_catalog_unchanged() {
    let mut store = CatalogStore::new();
    store.add(&form("Chair", "50000", "Wooden", "0812")).unwrap();
    let before = store.listings().to_vec();

    let rejected = [
        (form("", "1", "d", "p"), ListingError::EmptyField(Field::Name)),
        (form("n", "-3", "d", "p"), ListingError::InvalidPrice("-3".into())),
        (form("n", "ten", "d", "p"), ListingError::InvalidPrice("ten".into())),
        (form("n", "1", "", "p"), ListingError::EmptyField(Field::Description)),
        (form("n", "1", "d", ""), ListingError::EmptyField(Field::SellerContact)),
    ];
    for (bad, expected) in rejected {
        assert_eq!(store.add(&bad), Err(expected));
    }
    assert_eq!(store.listings(), before.as_slice());
}

#[test]
fn update_ignores_payload_id() {
    let mut store = CatalogStore::new();
    let chair = store.add(&form("Chair", "50000", "Wooden", "0812")).unwrap();

    let mut payload = chair.clone();
    payload.id = 42;
    payload.price = 45000;
    store.update(chair.id, payload).unwrap();

    let stored = store.get(chair.id).unwrap();
    assert_eq!(stored.id, 1);
    assert_eq!(stored.price, 45000);
    assert!(store.get(42).is_none());
}
