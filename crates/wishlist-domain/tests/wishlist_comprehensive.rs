//! Comprehensive tests for the Wishlist aggregate
//!
//! Covers creation, the item ceiling, forced ownership claiming, idempotent
//! removal, cascading item operations and reconstitution of legacy lists.

use chrono::Utc;
use wishlist_domain::DomainError;
use wishlist_domain::aggregates::{NewWishlist, Wishlist, WishlistProps, WishlistUpdate};
use wishlist_domain::entities::{NewWishlistItem, WishlistItem, WishlistItemProps, WishlistItemUpdate};
use wishlist_domain::value_objects::{
    ItemId, ItemPriority, Participation, UserId, Visibility, WishlistId,
};

fn draft(title: &str) -> NewWishlist {
    NewWishlist {
        id: WishlistId::new(),
        owner_id: UserId::new(),
        title: title.to_string(),
        description: None,
        visibility: Visibility::Link,
        participation: Participation::Anyone,
        items: Vec::new(),
    }
}

fn wishlist() -> Wishlist {
    Wishlist::create(draft("Birthday 2026")).expect("valid wishlist")
}

fn item(name: &str, total: u32) -> WishlistItem {
    WishlistItem::create(NewWishlistItem {
        name: name.to_string(),
        total_quantity: total,
        ..NewWishlistItem::default()
    })
    .expect("valid item")
}

fn item_snapshot(wishlist_id: WishlistId) -> WishlistItemProps {
    WishlistItemProps {
        id: ItemId::new(),
        wishlist_id,
        name: "Legacy item".to_string(),
        description: None,
        priority: ItemPriority::Medium,
        price: None,
        currency: None,
        url: None,
        image_url: None,
        is_unlimited: false,
        total_quantity: 1,
        reserved_quantity: 0,
        purchased_quantity: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn list_snapshot(id: WishlistId, items: Vec<WishlistItemProps>) -> WishlistProps {
    WishlistProps {
        id,
        owner_id: UserId::new(),
        title: "Legacy list".to_string(),
        description: None,
        visibility: Visibility::Private,
        participation: Participation::Registered,
        items,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ============================================================================
// Creation (strict validation)
// ============================================================================

#[test]
fn test_create_valid_wishlist() {
    let wishlist = wishlist();
    assert_eq!(wishlist.title(), "Birthday 2026");
    assert_eq!(wishlist.visibility(), Visibility::Link);
    assert_eq!(wishlist.participation(), Participation::Anyone);
    assert!(wishlist.items().is_empty());
}

#[test]
fn test_create_rejects_short_title() {
    // Wishlist.create({title: "Lo"}) throws InvalidAttribute
    let result = Wishlist::create(draft("Lo"));
    assert!(matches!(result, Err(DomainError::InvalidAttribute(_))));
}

#[test]
fn test_create_rejects_overlong_title() {
    let result = Wishlist::create(draft(&"t".repeat(101)));
    assert!(matches!(result, Err(DomainError::InvalidAttribute(_))));
}

#[test]
fn test_create_rejects_overlong_description() {
    let result = Wishlist::create(NewWishlist {
        description: Some("d".repeat(501)),
        ..draft("Birthday 2026")
    });
    assert!(matches!(result, Err(DomainError::InvalidAttribute(_))));
}

#[test]
fn test_create_trims_title() {
    let wishlist = Wishlist::create(draft("  Birthday 2026  ")).unwrap();
    assert_eq!(wishlist.title(), "Birthday 2026");
}

#[test]
fn test_create_claims_seeded_items() {
    let seeded = item("Espresso machine", 1);
    let props = draft("Birthday 2026");
    let id = props.id;
    let wishlist = Wishlist::create(NewWishlist {
        items: vec![seeded],
        ..props
    })
    .unwrap();
    assert_eq!(wishlist.items()[0].wishlist_id(), id);
}

#[test]
fn test_create_rejects_too_many_seeded_items() {
    let items = (0..101).map(|i| item(&format!("Item {i}"), 1)).collect();
    let result = Wishlist::create(NewWishlist {
        items,
        ..draft("Birthday 2026")
    });
    assert!(matches!(result, Err(DomainError::LimitExceeded(_))));
}

// ============================================================================
// Item ceiling
// ============================================================================

#[test]
fn test_add_item_at_ceiling() {
    let mut wishlist = wishlist();
    for i in 0..100 {
        wishlist = wishlist.add_item(item(&format!("Item {i}"), 1)).unwrap();
    }
    assert_eq!(wishlist.items().len(), 100);

    let result = wishlist.add_item(item("Item 101", 1));
    assert!(matches!(result, Err(DomainError::LimitExceeded(_))));
}

#[test]
fn test_reconstitute_beyond_ceiling() {
    // A 101-item snapshot loads fine: the ceiling binds create/add_item only
    let id = WishlistId::new();
    let items = (0..101).map(|_| item_snapshot(id)).collect();
    let wishlist = Wishlist::reconstitute(list_snapshot(id, items)).unwrap();
    assert_eq!(wishlist.items().len(), 101);
}

// ============================================================================
// Add / remove
// ============================================================================

#[test]
fn test_add_item_claims_ownership() {
    let wishlist = wishlist();
    let foreign = item("Espresso machine", 1);
    assert_ne!(foreign.wishlist_id(), wishlist.id());

    let wishlist = wishlist.add_item(foreign).unwrap();
    assert_eq!(wishlist.items()[0].wishlist_id(), wishlist.id());
}

#[test]
fn test_add_duplicate_item_by_id() {
    let wishlist = wishlist();
    let item = item("Espresso machine", 1);
    let wishlist = wishlist.add_item(item.clone()).unwrap();

    let result = wishlist.add_item(item);
    assert!(matches!(result, Err(DomainError::InvalidOperation(_))));
}

#[test]
fn test_remove_item_returns_removed() {
    let wishlist = wishlist();
    let item = item("Espresso machine", 1);
    let item_id = item.id();
    let wishlist = wishlist.add_item(item).unwrap();

    let (wishlist, removed) = wishlist.remove_item(item_id);
    assert!(wishlist.items().is_empty());
    assert_eq!(removed.unwrap().id(), item_id);
}

#[test]
fn test_remove_absent_item_is_idempotent() {
    let wishlist = wishlist();
    let (unchanged, removed) = wishlist.remove_item(ItemId::new());
    assert!(removed.is_none());
    assert_eq!(unchanged.items().len(), wishlist.items().len());
}

// ============================================================================
// Cascading operations
// ============================================================================

#[test]
fn test_reserve_item_cascade() {
    let wishlist = wishlist();
    let item = item("Espresso machine", 5);
    let item_id = item.id();
    let wishlist = wishlist.add_item(item).unwrap();

    let wishlist = wishlist.reserve_item(item_id, 3).unwrap();
    let reserved = wishlist.item(item_id).unwrap();
    assert_eq!(reserved.reserved_quantity(), 3);
    assert_eq!(reserved.available_quantity(), 2);
}

#[test]
fn test_purchase_item_cascade() {
    let wishlist = wishlist();
    let item = item("Espresso machine", 5);
    let item_id = item.id();
    let wishlist = wishlist
        .add_item(item)
        .unwrap()
        .reserve_item(item_id, 2)
        .unwrap();

    let wishlist = wishlist.purchase_item(item_id, 5, 2).unwrap();
    let purchased = wishlist.item(item_id).unwrap();
    assert_eq!(purchased.purchased_quantity(), 5);
    assert_eq!(purchased.reserved_quantity(), 0);
}

#[test]
fn test_cancel_item_reservation_cascade() {
    let wishlist = wishlist();
    let item = item("Espresso machine", 5);
    let item_id = item.id();
    let wishlist = wishlist
        .add_item(item)
        .unwrap()
        .reserve_item(item_id, 3)
        .unwrap();

    let wishlist = wishlist.cancel_item_reservation(item_id, 100).unwrap();
    assert_eq!(wishlist.item(item_id).unwrap().reserved_quantity(), 0);
}

#[test]
fn test_cancel_item_purchase_cascade() {
    let wishlist = wishlist();
    let item = item("Espresso machine", 5);
    let item_id = item.id();
    let wishlist = wishlist
        .add_item(item)
        .unwrap()
        .purchase_item(item_id, 2, 0)
        .unwrap();

    let wishlist = wishlist.cancel_item_purchase(item_id, 2).unwrap();
    assert_eq!(wishlist.item(item_id).unwrap().purchased_quantity(), 0);
}

#[test]
fn test_update_item_cascade_prunes_reservations() {
    let wishlist = wishlist();
    let item = item("Espresso machine", 5);
    let item_id = item.id();
    let wishlist = wishlist
        .add_item(item)
        .unwrap()
        .reserve_item(item_id, 3)
        .unwrap();

    let wishlist = wishlist
        .update_item(
            item_id,
            WishlistItemUpdate {
                total_quantity: Some(2),
                ..WishlistItemUpdate::default()
            },
        )
        .unwrap();
    let updated = wishlist.item(item_id).unwrap();
    assert_eq!(updated.total_quantity(), 2);
    assert_eq!(updated.reserved_quantity(), 0);
}

#[test]
fn test_cascading_operations_on_missing_item() {
    let wishlist = wishlist();
    let absent = ItemId::new();

    assert!(matches!(
        wishlist.reserve_item(absent, 1),
        Err(DomainError::InvalidOperation(_))
    ));
    assert!(matches!(
        wishlist.purchase_item(absent, 1, 0),
        Err(DomainError::InvalidOperation(_))
    ));
    assert!(matches!(
        wishlist.cancel_item_reservation(absent, 1),
        Err(DomainError::InvalidOperation(_))
    ));
    assert!(matches!(
        wishlist.cancel_item_purchase(absent, 1),
        Err(DomainError::InvalidOperation(_))
    ));
    assert!(matches!(
        wishlist.update_item(absent, WishlistItemUpdate::default()),
        Err(DomainError::InvalidOperation(_))
    ));
}

#[test]
fn test_cascade_preserves_item_order() {
    let wishlist = wishlist();
    let first = item("First", 5);
    let second = item("Second", 5);
    let second_id = second.id();
    let wishlist = wishlist.add_item(first).unwrap().add_item(second).unwrap();

    let wishlist = wishlist.reserve_item(second_id, 1).unwrap();
    assert_eq!(wishlist.items()[0].name(), "First");
    assert_eq!(wishlist.items()[1].name(), "Second");
}

// ============================================================================
// Update (list-level)
// ============================================================================

#[test]
fn test_update_editable_fields() {
    let updated = wishlist()
        .update(WishlistUpdate {
            title: Some("Christmas 2026".to_string()),
            description: Some(Some("Family registry".to_string())),
            visibility: Some(Visibility::Private),
            participation: Some(Participation::Contacts),
        })
        .unwrap();
    assert_eq!(updated.title(), "Christmas 2026");
    assert_eq!(updated.description(), Some("Family registry"));
    assert_eq!(updated.visibility(), Visibility::Private);
    assert_eq!(updated.participation(), Participation::Contacts);
}

#[test]
fn test_update_rejects_short_title() {
    let result = wishlist().update(WishlistUpdate {
        title: Some("Lo".to_string()),
        ..WishlistUpdate::default()
    });
    assert!(matches!(result, Err(DomainError::InvalidAttribute(_))));
}

#[test]
fn test_update_keeps_identity() {
    let original = wishlist();
    let updated = original
        .update(WishlistUpdate {
            title: Some("Christmas 2026".to_string()),
            ..WishlistUpdate::default()
        })
        .unwrap();
    assert_eq!(updated.id(), original.id());
    assert_eq!(updated.owner_id(), original.owner_id());
}

// ============================================================================
// Reconstitution
// ============================================================================

#[test]
fn test_reconstitute_legacy_title() {
    let id = WishlistId::new();
    let wishlist = Wishlist::reconstitute(WishlistProps {
        title: "Lo".to_string(),
        ..list_snapshot(id, Vec::new())
    })
    .unwrap();
    assert_eq!(wishlist.title(), "Lo");
}

#[test]
fn test_reconstitute_rejects_foreign_item() {
    // Ownership mismatch is corruption even on reconstitution
    let id = WishlistId::new();
    let foreign_item = item_snapshot(WishlistId::new());
    let result = Wishlist::reconstitute(list_snapshot(id, vec![foreign_item]));
    assert!(matches!(result, Err(DomainError::InvalidOperation(_))));
}

#[test]
fn test_reconstitute_rejects_non_v4_owner() {
    let id = WishlistId::new();
    let result = Wishlist::reconstitute(WishlistProps {
        owner_id: UserId::from_uuid(uuid::Uuid::nil()),
        ..list_snapshot(id, Vec::new())
    });
    assert!(matches!(result, Err(DomainError::InvalidAttribute(_))));
}

#[test]
fn test_props_reconstitute_roundtrip() {
    let item = item("Espresso machine", 5);
    let item_id = item.id();
    let original = wishlist()
        .add_item(item)
        .unwrap()
        .reserve_item(item_id, 2)
        .unwrap();

    let restored = Wishlist::reconstitute(original.props()).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_props_serde_roundtrip() {
    let original = wishlist().add_item(item("Espresso machine", 5)).unwrap();
    let json = serde_json::to_string(&original.props()).unwrap();
    let props: WishlistProps = serde_json::from_str(&json).unwrap();
    assert_eq!(props, original.props());
}

#[test]
fn test_props_serialize_enums_as_wire_names() {
    let value: serde_json::Value = serde_json::to_value(wishlist().props()).unwrap();
    assert_eq!(value["visibility"], serde_json::json!("LINK"));
    assert_eq!(value["participation"], serde_json::json!("ANYONE"));
}
