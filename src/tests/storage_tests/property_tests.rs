// Property Tests - Testing property records, creation input and patches

use crate::storage::property::*;
use crate::storage::{demo_properties, NewProperty, PropertyPatch, ThreadKey};
use crate::ValidationError;

fn input(name: &str, address: &str) -> NewProperty {
    NewProperty {
        name: name.to_string(),
        address: address.to_string(),
        ..NewProperty::default()
    }
}

#[test]
fn test_new_property_requires_name_then_address() {
    assert_eq!(input("", "").validate(), Err(ValidationError::MissingField("name")));
    assert_eq!(input("  ", "1 Main St").validate(), Err(ValidationError::MissingField("name")));
    assert_eq!(input("Oak Villa", " ").validate(), Err(ValidationError::MissingField("address")));
    assert!(input("Oak Villa", "1 Main St").validate().is_ok());
}

#[test]
fn test_into_property_fills_defaults() {
    let property = input("  Oak Villa ", " 1 Main St ").into_property("prop-1".to_string());

    assert_eq!(property.id, "prop-1");
    assert_eq!(property.name, "Oak Villa");
    assert_eq!(property.photo, DEFAULT_PHOTO);
    assert_eq!(property.phone, PLACEHOLDER_PHONE);

    let ctx = &property.context;
    assert_eq!(ctx.address, "1 Main St");
    assert_eq!(ctx.tenant_name, PLACEHOLDER_FIELD);
    assert_eq!(ctx.unit, PLACEHOLDER_FIELD);
    assert_eq!(ctx.hotline.as_deref(), Some(DEFAULT_HOTLINE));
    assert_eq!(ctx.portal_url.as_deref(), Some(DEFAULT_PORTAL_URL));
    assert_eq!(ctx.property_name.as_deref(), Some("Oak Villa"));
    assert!(ctx.tenant_phone.is_none());
}

#[test]
fn test_into_property_keeps_given_phone_and_photo() {
    let mut new = input("Oak Villa", "1 Main St");
    new.phone = " +15551234567 ".to_string();
    new.photo = "https://example.com/oak.jpg".to_string();

    let property = new.into_property("prop-2".to_string());
    assert_eq!(property.phone, "+15551234567");
    assert_eq!(property.photo, "https://example.com/oak.jpg");
}

#[test]
fn test_thread_and_history_keys() {
    let property = demo_properties().remove(0);

    assert_eq!(property.thread_key(), ThreadKey::Phone("+14045550123".to_string()));
    assert_eq!(
        property.history_key(),
        ThreadKey::Tenant {
            tenant: "John Doe".to_string(),
            unit: "3A".to_string(),
        }
    );
}

#[test]
fn test_resolved_context_uses_property_phone() {
    let mut property = demo_properties().remove(1);
    property.context.tenant_phone = None;

    let ctx = property.resolved_context();
    assert_eq!(ctx.tenant_phone.as_deref(), Some("+14045550124"));
    // The stored record is untouched
    assert!(property.context.tenant_phone.is_none());
}

#[test]
fn test_empty_patch() {
    assert!(PropertyPatch::default().is_empty());
    let patch = PropertyPatch {
        unit: Some("4B".to_string()),
        ..PropertyPatch::default()
    };
    assert!(!patch.is_empty());
}

#[test]
fn test_patch_merges_only_given_fields() {
    let mut property = demo_properties().remove(0);
    let before = property.clone();

    PropertyPatch {
        tenant_name: Some("Jane Roe".to_string()),
        phone: Some("+15550009999".to_string()),
        ..PropertyPatch::default()
    }
    .apply_to(&mut property);

    assert_eq!(property.context.tenant_name, "Jane Roe");
    assert_eq!(property.phone, "+15550009999");
    assert_eq!(property.name, before.name);
    assert_eq!(property.context.unit, before.context.unit);
    assert_eq!(property.context.hotline, before.context.hotline);
}

#[test]
fn test_patch_clears_optional_context_fields() {
    let mut property = demo_properties().remove(0);

    PropertyPatch {
        hotline: Some(String::new()),
        portal_url: Some("  ".to_string()),
        ..PropertyPatch::default()
    }
    .apply_to(&mut property);

    assert!(property.context.hotline.is_none());
    assert!(property.context.portal_url.is_none());
    assert!(property.context.property_name.is_some());
}

#[test]
fn test_demo_seed() {
    let seed = demo_properties();

    assert_eq!(seed.len(), 2);
    assert_eq!(seed[0].id, "prop-001");
    assert_eq!(seed[1].id, "prop-002");
    assert!(seed.iter().all(|p| p.context.is_complete()));
}
