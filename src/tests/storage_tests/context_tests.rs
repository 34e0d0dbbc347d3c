// Context Tests - Testing tenant context validation and serialization

use crate::storage::Context;
use crate::ValidationError;

fn complete() -> Context {
    Context {
        tenant_name: "John Doe".to_string(),
        unit: "3A".to_string(),
        address: "123 Maple St".to_string(),
        ..Context::default()
    }
}

#[test]
fn test_complete_context_validates() {
    assert!(complete().validate().is_ok());
    assert!(complete().is_complete());
}

#[test]
fn test_missing_required_fields() {
    for blank in ["", "   "] {
        let mut ctx = complete();
        ctx.tenant_name = blank.to_string();
        assert_eq!(ctx.validate(), Err(ValidationError::IncompleteContext));

        let mut ctx = complete();
        ctx.unit = blank.to_string();
        assert_eq!(ctx.validate(), Err(ValidationError::IncompleteContext));

        let mut ctx = complete();
        ctx.address = blank.to_string();
        assert!(!ctx.is_complete());
    }
}

#[test]
fn test_resolved_phone_prefers_context_value() {
    let mut ctx = complete();
    ctx.tenant_phone = Some("+15550001111".to_string());

    let resolved = ctx.with_resolved_phone("+14045550123");
    assert_eq!(resolved.tenant_phone.as_deref(), Some("+15550001111"));
}

#[test]
fn test_resolved_phone_falls_back_to_property_phone() {
    let ctx = complete();
    let resolved = ctx.with_resolved_phone("+14045550123");
    assert_eq!(resolved.tenant_phone.as_deref(), Some("+14045550123"));

    let mut blank = complete();
    blank.tenant_phone = Some("  ".to_string());
    let resolved = blank.with_resolved_phone("+14045550123");
    assert_eq!(resolved.tenant_phone.as_deref(), Some("+14045550123"));

    // Nothing to fall back to
    assert!(complete().with_resolved_phone("").tenant_phone.is_none());
}

#[test]
fn test_optional_fields_omitted_when_absent() {
    let json = serde_json::to_value(complete()).unwrap();
    let obj = json.as_object().unwrap();

    assert_eq!(obj.len(), 3);
    assert!(!obj.contains_key("hotline"));
    assert!(!obj.contains_key("tenant_phone"));
}

#[test]
fn test_legacy_phone_key_is_accepted() {
    let json = r#"{
        "tenant_name": "Ava Smith",
        "unit": "7D",
        "address": "45 Pine Ridge Ave",
        "phone": "+14045550124"
    }"#;
    let ctx: Context = serde_json::from_str(json).unwrap();

    assert_eq!(ctx.tenant_phone.as_deref(), Some("+14045550124"));
    // Written back under the canonical key
    let out = serde_json::to_value(&ctx).unwrap();
    assert_eq!(out["tenant_phone"], "+14045550124");
    assert!(out.get("phone").is_none());
}
