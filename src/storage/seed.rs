//! Demo properties used when no saved list exists

use crate::storage::context::Context;
use crate::storage::property::{Property, DEFAULT_HOTLINE, DEFAULT_PORTAL_URL};

/// The built-in demo portfolio
pub fn demo_properties() -> Vec<Property> {
    vec![
        Property {
            id: "prop-001".to_string(),
            name: "Maple Court — Unit 3A".to_string(),
            photo: "https://images.unsplash.com/photo-1501183638710-841dd1904471?q=80&w=1600&auto=format&fit=crop".to_string(),
            phone: "+14045550123".to_string(),
            context: Context {
                tenant_name: "John Doe".to_string(),
                unit: "3A".to_string(),
                address: "123 Maple St, Atlanta, GA 30318".to_string(),
                hotline: Some(DEFAULT_HOTLINE.to_string()),
                portal_url: Some(DEFAULT_PORTAL_URL.to_string()),
                property_name: Some("Maple Court".to_string()),
                tenant_phone: Some("+14045550123".to_string()),
            },
        },
        Property {
            id: "prop-002".to_string(),
            name: "Pine Ridge — Unit 7D".to_string(),
            photo: "https://images.unsplash.com/photo-1460317442991-0ec209397118?q=80&w=1600&auto=format&fit=crop".to_string(),
            phone: "+14045550124".to_string(),
            context: Context {
                tenant_name: "Ava Smith".to_string(),
                unit: "7D".to_string(),
                address: "45 Pine Ridge Ave, Duluth, GA 30096".to_string(),
                hotline: Some(DEFAULT_HOTLINE.to_string()),
                portal_url: Some(DEFAULT_PORTAL_URL.to_string()),
                property_name: Some("Pine Ridge".to_string()),
                tenant_phone: Some("+14045550124".to_string()),
            },
        },
    ]
}
