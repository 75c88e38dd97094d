//! Built-in fallback product catalog.
//!
//! A small fixed table compiled into the client. It backs barcode resolution
//! when the backend is unreachable, so a scan in airplane mode still resolves
//! the common products.

use chrono::NaiveDate;

use super::{Certification, Compliance, Product};

fn entry(
    id: &str,
    barcode: &str,
    name: &str,
    brand: &str,
    category: &str,
    compliance: Compliance,
    certification: Option<Certification>,
) -> Product {
    Product {
        id: id.to_string(),
        barcode: barcode.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        category: category.to_string(),
        description: None,
        compliance,
        certification,
    }
    .normalized()
}

/// Returns the built-in catalog.
pub fn builtin() -> Vec<Product> {
    vec![
        entry(
            "prod-001",
            "8801062628247",
            "Choco Pie",
            "Orion",
            "snacks",
            Compliance::Halal,
            Some(Certification {
                body: "KMF".to_string(),
                expires_on: NaiveDate::from_ymd_opt(2027, 3, 31),
            }),
        ),
        entry(
            "prod-002",
            "8993189271113",
            "Indomie Mi Goreng",
            "Indofood",
            "instant noodles",
            Compliance::Halal,
            Some(Certification {
                body: "MUI".to_string(),
                expires_on: NaiveDate::from_ymd_opt(2026, 11, 30),
            }),
        ),
        entry(
            "prod-003",
            "5000159484695",
            "Haribo Goldbears",
            "Haribo",
            "confectionery",
            Compliance::Haram,
            None,
        ),
        entry(
            "prod-004",
            "6291003033308",
            "Al Ain Fresh Milk",
            "Al Ain Farms",
            "dairy",
            Compliance::Halal,
            Some(Certification {
                body: "ESMA".to_string(),
                expires_on: NaiveDate::from_ymd_opt(2026, 6, 15),
            }),
        ),
        entry(
            "prod-005",
            "0737628064502",
            "Pad Thai Sauce",
            "Thai Kitchen",
            "sauces",
            Compliance::Doubtful,
            None,
        ),
    ]
}

/// Looks a barcode up in the built-in catalog.
pub fn lookup(barcode: &str) -> Option<Product> {
    builtin().into_iter().find(|p| p.barcode == barcode)
}
