use mongodb::bson::{self, Document};
use serde::{Deserialize, Deserializer, Serialize};
use service_core::error::AppError;
use validator::Validate;

pub const PERFUME_COLLECTION: &str = "perfume";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Perfume {
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: Vec<String>,
    pub concentration: Option<String>,
    #[validate(range(min = 1, message = "Volume must be at least 1 ml"))]
    pub volume_ml: Option<i32>,
    pub image: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
}

fn default_in_stock() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Perfume {
    /// Serializes the perfume into a BSON document ready for insertion.
    /// Absent optional fields are kept as explicit nulls.
    pub fn to_document(&self) -> Result<Document, AppError> {
        Ok(bson::to_document(self)?)
    }
}

/// The fixed catalog written by the seed endpoint.
pub fn sample_perfumes() -> Vec<Perfume> {
    vec![
        Perfume {
            name: "Iridescent Muse".to_string(),
            description: Some("A luminous blend of pear, iris, and soft musk.".to_string()),
            price: 120.0,
            notes: vec!["pear".into(), "iris".into(), "musk".into()],
            concentration: Some("Eau de Parfum".to_string()),
            volume_ml: Some(50),
            image: Some(
                "https://images.unsplash.com/photo-1556228720-195a672e8a03?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            ),
            in_stock: true,
            rating: Some(4.7),
        },
        Perfume {
            name: "Violet Dawn".to_string(),
            description: Some("Violet petals with bergamot and cashmere woods.".to_string()),
            price: 98.0,
            notes: vec!["violet".into(), "bergamot".into(), "cashmere wood".into()],
            concentration: Some("Eau de Toilette".to_string()),
            volume_ml: Some(50),
            image: Some(
                "https://images.unsplash.com/photo-1611930022073-b7a4ba5fcccd?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            ),
            in_stock: true,
            rating: Some(4.5),
        },
        Perfume {
            name: "Crystal Haze".to_string(),
            description: Some("Sparkling citrus over amber and cedar.".to_string()),
            price: 140.0,
            notes: vec!["grapefruit".into(), "amber".into(), "cedar".into()],
            concentration: Some("Parfum".to_string()),
            volume_ml: Some(75),
            image: Some(
                "https://images.unsplash.com/photo-1585386959984-a41552231656?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            ),
            in_stock: true,
            rating: Some(4.8),
        },
    ]
}
