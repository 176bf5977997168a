//! Wire DTOs for the content API and their domain conversions.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    product::Product,
    types::{PriceMinor, ProductId},
};

/// `GET /Products/?populate=*` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductEnvelopeDto {
    #[serde(default)]
    pub data: Option<Vec<ProductDto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductDto {
    pub id: ProductId,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Brand", default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `None` when the wire value is absent, null, negative, or not a number.
    #[serde(rename = "Price", default, deserialize_with = "lenient_price")]
    pub price: Option<PriceMinor>,
    #[serde(rename = "Image", default)]
    pub image: Option<ImageDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageDto {
    #[serde(default)]
    pub url: Option<String>,
}

/// Accepts integer, fractional (rounded), and numeric-string prices.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<PriceMinor>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(price_from_value))
}

fn price_from_value(value: &Value) -> Option<PriceMinor> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(round_price)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(round_price))
        }
        _ => None,
    }
}

fn round_price(value: f64) -> Option<PriceMinor> {
    (value.is_finite() && value >= 0.0 && value <= u64::MAX as f64).then(|| value.round() as u64)
}

impl ProductDto {
    /// Converts to the domain product. An unusable price becomes 0 with a warning.
    pub fn into_domain(self) -> Product {
        let price_minor = self.price.unwrap_or_else(|| {
            tracing::warn!(id = self.id, "product price missing or invalid, using 0");
            0
        });
        Product {
            id: self.id,
            name: self.name.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price_minor,
            image_path: self.image.and_then(|img| img.url),
        }
    }
}

impl ProductEnvelopeDto {
    /// Source collection in response order; a missing `data` array is empty.
    pub fn into_domain_products(self) -> Vec<Product> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(ProductDto::into_domain)
            .collect()
    }
}

/// `POST /auth/local/register` request body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequestDto {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterResponseDto {
    #[serde(default)]
    pub jwt: Option<String>,
    #[serde(default)]
    pub user: Option<UserDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub id: u64,
    #[serde(default)]
    pub username: Option<String>,
}

/// Error body shape: `{ "error": { "message": "..." } }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelopeDto {
    #[serde(default)]
    pub error: Option<ErrorDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDto {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorEnvelopeDto {
    pub fn message(self) -> Option<String> {
        self.error
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_fields_map_onto_product() {
        let body = r#"{"data":[
            {"id":1,"Name":"Air Max","Brand":"Nike","description":"Runner","Price":120000,
             "Image":{"url":"/uploads/air.png"}},
            {"id":2,"Name":"Stan Smith","Brand":"Adidas","description":null,"Price":80000,
             "Image":null}
        ]}"#;
        let env: ProductEnvelopeDto = serde_json::from_str(body).unwrap();
        let products = env.into_domain_products();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Air Max");
        assert_eq!(products[0].price_minor, 120_000);
        assert_eq!(products[0].image_path.as_deref(), Some("/uploads/air.png"));
        assert_eq!(products[1].description, "");
        assert_eq!(products[1].image_path, None);
    }

    #[test]
    fn bad_price_keeps_the_rest_of_the_catalogue() {
        let body = r#"{"data":[
            {"id":1,"Name":"Air Max","Brand":"Nike","Price":null},
            {"id":2,"Name":"Stan Smith","Brand":"Adidas","Price":80000},
            {"id":3,"Name":"Old Skool","Brand":"Vans","Price":129.99},
            {"id":4,"Name":"Chuck 70","Brand":"Converse"},
            {"id":5,"Name":"Gel-Lyte","Brand":"Asics","Price":"95000"},
            {"id":6,"Name":"Blazer","Brand":"Nike","Price":-5}
        ]}"#;
        let env: ProductEnvelopeDto = serde_json::from_str(body).unwrap();
        let prices: Vec<(u64, u64)> = env
            .into_domain_products()
            .iter()
            .map(|p| (p.id, p.price_minor))
            .collect();

        assert_eq!(prices, vec![(1, 0), (2, 80_000), (3, 130), (4, 0), (5, 95_000), (6, 0)]);
    }

    #[test]
    fn missing_or_null_data_is_empty() {
        let missing: ProductEnvelopeDto = serde_json::from_str("{}").unwrap();
        assert!(missing.into_domain_products().is_empty());
        let null: ProductEnvelopeDto = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(null.into_domain_products().is_empty());
    }

    #[test]
    fn error_message_ignores_blank_text() {
        let env: ErrorEnvelopeDto =
            serde_json::from_str(r#"{"error":{"message":"  "}}"#).unwrap();
        assert_eq!(env.message(), None);
        let env: ErrorEnvelopeDto =
            serde_json::from_str(r#"{"error":{"message":"Email already taken"}}"#).unwrap();
        assert_eq!(env.message().as_deref(), Some("Email already taken"));
    }
}
