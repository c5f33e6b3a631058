use crate::non_empty;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;
use typesafe_repository::async_ops::{Find, Get, Save};
use typesafe_repository::macros::Id;
use typesafe_repository::{GetIdentity, Identity, RefIdentity, SelectBy, Selector};
use typesafe_repository::Repository;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "inactive" => ProductStatus::Inactive,
            _ => ProductStatus::Active,
        }
    }
}

/// One physical product in the master catalog. Matching across vendors is by
/// UPC first, manufacturer part number second; the UPC may arrive later than
/// the record itself, so the row identity is a surrogate id.
#[derive(Id, Serialize, Deserialize, Clone, Debug)]
#[Id(ref_id, get_id)]
pub struct Product {
    #[id]
    pub id: Uuid,
    pub upc: Option<String>,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub part_number: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub description: Option<String>,
    pub weight: Option<f64>,
    pub image_url: Option<String>,
    /// Slug of the vendor whose image is currently stored.
    pub image_source: Option<String>,
    /// Serial-number tracked item (firearms and the like).
    pub serialized: bool,
    pub specifications: Option<HashMap<String, String>>,
    pub status: ProductStatus,
    /// Slug of the vendor whose record last won the non-merge fields.
    pub source: Option<String>,
    /// Blocks automatic authority-based overwrite; only a manual override
    /// write may replace a locked record.
    pub source_locked: bool,
    pub retail_vertical: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Primary cross-vendor lookup key.
pub struct Upc(pub String);

/// Secondary lookup key for records that arrive without a UPC.
pub struct PartNumber(pub String);

impl Selector for Upc {}
impl Selector for PartNumber {}
impl SelectBy<Upc> for Product {}
impl SelectBy<PartNumber> for Product {}

#[async_trait]
pub trait ProductRepository:
    Repository<Product, Error = anyhow::Error>
    + Get<Product>
    + Save<Product>
    + Find<Product, Upc>
    + Find<Product, PartNumber>
    + Send
    + Sync
{
    /// Updates only the stored image and its source vendor.
    async fn set_image(
        &self,
        id: Uuid,
        url: Option<String>,
        source: Option<String>,
    ) -> anyhow::Result<()>;
}

/// Join row linking a master product to one vendor's own SKU for it. Carries
/// the vendor's last-known image so the fallback resolver can rank candidates
/// without refetching feeds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VendorProductMapping {
    pub product_id: Uuid,
    pub vendor: String,
    pub vendor_sku: String,
    pub image_url: Option<String>,
    pub updated_at: OffsetDateTime,
}

#[async_trait]
pub trait VendorMappingRepository: Send + Sync {
    async fn get(
        &self,
        product_id: Uuid,
        vendor: &str,
    ) -> anyhow::Result<Option<VendorProductMapping>>;
    async fn list_for_product(&self, product_id: Uuid)
        -> anyhow::Result<Vec<VendorProductMapping>>;
    async fn upsert(&self, mapping: VendorProductMapping) -> anyhow::Result<()>;
}

/// Vendor-neutral candidate record produced by a feed adapter. Which fields
/// end up on the master product is decided by the merge engine, never by the
/// adapter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogRecord {
    pub upc: Option<String>,
    pub part_number: Option<String>,
    pub vendor_sku: String,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub description: Option<String>,
    pub weight: Option<f64>,
    pub image_url: Option<String>,
    pub serialized: Option<bool>,
    pub specifications: Option<HashMap<String, String>>,
    pub retail_vertical: Option<String>,
}

impl CatalogRecord {
    /// Key records are grouped by within a sync run: UPC when present,
    /// otherwise the manufacturer part number. `None` means the record
    /// cannot be matched at all.
    pub fn identity_key(&self) -> Option<String> {
        if let Some(upc) = non_empty(self.upc.as_deref()) {
            return Some(format!("upc:{upc}"));
        }
        non_empty(self.part_number.as_deref()).map(|mpn| format!("mpn:{mpn}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_key_prefers_upc() {
        let record = CatalogRecord {
            upc: Some("012345678905".to_string()),
            part_number: Some("PX1910".to_string()),
            ..CatalogRecord::default()
        };
        assert_eq!(record.identity_key(), Some("upc:012345678905".to_string()));
    }

    #[test]
    fn identity_key_falls_back_to_part_number() {
        let record = CatalogRecord {
            upc: Some("   ".to_string()),
            part_number: Some("PX1910".to_string()),
            ..CatalogRecord::default()
        };
        assert_eq!(record.identity_key(), Some("mpn:PX1910".to_string()));
        assert_eq!(CatalogRecord::default().identity_key(), None);
    }
}
