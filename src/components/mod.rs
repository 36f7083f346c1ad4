mod catalog_card;

pub use catalog_card::CatalogCard;
