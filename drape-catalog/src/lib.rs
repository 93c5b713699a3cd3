pub mod product;
pub mod pricing;
pub mod repository;

pub use product::{Product, ProductCategory, StockStatus};
pub use pricing::{unit_price, Dimensions, Quote, SizeCalculator, MIN_DIMENSION_M};
pub use repository::{ProductFilter, ProductRepository, FEATURED_LIMIT};
