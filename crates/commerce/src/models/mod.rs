//! Domain models for the catalog and order pipeline.

pub mod category;
pub mod district;
pub mod list;
pub mod order;
pub mod product;
pub mod slider;

pub use category::{Category, CreateCategoryInput, UpdateCategoryInput};
pub use district::{CreateDistrictInput, District, UpdateDistrictInput};
pub use list::SortOrder;
pub use order::{
    CreateOrderInput, Order, OrderDetail, OrderFilter, OrderItem, OrderLineInput, OrderSortKey,
    UpdateOrderInput,
};
pub use product::{
    CreateProductInput, Product, ProductFilter, ProductSortKey, UpdateProductInput,
};
pub use slider::{CreateSliderItemInput, SliderItem, UpdateSliderItemInput};
