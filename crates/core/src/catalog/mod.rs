//! Sellable catalog: products and the additional items quoted alongside them.

mod additional_item;
mod product;

pub use additional_item::{
    AdditionalItem, AdditionalItemRepository, AdditionalItemService, CreateAdditionalItemInput,
    UpdateAdditionalItemInput,
};
pub use product::{
    CreateProductInput, Product, ProductRepository, ProductService, UpdateProductInput,
};
