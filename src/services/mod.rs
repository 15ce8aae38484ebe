pub mod categories;
pub mod products;

// Re-export services for convenience
pub use categories::CategoryService;
pub use products::ProductService;
