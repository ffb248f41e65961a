//! # Repository Module
//!
//! Repositories over the embedded catalog data.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Storefront command                                                    │
//! │       │                                                                 │
//! │       │  catalog.products().search(&query)                             │
//! │       │  catalog.reviews().submit(id, user, name, draft).await         │
//! │       ▼                                                                 │
//! │  ProductRepository              ReviewRepository                       │
//! │  ├── get / require              ├── for_product                        │
//! │  ├── search                     ├── summary                            │
//! │  ├── categories / vibes         ├── submit                             │
//! │  └── all / count                └── mark_helpful                       │
//! │       │                              │                                  │
//! │       ▼                              ▼                                  │
//! │  Arc<Vec<Product>>              Arc<RwLock<ReviewStore>>               │
//! │  (read-only)                    (reviews + published summaries)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product lookup and search
//! - [`ReviewRepository`](review::ReviewRepository) - Reviews, summaries, votes

pub mod product;
pub mod review;
