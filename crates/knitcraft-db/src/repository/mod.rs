//! # Repository Module
//!
//! Database repository implementations for KnitCraft Store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Storefront command                                                    │
//! │       │                                                                 │
//! │       │  db.products().update(id, &changes)                            │
//! │       ▼                                                                 │
//! │  ProductRepository                      AdminRepository                │
//! │  ├── insert(&self, product)             ├── find_by_username(&self, u) │
//! │  ├── list_all(&self)                    ├── insert(&self, credential)  │
//! │  ├── get_by_id(&self, id)               ├── seed_default(&self, cred)  │
//! │  ├── update(&self, id, changes)         └── count(&self)               │
//! │  ├── delete(&self, id)                                                 │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD
//! - [`admin::AdminRepository`] - Admin credential lookup and seeding

pub mod admin;
pub mod product;
