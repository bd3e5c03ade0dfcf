//! # medstock-db: Database Layer for Medstock
//!
//! This crate provides database access for the Medstock system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Medstock Data Flow                        │
//! │                                                              │
//! │  HTTP handler (POST /purchases)                              │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                medstock-db (THIS CRATE)                │  │
//! │  │                                                        │  │
//! │  │  ┌─────────────┐  ┌───────────────┐  ┌─────────────┐   │  │
//! │  │  │  Database   │  │ Repositories  │  │ Migrations  │   │  │
//! │  │  │  (pool.rs)  │◄─│ medicine.rs   │  │ (embedded)  │   │  │
//! │  │  │ SqlitePool  │  │ purchase.rs   │  │ 001_init... │   │  │
//! │  │  └─────────────┘  └───────────────┘  └─────────────┘   │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  SQLite database file (or :memory: in tests)                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (medicine, purchase)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medstock_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/medstock.db");
//! let db = Database::new(config).await?;
//!
//! let catalog = db.medicines().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::medicine::MedicineRepository;
pub use repository::purchase::PurchaseRepository;
