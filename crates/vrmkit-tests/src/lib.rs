//! vrmkit End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the legacy migration flows:
//!
//! - Migration: legacy custom properties and attachments -> normalized document
//! - Idempotence: a second pass leaves the document hash unchanged
//! - CLI: scene file in, migrated scene file out
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p vrmkit-tests
//! ```
//!
//! ## Fixtures
//!
//! ```rust,ignore
//! use vrmkit_tests::fixtures::LegacyRigFixture;
//! use vrmkit_tests::harness::migrate_stamped;
//!
//! let mut scene = LegacyRigFixture::new("Armature")
//!     .bones(&["Hips", "Head"])
//!     .human_bone("head", "Head")
//!     .build();
//! let report = migrate_stamped(&mut scene, "Armature").unwrap();
//! assert!(report.legacy_migrated);
//! ```

pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use fixtures::{LegacyRigFixture, SceneFileFixture};
pub use harness::{document, migrate_stamped, migrate_unstamped, run_orchestrator};
