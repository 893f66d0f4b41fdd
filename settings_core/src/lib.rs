//! # Settings Core
//!
//! A schema-driven settings model for configurable widgets.
//!
//! ## Philosophy
//!
//! - **Declared, not discovered**: Every setting is declared once in a schema
//! - **Fail fast**: A schema with broken cross-references never loads
//! - **Snapshot then stage**: Sessions read the target once and collect edits
//! - **Toolkit agnostic**: Presentation layers call `stage`; no event system is assumed
//! - **Testable**: Targets are a two-method trait with an in-memory implementation
//!
//! ## Features
//!
//! - Enumerated value registry with ordered `(value, label)` choices
//! - Setting schema with load-time integrity checks
//! - Ordered presentation groups
//! - Settings sessions with best-effort commit and discard
//! - Named JSON documents that store enum values by label
//!
//! ## Example
//!
//! ```ignore
//! use settings_core::{InMemoryTarget, SettingDescriptor, SettingSchema, SettingValue};
//!
//! let schema = SettingSchema::builder()
//!     .setting(SettingDescriptor::number("tabWidth", "Tab width"))
//!     .build()?;
//!
//! let mut target = InMemoryTarget::new().with_value("tabWidth", SettingValue::Number(4));
//! let mut session = schema.session(&mut target);
//!
//! session.stage("tabWidth", SettingValue::Number(8))?;
//! let report = session.commit();
//! assert!(report.is_complete());
//! ```

pub mod enums;
pub mod error;
pub mod fallback;
pub mod groups;
pub mod persistence;
pub mod schema;
pub mod session;
pub mod target;
pub mod value;

pub use enums::{EnumChoice, EnumDescriptor, EnumRegistry};
pub use error::{IntegrityError, Result, SettingsError};
pub use fallback::FallbackDefaults;
pub use groups::SettingGroup;
pub use persistence::{NamedSettingsData, PersistenceError};
pub use schema::{SchemaBuilder, SettingDescriptor, SettingSchema};
pub use session::{CommitReport, SettingsSession};
pub use target::{ConfigTarget, InMemoryTarget, TargetError};
pub use value::{ChoiceValue, Color, SettingKey, SettingValue, ValueKind};
