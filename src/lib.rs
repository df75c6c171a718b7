// Design Patterns: Observer, Abstract Factory, Template Method
// Each module stands on its own; nothing is shared between them except the
// error type.

//! # Design Patterns
//!
//! ## Pattern 1: Observer
//! - `Observer` / `Notifier` traits
//! - `Secretary`: event id to observer set, holding `Weak` handles
//!
//! ## Pattern 2: Abstract Factory
//! - Aggregated `Database` trait and the `User` that wraps it
//! - Split `UserName` / `UserEmail` traits built by a `UserStoreFactory`
//!
//! ## Pattern 3: Template Method
//! - `Exam` trait whose provided methods fix the flow, `ExamA` / `ExamB`
//!
//! Run them with:
//! ```bash
//! cargo run --bin patterns -- observer
//! cargo run --bin patterns -- factory --database postgresql
//! cargo run --bin patterns -- exam
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod logging;
pub mod observer;
pub mod template;

pub use config::{DemoConfig, Subscription};
pub use error::PatternError;
pub use factory::{factory_for, DatabaseKind, User, UserStoreFactory};
pub use observer::{
    observer_handle, EventId, Notifier, NotifyReport, Observer, ObserverKind, Secretary,
};
pub use template::{Exam, ExamA, ExamB, Problem};
