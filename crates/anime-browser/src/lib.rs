//! Interactive browser for the Jikan anime catalog.
//!
//! The [`BrowseController`] owns the navigation state and turns commands into
//! catalog requests. Responses are rendered into view models and applied to a
//! [`Surface`]: the in-memory [`Page`] in tests, the terminal at runtime.

pub mod command;
pub mod controller;
pub mod flight;
pub mod page;
pub mod query;
pub mod state;
pub mod terminal;
pub mod view;

pub use command::{Command, CommandError};
pub use controller::{BrowseController, Completion, Dispatch};
pub use page::{Page, PageUpdate, Surface};
pub use query::Rejection;
pub use state::{BrowseState, Category, FilterKind, Filters, Navigation};
pub use terminal::TerminalSurface;
