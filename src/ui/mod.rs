//! Headless note screens: the list, the detail page and the modals layered over the list.

pub mod alert;
pub mod app;
pub mod delete_dialog;
pub mod detail;
pub mod dialog;
pub mod list;
pub mod popup;
pub mod route;

pub use app::{App, Screen};
