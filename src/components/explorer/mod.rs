//! File explorer UI components.
//!
//! Components:
//! - [`Explorer`] - Main explorer view (header, content area, path bar)
//! - [`FileList`] - Entries of the current folder in grid or list form
//! - [`ContextMenuView`] - Right-click actions of one entry

mod context_menu;
#[allow(clippy::module_inception)]
mod explorer;
mod file_list;
mod header;
mod pathbar;

pub use context_menu::ContextMenuView;
pub use explorer::Explorer;
pub use file_list::FileList;
pub use header::Header;
