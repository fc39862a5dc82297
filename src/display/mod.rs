//! Terminal display of search results
//!
//! - **terminal**: `Console` / `KeyInput` capabilities and raw mode guard
//! - **pager**: less-like scrolling over all results
//! - **navigator**: one result per screen
//! - **markdown**: styled rendering of result content
//! - **results**: result buffers and display dispatch

pub mod markdown;
pub mod navigator;
pub mod pager;
pub mod results;
pub mod terminal;

pub use navigator::Navigator;
pub use pager::Pager;
pub use results::{
    display_results, display_results_one_by_one, display_results_with_navigation, ResultFields,
};
pub use terminal::{detect_key_input, Console, Key, KeyError, KeyInput, RawMode, StdoutConsole};
