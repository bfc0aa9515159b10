//! Tab management module
//!
//! - `nav` - top-level tab strip and Alt+1..5 shortcuts
//! - `page` - TabPage wrapper with lazy first render
//! - `registry` - TabId → pane view
//! - `sub_tabs` - strip used inside the campaign and monitoring panes

pub mod nav;
pub mod page;
pub mod registry;
pub mod sub_tabs;

pub use nav::TabNav;
pub use page::TabPage;
pub use sub_tabs::SubTabs;
