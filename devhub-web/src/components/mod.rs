pub(crate) mod guard;
pub(crate) mod header_nav_item;
pub(crate) mod loading;
pub(crate) mod theme_switcher;
pub(crate) mod toaster;
pub(crate) mod user_dropdown;
