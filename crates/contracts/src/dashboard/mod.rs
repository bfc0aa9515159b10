pub mod calendar;
pub mod iframe_loader;
pub mod messaging;
pub mod tabs;
pub mod whatsapp;
