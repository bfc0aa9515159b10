pub mod api_utils;
pub mod clipboard;
pub mod frame_messages;
pub mod iframe_frame;
pub mod whatsapp;
