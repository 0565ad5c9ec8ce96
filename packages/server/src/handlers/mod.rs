pub mod api;
pub mod get_app;
pub mod home;
pub mod qrx;
