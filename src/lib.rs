pub mod gestures;
pub mod logging;
pub mod settings;
pub mod store;
