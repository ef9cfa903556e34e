pub mod connector;
pub mod device_lister;
pub mod discovery;
pub mod settings;
pub mod state;
