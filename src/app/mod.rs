pub mod controller;

pub use controller::{AppController, PresenceReport};
