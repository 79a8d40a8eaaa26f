//! # leap-tcu
//!
//! Transmission control unit for the LEAP cube.
//!
//! | Component | Role |
//! |---|---|
//! | [`TransmissionControlUnit`] | Transmit loop: one frame per tick, idle noise when no session is open |
//! | [`AccessGate`] | Admits receivers by APR code or frame digest and opens sessions |
//! | [`ApRegistry`] | Open sessions, one slot per access point, round-robin scheduling |
//! | [`PayloadLibrary`] | `.txt` payloads segmented into cube frames |
//! | [`EventBus`] | Broadcast of [`TcuEvent`]s to observers |
//! | [`Transmitter`] | Sink for packed frames ([`DeviceTransmitter`], [`MemoryTransmitter`]) |
//!
//! ## Environment variables
//! See [`TcuConfig::from_env`] and `leap_cache::CacheConfig::from_env`.

pub mod config;
pub mod error;
pub mod event_bus;
pub mod gate;
pub mod payload;
pub mod registry;
pub mod session;
pub mod transmitter;
pub mod unit;

pub use config::TcuConfig;
pub use error::TcuError;
pub use event_bus::{EventBus, TcuEvent};
pub use gate::{AccessGate, Admission};
pub use payload::{segment, PayloadLibrary};
pub use registry::{ApRegistry, ScheduledFrame};
pub use session::SessionQueue;
pub use transmitter::{DeviceTransmitter, MemoryTransmitter, Transmitter};
pub use unit::{Transmission, TransmissionControlUnit};
