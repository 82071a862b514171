#![warn(missing_docs)]

//! Blecloner discovers a nearby [Bluetooth Low Energy] (BLE) peripheral, reads its advertisement and GATT attribute
//! tree, and writes an Arduino sketch that re-creates an equivalent peripheral with [NimBLE-Arduino].
//!
//! [Bluetooth Low Energy]: https://www.bluetooth.com/specifications/specs/
//! [NimBLE-Arduino]: https://github.com/h2zero/NimBLE-Arduino
//!
//! # Usage
//!
//! ```rust,no_run
//!# #[cfg(target_os = "linux")]
//!# #[tokio::main]
//!# async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!use blecloner::{app, BluerRadio, Config};
//!
//!let radio = BluerRadio::new().await?;
//!let stdin = std::io::stdin();
//!let created = app::run(&radio, &Config::default(), &mut stdin.lock(), &mut std::io::stdout()).await?;
//!println!("sketch written to {}", created.display());
//!#    Ok(())
//!# }
//!# #[cfg(not(target_os = "linux"))]
//!# fn main() {}
//! ```
//!
//! # Overview
//!
//! A run goes through these steps:
//!
//! - [Listening][discovery::listen] for advertisements for a fixed window, keeping the most recent record for each
//!   device address
//! - [Selecting][discovery::DiscoveryCache::select] one of the discovered devices by index
//! - [Re-resolving][discovery::resolve] a connectable handle for the selected address
//! - [Extracting][gatt::extract] the service and characteristic tree over a scoped connection
//! - [Synthesizing][sketch::synthesize] the sketch from the name, the tree, and the advertisement
//! - [Writing][output::write_sketch] the sketch to `<name>-<address>/<name>-<address>.ino`
//!
//! Everything that talks to hardware sits behind the [`Radio`][radio::Radio] trait. On Linux, [`BluerRadio`]
//! implements it on top of BlueZ. Synthesis is a pure function and never touches the radio.
//!
//! # Feature flags
//!
//! The `serde` feature is available to enable serializing/deserializing device identifiers, advertisement records,
//! and attribute trees.

pub mod app;
pub mod btuuid;
pub mod config;
pub mod console;
pub mod discovery;
pub mod error;
pub mod gatt;
pub mod hex;
pub mod output;
pub mod radio;
pub mod sanitize;
pub mod sketch;

#[cfg(target_os = "linux")]
mod bluer;

#[cfg(target_os = "linux")]
pub use crate::bluer::{BluerConnection, BluerDevice, BluerRadio};
pub use btuuid::BluetoothUuidExt;
pub use config::Config;
pub use error::Error;
pub use uuid::Uuid;

/// Convenience alias for a result with [`Error`]
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// A protocol-level device identifier, such as `C4:7C:8D:6A:3E:11`.
///
/// Unique per device for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceId(String);

impl DeviceId {
    /// Creates an identifier from its textual form
    pub fn new(address: impl Into<String>) -> Self {
        DeviceId(address.into())
    }

    /// The textual form of this identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Data observed in one Bluetooth advertisement or scan response.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvertisementRecord {
    /// The source of the advertisement
    pub address: DeviceId,
    /// The (possibly shortened) local name of the device (CSS §A.1.2)
    pub local_name: Option<String>,
    /// The signal strength in dBm of the received advertisement packet
    pub rssi: Option<i16>,
    /// Transmitted power level (CSS §A.1.5)
    pub tx_power_level: Option<i16>,
    /// Advertised GATT service UUIDs (CSS §A.1.1), in the order reported by the radio
    pub services: Vec<Uuid>,
    /// Manufacturer specific data (CSS §A.1.4), in the order reported by the radio
    pub manufacturer_data: Vec<ManufacturerData>,
    /// Service associated data (CSS §A.1.11), in the order reported by the radio
    pub service_data: Vec<ServiceData>,
}

impl AdvertisementRecord {
    /// An empty record for `address`
    pub fn new(address: DeviceId) -> Self {
        AdvertisementRecord {
            address,
            local_name: None,
            rssi: None,
            tx_power_level: None,
            services: Vec::new(),
            manufacturer_data: Vec::new(),
            service_data: Vec::new(),
        }
    }

    /// The advertised local name, or `Unknown`
    pub fn display_name(&self) -> &str {
        self.local_name.as_deref().unwrap_or("Unknown")
    }
}

/// Manufacturer specific data included in Bluetooth advertisements. See the Bluetooth Core Specification Supplement
/// §A.1.4 for details.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManufacturerData {
    /// Company identifier (defined [here](https://www.bluetooth.com/specifications/assigned-numbers/company-identifiers/))
    pub company_id: u16,
    /// Manufacturer specific data
    pub data: Vec<u8>,
}

/// Data associated with an advertised service. See the Bluetooth Core Specification Supplement §A.1.11.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceData {
    /// The service the data belongs to
    pub uuid: Uuid,
    /// Service specific data
    pub data: Vec<u8>,
}

/// GATT characteristic properties as defined in the Bluetooth Core Specification, Vol 3, Part G, §3.3.1.1.
/// Extended properties are also included as defined in §3.3.3.1.
#[allow(missing_docs)]
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharacteristicProperties {
    pub broadcast: bool,
    pub read: bool,
    pub write_without_response: bool,
    pub write: bool,
    pub notify: bool,
    pub indicate: bool,
    pub authenticated_signed_writes: bool,
    pub extended_properties: bool,
    pub reliable_write: bool,
    pub writable_auxiliaries: bool,
}

impl CharacteristicProperties {
    /// The set properties as textual tokens, in bit order.
    pub fn tokens(self) -> Vec<String> {
        [
            (self.broadcast, "broadcast"),
            (self.read, "read"),
            (self.write_without_response, "write-without-response"),
            (self.write, "write"),
            (self.notify, "notify"),
            (self.indicate, "indicate"),
            (self.authenticated_signed_writes, "authenticated-signed-writes"),
            (self.extended_properties, "extended-properties"),
            (self.reliable_write, "reliable-write"),
            (self.writable_auxiliaries, "writable-auxiliaries"),
        ]
        .into_iter()
        .filter_map(|(set, token)| set.then(|| token.to_string()))
        .collect()
    }
}
