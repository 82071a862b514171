//! The boundary to the Bluetooth stack
//!
//! Discovery and extraction are written against these traits so that the flow can run against BlueZ on Linux or
//! against an in-memory radio in tests.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures_core::Stream;

use crate::gatt::ServiceNode;
use crate::{AdvertisementRecord, DeviceId, Result};

/// A stream of advertisement observations. Scanning stops when the stream is dropped.
pub type AdvertisementStream<'a> = Pin<Box<dyn Stream<Item = AdvertisementRecord> + Send + 'a>>;

/// A Bluetooth adapter acting in the GAP Central role.
#[async_trait]
pub trait Radio: Send + Sync {
    /// A device found by [`Radio::discover`] that can be connected to
    type Handle: DeviceHandle;
    /// An open GATT client session
    type Connection: Connection;

    /// Starts scanning for advertisements.
    ///
    /// Devices advertise periodically, so the same address is usually observed many times.
    async fn scan(&self) -> Result<AdvertisementStream<'_>>;

    /// Scans for `timeout` and returns every device seen.
    async fn discover(&self, timeout: Duration) -> Result<Vec<Self::Handle>>;

    /// Connects to `handle`, failing if the connection and attribute discovery do not complete within `timeout`.
    async fn connect(&self, handle: &Self::Handle, timeout: Duration) -> Result<Self::Connection>;
}

/// A connectable device.
pub trait DeviceHandle: Send + Sync {
    /// The device address
    fn id(&self) -> &DeviceId;

    /// The name the stack knows the device by, if any
    fn name(&self) -> Option<&str>;
}

/// A connected GATT session.
#[async_trait]
pub trait Connection: Send + Sync {
    /// The device's attribute table in the order reported by the stack, including services that are never cloned.
    async fn services(&self) -> Result<Vec<ServiceNode>>;

    /// Releases the connection
    async fn disconnect(&self) -> Result<()>;
}
