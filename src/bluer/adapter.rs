use std::time::Duration;

use async_trait::async_trait;
use bluer::{AdapterEvent, DiscoveryFilter, DiscoveryTransport, Session};
use futures_lite::StreamExt;
use tokio::pin;
use tokio::time::Instant;
use tracing::{debug, info};

use super::device::{advertisement, BluerConnection, BluerDevice};
use crate::error::ErrorKind;
use crate::radio::{AdvertisementStream, Radio};
use crate::{Error, Result};

const SERVICES_RESOLVED_POLL: Duration = Duration::from_millis(100);

/// The system's default Bluetooth adapter, driven through BlueZ.
#[derive(Debug, Clone)]
pub struct BluerRadio {
    inner: bluer::Adapter,
}

impl PartialEq for BluerRadio {
    fn eq(&self, other: &Self) -> bool {
        self.inner.name() == other.inner.name()
    }
}

impl Eq for BluerRadio {}

impl BluerRadio {
    /// Opens the default adapter, powering it on if necessary.
    pub async fn new() -> Result<Self> {
        let session = Session::new().await?;
        let inner = session.default_adapter().await.map_err(|err| {
            Error::new(
                ErrorKind::AdapterUnavailable,
                Some(Box::new(err)),
                "no default Bluetooth adapter".to_string(),
            )
        })?;

        if !inner.is_powered().await? {
            info!("powering on {}", inner.name());
            inner.set_powered(true).await.map_err(|err| {
                Error::new(
                    ErrorKind::AdapterUnavailable,
                    Some(Box::new(err)),
                    format!("{} could not be powered on", inner.name()),
                )
            })?;
        }

        Ok(BluerRadio { inner })
    }

    /// The name of the underlying adapter, such as `hci0`
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Restricts discovery to LE transports. Classic BR/EDR devices have no GATT server to clone.
    async fn le_only(&self) -> Result<()> {
        self.inner
            .set_discovery_filter(DiscoveryFilter {
                transport: DiscoveryTransport::Le,
                ..Default::default()
            })
            .await
            .map_err(Into::into)
    }

    /// The device behind `event`, if it was heard during this discovery.
    ///
    /// BlueZ also announces every device in its cache, including bonded devices that are out of range. Only devices
    /// with a current RSSI are in range.
    async fn in_range(&self, event: AdapterEvent) -> Option<bluer::Device> {
        let AdapterEvent::DeviceAdded(addr) = event else {
            return None;
        };
        let device = self.inner.device(addr).ok()?;
        if heard(device.rssi().await) {
            Some(device)
        } else {
            debug!("ignoring cached device {}", addr);
            None
        }
    }
}

fn heard(rssi: bluer::Result<Option<i16>>) -> bool {
    matches!(rssi, Ok(Some(_)))
}

#[async_trait]
impl Radio for BluerRadio {
    type Handle = BluerDevice;
    type Connection = BluerConnection;

    async fn scan(&self) -> Result<AdvertisementStream<'_>> {
        self.le_only().await?;
        let events = self.inner.discover_devices_with_changes().await?;
        Ok(Box::pin(
            events
                .then(move |event| {
                    Box::pin(async move {
                        let device = self.in_range(event).await?;
                        Some(advertisement(&device).await)
                    })
                })
                .filter_map(|x| x),
        ))
    }

    async fn discover(&self, timeout: Duration) -> Result<Vec<BluerDevice>> {
        self.le_only().await?;
        // Changes are needed too: a device is announced before its first RSSI reading arrives
        let events = self.inner.discover_devices_with_changes().await?;
        pin!(events);

        let deadline = Instant::now() + timeout;
        let mut devices: Vec<BluerDevice> = Vec::new();
        while let Ok(Some(event)) = tokio::time::timeout_at(deadline, events.next()).await {
            if let Some(device) = self.in_range(event).await {
                if !devices.iter().any(|known| known.inner.address() == device.address()) {
                    debug!("discovered {}", device.address());
                    devices.push(BluerDevice::new(device).await);
                }
            }
        }
        Ok(devices)
    }

    async fn connect(&self, handle: &BluerDevice, timeout: Duration) -> Result<BluerConnection> {
        let device = handle.inner.clone();
        let establish = async {
            if !device.is_connected().await? {
                device.connect().await?;
            }
            while !device.is_services_resolved().await? {
                tokio::time::sleep(SERVICES_RESOLVED_POLL).await;
            }
            Ok::<_, Error>(())
        };

        match tokio::time::timeout(timeout, establish).await {
            Ok(Ok(())) => Ok(BluerConnection::new(device)),
            Ok(Err(err)) => {
                let _ = device.disconnect().await;
                Err(err)
            }
            Err(_) => {
                let _ = device.disconnect().await;
                Err(Error::new(
                    ErrorKind::Timeout,
                    None,
                    format!("no connection to {} after {:?}", handle.inner.address(), timeout),
                ))
            }
        }
    }
}
