use async_trait::async_trait;
use tracing::debug;

use super::service::service_node;
use crate::gatt::ServiceNode;
use crate::radio::{Connection, DeviceHandle};
use crate::{AdvertisementRecord, DeviceId, ManufacturerData, Result, ServiceData};

/// A Bluetooth LE device known to BlueZ
#[derive(Debug, Clone)]
pub struct BluerDevice {
    pub(super) inner: bluer::Device,
    id: DeviceId,
    name: Option<String>,
}

impl PartialEq for BluerDevice {
    fn eq(&self, other: &Self) -> bool {
        self.inner.adapter_name() == other.inner.adapter_name() && self.inner.address() == other.inner.address()
    }
}

impl Eq for BluerDevice {}

impl BluerDevice {
    pub(super) async fn new(inner: bluer::Device) -> Self {
        let id = DeviceId::new(inner.address().to_string());
        let name = inner.name().await.unwrap_or_default();
        BluerDevice { inner, id, name }
    }
}

impl DeviceHandle for BluerDevice {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Reads the advertisement data BlueZ currently holds for `device`.
///
/// Properties BlueZ does not know are left empty.
pub(super) async fn advertisement(device: &bluer::Device) -> AdvertisementRecord {
    let mut record = AdvertisementRecord::new(DeviceId::new(device.address().to_string()));

    record.local_name = device.name().await.unwrap_or_default();
    record.rssi = device.rssi().await.unwrap_or_default();
    record.tx_power_level = device.tx_power().await.unwrap_or_default();

    record.services = sorted(device.uuids().await.unwrap_or_default().unwrap_or_default());

    record.manufacturer_data = sorted(
        device
            .manufacturer_data()
            .await
            .unwrap_or_default()
            .unwrap_or_default()
            .into_iter()
            .map(|(company_id, data)| ManufacturerData { company_id, data }),
    );

    record.service_data = sorted(
        device
            .service_data()
            .await
            .unwrap_or_default()
            .unwrap_or_default()
            .into_iter()
            .map(|(uuid, data)| ServiceData { uuid, data }),
    );

    record
}

/// BlueZ reports advertised entries as hash sets and maps, so they carry no order of their own.
fn sorted<T: Ord>(entries: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut entries: Vec<T> = entries.into_iter().collect();
    entries.sort();
    entries
}

/// A connected BlueZ device whose services have been resolved
#[derive(Debug)]
pub struct BluerConnection {
    inner: bluer::Device,
}

impl BluerConnection {
    pub(super) fn new(inner: bluer::Device) -> Self {
        BluerConnection { inner }
    }
}

#[async_trait]
impl Connection for BluerConnection {
    async fn services(&self) -> Result<Vec<ServiceNode>> {
        let mut services = self.inner.services().await?;
        // BlueZ hands services out in object path order, which is not handle order
        services.sort_by_key(|service| service.id());

        let mut nodes = Vec::with_capacity(services.len());
        for service in services {
            let node = service_node(service).await?;
            debug!("service {} with {} characteristic(s)", node.uuid, node.characteristics.len());
            nodes.push(node);
        }
        Ok(nodes)
    }

    async fn disconnect(&self) -> Result<()> {
        self.inner.disconnect().await.map_err(Into::into)
    }
}
