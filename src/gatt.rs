//! The GATT attribute tree of a connected device

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::btuuid::is_skipped_service;
use crate::error::ErrorKind;
use crate::radio::{Connection, DeviceHandle, Radio};
use crate::{Error, Result, Uuid};

/// The services of a device that a clone re-creates, in the order the device reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeTree {
    services: Vec<ServiceNode>,
}

/// A GATT service and its characteristics
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceNode {
    /// The [`Uuid`] identifying the type of this GATT service
    pub uuid: Uuid,
    /// The characteristics of this service, in discovery order
    pub characteristics: Vec<CharacteristicNode>,
}

/// A GATT characteristic
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacteristicNode {
    /// The [`Uuid`] identifying the type of this GATT characteristic
    pub uuid: Uuid,
    /// Property tokens such as `read` or `write-without-response`, as reported by the stack
    pub properties: Vec<String>,
}

impl AttributeTree {
    /// Builds a tree from a device's attribute table.
    ///
    /// Generic access and generic attribute services are dropped, as is any characteristic whose UUID repeats an
    /// earlier one in the same service. Everything else keeps its order.
    pub fn from_services(services: impl IntoIterator<Item = ServiceNode>) -> Self {
        let services = services
            .into_iter()
            .filter(|service| {
                let skipped = is_skipped_service(&service.uuid);
                if skipped {
                    debug!("skipping service {}", service.uuid);
                }
                !skipped
            })
            .map(|mut service| {
                let mut seen = Vec::with_capacity(service.characteristics.len());
                service.characteristics.retain(|characteristic| {
                    if seen.contains(&characteristic.uuid) {
                        warn!(
                            "service {} repeats characteristic {}, keeping the first",
                            service.uuid, characteristic.uuid
                        );
                        false
                    } else {
                        seen.push(characteristic.uuid);
                        true
                    }
                });
                service
            })
            .collect();

        AttributeTree { services }
    }

    /// The services to clone
    pub fn services(&self) -> &[ServiceNode] {
        &self.services
    }

    /// Returns `true` if the device has nothing to clone beyond its advertisement
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceNode {
    /// A service without characteristics
    pub fn new(uuid: Uuid) -> Self {
        ServiceNode {
            uuid,
            characteristics: Vec::new(),
        }
    }

    /// Appends a characteristic
    pub fn with_characteristic(mut self, characteristic: CharacteristicNode) -> Self {
        self.characteristics.push(characteristic);
        self
    }
}

impl CharacteristicNode {
    /// A characteristic with the given property tokens
    pub fn new<I, S>(uuid: Uuid, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CharacteristicNode {
            uuid,
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }
}

/// Connects to `handle` and reads its attribute tree.
///
/// The connection is released before returning, whether or not extraction succeeded. Failing to connect, or losing
/// the connection while reading, is reported as [`ErrorKind::ConnectionFailed`].
pub async fn extract<R: Radio>(radio: &R, handle: &R::Handle, timeout: Duration) -> Result<AttributeTree> {
    let id = handle.id();
    let connection = radio.connect(handle, timeout).await.map_err(connection_failed)?;
    info!("connected to {}", id);

    let services = connection.services().await;

    if let Err(err) = connection.disconnect().await {
        warn!("disconnecting from {} failed: {}", id, err);
    } else {
        debug!("disconnected from {}", id);
    }

    let tree = AttributeTree::from_services(services.map_err(connection_failed)?);
    info!("read {} service(s) from {}", tree.services().len(), id);
    Ok(tree)
}

fn connection_failed(err: Error) -> Error {
    match err.kind() {
        ErrorKind::ConnectionFailed => err,
        _ => Error::new(ErrorKind::ConnectionFailed, Some(Box::new(err)), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btuuid::{characteristics, services};

    #[test]
    fn generic_services_are_left_out() {
        let tree = AttributeTree::from_services([
            ServiceNode::new(services::GENERIC_ACCESS)
                .with_characteristic(CharacteristicNode::new(characteristics::DEVICE_NAME, ["read"])),
            ServiceNode::new(services::GENERIC_ATTRIBUTE)
                .with_characteristic(CharacteristicNode::new(characteristics::SERVICE_CHANGED, ["indicate"])),
            ServiceNode::new(services::BATTERY),
            ServiceNode::new(services::HEART_RATE),
        ]);

        let uuids: Vec<_> = tree.services().iter().map(|s| s.uuid).collect();
        assert_eq!(uuids, [services::BATTERY, services::HEART_RATE]);
    }

    #[test]
    fn repeated_characteristics_keep_the_first() {
        let tree = AttributeTree::from_services([ServiceNode::new(services::BATTERY)
            .with_characteristic(CharacteristicNode::new(characteristics::BATTERY_LEVEL, ["read"]))
            .with_characteristic(CharacteristicNode::new(characteristics::BATTERY_LEVEL, ["notify"]))]);

        let service = &tree.services()[0];
        assert_eq!(service.characteristics.len(), 1);
        assert_eq!(service.characteristics[0].properties, ["read"]);
    }

    #[test]
    fn connection_errors_are_reclassified() {
        let err = connection_failed(ErrorKind::Timeout.into());
        assert_eq!(err.kind(), ErrorKind::ConnectionFailed);
        assert!(std::error::Error::source(&err).is_some());
    }
}
