use super::characteristic::characteristic_node;
use crate::gatt::ServiceNode;
use crate::Result;

/// Reads a remote service and all of its characteristics, in handle order.
pub(super) async fn service_node(service: bluer::gatt::remote::Service) -> Result<ServiceNode> {
    let mut node = ServiceNode::new(service.uuid().await?);

    let mut characteristics = service.characteristics().await?;
    characteristics.sort_by_key(|characteristic| characteristic.id());
    for characteristic in characteristics {
        node.characteristics.push(characteristic_node(characteristic).await?);
    }

    Ok(node)
}
