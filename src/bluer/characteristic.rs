use crate::gatt::CharacteristicNode;
use crate::{CharacteristicProperties, Result};

pub(super) async fn characteristic_node(characteristic: bluer::gatt::remote::Characteristic) -> Result<CharacteristicNode> {
    let uuid = characteristic.uuid().await?;
    let properties = CharacteristicProperties::from(characteristic.flags().await?);
    Ok(CharacteristicNode::new(uuid, properties.tokens()))
}

impl From<bluer::gatt::CharacteristicFlags> for CharacteristicProperties {
    fn from(flags: bluer::gatt::CharacteristicFlags) -> Self {
        CharacteristicProperties {
            broadcast: flags.broadcast,
            read: flags.read,
            write_without_response: flags.write_without_response,
            write: flags.write,
            notify: flags.notify,
            indicate: flags.indicate,
            authenticated_signed_writes: flags.authenticated_signed_writes,
            extended_properties: flags.extended_properties,
            reliable_write: flags.reliable_write,
            writable_auxiliaries: flags.writable_auxiliaries,
        }
    }
}
