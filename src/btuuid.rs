//! `Uuid` extensions for Bluetooth UUIDs

use uuid::Uuid;

/// This is the Bluetooth Base UUID. It is used with 16-bit and 32-bit UUIDs
/// [defined](https://www.bluetooth.com/specifications/assigned-numbers/) by the Bluetooth SIG.
pub const BLUETOOTH_BASE_UUID: u128 = 0x00000000_0000_1000_8000_00805f9b34fb;

const BLUETOOTH_BASE_UUID_STR: &str = "00000000-0000-1000-8000-00805F9B34FB";

/// Const function to create a 16-bit Bluetooth UUID
pub const fn bluetooth_uuid_from_u16(uuid: u16) -> Uuid {
    Uuid::from_u128(((uuid as u128) << 96) | BLUETOOTH_BASE_UUID)
}

/// Extension trait for [uuid::Uuid] with helper methods for dealing with Bluetooth 16-bit UUIDs
pub trait BluetoothUuidExt: private::Sealed {
    /// Creates a 16-bit Bluetooth UUID
    fn from_u16(uuid: u16) -> Self;

    /// Returns `true` if self is a valid 16-bit Bluetooth UUID
    fn is_u16_uuid(&self) -> bool;

    /// Tries to convert self into a 16-bit Bluetooth UUID
    fn try_to_u16(&self) -> Option<u16>;
}

impl BluetoothUuidExt for Uuid {
    fn from_u16(uuid: u16) -> Self {
        bluetooth_uuid_from_u16(uuid)
    }

    fn is_u16_uuid(&self) -> bool {
        let u = self.as_u128();
        (u & ((1 << 96) - 1)) == BLUETOOTH_BASE_UUID && (((u >> 96) as u32) & 0xffff0000) == 0
    }

    fn try_to_u16(&self) -> Option<u16> {
        let u = self.as_u128();
        self.is_u16_uuid().then(|| (u >> 96) as u16)
    }
}

mod private {
    use uuid::Uuid;

    pub trait Sealed {}

    impl Sealed for Uuid {}
}

/// Canonicalizes a textual UUID for use in a sketch.
///
/// A hyphenated 128-bit UUID derived from the Bluetooth Base UUID is reduced to its 16-bit form (four uppercase hex
/// digits). Anything else, including strings that are not UUIDs at all, is returned uppercased. Comparison is
/// case-insensitive and the function is idempotent.
pub fn normalize(uuid: &str) -> String {
    let uuid = uuid.to_uppercase();
    match (uuid.get(..4), uuid.get(4..8), uuid.get(8..)) {
        (Some(head), Some(short), Some(tail))
            if head == &BLUETOOTH_BASE_UUID_STR[..4] && tail == &BLUETOOTH_BASE_UUID_STR[8..] =>
        {
            short.to_string()
        }
        _ => uuid,
    }
}

/// Canonicalizes a typed UUID for use in a sketch.
///
/// Agrees with [`normalize`] on the UUID's textual form.
pub fn normalize_uuid(uuid: &Uuid) -> String {
    match uuid.try_to_u16() {
        Some(short) => format!("{short:04X}"),
        None => uuid.hyphenated().to_string().to_uppercase(),
    }
}

/// Expands a 16-bit UUID written as four hex digits into its full 128-bit textual form.
pub fn expand_short_uuid(short: &str) -> String {
    format!("0000{}{}", short.to_uppercase(), &BLUETOOTH_BASE_UUID_STR[8..])
}

/// Services provided by every NimBLE server on its own. They are never cloned.
pub const SKIPPED_SERVICES: [Uuid; 2] = [services::GENERIC_ACCESS, services::GENERIC_ATTRIBUTE];

/// Returns `true` if the service identified by `uuid` is left out of a clone.
pub fn is_skipped_service(uuid: &Uuid) -> bool {
    SKIPPED_SERVICES.contains(uuid)
}

/// Bluetooth GATT Service 16-bit UUIDs
pub mod services {
    #![allow(missing_docs)]

    use uuid::Uuid;

    use super::bluetooth_uuid_from_u16;

    pub const GENERIC_ACCESS: Uuid = bluetooth_uuid_from_u16(0x1800);
    pub const GENERIC_ATTRIBUTE: Uuid = bluetooth_uuid_from_u16(0x1801);
    pub const DEVICE_INFORMATION: Uuid = bluetooth_uuid_from_u16(0x180A);
    pub const HEART_RATE: Uuid = bluetooth_uuid_from_u16(0x180D);
    pub const BATTERY: Uuid = bluetooth_uuid_from_u16(0x180F);
}

/// Bluetooth GATT Characteristic 16-bit UUIDs
pub mod characteristics {
    #![allow(missing_docs)]

    use uuid::Uuid;

    use super::bluetooth_uuid_from_u16;

    pub const DEVICE_NAME: Uuid = bluetooth_uuid_from_u16(0x2A00);
    pub const APPEARANCE: Uuid = bluetooth_uuid_from_u16(0x2A01);
    pub const SERVICE_CHANGED: Uuid = bluetooth_uuid_from_u16(0x2A05);
    pub const BATTERY_LEVEL: Uuid = bluetooth_uuid_from_u16(0x2A19);
    pub const MANUFACTURER_NAME_STRING: Uuid = bluetooth_uuid_from_u16(0x2A29);
    pub const HEART_RATE_MEASUREMENT: Uuid = bluetooth_uuid_from_u16(0x2A37);
}
