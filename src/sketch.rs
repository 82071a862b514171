//! NimBLE Arduino sketch generation
//!
//! A sketch is the fixed template in `sketch.ino.tmpl` with three placeholders filled in: `[NAME]` with the device
//! name, `[SERVICES]` with the statements that build and start the GATT server, and `[ADVERTISING]` with the
//! statements that reproduce the advertisement payload. Generation is a pure function of its [`SynthesisContext`].

use std::fmt::Write;

use crate::btuuid::{is_skipped_service, normalize_uuid};
use crate::gatt::{AttributeTree, ServiceNode};
use crate::hex::{array_hex, int_hex};
use crate::{AdvertisementRecord, Result, Uuid};

const TEMPLATE: &str = include_str!("sketch.ino.tmpl");

const NAME: &str = "[NAME]";
const SERVICES: &str = "[SERVICES]";
const ADVERTISING: &str = "[ADVERTISING]";

/// NimBLE property constants for the property tokens they correspond to. Other tokens are emitted unchanged.
const PROPERTY_SYMBOLS: [(&str, &str); 4] = [
    ("write-without-response", "NIMBLE_PROPERTY::WRITE_NR"),
    ("write", "NIMBLE_PROPERTY::WRITE"),
    ("notify", "NIMBLE_PROPERTY::NOTIFY"),
    ("read", "NIMBLE_PROPERTY::READ"),
];

/// Everything a sketch is generated from.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisContext<'a> {
    /// The name the clone advertises under
    pub name: &'a str,
    /// The services to re-create
    pub tree: &'a AttributeTree,
    /// The advertisement to reproduce
    pub advertisement: &'a AdvertisementRecord,
}

/// Generates the complete sketch.
///
/// Output is identical for identical contexts. The device name is inserted verbatim.
pub fn synthesize(ctx: &SynthesisContext<'_>) -> Result<String> {
    let services = services_fragment(ctx.tree);
    let advertising = advertising_fragment(ctx.advertisement)?;
    Ok(render(
        TEMPLATE,
        &[(NAME, ctx.name), (SERVICES, &services), (ADVERTISING, &advertising)],
    ))
}

/// Statements that create every service and characteristic, followed by statements that start every service.
///
/// No service is started until all of them are built, so a connecting client never sees a partial server.
pub fn services_fragment(tree: &AttributeTree) -> String {
    let services: Vec<&ServiceNode> = tree
        .services()
        .iter()
        .filter(|service| !is_skipped_service(&service.uuid))
        .collect();

    let mut out = String::new();
    for service in &services {
        let service_var = symbol(&service.uuid);
        let _ = writeln!(
            out,
            "\tBLEService *{service_var} = pServer->createService(\"{}\");",
            normalize_uuid(&service.uuid)
        );
        for characteristic in &service.characteristics {
            let characteristic_var = symbol(&characteristic.uuid);
            let properties = characteristic
                .properties
                .iter()
                .map(|token| property_symbol(token))
                .collect::<Vec<_>>()
                .join(" | ");
            let _ = writeln!(
                out,
                "\tBLECharacteristic *{characteristic_var} = {service_var}->createCharacteristic(\n\t\t\"{}\",\n\t\t{properties});",
                normalize_uuid(&characteristic.uuid)
            );
            let _ = writeln!(out, "\t{characteristic_var}->setCallbacks(&chrCallbacks);");
        }
        out.push_str("\t\n");
    }

    for service in &services {
        let _ = writeln!(out, "\t{}->start();", symbol(&service.uuid));
    }

    out
}

/// Statements that reproduce the advertised service UUIDs, manufacturer data, and service data.
///
/// Manufacturer data is prefixed with its little-endian company identifier, as it is on air.
pub fn advertising_fragment(advertisement: &AdvertisementRecord) -> Result<String> {
    let mut out = String::new();

    for uuid in &advertisement.services {
        let _ = writeln!(
            out,
            "\tpAdvertising->addServiceUUID(\"{}\");",
            normalize_uuid(uuid)
        );
    }

    for (index, manufacturer) in advertisement.manufacturer_data.iter().enumerate() {
        let buffer = buffer_name("mData", index);
        let mut literals = int_hex(manufacturer.company_id)?;
        if !manufacturer.data.is_empty() {
            literals.push_str(", ");
            literals.push_str(&array_hex(&manufacturer.data));
        }
        let _ = writeln!(out, "\tuint8_t {buffer}[] = {{{literals}}};");
        let _ = writeln!(
            out,
            "\tpAdvertising->setManufacturerData(std::string((char *)&{buffer}[0], {}));",
            2 + manufacturer.data.len()
        );
    }

    for (index, service) in advertisement.service_data.iter().enumerate() {
        let uuid = normalize_uuid(&service.uuid);
        if service.data.is_empty() {
            let _ = writeln!(out, "\tpAdvertising->setServiceData(NimBLEUUID(\"{uuid}\"), std::string());");
            continue;
        }
        let buffer = buffer_name("sData", index);
        let _ = writeln!(out, "\tuint8_t {buffer}[] = {{{}}};", array_hex(&service.data));
        let _ = writeln!(
            out,
            "\tpAdvertising->setServiceData(NimBLEUUID(\"{uuid}\"), std::string((char *)&{buffer}[0], {}));",
            service.data.len()
        );
    }

    Ok(out)
}

/// The NimBLE constant for a property token, or the token itself if it has none.
pub fn property_symbol(token: &str) -> &str {
    PROPERTY_SYMBOLS
        .iter()
        .find(|(known, _)| *known == token)
        .map_or(token, |(_, symbol)| *symbol)
}

/// The C++ variable holding the service or characteristic with this UUID.
fn symbol(uuid: &Uuid) -> String {
    format!("p{}", uuid.simple())
}

fn buffer_name(prefix: &str, index: usize) -> String {
    if index == 0 {
        prefix.to_string()
    } else {
        format!("{prefix}{index}")
    }
}

/// Replaces placeholders in a single left-to-right pass. Inserted text is never searched for placeholders.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find('[') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(placeholder, _)| tail.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('[');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
