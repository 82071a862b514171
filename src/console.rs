//! Console interaction
//!
//! Device listing and selection read from and write to any [`BufRead`]/[`Write`] pair so the flow can be driven
//! without a terminal.

use std::io::{BufRead, Write};

use crate::discovery::DiscoveryCache;
use crate::error::ErrorKind;
use crate::{AdvertisementRecord, Error, Result};

/// Prints every discovered device as `index: name (address)`.
pub fn list_devices(out: &mut impl Write, cache: &DiscoveryCache) -> Result<()> {
    writeln!(out, "\nFound devices:")?;
    for (index, record) in cache.iter().enumerate() {
        writeln!(out, "{}: {} ({})", index, record.display_name(), record.address)?;
    }
    Ok(())
}

/// Prompts for a device index and reads one line.
///
/// Anything that is not a non-negative integer is an [`ErrorKind::InvalidSelection`]. Range checking is left to
/// [`DiscoveryCache::select`].
pub fn read_selection(input: &mut impl BufRead, out: &mut impl Write) -> Result<usize> {
    write!(out, "Select a device by index: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim();
    line.parse::<usize>()
        .map_err(|err| Error::new(ErrorKind::InvalidSelection, Some(Box::new(err)), format!("{line:?}")))
}

/// Prints everything the selected device advertised.
pub fn print_details(out: &mut impl Write, record: &AdvertisementRecord) -> Result<()> {
    writeln!(out, "\nSelected Device: {} ({})", record.display_name(), record.address)?;
    match record.rssi {
        Some(rssi) => writeln!(out, "  RSSI: {rssi} dBm")?,
        None => writeln!(out, "  RSSI: unknown")?,
    }
    if let Some(power) = record.tx_power_level {
        writeln!(out, "  TX Power: {power} dBm")?;
    }
    let services: Vec<String> = record.services.iter().map(ToString::to_string).collect();
    writeln!(out, "  Advertised Services: [{}]", services.join(", "))?;
    for manufacturer in &record.manufacturer_data {
        writeln!(
            out,
            "  Manufacturer Data: 0x{:04X}: {:02X?}",
            manufacturer.company_id, manufacturer.data
        )?;
    }
    for service in &record.service_data {
        writeln!(out, "  Service Data: {}: {:02X?}", service.uuid, service.data)?;
    }
    Ok(())
}
