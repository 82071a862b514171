//! The cloning flow, from listening to writing the sketch

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::info;

use crate::error::ErrorKind;
use crate::radio::{DeviceHandle, Radio};
use crate::sketch::SynthesisContext;
use crate::{console, discovery, gatt, output, sketch, Config, Result};

/// Runs one clone: listen, let the user pick a device, read it, and write its sketch.
///
/// Returns the folder the sketch was written to. Every failure ends the run; nothing is written unless extraction
/// and synthesis both succeed.
pub async fn run<R: Radio>(
    radio: &R,
    config: &Config,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<PathBuf> {
    writeln!(out, "Scanning for BLE devices...")?;
    writeln!(out, "Listening for advertisements for {:?}", config.scan_window)?;
    let cache = discovery::listen(radio, config.scan_window).await?;
    if cache.is_empty() {
        return Err(ErrorKind::NoDevicesFound.into());
    }

    console::list_devices(out, &cache)?;
    let index = console::read_selection(input, out)?;
    let advertisement = cache.select(index)?;
    console::print_details(out, &advertisement)?;

    let handle = discovery::resolve(radio, &advertisement.address, config.lookup_timeout).await?;
    let name = handle
        .name()
        .or(advertisement.local_name.as_deref())
        .unwrap_or("Unknown")
        .to_string();

    writeln!(out, "\nConnecting to {} ({})", name, handle.id())?;
    let tree = gatt::extract(radio, &handle, config.connect_timeout).await?;
    writeln!(
        out,
        "Read {} service(s) from {}",
        tree.services().len(),
        handle.id()
    )?;

    let sketch = sketch::synthesize(&SynthesisContext {
        name: &name,
        tree: &tree,
        advertisement: &advertisement,
    })?;
    let folder = output::write_sketch(&config.output_dir, &name, handle.id().as_str(), &sketch)?;
    info!("cloned {} into {}", handle.id(), folder.display());

    writeln!(out, "Arduino sketch created: {}", folder.display())?;
    Ok(folder)
}
