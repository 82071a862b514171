//! Finding the device to clone

use std::collections::HashMap;
use std::time::Duration;

use futures_lite::StreamExt;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::ErrorKind;
use crate::radio::{DeviceHandle, Radio};
use crate::{AdvertisementRecord, DeviceId, Error, Result};

/// The most recent advertisement of every device observed during one listening window.
///
/// Devices keep the position of their first observation, so indices stay stable while later observations replace
/// the stored record.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryCache {
    order: Vec<DeviceId>,
    records: HashMap<DeviceId, AdvertisementRecord>,
}

impl DiscoveryCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record`, replacing any earlier record for the same address.
    pub fn observe(&mut self, record: AdvertisementRecord) {
        if !self.records.contains_key(&record.address) {
            self.order.push(record.address.clone());
        }
        self.records.insert(record.address.clone(), record);
    }

    /// The number of distinct devices observed
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing was observed
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The stored record for `id`
    pub fn get(&self, id: &DeviceId) -> Option<&AdvertisementRecord> {
        self.records.get(id)
    }

    /// The stored records, in order of first observation.
    pub fn iter(&self) -> impl Iterator<Item = &AdvertisementRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Takes the record at `index`, discarding the rest of the cache.
    ///
    /// Fails with [`ErrorKind::InvalidSelection`] unless `index` is in `0..len()`.
    pub fn select(mut self, index: usize) -> Result<AdvertisementRecord> {
        let count = self.len();
        self.order
            .get(index)
            .and_then(|id| self.records.remove(id))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidSelection,
                    None,
                    format!("index {index} is not in 0..{count}"),
                )
            })
    }
}

/// Collects advertisements for `window`.
///
/// An empty cache is a valid result; it means no device advertised during the window.
pub async fn listen<R: Radio>(radio: &R, window: Duration) -> Result<DiscoveryCache> {
    info!("listening for advertisements for {:?}", window);
    let mut cache = DiscoveryCache::new();
    let mut scan = radio.scan().await?;
    let deadline = Instant::now() + window;

    loop {
        match tokio::time::timeout_at(deadline, scan.next()).await {
            Ok(Some(record)) => {
                debug!("advertisement from {}: {:?}", record.address, record);
                cache.observe(record);
            }
            Ok(None) => {
                debug!("scan ended before the listening window closed");
                break;
            }
            Err(_) => break,
        }
    }

    info!("listening window closed with {} device(s)", cache.len());
    Ok(cache)
}

/// Looks `id` up again with a fresh scan of `timeout` and returns a handle that can be connected to.
///
/// Fails with [`ErrorKind::DeviceNotFound`] if the device stopped advertising or rotated its address since it was
/// first observed.
pub async fn resolve<R: Radio>(radio: &R, id: &DeviceId, timeout: Duration) -> Result<R::Handle> {
    info!("looking up {} for up to {:?}", id, timeout);
    radio
        .discover(timeout)
        .await?
        .into_iter()
        .find(|handle| handle.id() == id)
        .ok_or_else(|| Error::new(ErrorKind::DeviceNotFound, None, format!("{id} is no longer advertising")))
}
