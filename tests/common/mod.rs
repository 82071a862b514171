#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use blecloner::error::ErrorKind;
use blecloner::gatt::ServiceNode;
use blecloner::radio::{AdvertisementStream, Connection, DeviceHandle, Radio};
use blecloner::{AdvertisementRecord, DeviceId, Result};
use futures_lite::StreamExt;

/// A radio that replays canned advertisements and serves a canned attribute table.
#[derive(Default)]
pub struct MockRadio {
    pub advertisements: Vec<AdvertisementRecord>,
    /// Keep the scan open after the canned advertisements until the listening window closes
    pub keep_scanning: bool,
    pub discoverable: Vec<MockHandle>,
    pub services: Vec<ServiceNode>,
    pub connect_error: Option<ErrorKind>,
    pub services_error: Option<ErrorKind>,
    pub state: Arc<MockState>,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub connects: AtomicUsize,
    pub disconnects: AtomicUsize,
    pub connect_timeout: Mutex<Option<Duration>>,
    pub lookup_timeout: Mutex<Option<Duration>>,
}

impl MockState {
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct MockHandle {
    pub id: DeviceId,
    pub name: Option<String>,
}

impl MockHandle {
    pub fn new(address: &str, name: Option<&str>) -> Self {
        MockHandle {
            id: DeviceId::new(address),
            name: name.map(ToString::to_string),
        }
    }
}

impl DeviceHandle for MockHandle {
    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

pub struct MockConnection {
    services: Vec<ServiceNode>,
    services_error: Option<ErrorKind>,
    state: Arc<MockState>,
}

#[async_trait]
impl Radio for MockRadio {
    type Handle = MockHandle;
    type Connection = MockConnection;

    async fn scan(&self) -> Result<AdvertisementStream<'_>> {
        let canned = futures_lite::stream::iter(self.advertisements.clone());
        if self.keep_scanning {
            Ok(Box::pin(canned.chain(futures_lite::stream::pending())))
        } else {
            Ok(Box::pin(canned))
        }
    }

    async fn discover(&self, timeout: Duration) -> Result<Vec<MockHandle>> {
        *self.state.lookup_timeout.lock().unwrap() = Some(timeout);
        Ok(self.discoverable.clone())
    }

    async fn connect(&self, _handle: &MockHandle, timeout: Duration) -> Result<MockConnection> {
        *self.state.connect_timeout.lock().unwrap() = Some(timeout);
        if let Some(kind) = self.connect_error {
            return Err(kind.into());
        }
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        Ok(MockConnection {
            services: self.services.clone(),
            services_error: self.services_error,
            state: self.state.clone(),
        })
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn services(&self) -> Result<Vec<ServiceNode>> {
        match self.services_error {
            Some(kind) => Err(kind.into()),
            None => Ok(self.services.clone()),
        }
    }

    async fn disconnect(&self) -> Result<()> {
        self.state.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn advertisement(address: &str, name: Option<&str>) -> AdvertisementRecord {
    let mut record = AdvertisementRecord::new(DeviceId::new(address));
    record.local_name = name.map(ToString::to_string);
    record
}
