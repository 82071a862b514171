#![cfg(target_os = "linux")]
#![allow(clippy::let_unit_value)]

use std::path::PathBuf;
use std::time::Duration;

use blecloner::discovery::{listen, resolve, DiscoveryCache};
use blecloner::gatt::{extract, AttributeTree, ServiceNode};
use blecloner::radio::{Connection, Radio};
use blecloner::*;
use futures_lite::StreamExt;

fn assert_send<T: Send>(t: T) -> T {
    t
}

async fn check_radio_apis(radio: &BluerRadio) -> Result<BluerDevice> {
    let scan: Result<_> = assert_send(radio.scan()).await;
    let _adv: Option<AdvertisementRecord> = assert_send(scan?.next()).await;

    let devices: Result<Vec<BluerDevice>> = assert_send(radio.discover(Duration::from_secs(1))).await;
    let device = devices?.into_iter().next().unwrap();

    let connection: Result<BluerConnection> = assert_send(radio.connect(&device, Duration::from_secs(1))).await;
    let connection = connection?;
    let _services: Result<Vec<ServiceNode>> = assert_send(connection.services()).await;
    let _res: Result<()> = assert_send(connection.disconnect()).await;

    Ok(device)
}

async fn check_flow_apis(radio: &BluerRadio) -> Result<AttributeTree> {
    let cache: Result<DiscoveryCache> = assert_send(listen(radio, Duration::from_secs(1))).await;
    let record = cache?.select(0)?;

    let device: Result<BluerDevice> = assert_send(resolve(radio, &record.address, Duration::from_secs(1))).await;
    assert_send(extract(radio, &device?, Duration::from_secs(1))).await
}

async fn check_app_apis(radio: &BluerRadio) -> Result<PathBuf> {
    let mut input: &[u8] = b"0\n";
    let mut out = Vec::new();
    assert_send(app::run(radio, &Config::default(), &mut input, &mut out)).await
}

#[allow(unused)]
async fn check_apis() -> Result<()> {
    let radio = assert_send(BluerRadio::new()).await?;
    check_radio_apis(&radio).await?;
    check_flow_apis(&radio).await?;
    check_app_apis(&radio).await?;

    Ok(())
}

fn main() {}
