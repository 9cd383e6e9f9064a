use tracing::info;

use crate::datafile::{DataFile, OnMissing};

pub fn add(file: &DataFile, start: &str, end: &str, number: i64) -> anyhow::Result<()> {
    let mut store = file.open("add", OnMissing::Create)?;

    let route = store.insert(start, end, number)?;
    info!("Added route {route}");

    file.save(&store)
}
