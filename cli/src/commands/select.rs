use std::io::Write;

use routes_common::route::normalize;
use tracing::{info, warn};

use crate::datafile::{DataFile, OnMissing};

pub fn select(file: &DataFile, point: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let store = file.open("select", OnMissing::Fail)?;
    let point = normalize(point);

    let selected = store.select(&point);
    writeln!(out, "{selected}")?;

    // An empty selection is not an error, but it is worth flagging.
    if selected.is_empty() {
        warn!("Found 0 routes starting or ending at {point}");
    } else {
        info!("Found {} routes starting or ending at {point}", selected.count());
    }
    Ok(())
}
