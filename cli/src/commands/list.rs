use std::io::Write;

use tracing::info;

use crate::datafile::{DataFile, OnMissing};

pub fn list(file: &DataFile, out: &mut impl Write) -> anyhow::Result<()> {
    let store = file.open("list", OnMissing::Fail)?;

    writeln!(out, "{store}")?;
    info!("Displayed {} routes", store.count());
    Ok(())
}
