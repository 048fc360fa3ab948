use anyhow::{Context, Result};
use log::LevelFilter;
use std::{io::Write, path::Path};

mod corner_mask;
mod error;
mod icon_gen;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    icon_gen::generate_icons(
        Path::new(icon_gen::SOURCE_PATH),
        Path::new(icon_gen::OUTPUT_DIR),
    )
    .context("Icon generation failed")?;

    Ok(())
}
