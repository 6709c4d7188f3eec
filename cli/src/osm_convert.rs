use anyhow::{bail, Result};

use sumo::Netconvert;
use vciutil::{timestamp, Timer};

use crate::configuration::VciConfiguration;
use crate::{default_output_same_ext, ensure_parent_dir};

pub fn run(
    config: &VciConfiguration,
    osm_folder: String,
    config_file: String,
    output_file: Option<String>,
) -> Result<()> {
    let mut timer = Timer::new("convert OSM");
    let time = timestamp();

    let osm_files = list_osm_files(&osm_folder)?;
    if osm_files.is_empty() {
        bail!("No .osm files in {}", osm_folder);
    }
    timer.note(format!("Importing {}", osm_files.join(", ")));

    let config_copy = default_output_same_ext(&config_file, "", &time);
    let output = output_file.unwrap_or_else(|| {
        let (name, _) = vciutil::true_basename(&config_file);
        format!("networks/{}_{}.net.xml", name, time)
    });
    ensure_parent_dir(&output)?;

    timer.start("netconvert");
    Netconvert::new(config.netconvert.clone()).convert_osm(
        &osm_files,
        &config_file,
        &output,
        Some(&config_copy),
    )?;
    timer.stop("netconvert");
    info!("Wrote {}", output);
    Ok(())
}

/// Every file in the folder ending in .osm, sorted.
fn list_osm_files(folder: &str) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs_err::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map(|ext| ext == "osm").unwrap_or(false) {
            files.push(path.display().to_string());
        }
    }
    files.sort();
    Ok(files)
}
