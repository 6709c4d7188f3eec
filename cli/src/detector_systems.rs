use std::path::{Path, PathBuf};

use anyhow::Result;

use edge_sets::{partition_network, EdgeRemoval, InProcessRemoval, NetconvertRemoval};
use sumo::{Netconvert, Network};
use vciutil::{timestamp, true_basename, Timer};

use crate::configuration::VciConfiguration;
use crate::default_output;

pub fn run(
    config: &VciConfiguration,
    sumo_net_file: String,
    config_file: String,
    output: Option<String>,
    in_process: bool,
) -> Result<()> {
    let mut timer = Timer::new("detector systems");
    let output = output
        .unwrap_or_else(|| default_output(&sumo_net_file, "_detector_systems", &timestamp(), ""));
    let (stem, _) = true_basename(&sumo_net_file);

    let network = Network::load(&sumo_net_file, &mut timer)?;
    let removal: Box<dyn EdgeRemoval> = if in_process {
        Box::new(InProcessRemoval)
    } else {
        Box::new(NetconvertRemoval {
            netconvert: Netconvert::new(config.netconvert.clone()),
            config: config_file,
            network: PathBuf::from(&sumo_net_file),
        })
    };
    let systems = partition_network(
        &network,
        removal.as_ref(),
        Path::new(&output),
        &stem,
        config.max_systems_warning,
        &mut timer,
    )?;
    info!("Wrote {} systems to {}", systems.len(), output);
    Ok(())
}
