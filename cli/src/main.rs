//! The VCI network tools: importing OpenStreetMap into SUMO, carving the ring road's network out
//! of it, and splitting that into detector systems. These are bundled as a single executable with
//! one subcommand per step.

#[macro_use]
extern crate log;

mod boundaries;
mod configuration;
mod cut_systems;
mod detector_systems;
mod extend_edges;
mod osm_convert;

use std::path::Path;

use anyhow::Result;
use structopt::StructOpt;

use crate::extend_edges::ExtendOptions;

#[derive(StructOpt)]
#[structopt(name = "vci", about = "Tools for cutting SUMO networks into detector systems")]
enum Command {
    /// Imports every .osm file in a folder into a SUMO network with netconvert
    OsmConvert {
        /// The folder with the .osm files
        #[structopt(long, short = "f", default_value = "osm")]
        osm_folder: String,
        /// The netconvert configuration to use. A timestamped copy of the full configuration is
        /// saved next to it.
        #[structopt(long, default_value = "network_configs/base.cfg")]
        config_file: String,
        /// The network to write. Defaults to networks/<config name>_<time>.net.xml
        #[structopt(long, short = "o")]
        output_file: Option<String>,
    },
    /// Extends a seed set of edges by adjacent edge types, and writes the edge IDs
    ExtendEdges {
        /// The SUMO network
        #[structopt(default_value = "networks/base.net.xml")]
        sumo_net_file: String,
        /// The edge list to write. Defaults to <network>_extended_<time>.txt next to the network.
        #[structopt(long, short = "o")]
        output: Option<String>,
        #[structopt(flatten)]
        opts: ExtendOptions,
    },
    /// Extends a seed set of edges, then makes a new network with only those edges
    FilterByEdge {
        /// The SUMO network
        #[structopt(long, default_value = "networks/base.net.xml")]
        sumo_net_file: String,
        /// The netconvert configuration to use. A timestamped copy of the full configuration is
        /// saved next to it, along with the list of kept edges.
        #[structopt(long, default_value = "netconvert_configs/filter_by_edge.cfg")]
        config_file: String,
        /// The network to write. Defaults to networks/filter_by_edge_<time>.net.xml
        #[structopt(long, short = "o")]
        output_file: Option<String>,
        #[structopt(flatten)]
        opts: ExtendOptions,
    },
    /// Expands a list of cut edges with every edge that continues them, and writes the result
    ContinuousEdges {
        #[structopt(long, default_value = "networks/filter_by_edge.net.xml")]
        sumo_net_file: String,
        #[structopt(long, default_value = "network_configs/cut_edges.txt")]
        cut_edges_file: String,
        /// Defaults to <cut edges>_continuous_<time>.txt next to the cut edges
        #[structopt(long, short = "o")]
        output: Option<String>,
    },
    /// Expands a list of cut edges with every edge that can be deduced from them, and writes the
    /// result
    DeducibleEdges {
        #[structopt(long, default_value = "networks/filter_by_edge.net.xml")]
        sumo_net_file: String,
        #[structopt(long, default_value = "network_configs/cut_edges.txt")]
        cut_edges_file: String,
        /// Defaults to <cut edges>_deducible_<time>.txt next to the cut edges
        #[structopt(long, short = "o")]
        output: Option<String>,
    },
    /// Removes a list of cut edges from a network. Three networks are written: with just the
    /// listed edges removed, with their continuous closure removed, and with the deducible
    /// closure of that removed.
    CutSystems {
        #[structopt(long, default_value = "networks/filter_by_edge.net.xml")]
        sumo_net_file: String,
        #[structopt(long, default_value = "network_configs/raw.cfg")]
        config_file: String,
        #[structopt(long, default_value = "network_configs/cut_edges.txt")]
        cut_edges_file: String,
        /// The first network to write; the other two get "_continuous" and "_deducible"
        /// inserted into the name. Defaults to <network>_cut_systems_<time>.net.xml next to the
        /// network.
        #[structopt(long, short = "o")]
        output: Option<String>,
    },
    /// Splits a network into weakly connected detector systems, writing each system's network
    /// and edge list into a folder
    DetectorSystems {
        #[structopt(long, default_value = "networks/filter_by_edge_cut_systems.net.xml")]
        sumo_net_file: String,
        #[structopt(long, default_value = "network_configs/filter_by_edge.cfg")]
        config_file: String,
        /// The folder to write to. Defaults to <network>_detector_systems_<time> next to the
        /// network.
        #[structopt(long, short = "o")]
        output: Option<String>,
        /// Remove edges without netconvert, keeping the largest weakly connected component each
        /// time. Only edge lists are written.
        #[structopt(long)]
        in_process: bool,
    },
    /// Writes the dead ends of a network as a CSV of entries and exits
    NetworkConnections {
        #[structopt(long, short = "s", default_value = "networks/filter_by_edge.net.xml")]
        sumo_net_file: String,
        #[structopt(long, short = "o")]
        output: Option<String>,
    },
    /// Writes the edges entering and leaving a network through its dead ends as a CSV
    ConnectionEdges {
        #[structopt(long, short = "s", default_value = "networks/filter_by_edge.net.xml")]
        sumo_net_file: String,
        #[structopt(long, short = "o")]
        output: Option<String>,
    },
    /// Writes the edges at the end of which drivers choose between several next edges
    ChoiceEdges {
        #[structopt(long, short = "s", default_value = "networks/filter_by_edge.net.xml")]
        sumo_net_file: String,
        #[structopt(long, short = "o")]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    vciutil::logger::setup();
    let cmd = Command::from_args();
    let config = configuration::load_configuration()?;

    match cmd {
        Command::OsmConvert {
            osm_folder,
            config_file,
            output_file,
        } => osm_convert::run(&config, osm_folder, config_file, output_file)?,
        Command::ExtendEdges {
            sumo_net_file,
            output,
            opts,
        } => extend_edges::run(&config, sumo_net_file, output, opts)?,
        Command::FilterByEdge {
            sumo_net_file,
            config_file,
            output_file,
            opts,
        } => extend_edges::filter_by_edge(&config, sumo_net_file, config_file, output_file, opts)?,
        Command::ContinuousEdges {
            sumo_net_file,
            cut_edges_file,
            output,
        } => cut_systems::continuous(sumo_net_file, cut_edges_file, output)?,
        Command::DeducibleEdges {
            sumo_net_file,
            cut_edges_file,
            output,
        } => cut_systems::deducible(sumo_net_file, cut_edges_file, output)?,
        Command::CutSystems {
            sumo_net_file,
            config_file,
            cut_edges_file,
            output,
        } => cut_systems::run(&config, sumo_net_file, config_file, cut_edges_file, output)?,
        Command::DetectorSystems {
            sumo_net_file,
            config_file,
            output,
            in_process,
        } => detector_systems::run(&config, sumo_net_file, config_file, output, in_process)?,
        Command::NetworkConnections {
            sumo_net_file,
            output,
        } => boundaries::network_connections(sumo_net_file, output)?,
        Command::ConnectionEdges {
            sumo_net_file,
            output,
        } => boundaries::connection_edges(sumo_net_file, output)?,
        Command::ChoiceEdges {
            sumo_net_file,
            output,
        } => boundaries::choice_edges(sumo_net_file, output)?,
    }
    Ok(())
}

/// `<dir of input>/<true basename of input><suffix>_<time><ext>`, the way every tool names its
/// output when none is given.
fn default_output(input: &str, suffix: &str, time: &str, ext: &str) -> String {
    let (name, _) = vciutil::true_basename(input);
    vciutil::sibling_path(input, &format!("{}{}_{}{}", name, suffix, time, ext))
}

/// Like `default_output`, but keeping the input's own extensions.
fn default_output_same_ext(input: &str, suffix: &str, time: &str) -> String {
    let (_, ext) = vciutil::true_basename(input);
    default_output(input, suffix, time, &ext)
}

fn ensure_parent_dir(path: &str) -> Result<()> {
    if let Some(dir) = Path::new(path).parent() {
        if !dir.as_os_str().is_empty() {
            fs_err::create_dir_all(dir)?;
        }
    }
    Ok(())
}
