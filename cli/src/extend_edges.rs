use std::path::Path;

use anyhow::{bail, Result};
use structopt::StructOpt;

use edge_sets::{
    extend_by_type_depth, read_edge_list, read_lines, seed_edges, write_edge_list, DepthMap,
    EdgeSet, NameMatcher, Seed, DEFAULT_ALIASES,
};
use sumo::{EdgeID, Netconvert, Network};
use vciutil::{prettyprint_usize, sibling_path, timestamp, Timer};

use crate::configuration::VciConfiguration;
use crate::{default_output, default_output_same_ext, ensure_parent_dir};

/// Used by filter-by-edge when they exist and nothing else is specified.
const ROAD_NAMES_FILE: &str = "netconvert_configs/network_road_names";
const ROAD_TYPE_DEPTH_FILE: &str = "netconvert_configs/network_road_type_depth";

/// How to pick the seed edges and how far to extend them. Only one way of seeding may be used;
/// without any, edges named like the VCI are the seed.
#[derive(StructOpt)]
pub struct ExtendOptions {
    /// Seed with edges whose names match one of the aliases in this file, one per line. An empty
    /// file seeds with the whole network.
    #[structopt(long)]
    edge_names_file: Option<String>,
    /// Seed with the edges listed in this file
    #[structopt(long)]
    seed_edges_file: Option<String>,
    /// Seed with this edge. Can be repeated, and combined with --seed-edges-file.
    #[structopt(long = "seed-edge")]
    seed_edges: Vec<String>,
    /// Seed with every edge of this type, like highway.motorway. Can be repeated.
    #[structopt(long = "seed-type")]
    seed_types: Vec<String>,
    /// How far to extend through each edge type, with one "<edge type> <depth>" per line and -1
    /// meaning unlimited. Defaults to following motorways without limit, and primary and
    /// secondary roads and their links for 1 or 2 edges.
    #[structopt(long)]
    edge_types_file: Option<String>,
}

impl ExtendOptions {
    fn seed(&self, config: &VciConfiguration) -> Result<Seed> {
        let by_edges = self.seed_edges_file.is_some() || !self.seed_edges.is_empty();
        let by_types = !self.seed_types.is_empty();
        let by_names = self.edge_names_file.is_some();
        if [by_edges, by_types, by_names].iter().filter(|x| **x).count() > 1 {
            bail!("Seed by edges, by types, or by names, but not a combination");
        }

        if by_edges {
            let mut edges = match self.seed_edges_file {
                Some(ref path) => read_edge_list(path)?,
                None => EdgeSet::new(),
            };
            edges.extend(self.seed_edges.iter().map(|id| EdgeID::from(id.as_str())));
            return Ok(Seed::Edges(edges));
        }
        if by_types {
            return Ok(Seed::Types(self.seed_types.iter().cloned().collect()));
        }
        let aliases = match self.edge_names_file {
            Some(ref path) => read_lines(path)?,
            None => DEFAULT_ALIASES.iter().map(|a| a.to_string()).collect(),
        };
        info!("Edge names: {}", aliases.join(", "));
        Ok(Seed::Aliases {
            aliases,
            matcher: NameMatcher::new(config.similarity_threshold),
        })
    }

    fn depths(&self) -> Result<DepthMap> {
        match self.edge_types_file {
            Some(ref path) => DepthMap::load(path),
            None => Ok(DepthMap::builtin()),
        }
    }

    /// Fills in the usual alias and depth files, if they exist and the user didn't pick another
    /// way.
    fn or_usual_files(mut self) -> ExtendOptions {
        let seeded = self.seed_edges_file.is_some()
            || !self.seed_edges.is_empty()
            || !self.seed_types.is_empty();
        if !seeded && self.edge_names_file.is_none() && Path::new(ROAD_NAMES_FILE).exists() {
            self.edge_names_file = Some(ROAD_NAMES_FILE.to_string());
        }
        if self.edge_types_file.is_none() && Path::new(ROAD_TYPE_DEPTH_FILE).exists() {
            self.edge_types_file = Some(ROAD_TYPE_DEPTH_FILE.to_string());
        }
        self
    }
}

fn extend(
    config: &VciConfiguration,
    sumo_net_file: &str,
    opts: &ExtendOptions,
    timer: &mut Timer,
) -> Result<EdgeSet> {
    let seed = opts.seed(config)?;
    let depths = opts.depths()?;
    info!("Edge types: {}", depths);
    let network = Network::load(sumo_net_file, timer)?;

    let seed = seed_edges(&network, &seed, timer)?;
    timer.start("extend edges by type");
    let edges = extend_by_type_depth(&network, &seed, &depths)?;
    timer.stop("extend edges by type");
    timer.note(format!(
        "Extended {} edges to {}",
        prettyprint_usize(seed.len()),
        prettyprint_usize(edges.len())
    ));
    Ok(edges)
}

pub fn run(
    config: &VciConfiguration,
    sumo_net_file: String,
    output: Option<String>,
    opts: ExtendOptions,
) -> Result<()> {
    let mut timer = Timer::new("extend edges");
    let output = output
        .unwrap_or_else(|| default_output(&sumo_net_file, "_extended", &timestamp(), ".txt"));
    let edges = extend(config, &sumo_net_file, &opts, &mut timer)?;
    ensure_parent_dir(&output)?;
    write_edge_list(&output, &edges)?;
    info!("Wrote extended edges to {}", output);
    Ok(())
}

pub fn filter_by_edge(
    config: &VciConfiguration,
    sumo_net_file: String,
    config_file: String,
    output_file: Option<String>,
    opts: ExtendOptions,
) -> Result<()> {
    let mut timer = Timer::new("filter by edge");
    let time = timestamp();
    let opts = opts.or_usual_files();

    // The edge list and a copy of the configuration both land next to the configuration, so the
    // run can be reproduced later.
    let edges_file = sibling_path(&config_file, &format!("edges_{}.txt", time));
    let config_copy = default_output_same_ext(&config_file, "", &time);
    let output =
        output_file.unwrap_or_else(|| format!("networks/filter_by_edge_{}.net.xml", time));

    let edges = extend(config, &sumo_net_file, &opts, &mut timer)?;
    write_edge_list(&edges_file, &edges)?;
    ensure_parent_dir(&output)?;

    timer.start("netconvert");
    Netconvert::new(config.netconvert.clone()).keep_edges(
        &config_file,
        &sumo_net_file,
        &edges_file,
        &output,
        Some(&config_copy),
    )?;
    timer.stop("netconvert");
    info!("Wrote {}", output);
    Ok(())
}
