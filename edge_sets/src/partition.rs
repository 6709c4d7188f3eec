//! Splits a whole network into "detector systems": disjoint groups of edges that are each weakly
//! connected once every previously found system is removed. Each system is then solved
//! separately with flow equations.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use sumo::{Netconvert, Network};
use vciutil::{prettyprint_usize, Timer};

use crate::{largest_component, write_edge_list, EdgeSet};

/// More systems than this usually means the detectors were cut badly, but it's not fatal.
pub const DEFAULT_MAX_SYSTEMS_WARNING: usize = 63;

/// Something that can remove edges from the original network and report which weakly connected
/// piece of the rest is next.
pub trait EdgeRemoval {
    /// `output` names the artifacts for this step, without an extension. Implementations that
    /// produce files write them there.
    fn remaining(
        &self,
        network: &Network,
        removed: &EdgeSet,
        output: &Path,
        timer: &mut Timer,
    ) -> Result<Network>;
}

/// Lets netconvert physically cut the network file, keeping whatever its configuration decides
/// (normally `--keep-edges.components 1`, the largest weakly connected component).
pub struct NetconvertRemoval {
    pub netconvert: Netconvert,
    pub config: String,
    /// The original network file. Every step cuts this, not the previous step's output.
    pub network: PathBuf,
}

impl EdgeRemoval for NetconvertRemoval {
    fn remaining(
        &self,
        _: &Network,
        removed: &EdgeSet,
        output: &Path,
        timer: &mut Timer,
    ) -> Result<Network> {
        let stem = output.display().to_string();
        let removed_path = format!("{}_removed.txt", stem);
        let net_path = format!("{}.net.xml", stem);
        write_edge_list(&removed_path, removed)?;
        self.netconvert.remove_edges(
            &self.config,
            &self.network.display().to_string(),
            &removed_path,
            &net_path,
        )?;
        Network::load(&net_path, timer)
    }
}

/// Removes edges in memory and keeps the largest weakly connected component of the rest. Nothing
/// is written besides the edge lists.
pub struct InProcessRemoval;

impl EdgeRemoval for InProcessRemoval {
    fn remaining(
        &self,
        network: &Network,
        removed: &EdgeSet,
        _: &Path,
        _: &mut Timer,
    ) -> Result<Network> {
        let rest = network.retain_edges(|e| !removed.contains(&e.id))?;
        let keep = largest_component(&rest);
        rest.retain_edges(|e| keep.contains(&e.id))
    }
}

/// Repeatedly removes every edge assigned so far and takes whatever is left as the next system,
/// until every edge belongs to exactly one. System `n` is written to
/// `output_dir/<stem>_<nnn>.txt`, counting from 1.
pub fn partition_network(
    network: &Network,
    removal: &dyn EdgeRemoval,
    output_dir: &Path,
    stem: &str,
    max_systems_warning: usize,
    timer: &mut Timer,
) -> Result<Vec<EdgeSet>> {
    let all_edges = network.edge_ids();
    if all_edges.is_empty() {
        timer.note("No edges to analyse".to_string());
        return Ok(Vec::new());
    }
    fs_err::create_dir_all(output_dir)?;

    let mut analysed = EdgeSet::new();
    let mut systems: Vec<EdgeSet> = Vec::new();
    while analysed.len() < all_edges.len() {
        if systems.len() == max_systems_warning {
            timer.warn(format!(
                "Reached {} systems, more than expected. Continuing anyway.",
                max_systems_warning
            ));
        }

        let name = format!("{}_{:03}", stem, systems.len() + 1);
        timer.start(format!("find {}", name));
        let remainder = removal.remaining(network, &analysed, &output_dir.join(&name), timer)?;
        timer.stop(format!("find {}", name));

        let system = remainder.edge_ids();
        if system.is_empty() {
            timer.warn(format!(
                "Nothing is left after removing {} systems, but {} edges were never assigned",
                systems.len(),
                prettyprint_usize(all_edges.len() - analysed.len())
            ));
            break;
        }
        let foreign: Vec<String> = system
            .difference(&all_edges)
            .map(|id| id.to_string())
            .collect();
        if !foreign.is_empty() {
            bail!(
                "{} has edges that aren't in the original network: {}",
                name,
                foreign.join(", ")
            );
        }
        let overlap: Vec<String> = system
            .intersection(&analysed)
            .map(|id| id.to_string())
            .collect();
        if !overlap.is_empty() {
            bail!(
                "{} has edges already assigned to an earlier system: {}",
                name,
                overlap.join(", ")
            );
        }

        write_edge_list(output_dir.join(format!("{}.txt", name)), &system)?;
        timer.note(format!(
            "{} has {} edges",
            name,
            prettyprint_usize(system.len())
        ));
        analysed.extend(system.iter().cloned());
        systems.push(system);
    }

    info!(
        "Split {} edges into {} systems",
        prettyprint_usize(analysed.len()),
        systems.len()
    );
    Ok(systems)
}
