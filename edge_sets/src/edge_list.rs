//! Edge lists are plain text files with one edge ID per line and no header. netconvert reads the
//! same format for `--remove-edges.input-file` and `--keep-edges.input-file`.

use std::path::Path;

use anyhow::{bail, Result};

use sumo::{EdgeID, Network};

use crate::EdgeSet;

/// Every non-empty line, trimmed.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    Ok(fs_err::read_to_string(path.as_ref())?
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect())
}

pub fn read_edge_list<P: AsRef<Path>>(path: P) -> Result<EdgeSet> {
    Ok(read_lines(path)?.into_iter().map(EdgeID).collect())
}

pub fn write_edge_list<P: AsRef<Path>>(path: P, edges: &EdgeSet) -> Result<()> {
    let mut contents = String::new();
    for id in edges {
        contents.push_str(&id.0);
        contents.push('\n');
    }
    fs_err::write(path.as_ref(), contents)?;
    Ok(())
}

/// Fails if any edge isn't part of the network.
pub fn check_edges(network: &Network, edges: &EdgeSet) -> Result<()> {
    let missing: Vec<&str> = edges
        .iter()
        .filter(|id| network.get_edge(id).is_none())
        .map(|id| id.0.as_str())
        .collect();
    if !missing.is_empty() {
        bail!(
            "{} edges aren't in the network: {}",
            missing.len(),
            missing.join(", ")
        );
    }
    Ok(())
}
