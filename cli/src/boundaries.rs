use anyhow::Result;

use edge_sets::{write_connections, write_edge_list};
use sumo::Network;
use vciutil::{prettyprint_usize, timestamp, Timer};

use crate::{default_output, ensure_parent_dir};

pub fn network_connections(sumo_net_file: String, output: Option<String>) -> Result<()> {
    let mut timer = Timer::new("network connections");
    let network = Network::load(&sumo_net_file, &mut timer)?;
    let records = edge_sets::network_connections(&network);
    let output = output.unwrap_or_else(|| {
        default_output(&sumo_net_file, "_network_connections", &timestamp(), ".txt")
    });
    ensure_parent_dir(&output)?;
    write_connections(&output, &records)?;
    timer.note(format!(
        "Wrote {} entries and exits to {}",
        prettyprint_usize(records.len()),
        output
    ));
    Ok(())
}

pub fn connection_edges(sumo_net_file: String, output: Option<String>) -> Result<()> {
    let mut timer = Timer::new("connection edges");
    let network = Network::load(&sumo_net_file, &mut timer)?;
    let records = edge_sets::connection_edges(&network);
    let output = output.unwrap_or_else(|| {
        default_output(
            &sumo_net_file,
            "_network_connection_edges",
            &timestamp(),
            ".txt",
        )
    });
    ensure_parent_dir(&output)?;
    write_connections(&output, &records)?;
    timer.note(format!(
        "Wrote {} connection edges to {}",
        prettyprint_usize(records.len()),
        output
    ));
    Ok(())
}

pub fn choice_edges(sumo_net_file: String, output: Option<String>) -> Result<()> {
    let mut timer = Timer::new("choice edges");
    let network = Network::load(&sumo_net_file, &mut timer)?;
    let edges = edge_sets::choice_edges(&network);
    let output = output.unwrap_or_else(|| {
        default_output(&sumo_net_file, "_network_choice_edges", &timestamp(), ".txt")
    });
    ensure_parent_dir(&output)?;
    write_edge_list(&output, &edges)?;
    timer.note(format!(
        "Wrote {} choice edges to {}",
        prettyprint_usize(edges.len()),
        output
    ));
    Ok(())
}
