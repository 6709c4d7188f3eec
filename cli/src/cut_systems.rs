//! Cutting detector edges out of a network. Cutting an edge usually implies more edges have to go
//! too, so besides the raw cut, the network is also cut with the continuous and deducible closures
//! of the cut edges.

use anyhow::Result;

use edge_sets::{check_edges, continuous_edges, deducible_edges, read_edge_list, write_edge_list};
use sumo::{Netconvert, Network};
use vciutil::{insert_suffix, prettyprint_usize, timestamp, Timer};

use crate::configuration::VciConfiguration;
use crate::{default_output, default_output_same_ext, ensure_parent_dir};

pub fn continuous(
    sumo_net_file: String,
    cut_edges_file: String,
    output: Option<String>,
) -> Result<()> {
    let mut timer = Timer::new("continuous edges");
    let network = Network::load(&sumo_net_file, &mut timer)?;
    let cut = read_edge_list(&cut_edges_file)?;
    let edges = continuous_edges(&network, &cut)?;
    let output = output
        .unwrap_or_else(|| default_output_same_ext(&cut_edges_file, "_continuous", &timestamp()));
    write_edge_list(&output, &edges)?;
    timer.note(format!(
        "{} cut edges imply {} continuous edges, written to {}",
        prettyprint_usize(cut.len()),
        prettyprint_usize(edges.len()),
        output
    ));
    Ok(())
}

pub fn deducible(
    sumo_net_file: String,
    cut_edges_file: String,
    output: Option<String>,
) -> Result<()> {
    let mut timer = Timer::new("deducible edges");
    let network = Network::load(&sumo_net_file, &mut timer)?;
    let cut = read_edge_list(&cut_edges_file)?;
    let edges = deducible_edges(&network, &cut)?;
    let output = output
        .unwrap_or_else(|| default_output_same_ext(&cut_edges_file, "_deducible", &timestamp()));
    write_edge_list(&output, &edges)?;
    timer.note(format!(
        "{} cut edges imply {} deducible edges, written to {}",
        prettyprint_usize(cut.len()),
        prettyprint_usize(edges.len()),
        output
    ));
    Ok(())
}

pub fn run(
    config: &VciConfiguration,
    sumo_net_file: String,
    config_file: String,
    cut_edges_file: String,
    output: Option<String>,
) -> Result<()> {
    let mut timer = Timer::new("cut systems");
    let time = timestamp();
    let (raw_output, continuous_output, deducible_output) = match output {
        Some(o) => (
            o.clone(),
            insert_suffix(&o, "_continuous"),
            insert_suffix(&o, "_deducible"),
        ),
        None => (
            default_output(&sumo_net_file, "_cut_systems", &time, ".net.xml"),
            default_output(&sumo_net_file, "_cut_systems_continuous", &time, ".net.xml"),
            default_output(&sumo_net_file, "_cut_systems_deducible", &time, ".net.xml"),
        ),
    };
    ensure_parent_dir(&raw_output)?;
    let continuous_file = default_output_same_ext(&cut_edges_file, "_continuous", &time);
    let deducible_file = default_output_same_ext(&cut_edges_file, "_deducible", &time);

    let network = Network::load(&sumo_net_file, &mut timer)?;
    let cut = read_edge_list(&cut_edges_file)?;
    check_edges(&network, &cut)?;

    timer.start("compute closures");
    let continuous = continuous_edges(&network, &cut)?;
    let deducible = deducible_edges(&network, &continuous)?;
    timer.stop("compute closures");
    write_edge_list(&continuous_file, &continuous)?;
    write_edge_list(&deducible_file, &deducible)?;
    timer.note(format!(
        "{} cut edges, {} continuous, {} deducible",
        prettyprint_usize(cut.len()),
        prettyprint_usize(continuous.len()),
        prettyprint_usize(deducible.len())
    ));

    let netconvert = Netconvert::new(config.netconvert.clone());
    for (edges_file, output) in [
        (&cut_edges_file, &raw_output),
        (&continuous_file, &continuous_output),
        (&deducible_file, &deducible_output),
    ] {
        timer.start(format!("cut {}", output));
        netconvert.remove_edges(&config_file, &sumo_net_file, edges_file, output)?;
        timer.stop(format!("cut {}", output));
    }
    Ok(())
}
