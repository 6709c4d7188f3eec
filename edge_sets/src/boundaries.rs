//! Where traffic enters and leaves a network, and where drivers have to pick a direction. Dead
//! end junctions are the boundary of a cut network: everything beyond them was removed.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use sumo::{Junction, Network};

use crate::EdgeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    Entry,
    Exit,
    EntryExit,
}

/// One row of a connections CSV. `id` is a junction for network connections and an edge for
/// connection edges; the position is always the dead end's.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConnectionRecord {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(rename = "type")]
    pub kind: ConnectionKind,
}

impl ConnectionRecord {
    fn at(network: &Network, junction: &Junction, id: String, kind: ConnectionKind) -> Self {
        let (lon, lat) = network.location.to_original(junction.x, junction.y);
        ConnectionRecord { id, lon, lat, kind }
    }
}

fn dead_ends(network: &Network) -> impl Iterator<Item = &Junction> {
    network.all_junctions().filter(|j| j.is_dead_end())
}

/// Every dead end. Ones without incoming edges are entries, ones without outgoing edges are
/// exits, and the rest (including isolated ones) are both.
pub fn network_connections(network: &Network) -> Vec<ConnectionRecord> {
    dead_ends(network)
        .map(|j| {
            let kind = match (j.incoming.is_empty(), j.outgoing.is_empty()) {
                (true, false) => ConnectionKind::Entry,
                (false, true) => ConnectionKind::Exit,
                _ => ConnectionKind::EntryExit,
            };
            ConnectionRecord::at(network, j, j.id.to_string(), kind)
        })
        .collect()
}

/// The edges touching every dead end. Edges arriving at one leave the network, so they're exits;
/// edges starting at one are entries.
pub fn connection_edges(network: &Network) -> Vec<ConnectionRecord> {
    let mut records = Vec::new();
    for j in dead_ends(network) {
        for id in &j.incoming {
            records.push(ConnectionRecord::at(
                network,
                j,
                id.to_string(),
                ConnectionKind::Exit,
            ));
        }
        for id in &j.outgoing {
            records.push(ConnectionRecord::at(
                network,
                j,
                id.to_string(),
                ConnectionKind::Entry,
            ));
        }
    }
    records
}

/// Edges leading into a junction with more than one way out.
pub fn choice_edges(network: &Network) -> EdgeSet {
    network
        .all_junctions()
        .filter(|j| j.outgoing.len() > 1)
        .flat_map(|j| j.incoming.iter().cloned())
        .collect()
}

/// Writes `id,lon,lat,type` rows, with the header even if there are no rows.
pub fn write_connections<P: AsRef<Path>>(path: P, records: &[ConnectionRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(fs_err::File::create(path)?);
    writer.write_record(["id", "lon", "lat", "type"])?;
    for rec in records {
        writer.serialize(rec)?;
    }
    writer
        .flush()
        .with_context(|| format!("Couldn't write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumo::{EdgeID, Location, NetworkBuilder};

    // in -> j -> out, j also branches to side. The ends of in, out, and side are dead ends, and
    // so is lonely, which has both an entry and an exit edge.
    fn network() -> Network {
        let mut b = NetworkBuilder::new();
        b.location(Location {
            net_offset: (-10.0, -20.0),
        })
        .edge("in", "start", "j", "")
        .edge("out", "j", "end", "")
        .edge("side", "j", "lonely", "")
        .edge("back", "lonely", "j", "")
        .junction("start", "dead_end", (1.0, 2.0))
        .junction("end", "dead_end", (3.0, 4.0))
        .junction("lonely", "dead_end", (5.0, 6.0));
        b.build().unwrap()
    }

    #[test]
    fn test_network_connections() {
        let connections = network_connections(&network());
        assert_eq!(
            connections,
            vec![
                ConnectionRecord {
                    id: "end".to_string(),
                    lon: 13.0,
                    lat: 24.0,
                    kind: ConnectionKind::Exit,
                },
                ConnectionRecord {
                    id: "lonely".to_string(),
                    lon: 15.0,
                    lat: 26.0,
                    kind: ConnectionKind::EntryExit,
                },
                ConnectionRecord {
                    id: "start".to_string(),
                    lon: 11.0,
                    lat: 22.0,
                    kind: ConnectionKind::Entry,
                },
            ]
        );
    }

    #[test]
    fn test_connection_edges() {
        let edges: Vec<(String, ConnectionKind)> = connection_edges(&network())
            .into_iter()
            .map(|r| (r.id, r.kind))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("out".to_string(), ConnectionKind::Exit),
                ("side".to_string(), ConnectionKind::Exit),
                ("back".to_string(), ConnectionKind::Entry),
                ("in".to_string(), ConnectionKind::Entry),
            ]
        );
    }

    #[test]
    fn test_choice_edges() {
        let expected: EdgeSet = ["back", "in"].into_iter().map(EdgeID::from).collect();
        assert_eq!(choice_edges(&network()), expected);
    }

    #[test]
    fn test_write_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("connections.csv");
        write_connections(&path, &network_connections(&network())).unwrap();
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            "id,lon,lat,type\nend,13.0,24.0,exit\nlonely,15.0,26.0,entry_exit\nstart,11.0,22.0,entry\n"
        );

        write_connections(&path, &[]).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "id,lon,lat,type\n");
    }
}
