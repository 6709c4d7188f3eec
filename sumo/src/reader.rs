//! Reads the road graph out of a .net.xml file. Only what the VCI tools need is kept: the
//! location offset, normal edges, and non-internal junctions. Lanes, internal edges,
//! connections, and everything else are skipped.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use vciutil::{prettyprint_usize, Timer};

use crate::{Edge, EdgeID, Location, Network, NetworkBuilder, NodeID};

impl Network {
    /// Reads a .net.xml file. A missing file is reported before anything else happens.
    pub fn load<P: AsRef<Path>>(path: P, timer: &mut Timer) -> Result<Network> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("Network file {} does not exist", path.display());
        }
        timer.start(format!("read {}", path.display()));
        let raw_string = fs_err::read_to_string(path)?;
        let network =
            Network::parse(&raw_string).with_context(|| format!("parsing {}", path.display()))?;
        timer.stop(format!("read {}", path.display()));
        timer.note(format!(
            "{} has {} edges and {} junctions",
            path.display(),
            prettyprint_usize(network.num_edges()),
            prettyprint_usize(network.num_junctions())
        ));
        Ok(network)
    }

    /// Parses the contents of a .net.xml file.
    pub fn parse(raw_string: &str) -> Result<Network> {
        let tree = roxmltree::Document::parse(raw_string)?;
        let root = tree.root_element();
        if root.tag_name().name() != "net" {
            bail!("Expected a <net> root, found <{}>", root.tag_name().name());
        }

        let mut builder = NetworkBuilder::new();
        // Edges come before junctions in the file, so the builder checks references at the end.
        for obj in root.children().filter(|n| n.is_element()) {
            match obj.tag_name().name() {
                "location" => {
                    builder.location(read_location(obj)?);
                }
                "edge" => {
                    if let Some(edge) = read_edge(obj)? {
                        builder.push_edge(edge);
                    }
                }
                "junction" => {
                    let junction_type = obj.attribute("type").unwrap_or("");
                    if junction_type == "internal" {
                        continue;
                    }
                    builder.junction(
                        attr(obj, "id")?,
                        junction_type,
                        (parse_f64(obj, "x")?, parse_f64(obj, "y")?),
                    );
                }
                _ => {}
            }
        }
        builder.build()
    }
}

fn read_location(obj: roxmltree::Node) -> Result<Location> {
    let mut location = Location::default();
    if let Some(offset) = obj.attribute("netOffset") {
        let parts = offset
            .split(',')
            .map(|x| x.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| anyhow!("Bad netOffset {}", offset))?;
        if parts.len() != 2 {
            bail!("Bad netOffset {}", offset);
        }
        location.net_offset = (parts[0], parts[1]);
    }
    Ok(location)
}

/// Returns None for edges that only exist inside junctions.
fn read_edge(obj: roxmltree::Node) -> Result<Option<Edge>> {
    match obj.attribute("function").unwrap_or("normal") {
        "internal" | "crossing" | "walkingarea" => return Ok(None),
        _ => {}
    }
    Ok(Some(Edge {
        id: EdgeID::from(attr(obj, "id")?),
        from: NodeID::from(attr(obj, "from")?),
        to: NodeID::from(attr(obj, "to")?),
        edge_type: obj.attribute("type").unwrap_or("").to_string(),
        name: obj.attribute("name").unwrap_or("").to_string(),
    }))
}

fn attr<'a>(obj: roxmltree::Node<'a, '_>, key: &str) -> Result<&'a str> {
    obj.attribute(key).ok_or_else(|| {
        anyhow!(
            "<{} id={}> is missing {}",
            obj.tag_name().name(),
            obj.attribute("id").unwrap_or("?"),
            key
        )
    })
}

fn parse_f64(obj: roxmltree::Node, key: &str) -> Result<f64> {
    let value = attr(obj, key)?;
    value
        .parse::<f64>()
        .with_context(|| format!("{}={} on <{}>", key, value, obj.tag_name().name()))
}
