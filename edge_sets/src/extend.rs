//! Grows a seed set of edges outwards through the network, only stepping onto edges of certain
//! types, and only a limited number of hops for most types. Motorways are typically followed
//! without limit, while their ramps and the roads feeding them are only followed for a couple of
//! edges.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use anyhow::{bail, Context, Result};

use sumo::Network;
use vciutil::Timer;

use crate::{check_edges, named_edges, EdgeSet, NameMatcher};

/// How far to follow edges of one type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Depth {
    Unlimited,
    /// 0 means the type is never stepped onto.
    Hops(usize),
}

impl Depth {
    /// `-1` means unlimited.
    pub fn parse(x: &str) -> Result<Depth> {
        let value: i64 = x
            .parse()
            .with_context(|| format!("{} isn't a depth", x))?;
        match value {
            -1 => Ok(Depth::Unlimited),
            v if v < 0 => bail!("Depth {} is negative; only -1 (unlimited) is allowed", v),
            v => Ok(Depth::Hops(v as usize)),
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Depth::Unlimited => write!(f, "-1"),
            Depth::Hops(n) => write!(f, "{}", n),
        }
    }
}

/// Edge type to traversal depth.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepthMap {
    depths: BTreeMap<String, Depth>,
}

impl DepthMap {
    pub fn new() -> DepthMap {
        DepthMap::default()
    }

    /// Used when no file is given.
    pub fn builtin() -> DepthMap {
        let mut map = DepthMap::new();
        map.insert("highway.motorway", Depth::Unlimited)
            .insert("highway.motorway_link", Depth::Hops(1))
            .insert("highway.primary", Depth::Hops(2))
            .insert("highway.primary_link", Depth::Hops(1))
            .insert("highway.secondary", Depth::Hops(2))
            .insert("highway.secondary_link", Depth::Hops(1));
        map
    }

    pub fn insert(&mut self, edge_type: impl Into<String>, depth: Depth) -> &mut Self {
        self.depths.insert(edge_type.into(), depth);
        self
    }

    pub fn get(&self, edge_type: &str) -> Option<Depth> {
        self.depths.get(edge_type).copied()
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Every type assigned exactly this depth.
    pub fn types_with(&self, depth: Depth) -> BTreeSet<String> {
        self.depths
            .iter()
            .filter(|(_, d)| **d == depth)
            .map(|(t, _)| t.clone())
            .collect()
    }

    /// The distinct limited depths, ascending.
    pub fn finite_depths(&self) -> BTreeSet<usize> {
        self.depths
            .values()
            .filter_map(|d| match d {
                Depth::Hops(n) => Some(*n),
                Depth::Unlimited => None,
            })
            .collect()
    }

    /// One `<edge type> <depth>` pair per line. Blank lines are skipped; a type listed twice
    /// keeps its last depth.
    pub fn parse(text: &str) -> Result<DepthMap> {
        let mut map = DepthMap::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() != 2 {
                bail!(
                    "Line {}: expected \"<edge type> <depth>\", got \"{}\"",
                    idx + 1,
                    line
                );
            }
            let depth = Depth::parse(parts[1]).with_context(|| format!("Line {}", idx + 1))?;
            map.insert(parts[0], depth);
        }
        Ok(map)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<DepthMap> {
        let path = path.as_ref();
        let text = fs_err::read_to_string(path)?;
        DepthMap::parse(&text).with_context(|| format!("Couldn't parse {}", path.display()))
    }
}

impl fmt::Display for DepthMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pairs: Vec<String> = self
            .depths
            .iter()
            .map(|(t, d)| format!("{} {}", t, d))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// Breadth-first from `seed`, only stepping onto adjacent edges with one of the `allowed` types,
/// for at most `max` rounds. Returns the seed plus everything reached.
pub fn expand_by_types(
    network: &Network,
    seed: &EdgeSet,
    allowed: &BTreeSet<String>,
    max: Depth,
) -> Result<EdgeSet> {
    check_edges(network, seed)?;

    let mut known = seed.clone();
    let mut frontier = seed.clone();
    let mut depth = 0;
    while !frontier.is_empty() {
        if max == Depth::Hops(depth) {
            break;
        }
        let mut found = EdgeSet::new();
        for id in &frontier {
            let edge = network.edge(id)?;
            for other in network.adjacent_edges(edge) {
                if known.contains(other) || found.contains(other) {
                    continue;
                }
                if allowed.contains(&network.edge(other)?.edge_type) {
                    found.insert(other.clone());
                }
            }
        }
        known.extend(found.iter().cloned());
        frontier = found;
        depth += 1;
    }
    Ok(known)
}

/// First follows the unlimited types as far as they go. Then each limited depth is explored
/// separately from that same starting point, so one class doesn't extend the reach of another.
pub fn extend_by_type_depth(
    network: &Network,
    seed: &EdgeSet,
    depths: &DepthMap,
) -> Result<EdgeSet> {
    let base = expand_by_types(
        network,
        seed,
        &depths.types_with(Depth::Unlimited),
        Depth::Unlimited,
    )?;
    debug!(
        "Following unlimited types grew {} edges into {}",
        seed.len(),
        base.len()
    );

    let mut result = base.clone();
    for hops in depths.finite_depths() {
        let reached = expand_by_types(
            network,
            &base,
            &depths.types_with(Depth::Hops(hops)),
            Depth::Hops(hops),
        )?;
        debug!(
            "Depth {} adds {} edges",
            hops,
            reached.len() - base.len()
        );
        result.extend(reached.into_iter());
    }
    Ok(result)
}

/// Where the extension starts from.
pub enum Seed {
    Edges(EdgeSet),
    /// Every edge with one of these types
    Types(BTreeSet<String>),
    /// Every edge whose name matches one of these. If there are no aliases at all, every edge in
    /// the network is used.
    Aliases {
        aliases: Vec<String>,
        matcher: NameMatcher,
    },
}

pub fn seed_edges(network: &Network, seed: &Seed, timer: &mut Timer) -> Result<EdgeSet> {
    let edges = match seed {
        Seed::Edges(edges) => {
            check_edges(network, edges)?;
            edges.clone()
        }
        Seed::Types(types) => network
            .all_edges()
            .filter(|e| types.contains(&e.edge_type))
            .map(|e| e.id.clone())
            .collect(),
        Seed::Aliases { aliases, matcher } => {
            if aliases.is_empty() {
                timer.warn(format!(
                    "No aliases given, so all {} edges of the network are the seed",
                    network.num_edges()
                ));
                network.edge_ids()
            } else {
                let found = named_edges(network, aliases, matcher);
                if found.is_empty() {
                    timer.warn(format!(
                        "No edge names match any of {}",
                        aliases.join(", ")
                    ));
                }
                found
            }
        }
    };
    timer.note(format!("Seeding with {} edges", edges.len()));
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumo::{EdgeID, NetworkBuilder};

    fn set(ids: &[&str]) -> EdgeSet {
        ids.iter().map(|id| EdgeID::from(*id)).collect()
    }

    fn types(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    // m1 -> m2 -> m3 is a motorway. A link leaves m2 and feeds a primary road p1 -> p2 -> p3,
    // and a secondary road s1 -> s2 hangs off the motorway's end.
    fn motorway() -> Network {
        let mut b = NetworkBuilder::new();
        b.edge("m1", "a", "b", "highway.motorway")
            .edge("m2", "b", "c", "highway.motorway")
            .edge("m3", "c", "d", "highway.motorway")
            .edge("link", "c", "e", "highway.motorway_link")
            .edge("p1", "e", "f", "highway.primary")
            .edge("p2", "f", "g", "highway.primary")
            .edge("p3", "g", "h", "highway.primary")
            .edge("s1", "d", "i", "highway.secondary")
            .edge("s2", "i", "j", "highway.secondary")
            .edge("res", "j", "k", "highway.residential");
        b.build().unwrap()
    }

    #[test]
    fn test_expand_by_types() {
        let net = motorway();
        let seed = set(&["m1"]);
        let allowed = types(&["highway.motorway"]);
        assert_eq!(
            expand_by_types(&net, &seed, &allowed, Depth::Unlimited).unwrap(),
            set(&["m1", "m2", "m3"])
        );
        assert_eq!(
            expand_by_types(&net, &seed, &allowed, Depth::Hops(1)).unwrap(),
            set(&["m1", "m2"])
        );
        assert_eq!(
            expand_by_types(&net, &seed, &allowed, Depth::Hops(0)).unwrap(),
            seed
        );
        assert!(expand_by_types(&net, &set(&["nope"]), &allowed, Depth::Unlimited).is_err());
    }

    #[test]
    fn test_depths_are_independent() {
        let net = motorway();
        let mut depths = DepthMap::new();
        depths
            .insert("highway.motorway", Depth::Unlimited)
            .insert("highway.motorway_link", Depth::Hops(1))
            .insert("highway.primary", Depth::Hops(2))
            .insert("highway.secondary", Depth::Hops(2));
        // The link is reached at depth 1, but p1 is only adjacent to the link, and the link isn't
        // part of the depth 2 starting point. s1 and s2 hang off the motorway directly.
        assert_eq!(
            extend_by_type_depth(&net, &set(&["m1"]), &depths).unwrap(),
            set(&["m1", "m2", "m3", "link", "s1", "s2"])
        );

        // Once the link is part of the seed, the primary road is reached 2 hops deep
        assert_eq!(
            extend_by_type_depth(&net, &set(&["link"]), &depths).unwrap(),
            set(&["m1", "m2", "m3", "link", "p1", "p2", "s1", "s2"])
        );
    }

    #[test]
    fn test_unlimited_cycle() {
        let mut b = NetworkBuilder::new();
        b.edge("1", "a", "b", "road")
            .edge("2", "b", "c", "road")
            .edge("3", "c", "d", "road")
            .edge("4", "d", "e", "road")
            .edge("5", "e", "a", "road");
        let net = b.build().unwrap();
        let mut depths = DepthMap::new();
        depths.insert("road", Depth::Unlimited);
        assert_eq!(
            extend_by_type_depth(&net, &set(&["3"]), &depths).unwrap(),
            set(&["1", "2", "3", "4", "5"])
        );
        // Nothing to follow
        assert_eq!(
            extend_by_type_depth(&net, &set(&["3"]), &DepthMap::new()).unwrap(),
            set(&["3"])
        );
    }

    #[test]
    fn test_parse_depth_map() {
        let map = DepthMap::parse("highway.motorway -1\n\nhighway.primary 2\r\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("highway.motorway"), Some(Depth::Unlimited));
        assert_eq!(map.get("highway.primary"), Some(Depth::Hops(2)));
        assert_eq!(map.get("highway.secondary"), None);

        assert!(DepthMap::parse("highway.motorway -2").is_err());
        assert!(DepthMap::parse("highway.motorway").is_err());
        assert!(DepthMap::parse("highway.motorway two").is_err());
        assert!(DepthMap::parse("").unwrap().is_empty());

        let builtin = DepthMap::builtin();
        assert_eq!(builtin.types_with(Depth::Unlimited), types(&["highway.motorway"]));
        assert_eq!(builtin.finite_depths().into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_load_depth_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network_road_type_depth");
        fs_err::write(&path, "highway.motorway -1\nhighway.motorway_link 1\n").unwrap();
        let map = DepthMap::load(&path).unwrap();
        assert_eq!(map.get("highway.motorway_link"), Some(Depth::Hops(1)));
        assert!(DepthMap::load(dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_seed_edges() {
        let mut b = NetworkBuilder::new();
        b.named_edge("1", "a", "b", "highway.motorway", "VCI")
            .named_edge("2", "b", "c", "highway.primary", "Rua Direita");
        let net = b.build().unwrap();
        let mut timer = Timer::throwaway();

        let aliases = Seed::Aliases {
            aliases: vec!["vci".to_string()],
            matcher: NameMatcher::default(),
        };
        assert_eq!(seed_edges(&net, &aliases, &mut timer).unwrap(), set(&["1"]));
        assert!(timer.warnings().is_empty());

        let no_aliases = Seed::Aliases {
            aliases: Vec::new(),
            matcher: NameMatcher::default(),
        };
        assert_eq!(
            seed_edges(&net, &no_aliases, &mut timer).unwrap(),
            set(&["1", "2"])
        );
        assert_eq!(timer.warnings().len(), 1);

        let by_type = Seed::Types(types(&["highway.primary"]));
        assert_eq!(seed_edges(&net, &by_type, &mut timer).unwrap(), set(&["2"]));

        assert!(seed_edges(&net, &Seed::Edges(set(&["3"])), &mut timer).is_err());
    }

    #[test]
    fn test_unmatched_aliases() {
        let mut b = NetworkBuilder::new();
        b.named_edge("1", "a", "b", "highway.motorway", "VCI")
            .named_edge("2", "b", "c", "highway.primary", "Rua Direita");
        let net = b.build().unwrap();
        let mut timer = Timer::throwaway();

        // Unlike an empty alias list, this doesn't fall back to the whole network
        let aliases = Seed::Aliases {
            aliases: vec!["Ponte da Arrábida".to_string()],
            matcher: NameMatcher::default(),
        };
        assert!(seed_edges(&net, &aliases, &mut timer).unwrap().is_empty());
        assert_eq!(timer.warnings().len(), 1);
    }
}
