//! Drives [netconvert](https://sumo.dlr.de/docs/netconvert.html), which does all of the real
//! geometry work of cutting and filtering networks. Every call blocks until the tool exits, and
//! any failure aborts the caller's operation.

use std::process::Command;

use anyhow::Result;

use vciutil::run_cmd;

pub struct Netconvert {
    binary: String,
}

impl Netconvert {
    /// `binary` is the name or path of the netconvert executable.
    pub fn new(binary: impl Into<String>) -> Netconvert {
        Netconvert {
            binary: binary.into(),
        }
    }

    /// Writes a copy of `network` without the edges listed in `edges_file`.
    pub fn remove_edges(
        &self,
        config: &str,
        network: &str,
        edges_file: &str,
        output: &str,
    ) -> Result<()> {
        self.run(
            &[
                "-c",
                config,
                "--remove-edges.input-file",
                edges_file,
                "--sumo-net-file",
                network,
                "--output-file",
                output,
            ],
            None,
        )
    }

    /// Writes a copy of `network` with only the edges listed in `edges_file`. If
    /// `save_configuration` is given, the full configuration of the run is saved there first.
    pub fn keep_edges(
        &self,
        config: &str,
        network: &str,
        edges_file: &str,
        output: &str,
        save_configuration: Option<&str>,
    ) -> Result<()> {
        self.run(
            &[
                "--sumo-net-file",
                network,
                "--keep-edges.input-file",
                edges_file,
                "--configuration-file",
                config,
                "--output-file",
                output,
            ],
            save_configuration,
        )
    }

    /// Imports OpenStreetMap files into a new network.
    pub fn convert_osm(
        &self,
        osm_files: &[String],
        config: &str,
        output: &str,
        save_configuration: Option<&str>,
    ) -> Result<()> {
        let osm_files = osm_files.join(",");
        self.run(
            &[
                "--osm-files",
                &osm_files,
                "--configuration-file",
                config,
                "--output-file",
                output,
            ],
            save_configuration,
        )
    }

    fn run(&self, args: &[&str], save_configuration: Option<&str>) -> Result<()> {
        // With --save-configuration, netconvert only writes the file and doesn't do the
        // conversion, so that takes a separate run.
        if let Some(path) = save_configuration {
            log::info!("Saving the netconvert configuration to {}", path);
            run_cmd(
                Command::new(&self.binary)
                    .args(args)
                    .arg("--save-configuration")
                    .arg(path),
            )?;
        }
        run_cmd(Command::new(&self.binary).args(args))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failure_is_an_error() {
        // `false` ignores its arguments and always fails
        let tool = Netconvert::new("false");
        assert!(tool
            .remove_edges("raw.cfg", "a.net.xml", "cut.txt", "b.net.xml")
            .is_err());

        let tool = Netconvert::new("true");
        assert!(tool
            .keep_edges("f.cfg", "a.net.xml", "keep.txt", "b.net.xml", Some("copy.cfg"))
            .is_ok());
    }
}
