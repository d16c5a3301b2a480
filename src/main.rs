//! ImpossibleAtlas CLI - Command-line tool for image atlas files.
//!
//! This is the main entry point for the imatlas command-line application.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use imatlas::prelude::*;

/// imatlas - ImpossibleAtlas image atlas tool
#[derive(Parser)]
#[command(name = "imatlas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log decoding progress
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write XML attribute values without escaping reserved characters
    #[arg(long, global = true, env = "IMATLAS_RAW_XML")]
    raw_xml: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an atlas to XML
    Export {
        /// Input atlas file
        input: PathBuf,

        /// Output XML file (defaults to the input with an .xml extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the images in an atlas
    List {
        /// Input atlas file
        input: PathBuf,

        /// Also list every fragment
        #[arg(short, long)]
        fragments: bool,
    },

    /// Decode an atlas and write it back in binary form
    Repack {
        /// Input atlas file
        input: PathBuf,

        /// Output atlas file
        output: PathBuf,
    },

    /// Write a blank atlas
    New {
        /// Output atlas file
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export { input, output } => {
            let output = output.unwrap_or_else(|| xml_output_path(&input));
            cmd_export(&input, &output, cli.raw_xml)?;
        }
        Commands::List { input, fragments } => {
            cmd_list(&input, fragments)?;
        }
        Commands::Repack { input, output } => {
            cmd_repack(&input, &output)?;
        }
        Commands::New { output } => {
            cmd_new(&output)?;
        }
    }

    Ok(())
}

fn open_atlas(input: &Path) -> Result<Atlas> {
    let atlas = Atlas::open(input)
        .with_context(|| format!("Failed to load atlas {}", input.display()))?;
    info!(
        images = atlas.image_count(),
        fragments = atlas.fragment_count(),
        "Loaded {}",
        input.display()
    );
    Ok(atlas)
}

fn cmd_export(input: &Path, output: &Path, raw: bool) -> Result<()> {
    let atlas = open_atlas(input)?;

    let xml = XmlExporter::new(&atlas)
        .escape_attributes(!raw)
        .to_xml_string()
        .context("Failed to convert to XML")?;
    std::fs::write(output, xml).context("Failed to write output file")?;

    info!("Wrote {}", output.display());
    Ok(())
}

fn cmd_list(input: &Path, fragments: bool) -> Result<()> {
    let atlas = open_atlas(input)?;

    for image in atlas.images() {
        println!(
            "{:>4} {} (alpha: {}, {} fragments)",
            image.position(),
            image.name,
            image.alpha_ref,
            image.fragment_count()
        );

        if fragments {
            for fragment in image.fragments() {
                println!(
                    "     {:>4} {:<32} x={} y={} w={} h={}",
                    fragment.position(),
                    fragment.name,
                    fragment.x,
                    fragment.y,
                    fragment.w,
                    fragment.h
                );
            }
        }
    }

    println!(
        "\nTotal: {} images, {} fragments",
        atlas.image_count(),
        atlas.fragment_count()
    );
    Ok(())
}

fn cmd_repack(input: &Path, output: &Path) -> Result<()> {
    let atlas = open_atlas(input)?;
    atlas.save_bin(output).context("Failed to write output file")?;

    info!("Wrote {}", output.display());
    Ok(())
}

fn cmd_new(output: &Path) -> Result<()> {
    Atlas::new()
        .save_bin(output)
        .context("Failed to write output file")?;

    info!("Wrote blank atlas to {}", output.display());
    Ok(())
}

/// Default XML path next to the input.
fn xml_output_path(input: &Path) -> PathBuf {
    input.with_extension("xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_atlas() -> Atlas {
        let mut atlas = Atlas::new();
        atlas.add_image(Image::with_fragments(
            "Bg",
            "Bg&Alpha",
            [Fragment::new("CstBgtest", 0.892578125, 0.45703125, 0.078125, 0.533203125)],
        ));
        atlas
    }

    #[test]
    fn test_xml_output_path() {
        assert_eq!(xml_output_path(Path::new("a/level.bin")), PathBuf::from("a/level.xml"));
        assert_eq!(xml_output_path(Path::new("level.atlas")), PathBuf::from("level.xml"));
        assert_eq!(xml_output_path(Path::new("level")), PathBuf::from("level.xml"));
    }

    #[test]
    fn test_export_and_repack() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("level.bin");
        let xml = dir.path().join("level.xml");
        let repacked = dir.path().join("repacked.bin");
        sample_atlas().save_bin(&input).unwrap();

        cmd_export(&input, &xml, false).unwrap();
        let text = std::fs::read_to_string(&xml).unwrap();
        assert!(text.contains("alpha=\"Bg&amp;Alpha\""));

        cmd_export(&input, &xml, true).unwrap();
        let text = std::fs::read_to_string(&xml).unwrap();
        assert!(text.contains("alpha=\"Bg&Alpha\""));

        cmd_repack(&input, &repacked).unwrap();
        assert_eq!(std::fs::read(&repacked).unwrap(), std::fs::read(&input).unwrap());
    }

    #[test]
    fn test_new_writes_blank_atlas() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("blank.bin");

        cmd_new(&output).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), vec![0x00, 0x00]);
        assert!(Atlas::open(&output).unwrap().is_empty());
    }

    #[test]
    fn test_export_rejects_xml_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("level.xml");
        std::fs::write(&input, "<?xml version=\"1.0\"?><ImageAtlas/>").unwrap();

        assert!(cmd_export(&input, &dir.path().join("out.xml"), false).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["imatlas", "export", "level.bin", "--raw-xml"]).unwrap();
        assert!(cli.raw_xml);
        assert!(matches!(
            cli.command,
            Commands::Export { ref input, output: None } if input == Path::new("level.bin")
        ));
    }
}
