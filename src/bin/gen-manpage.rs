//! Man page generator for lanreg
//!
//! Writes `lanreg.1` plus one `lanreg-<command>.1` page per subcommand.
//!
//! Usage: cargo run --bin gen-manpage -- [output-dir]

use clap::CommandFactory;
use std::fs;
use std::path::{Path, PathBuf};

#[allow(dead_code)]
#[path = "../cli.rs"]
mod cli;

fn render(cmd: clap::Command, output_dir: &Path, page: &str) -> std::io::Result<PathBuf> {
    let output_path = output_dir.join(format!("{}.1", page));
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut buffer)?;
    fs::write(&output_path, buffer)?;
    Ok(output_path)
}

fn main() -> std::io::Result<()> {
    // Default to ./man directory
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("man"));

    fs::create_dir_all(&output_dir)?;

    let cmd = cli::Cli::command();
    for sub in cmd.get_subcommands() {
        let page = format!("{}-{}", cmd.get_name(), sub.get_name());
        let path = render(sub.clone(), &output_dir, &page)?;
        println!("Man page generated at: {}", path.display());
    }

    let main_page = render(cmd, &output_dir, "lanreg")?;
    println!("Man page generated at: {}", main_page.display());
    println!("\nTo view the man page:");
    println!("  man -l {}", main_page.display());

    Ok(())
}
