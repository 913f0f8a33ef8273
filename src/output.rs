use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{ellipsometry, error::StackError, result::Reflection};


/// One problem's outcome, as written to JSON.
#[derive(Debug, Serialize)]
struct Record<'a> {
    name: &'a str,
    reflection: Option<Reflection>,
    ellipsometry: Option<ellipsometry::Ellipsometry>,
    error: Option<String>,
}

fn records<'a>(
    names: &'a [String],
    results: &[Result<Reflection, StackError>],
) -> Vec<Record<'a>> {
    names
        .iter()
        .zip(results)
        .map(|(name, result)| match result {
            Ok(reflection) => Record {
                name,
                reflection: Some(*reflection),
                ellipsometry: ellipsometry::psi_delta(reflection).ok(),
                error: None,
            },
            Err(e) => Record {
                name,
                reflection: None,
                ellipsometry: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// Prints one line per problem to stdout.
pub fn print_results(names: &[String], results: &[Result<Reflection, StackError>]) {
    println!("Results:");
    for (name, result) in names.iter().zip(results) {
        match result {
            Ok(reflection) => println!("  - {}: {}", name, reflection),
            Err(e) => println!("  - {}: failed: {}", name, e),
        }
    }
}

/// Writes `reflection.dat` and, if requested, `reflection.json` into `directory`.
pub fn write_result(
    names: &[String],
    results: &[Result<Reflection, StackError>],
    directory: &str,
    json: bool,
) -> Result<()> {
    let directory = Path::new(directory);
    fs::create_dir_all(directory).with_context(|| {
        format!("Failed to create output directory {}", directory.display())
    })?;

    let path = directory.join("reflection.dat");
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_table(&mut writer, names, results)?;
    writer.flush()?;

    if json {
        let path = directory.join("reflection.json");
        let file =
            File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &records(names, results))?;
    }

    Ok(())
}

/// Whitespace-separated table: `name re(rs) im(rs) re(rp) im(rp)`.
/// Failed problems are written as comment lines.
fn write_table<W: Write>(
    writer: &mut W,
    names: &[String],
    results: &[Result<Reflection, StackError>],
) -> Result<()> {
    writeln!(writer, "# name re(rs) im(rs) re(rp) im(rp)")?;
    for (name, result) in names.iter().zip(results) {
        // names are free text; keep the table splittable on whitespace
        let name = name.replace(char::is_whitespace, "_");
        match result {
            Ok(r) => writeln!(
                writer,
                "{} {:e} {:e} {:e} {:e}",
                name, r.rs.re, r.rs.im, r.rp.re, r.rp.im
            )?,
            Err(e) => writeln!(writer, "# {} failed: {}", name, e)?,
        }
    }
    Ok(())
}
