//! # Skeleton Tool
//!
//! Command-line tool to build skeleton archives from TOML descriptions and
//! to inspect existing archives.

use armature_io::{Endianness, IArchive, OArchive};
use armature_skeleton::{utils, RawSkeleton, Skeleton, SkeletonBuilder};
use std::fs::File;
use std::io::{BufReader, BufWriter};

fn print_usage() {
    println!("Usage:");
    println!("  skeleton_tool build <skeleton.toml> <out.skel> [--big-endian]");
    println!("  skeleton_tool dump <in.skel>");
    println!();
    println!("Options:");
    println!("  --big-endian   Write a big-endian archive (default: native)");
}

fn build(input: &str, output: &str, endianness: Endianness) -> Result<(), String> {
    println!("Loading description: {}", input);
    let raw = RawSkeleton::from_toml_file(input).map_err(|e| e.to_string())?;
    let skeleton = SkeletonBuilder::build(&raw).map_err(|e| e.to_string())?;

    let file = File::create(output).map_err(|e| format!("Could not create {}: {}", output, e))?;
    let mut archive =
        OArchive::with_endianness(BufWriter::new(file), endianness).map_err(|e| e.to_string())?;
    archive.write_object(&skeleton).map_err(|e| e.to_string())?;
    archive.flush().map_err(|e| e.to_string())?;

    println!(
        "Wrote {} joints ({} bytes, {:?} endian) to {}",
        skeleton.num_joints(),
        archive.bytes_written(),
        endianness,
        output
    );
    Ok(())
}

fn dump(input: &str) -> Result<(), String> {
    let file = File::open(input).map_err(|e| format!("Could not open {}: {}", input, e))?;
    let mut archive = IArchive::new(BufReader::new(file)).map_err(|e| e.to_string())?;
    let mut skeleton = Skeleton::default();
    archive.read_object(&mut skeleton).map_err(|e| e.to_string())?;

    println!("┌─ SKELETON ─────────────────────────────────────────────────────┐");
    println!("│ Archive:            {:?} endian", archive.endianness());
    println!("│ Joints:             {}", skeleton.num_joints());
    println!("│ SoA blocks:         {}", skeleton.num_soa_joints());
    println!("│ Packed size:        {} bytes", skeleton.size_in_bytes());
    println!("└────────────────────────────────────────────────────────────────┘");
    println!();

    utils::iterate_joints_df(&skeleton, None, |joint, parent| {
        let depth = std::iter::successors(usize::try_from(parent).ok(), |&p| {
            usize::try_from(skeleton.joint_parents()[p]).ok()
        })
        .count();
        let name = skeleton.joint_name(joint).unwrap_or_default();
        let translation = utils::bind_pose(&skeleton, joint)
            .map(|pose| pose.translation.to_array())
            .unwrap_or_default();
        println!(
            "{:>4} {:indent$}{} {:?}",
            joint,
            "",
            name,
            translation,
            indent = depth * 2
        );
    });
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        Some("build") if args.len() >= 4 => {
            let endianness = if args.iter().any(|a| a == "--big-endian") {
                Endianness::Big
            } else {
                Endianness::native()
            };
            build(&args[2], &args[3], endianness)
        }
        Some("dump") if args.len() >= 3 => dump(&args[2]),
        _ => {
            print_usage();
            return;
        }
    };

    if let Err(e) = result {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}
