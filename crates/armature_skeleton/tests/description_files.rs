//! # Description File Tests
//!
//! Builds the bundled humanoid description and checks the resulting
//! hierarchy survives a file round-trip.

use armature_core::math::Float3;
use armature_io::{Endianness, IArchive, OArchive};
use armature_skeleton::{utils, RawSkeleton, Skeleton, SkeletonBuilder};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

fn humanoid_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/humanoid.toml")
}

#[test]
fn test_humanoid_description() {
    let raw = RawSkeleton::from_toml_file(humanoid_path()).unwrap();
    assert_eq!(raw.num_joints(), 16);
    raw.validate().unwrap();

    let skeleton = SkeletonBuilder::build(&raw).unwrap();
    assert_eq!(skeleton.num_joints(), 16);
    assert_eq!(skeleton.num_soa_joints(), 4);
    assert_eq!(
        skeleton.joint_parents(),
        &[-1, 0, 1, 2, 3, 2, 5, 6, 2, 8, 9, 0, 11, 12, 0, 14]
    );

    let hand = utils::find_joint(&skeleton, "hand_l").unwrap();
    assert_eq!(hand, 7);
    assert!(utils::is_leaf(&skeleton, hand));
    assert_eq!(
        utils::bind_pose(&skeleton, hand).map(|pose| pose.translation),
        Some(Float3::new(0.25, 0.0, 0.0))
    );

    let chest = utils::find_joint(&skeleton, "chest").unwrap();
    assert_eq!(utils::children(&skeleton, chest).collect::<Vec<_>>(), [3, 5, 8]);

    let mut upper_body = Vec::new();
    utils::iterate_joints_df(&skeleton, Some(chest), |joint, _| upper_body.push(joint));
    assert_eq!(upper_body, (2..=10).collect::<Vec<_>>());
}

#[test]
fn test_humanoid_file_roundtrip() {
    let skeleton =
        SkeletonBuilder::build(&RawSkeleton::from_toml_file(humanoid_path()).unwrap()).unwrap();

    let dir = std::env::temp_dir().join(format!("armature_skeleton_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("humanoid_be.skel");

    let mut out = OArchive::with_endianness(BufWriter::new(File::create(&path).unwrap()), Endianness::Big)
        .unwrap();
    out.write_object(&skeleton).unwrap();
    out.flush().unwrap();
    drop(out);

    let mut input = IArchive::new(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(input.endianness(), Endianness::Big);
    let mut loaded = Skeleton::default();
    input.read_object(&mut loaded).unwrap();
    assert_eq!(loaded, skeleton);

    std::fs::remove_dir_all(&dir).unwrap();
}
