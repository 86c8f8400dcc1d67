//! Skeleton queries and hierarchy traversal.
//!
//! Joints are ordered parents first, so a forward walk over the parent
//! array visits the hierarchy depth-first and a backward walk visits every
//! child before its parent.

use armature_core::math::{Transform, SOA_LANES};

use crate::skeleton::Skeleton;

/// Index of the first joint named `name`.
#[must_use]
pub fn find_joint(skeleton: &Skeleton, name: &str) -> Option<usize> {
    skeleton.joint_names().position(|joint| joint == name)
}

fn is_child_of(parent: i16, joint: usize) -> bool {
    usize::try_from(parent).is_ok_and(|parent| parent == joint)
}

/// True if no joint has `joint` as its parent.
#[must_use]
pub fn is_leaf(skeleton: &Skeleton, joint: usize) -> bool {
    let parents = skeleton.joint_parents();
    parents
        .get(joint + 1..)
        .map_or(true, |later| !later.iter().any(|&parent| is_child_of(parent, joint)))
}

/// Direct children of `joint`, in joint order.
pub fn children(skeleton: &Skeleton, joint: usize) -> impl Iterator<Item = usize> + '_ {
    skeleton
        .joint_parents()
        .iter()
        .enumerate()
        .filter(move |&(_, &parent)| is_child_of(parent, joint))
        .map(|(child, _)| child)
}

/// Bind pose of `joint`, unpacked from its SoA block.
#[must_use]
pub fn bind_pose(skeleton: &Skeleton, joint: usize) -> Option<Transform> {
    if joint >= skeleton.num_joints() {
        return None;
    }
    skeleton
        .joint_bind_poses()
        .get(joint / SOA_LANES)
        .map(|block| block.lane(joint % SOA_LANES))
}

/// Calls `f(joint, parent)` for every joint, parents before children.
///
/// With `from = Some(root)` only `root` and its descendants are visited;
/// an out of range `root` visits nothing.
pub fn iterate_joints_df<F>(skeleton: &Skeleton, from: Option<usize>, mut f: F)
where
    F: FnMut(usize, i16),
{
    let parents = skeleton.joint_parents();
    let Some(root) = from else {
        for (joint, &parent) in parents.iter().enumerate() {
            f(joint, parent);
        }
        return;
    };
    if root >= parents.len() {
        return;
    }

    let mut in_subtree = vec![false; parents.len()];
    in_subtree[root] = true;
    f(root, parents[root]);
    for joint in root + 1..parents.len() {
        let parent = parents[joint];
        if usize::try_from(parent).is_ok_and(|parent| in_subtree[parent]) {
            in_subtree[joint] = true;
            f(joint, parent);
        }
    }
}

/// Calls `f(joint, parent)` for every joint, children before parents.
pub fn iterate_joints_df_reverse<F>(skeleton: &Skeleton, mut f: F)
where
    F: FnMut(usize, i16),
{
    for (joint, &parent) in skeleton.joint_parents().iter().enumerate().rev() {
        f(joint, parent);
    }
}
