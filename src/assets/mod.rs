pub mod descriptor;

pub use descriptor::{
    ChannelDescriptor, ClipDescriptor, JointDescriptor, MatrixDescriptor, SkeletonDescriptor,
};
