//! Models module
//!
//! Typed request and response bodies, plus the string enumerations the
//! service uses on the wire.

mod entity;
mod enums;
mod feature;

pub use entity::{EntityRuntimeInfo, MessageCountDetails};
pub use enums::{ChatMessageType, ComputeNodeState, CustomHostNameDnsRecordType, FeatureState, OsType};
pub use feature::{FeatureProperties, FeatureResult};
