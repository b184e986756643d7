//! Preview feature models

use super::enums::FeatureState;
use serde::{Deserialize, Serialize};

/// Properties of a preview feature
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureProperties {
    /// Registration state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<FeatureState>,
}

/// A preview feature as returned by the features API
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureResult {
    /// Feature name, `{namespace}/{feature}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FeatureProperties>,

    /// Resource id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Resource type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl FeatureResult {
    /// Registration state, if reported
    pub fn state(&self) -> Option<&FeatureState> {
        self.properties.as_ref().and_then(|p| p.state.as_ref())
    }

    /// Check if the feature is registered for the subscription
    pub fn is_registered(&self) -> bool {
        matches!(self.state(), Some(FeatureState::Registered))
    }
}
