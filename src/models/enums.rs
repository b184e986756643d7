//! String-valued enumerations from the service wire format
//!
//! Two flavours, both generated from one template each:
//!
//! - **Fixed** enums have a closed set of members. Lookup is
//!   case-insensitive and an unrecognised value yields `None`.
//! - **Expandable** enums accept any string. Known members are matched
//!   case-insensitively; anything else is kept verbatim in `Other`.

/// Define a closed string enum with case-insensitive lookup
macro_rules! fixed_string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every member, in declaration order
            pub const VALUES: &'static [$name] = &[$($name::$variant),+];

            /// Serialized value of this member
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }

            /// Look up a member by serialized value, ignoring case
            pub fn from_str_opt(value: &str) -> Option<Self> {
                Self::VALUES
                    .iter()
                    .copied()
                    .find(|item| item.as_str().eq_ignore_ascii_case(value))
            }

            /// Lenient field deserializer: null, missing, or unrecognised
            /// values all read as `None`.
            ///
            /// Use with `#[serde(default, deserialize_with = "...")]` on an
            /// `Option` field so one unknown value does not fail the page.
            pub fn deserialize_opt<'de, D>(deserializer: D) -> std::result::Result<Option<Self>, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
                Ok(raw.as_deref().and_then(Self::from_str_opt))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
                Self::from_str_opt(value)
                    .ok_or_else(|| $crate::error::Error::unknown_enum(stringify!($name), value))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_str_opt(&raw).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} value '{}'",
                        stringify!($name),
                        raw
                    ))
                })
            }
        }
    };
}

/// Define an open string enum that preserves unrecognised values
macro_rules! expandable_string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Value not known when this client was generated
            Other(String),
        }

        impl $name {
            /// Known members, in declaration order
            pub fn values() -> Vec<$name> {
                vec![$($name::$variant),+]
            }

            /// Serialized value of this member
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            /// Find the known member for `name`, or wrap it as `Other`
            pub fn from_name(name: &str) -> Self {
                match name {
                    $( _ if name.eq_ignore_ascii_case($wire) => $name::$variant, )+
                    _ => $name::Other(name.to_string()),
                }
            }

            /// Check if this value is one of the known members
            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::from_name(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::from_name(&name)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from_name(&raw))
            }
        }
    };
}

// ============================================================================
// Batch
// ============================================================================

fixed_string_enum! {
    /// Operating system family of a compute node image
    OsType {
        Linux => "linux",
        Windows => "windows",
        Unmapped => "unmapped",
    }
}

fixed_string_enum! {
    /// State of a compute node in a pool
    ComputeNodeState {
        Idle => "idle",
        Rebooting => "rebooting",
        Reimaging => "reimaging",
        Running => "running",
        Unusable => "unusable",
        Creating => "creating",
        Starting => "starting",
        WaitingForStartTask => "waitingforstarttask",
        StartTaskFailed => "starttaskfailed",
        Unknown => "unknown",
        LeavingPool => "leavingpool",
        Offline => "offline",
    }
}

// ============================================================================
// Web Sites
// ============================================================================

fixed_string_enum! {
    /// DNS record type backing a custom host name
    CustomHostNameDnsRecordType {
        CName => "CName",
        A => "A",
    }
}

// ============================================================================
// Resources
// ============================================================================

expandable_string_enum! {
    /// Registration state of a preview feature
    FeatureState {
        NotRegistered => "NotRegistered",
        Registering => "Registering",
        Registered => "Registered",
        Unregistering => "Unregistering",
        Unregistered => "Unregistered",
    }
}

// ============================================================================
// Chat
// ============================================================================

expandable_string_enum! {
    /// Type of a chat thread message
    ChatMessageType {
        Text => "text",
        Html => "html",
        TopicUpdated => "topicUpdated",
        ParticipantAdded => "participantAdded",
        ParticipantRemoved => "participantRemoved",
    }
}
