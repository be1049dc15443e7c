//! Typed domain separators for canonical hashing.
//!
//! Every hash computation selects a domain via [`HashDomain`]. This module is
//! the single authority for domain-separator byte strings; the enum,
//! `as_bytes()`, `ALL`, and `Display` come from one macro invocation.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Whole-trace digest over canonical trace JSON.
    TraceDigest => b"STEPWISE::TRACE_DIGEST::V1\0",

    /// Per-step digest (a step's canonical JSON), used to locate divergence.
    TraceStep => b"STEPWISE::TRACE_STEP::V1\0",

    /// Graph store fingerprint (positions + adjacency).
    GraphStore => b"STEPWISE::GRAPH_STORE::V1\0",

    // -----------------------------------------------------------------------
    // Harness
    // -----------------------------------------------------------------------

    /// Bundle artifact content hashing.
    BundleArtifact => b"STEPWISE::BUNDLE_ARTIFACT::V1\0",

    /// Bundle digest (normative projection).
    BundleDigest => b"STEPWISE::BUNDLE_DIGEST::V1\0",

    /// Run configuration hashing.
    RunConfig => b"STEPWISE::RUN_CONFIG::V1\0",
}
