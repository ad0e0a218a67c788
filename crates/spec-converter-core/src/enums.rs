// crates/spec-converter-core/src/enums.rs
// ============================================================================
// Module: Report Enumerations
// Description: Closed vocabularies used by the test results report.
// Purpose: Reject unrecognized values instead of coercing them.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each enumeration maps Rust variants to the exact wire strings of the report
//! format. Parsing is case-sensitive and never falls back to a default. The
//! `ALL` tables feed the `enum` keywords of the report schema.

// ============================================================================
// SECTION: Declaration Macro
// ============================================================================

/// Declares a closed enumeration with explicit wire values.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant
            ),+
        }

        impl $name {
            /// Wire values in declaration order.
            pub const ALL: &'static [&'static str] = &[$($wire),+];

            /// Returns the wire value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            /// Parses a wire value; unrecognized values yield `None`.
            #[must_use]
            pub fn from_wire(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ============================================================================
// SECTION: Enumerations
// ============================================================================

wire_enum! {
    /// Unit attached to a measurement.
    pub enum Units {
        /// Boolean flag.
        Boolean => "boolean",
        /// Bits per second.
        Bps => "bps",
        /// Kilobits per second.
        Kbps => "kbps",
        /// Megabits per second.
        Mbps => "Mbps",
        /// Gigabits per second.
        Gbps => "Gbps",
        /// Decibels.
        Db => "dB",
        /// Decibel-milliwatts.
        Dbm => "dBm",
        /// Plain count.
        Count => "count",
        /// Milliseconds.
        Millisecond => "millisecond",
        /// Seconds.
        Second => "second",
        /// Spectral efficiency.
        BpsPerHz => "bps/Hz",
        /// Percentage.
        Percentage => "percentage",
        /// Free text.
        Text => "text",
    }
}

wire_enum! {
    /// Outcome of a test, metric, or whole report.
    pub enum ResultType {
        /// Passed.
        Pass => "PASS",
        /// Failed.
        Fail => "FAIL",
        /// Passed with warnings.
        Warn => "WARN",
        /// Not executed.
        Skip => "SKIP",
    }
}

wire_enum! {
    /// Requirement level of a test case or metric.
    pub enum TestStatus {
        /// Always required.
        Mandatory => "mandatory",
        /// Required under stated conditions.
        ConditionallyMandatory => "conditionally.mandatory",
        /// Not required.
        Optional => "optional",
    }
}

wire_enum! {
    /// Kind of test campaign.
    pub enum TestType {
        /// Conformance testing.
        Conformance => "conformance",
        /// Interoperability testing.
        Interoperability => "interoperability",
        /// End-to-end testing.
        EndToEnd => "end-to-end",
        /// Anything else.
        Other => "Other",
    }
}

wire_enum! {
    /// O-RAN interface exercised by a test campaign.
    pub enum InterfaceUnderTest {
        /// O-RU open fronthaul.
        OruOfh => "o-ru.ofh",
        /// O-RU fronthaul management.
        OruFhm => "o-ru.fhm",
        /// O-DU open fronthaul.
        OduOfh => "o-du.ofh",
        /// O-DU fronthaul management.
        OduFhm => "o-du.fhm",
        /// O-DU E2.
        OduE2 => "o-du.e2",
        /// O-DU F1 control plane.
        OduF1C => "o-du.f1-c",
        /// O-DU F1 user plane.
        OduF1U => "o-du.f1-u",
        /// O-DU O1.
        OduO1 => "o-du.o1",
        /// O-CU F1 control plane.
        OcuF1C => "o-cu.f1-c",
        /// O-CU F1 user plane.
        OcuF1U => "o-cu.f1-u",
        /// O-CU E2.
        OcuE2 => "o-cu.e2",
        /// O-CU E1.
        OcuE1 => "o-cu.e1",
        /// O-CU O1.
        OcuO1 => "o-cu.o1",
        /// SMO fronthaul management.
        SmoFhm => "smo.fhm",
        /// SMO O2.
        SmoO2 => "smo.o2",
        /// SMO O1.
        SmoO1 => "smo.o1",
        /// Non-real-time RIC A1.
        NonRtRicA1 => "non-rt-ric.a1",
        /// Near-real-time RIC A1.
        NearRtRicA1 => "near-rt-ric.a1",
        /// Near-real-time RIC E2.
        NearRtRicE2 => "near-rt-ric.e2",
        /// Near-real-time RIC O1.
        NearRtRicO1 => "near-rt-ric.o1",
    }
}

wire_enum! {
    /// Radio environment of a deployment.
    pub enum DeploymentRfScenario {
        /// Rural.
        Rural => "rural",
        /// Urban.
        Urban => "urban",
        /// Dense urban.
        DenseUrban => "dense.urban",
        /// Line of sight.
        Los => "LOS",
        /// Non line of sight.
        Nlos => "NLOS",
        /// Near line of sight.
        NearLos => "nLOS",
    }
}
