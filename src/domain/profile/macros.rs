//! Macro for the fixed-vocabulary form choices.
//!
//! Every select/radio field of the profile forms is a closed set of labels.
//! `labeled_choice!` generates the enum, its canonical ordering, label lookup
//! and a serde representation that stores the human label, so records stay
//! readable and compatible with what the web client wrote.
//!
//! ```ignore
//! labeled_choice! {
//!     /// Smoking status.
//!     Smoking {
//!         Never => "Never",
//!         Former => "Former",
//!         Current => "Current",
//!     }
//! }
//! ```

macro_rules! labeled_choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Returns all choices in display order.
            pub fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }

            /// Returns the label shown to the user (and persisted).
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Looks a choice up by its label.
            pub fn from_label(label: &str) -> Option<Self> {
                Self::all().iter().copied().find(|c| c.label() == label)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

pub(crate) use labeled_choice;
