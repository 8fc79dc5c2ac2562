use crate::value::Value;

// Expand the scalar registry into the closed tag enum and its dispatch arms.
macro_rules! scalar_tag_from_registry {
    ( @entries $( ($scalar:ident, $ty:ty, tag = $tag:literal) ),* $(,)? ) => {
        ///
        /// ScalarTag
        ///
        /// One variant per scalar registry entry. The discriminant is the
        /// wire tag, which is also the entry's position in the registry.
        ///

        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[repr(u8)]
        pub enum ScalarTag {
            $( $scalar = $tag, )*
        }

        impl ScalarTag {
            /// Every registry entry, in wire-tag order.
            pub const ALL: &'static [Self] = &[ $( Self::$scalar, )* ];

            /// Fixed payload width in bytes.
            #[must_use]
            pub const fn width(self) -> usize {
                match self {
                    $( Self::$scalar => size_of::<$ty>(), )*
                }
            }

            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$scalar => stringify!($scalar), )*
                }
            }

            /// Exact variant match; no widening or narrowing.
            #[must_use]
            pub const fn matches(self, value: &Value) -> bool {
                match (self, value) {
                    $( (Self::$scalar, Value::$scalar(_)) => true, )*
                    _ => false,
                }
            }

            // Append the big-endian payload of `value`.
            // Returns false when `value` is not this tag's variant.
            pub(crate) fn write_payload(self, value: &Value, out: &mut Vec<u8>) -> bool {
                match (self, value) {
                    $(
                        (Self::$scalar, Value::$scalar(v)) => {
                            out.extend_from_slice(&v.to_be_bytes());
                            true
                        }
                    )*
                    _ => false,
                }
            }

            // Consume one fixed-width payload from the front of `input`.
            // Returns None (leaving `input` untouched) when too few bytes remain.
            pub(crate) fn read_payload<'a>(self, input: &mut &'a [u8]) -> Option<Value> {
                let bytes: &'a [u8] = *input;

                match self {
                    $(
                        Self::$scalar => {
                            let (head, rest) = bytes.split_first_chunk::<{ size_of::<$ty>() }>()?;
                            *input = rest;

                            Some(Value::$scalar(<$ty>::from_be_bytes(*head)))
                        }
                    )*
                }
            }
        }
    };
}

scalar_registry!(scalar_tag_from_registry);

impl ScalarTag {
    /// Wire tag for this entry.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Resolve a wire tag by direct indexing into the registry.
    #[must_use]
    pub fn from_tag(raw: u8) -> Option<Self> {
        Self::ALL.get(usize::from(raw)).copied()
    }

    /// Resolve the registry entry for a runtime value by linear scan.
    #[must_use]
    pub fn for_value(value: &Value) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.matches(value))
    }
}
