/// Newtype over an `i64` surrogate key as stored in the relational tables.
#[macro_export]
macro_rules! integer_key {
    ($TypeName: ident) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            Eq,
            Hash,
            Ord,
            PartialEq,
            PartialOrd,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $TypeName(i64);

        impl $TypeName {
            pub fn inner(&self) -> i64 {
                self.0
            }

            /// Zero stands in for a missing key.
            pub fn is_assigned(&self) -> bool {
                self.0 != 0
            }
        }

        impl PartialEq<i64> for $TypeName {
            fn eq(&self, other: &i64) -> bool {
                self.inner() == *other
            }
        }

        impl std::fmt::Display for $TypeName {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<i64> for $TypeName {
            fn from(id: i64) -> Self {
                $TypeName(id)
            }
        }

        impl From<$TypeName> for i64 {
            fn from(id: $TypeName) -> Self {
                id.inner()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    integer_key!(ProbeId);

    #[test]
    fn test_only_zero_is_unassigned() {
        assert!(ProbeId::from(7).is_assigned());
        assert!(ProbeId::from(-3).is_assigned());
        assert!(!ProbeId::from(0).is_assigned());
    }

    #[test]
    fn test_key_compares_with_raw_value() {
        let id = ProbeId::from(42);
        assert_eq!(id, 42);
        assert_eq!(id.to_string(), "42");
    }
}
