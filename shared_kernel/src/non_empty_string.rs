#[macro_export]
macro_rules! non_empty_string {
    ($TypeName: ident) => {
        #[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
        #[serde(transparent)]
        pub struct $TypeName(String);

        impl $TypeName {
            pub fn inner(&self) -> String {
                self.0.clone()
            }
        }

        impl PartialEq<str> for $TypeName {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl std::fmt::Display for $TypeName {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $TypeName {
            fn as_ref(&self) -> &str {
                self.0.as_ref()
            }
        }

        impl TryFrom<String> for $TypeName {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                let value = value.trim();
                if value.is_empty() {
                    return Err(format!("{} cannot be empty", stringify!($TypeName)));
                }
                Ok($TypeName(value.to_string()))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    non_empty_string!(ProbeName);

    #[test]
    fn test_blank_values_are_rejected() {
        assert!(ProbeName::try_from("   ".to_string()).is_err());
        assert!(ProbeName::try_from(String::new()).is_err());
    }

    #[test]
    fn test_values_are_trimmed() {
        let name = ProbeName::try_from("  Ada ".to_string()).unwrap();
        assert_eq!(name.inner(), "Ada");
    }
}
